// SPDX-License-Identifier: MPL-2.0
//! Single-flight CSV upload state.
//!
//! The uploader only tracks whether a request is in flight; the request itself
//! is run by the caller with the returned [`PendingUpload`].

use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

/// Why a file was not accepted for upload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("an upload is already in progress")]
    Busy,
    #[error("not a CSV file: {0}")]
    NotCsv(PathBuf),
}

/// A file accepted for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpload {
    pub path: PathBuf,
    pub file_name: String,
}

#[derive(Debug, Clone, Default)]
enum State {
    #[default]
    Idle,
    Uploading {
        file_name: String,
        started_at: Instant,
    },
}

#[derive(Debug, Clone, Default)]
pub struct Uploader {
    state: State,
}

/// Returns true for paths ending in `.csv`, ignoring case.
#[must_use]
pub fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

impl Uploader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts `path` when idle and the file looks like a CSV.
    ///
    /// Rejections leave the state untouched.
    pub fn submit(&mut self, path: &Path) -> Result<PendingUpload, SubmitError> {
        if self.is_uploading() {
            tracing::debug!(path = %path.display(), "upload already in flight");
            return Err(SubmitError::Busy);
        }
        if !is_csv(path) {
            tracing::debug!(path = %path.display(), "ignoring non-CSV file");
            return Err(SubmitError::NotCsv(path.to_path_buf()));
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        tracing::info!(file = %file_name, "upload started");
        self.state = State::Uploading {
            file_name: file_name.clone(),
            started_at: Instant::now(),
        };

        Ok(PendingUpload {
            path: path.to_path_buf(),
            file_name,
        })
    }

    /// Returns to idle whatever the outcome was.
    pub fn finish(&mut self) {
        if let State::Uploading {
            file_name,
            started_at,
        } = &self.state
        {
            tracing::info!(
                file = %file_name,
                elapsed_ms = started_at.elapsed().as_millis() as u64,
                "upload finished"
            );
        }
        self.state = State::Idle;
    }

    #[must_use]
    pub fn is_uploading(&self) -> bool {
        matches!(self.state, State::Uploading { .. })
    }

    /// Name of the file being uploaded, if any.
    #[must_use]
    pub fn current_file(&self) -> Option<&str> {
        match &self.state {
            State::Uploading { file_name, .. } => Some(file_name),
            State::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_extension_is_case_insensitive() {
        assert!(is_csv(Path::new("patients.csv")));
        assert!(is_csv(Path::new("/tmp/PATIENTS.CSV")));
        assert!(!is_csv(Path::new("patients.xlsx")));
        assert!(!is_csv(Path::new("patients.csv.bak")));
        assert!(!is_csv(Path::new("csv")));
    }

    #[test]
    fn submit_csv_starts_upload() {
        let mut uploader = Uploader::new();
        let pending = uploader.submit(Path::new("/data/patients.csv")).unwrap();

        assert_eq!(pending.file_name, "patients.csv");
        assert_eq!(pending.path, PathBuf::from("/data/patients.csv"));
        assert!(uploader.is_uploading());
        assert_eq!(uploader.current_file(), Some("patients.csv"));
    }

    #[test]
    fn non_csv_is_rejected_without_state_change() {
        let mut uploader = Uploader::new();
        let err = uploader.submit(Path::new("notes.txt")).unwrap_err();

        assert_eq!(err, SubmitError::NotCsv(PathBuf::from("notes.txt")));
        assert!(!uploader.is_uploading());
    }

    #[test]
    fn second_submit_while_uploading_is_busy() {
        let mut uploader = Uploader::new();
        uploader.submit(Path::new("a.csv")).unwrap();

        assert_eq!(uploader.submit(Path::new("b.csv")), Err(SubmitError::Busy));
        assert_eq!(uploader.current_file(), Some("a.csv"));
    }

    #[test]
    fn finish_returns_to_idle() {
        let mut uploader = Uploader::new();
        uploader.submit(Path::new("a.csv")).unwrap();
        uploader.finish();

        assert!(!uploader.is_uploading());
        assert!(uploader.submit(Path::new("b.csv")).is_ok());
    }

    #[test]
    fn finish_when_idle_is_harmless() {
        let mut uploader = Uploader::new();
        uploader.finish();
        assert!(!uploader.is_uploading());
    }
}
