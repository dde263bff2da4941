// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::api::{AnalysisRecord, ReportDownload, UploadResponse};
use crate::domain::PatientId;
use crate::error::ApiError;
use crate::ui::food_recommendations;
use crate::ui::header;
use crate::ui::notifications;
use crate::ui::patient_selector;
use crate::ui::report_viewer;
use crate::ui::uploader;
use iced::window;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Header(header::Message),
    Uploader(uploader::Message),
    PatientSelector(patient_selector::Message),
    Recommendations(food_recommendations::Message),
    ReportViewer(report_viewer::Message),
    Notification(notifications::NotificationMessage),
    /// Periodic tick for toast expiry and the spinner.
    Tick(Instant),
    /// A window event told us which window we are drawing into.
    WindowSeen(window::Id),
    FileHovered,
    FilesHoveredLeft,
    FileDropped(PathBuf),
    /// Result from the CSV picker.
    OpenFileDialogResult(Option<PathBuf>),
    UploadCompleted(Result<UploadResponse, ApiError>),
    /// Result of the `--analysis` startup fetch.
    AnalysisLoaded(Result<AnalysisRecord, ApiError>),
    ReportLoaded {
        patient: PatientId,
        result: Result<String, ApiError>,
    },
    /// Download headers arrived; the save dialog comes next.
    DownloadStarted(Result<DownloadHandle, ApiError>),
    /// Save dialog closed with the chosen destination, if any.
    DownloadDestination {
        download: DownloadHandle,
        destination: Option<PathBuf>,
    },
    DownloadCompleted {
        destination: PathBuf,
        result: Result<u64, ApiError>,
    },
}

/// A started download carried through messages.
///
/// The response body is not `Clone`, so it travels behind a shared slot
/// and is taken out exactly once.
#[derive(Debug, Clone)]
pub struct DownloadHandle {
    patient: PatientId,
    slot: Arc<Mutex<Option<ReportDownload>>>,
}

impl DownloadHandle {
    #[must_use]
    pub fn new(patient: PatientId, download: ReportDownload) -> Self {
        Self {
            patient,
            slot: Arc::new(Mutex::new(Some(download))),
        }
    }

    #[must_use]
    pub fn patient(&self) -> PatientId {
        self.patient
    }

    /// Suggested file name, if the download has not been taken yet.
    #[must_use]
    pub fn file_name(&self) -> Option<String> {
        self.slot
            .lock()
            .ok()
            .and_then(|slot| slot.as_ref().map(|d| d.file_name().to_string()))
    }

    /// Takes the download out; later calls return `None`.
    #[must_use]
    pub fn take(&self) -> Option<ReportDownload> {
        self.slot.lock().ok().and_then(|mut slot| slot.take())
    }
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional language override (`en`, `ko`, `zh` or `ar`).
    pub lang: Option<String>,
    /// Optional backend base URL, takes precedence over config and environment.
    pub server: Option<String>,
    /// Optional data directory override (for `state.cbor`).
    /// Takes precedence over `ONCOCROSS_DATA_DIR`.
    pub data_dir: Option<String>,
    /// Optional config directory override (for `settings.toml`).
    /// Takes precedence over `ONCOCROSS_CONFIG_DIR`.
    pub config_dir: Option<String>,
    /// Stored analysis to open on startup.
    pub analysis: Option<u64>,
}
