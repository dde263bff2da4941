// SPDX-License-Identifier: MPL-2.0
//! HTTP client for the analysis backend.
//!
//! Four endpoints are consumed, all relative to a configurable base URL:
//!
//! | Method | Path                          | Body / response                  |
//! |--------|-------------------------------|----------------------------------|
//! | POST   | `/api/upload/`                | multipart `file` → JSON patients |
//! | GET    | `/api/analysis/{id}/`         | JSON analysis record             |
//! | GET    | `/api/report/{id}/`           | HTML report                      |
//! | GET    | `/api/report/{id}/download/`  | HTML attachment                  |
//!
//! No timeout is configured: a hung backend keeps the request pending.

pub mod types;

pub use types::{AnalysisRecord, Ingested, RawPatient, UploadResponse};

use crate::domain::PatientId;
use crate::error::ApiError;
use futures_util::StreamExt;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::multipart::{Form, Part};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

const USER_AGENT: &str = concat!("OncoCross/", env!("CARGO_PKG_VERSION"));

/// Returns `{base}/api/report/{id}/`.
#[must_use]
pub fn build_report_url(base_url: &str, id: PatientId) -> String {
    format!("{}/api/report/{id}/", base_url.trim_end_matches('/'))
}

/// Returns `{base}/api/report/{id}/download/`.
#[must_use]
pub fn build_download_url(base_url: &str, id: PatientId) -> String {
    format!("{}/api/report/{id}/download/", base_url.trim_end_matches('/'))
}

/// File name the backend uses for report attachments.
#[must_use]
pub fn default_report_file_name(id: PatientId) -> String {
    format!("nutrition_report_{id}.html")
}

/// Extracts the `filename` parameter of a `Content-Disposition` header.
///
/// Directory components are stripped so the name is safe to join onto a
/// folder.
#[must_use]
pub fn parse_content_disposition_filename(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|param| {
            let (name, value) = param.split_once('=')?;
            name.trim()
                .eq_ignore_ascii_case("filename")
                .then(|| value.trim().trim_matches('"'))
        })
        .and_then(|value| value.rsplit(['/', '\\']).next())
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
        .map(str::to_string)
}

/// Trims the base URL and checks its scheme.
pub fn normalize_base_url(base_url: &str) -> Result<String, ApiError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .ok_or_else(|| ApiError::InvalidBaseUrl(base_url.to_string()))?;
    if host.is_empty() {
        return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
    }
    Ok(trimmed.to_string())
}

fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Http {
            status: status.as_u16(),
        })
    }
}

/// Typed wrapper over the backend endpoints. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(base_url)?;
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { base_url, http })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn report_url(&self, id: PatientId) -> String {
        build_report_url(&self.base_url, id)
    }

    #[must_use]
    pub fn download_url(&self, id: PatientId) -> String {
        build_download_url(&self.base_url, id)
    }

    /// Sends a CSV file as multipart field `file`.
    pub async fn upload_csv(&self, path: PathBuf) -> Result<UploadResponse, ApiError> {
        let bytes = tokio::fs::read(&path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.csv".to_string());

        tracing::info!(file = %file_name, size = bytes.len(), "uploading patient data");

        let part = Part::bytes(bytes).file_name(file_name).mime_str("text/csv")?;
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(format!("{}/api/upload/", self.base_url))
            .multipart(form)
            .send()
            .await?;
        let body = ensure_success(response)?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn fetch_analysis(&self, id: PatientId) -> Result<AnalysisRecord, ApiError> {
        let response = self
            .http
            .get(format!("{}/api/analysis/{id}/", self.base_url))
            .send()
            .await?;
        let body = ensure_success(response)?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetches the rendered HTML report.
    pub async fn fetch_report(&self, id: PatientId) -> Result<String, ApiError> {
        let response = self.http.get(self.report_url(id)).send().await?;
        Ok(ensure_success(response)?.text().await?)
    }

    /// Starts a report download and returns once the headers are in.
    ///
    /// The body is not read until [`ReportDownload::save_to`] is called.
    pub async fn start_download(&self, id: PatientId) -> Result<ReportDownload, ApiError> {
        let response = self.http.get(self.download_url(id)).send().await?;
        let response = ensure_success(response)?;

        let file_name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_content_disposition_filename)
            .unwrap_or_else(|| default_report_file_name(id));

        Ok(ReportDownload {
            file_name,
            response,
        })
    }
}

/// A report download whose headers have arrived.
#[derive(Debug)]
pub struct ReportDownload {
    file_name: String,
    response: reqwest::Response,
}

impl ReportDownload {
    /// Suggested file name from `Content-Disposition`.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Streams the body into `destination`, returning the bytes written.
    ///
    /// A partially written file is removed on failure.
    pub async fn save_to(self, destination: &Path) -> Result<u64, ApiError> {
        let result = Self::stream_into(self.response, destination).await;
        if result.is_err() {
            if let Err(err) = tokio::fs::remove_file(destination).await {
                tracing::debug!(error = %err, "could not remove partial download");
            }
        }
        result
    }

    async fn stream_into(response: reqwest::Response, destination: &Path) -> Result<u64, ApiError> {
        let mut file = tokio::fs::File::create(destination).await?;
        let mut written: u64 = 0;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_urls_are_built_from_base() {
        let id = PatientId::new(42);
        assert_eq!(
            build_report_url("http://localhost:8000", id),
            "http://localhost:8000/api/report/42/"
        );
        assert_eq!(
            build_download_url("http://localhost:8000", id),
            "http://localhost:8000/api/report/42/download/"
        );
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let id = PatientId::new(5);
        assert_eq!(
            build_report_url("https://api.example.org//", id),
            "https://api.example.org/api/report/5/"
        );
    }

    #[test]
    fn content_disposition_filename_is_extracted() {
        assert_eq!(
            parse_content_disposition_filename(
                "attachment; filename=\"nutrition_report_7.html\""
            )
            .as_deref(),
            Some("nutrition_report_7.html")
        );
        assert_eq!(
            parse_content_disposition_filename("attachment; FILENAME=report.html").as_deref(),
            Some("report.html")
        );
    }

    #[test]
    fn content_disposition_strips_directories() {
        assert_eq!(
            parse_content_disposition_filename("attachment; filename=\"../../etc/passwd\"")
                .as_deref(),
            Some("passwd")
        );
        assert_eq!(
            parse_content_disposition_filename("attachment; filename=\"..\""),
            None
        );
        assert_eq!(parse_content_disposition_filename("inline"), None);
    }

    #[test]
    fn base_url_requires_http_scheme() {
        assert_eq!(
            normalize_base_url(" http://localhost:8000/ ").unwrap(),
            "http://localhost:8000"
        );
        assert!(matches!(
            normalize_base_url("localhost:8000"),
            Err(ApiError::InvalidBaseUrl(_))
        ));
        assert!(normalize_base_url("https://").is_err());
    }

    #[test]
    fn client_exposes_report_urls() {
        let client = ApiClient::new("http://127.0.0.1:8000/").unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8000");
        assert_eq!(
            client.report_url(PatientId::new(3)),
            "http://127.0.0.1:8000/api/report/3/"
        );
    }

    #[test]
    fn default_file_name_matches_backend() {
        assert_eq!(
            default_report_file_name(PatientId::new(12)),
            "nutrition_report_12.html"
        );
    }
}
