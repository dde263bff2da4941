// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Each component returns an `Event`; the handlers here turn those events
//! into session transitions and async tasks.

use super::message::DownloadHandle;
use super::persisted_state::AppState;
use super::Message;
use crate::api::{self, AnalysisRecord, ApiClient, UploadResponse};
use crate::domain::PatientId;
use crate::error::ApiError;
use crate::i18n::{LanguageStore, Translator};
use crate::session::Session;
use crate::ui::food_recommendations::{self, Event as RecommendationsEvent};
use crate::ui::header::{self, Event as HeaderEvent};
use crate::ui::notifications::{self, Notification};
use crate::ui::patient_selector::{self, Event as PatientSelectorEvent};
use crate::ui::report_viewer::{self, Event as ReportEvent};
use crate::ui::uploader::{self, Event as UploaderEvent};
use crate::ui::widgets::animated_spinner;
use crate::upload::{SubmitError, Uploader};
use iced::{window, Task};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Context for update operations containing mutable references to app state.
pub struct UpdateContext<'a> {
    pub translator: &'a Translator,
    pub language: &'a LanguageStore,
    pub api: Option<&'a ApiClient>,
    pub session: &'a mut Session,
    pub uploader: &'a mut Uploader,
    pub report: &'a mut Option<report_viewer::State>,
    pub notifications: &'a mut notifications::Manager,
    pub app_state: &'a mut AppState,
    pub data_dir: Option<PathBuf>,
    pub drag_active: &'a mut bool,
    pub drop_burst: &'a mut Option<Instant>,
    pub spinner_angle: &'a mut f32,
    pub window_id: &'a mut Option<window::Id>,
}

pub fn handle_header_message(ctx: &mut UpdateContext<'_>, message: header::Message) -> Task<Message> {
    match header::update(&message, ctx.translator.language()) {
        HeaderEvent::None => {}
        HeaderEvent::LanguageSelected(language) => {
            ctx.language.set_language(language.code());
        }
    }
    Task::none()
}

pub fn handle_uploader_message(
    ctx: &mut UpdateContext<'_>,
    message: uploader::Message,
) -> Task<Message> {
    match uploader::update(&message, ctx.uploader.is_uploading()) {
        UploaderEvent::None => Task::none(),
        UploaderEvent::OpenFileDialog => open_file_dialog(ctx.app_state.last_open_directory.clone()),
    }
}

fn open_file_dialog(last_directory: Option<PathBuf>) -> Task<Message> {
    Task::perform(
        async move {
            let mut dialog = rfd::AsyncFileDialog::new().add_filter("CSV", &["csv", "CSV"]);

            if let Some(dir) = last_directory {
                if dir.exists() {
                    dialog = dialog.set_directory(&dir);
                }
            }

            dialog.pick_file().await.map(|h| h.path().to_path_buf())
        },
        Message::OpenFileDialogResult,
    )
}

/// Hands a picked or dropped file to the uploader and starts the request.
pub fn begin_upload(ctx: &mut UpdateContext<'_>, path: PathBuf) -> Task<Message> {
    let pending = match ctx.uploader.submit(&path) {
        Ok(pending) => pending,
        Err(SubmitError::Busy | SubmitError::NotCsv(_)) => return Task::none(),
    };

    ctx.app_state.set_last_open_directory_from_file(&pending.path);
    save_app_state(ctx);

    let Some(api) = ctx.api.cloned() else {
        tracing::warn!("no usable backend URL, upload aborted");
        ctx.uploader.finish();
        ctx.notifications.push(Notification::error("analysis.error"));
        return Task::none();
    };

    Task::perform(
        async move { api.upload_csv(pending.path).await },
        Message::UploadCompleted,
    )
}

pub fn handle_upload_completed(
    ctx: &mut UpdateContext<'_>,
    result: Result<UploadResponse, ApiError>,
) -> Task<Message> {
    ctx.uploader.finish();

    let response = match result {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(error = %err, "upload failed");
            ctx.notifications.push(Notification::error("analysis.error"));
            return Task::none();
        }
    };

    let total = response
        .total_patients
        .unwrap_or(response.patients.len() as u64);
    let ingested = response.ingest();
    notify_rejected(ctx, ingested.rejected_recommendations);

    match ctx.session.receive_patients(ingested.patients) {
        Ok(()) => {
            *ctx.report = None;
            ctx.notifications
                .push(Notification::success("notification.success").with_arg("count", total.to_string()));
        }
        Err(err) => {
            tracing::info!(error = %err, "upload returned no patients");
            ctx.notifications.push(Notification::warning("notification.noData"));
        }
    }
    Task::none()
}

/// Opens one stored analysis as a single-patient session.
pub fn handle_analysis_loaded(
    ctx: &mut UpdateContext<'_>,
    result: Result<AnalysisRecord, ApiError>,
) -> Task<Message> {
    let record = match result {
        Ok(record) => record,
        Err(err) => {
            tracing::warn!(error = %err, "stored analysis could not be fetched");
            ctx.notifications.push(Notification::error("analysis.error"));
            return Task::none();
        }
    };

    let (patient, rejected) = record.into_patient();
    let id = patient.id();
    notify_rejected(ctx, rejected);

    let selected = ctx
        .session
        .receive_patients(vec![patient])
        .and_then(|()| ctx.session.select_patient(id));
    match selected {
        Ok(()) => {
            *ctx.report = None;
            ctx.notifications
                .push(Notification::info("notification.analysisLoaded"));
        }
        Err(err) => tracing::warn!(error = %err, "stored analysis could not be shown"),
    }
    Task::none()
}

fn notify_rejected(ctx: &mut UpdateContext<'_>, rejected: usize) {
    if rejected > 0 {
        ctx.notifications.push(
            Notification::warning("notification.malformed").with_arg("count", rejected.to_string()),
        );
    }
}

pub fn handle_patient_selector_message(
    ctx: &mut UpdateContext<'_>,
    message: patient_selector::Message,
) -> Task<Message> {
    match patient_selector::update(&message) {
        PatientSelectorEvent::SelectPatient(id) => {
            if let Err(err) = ctx.session.select_patient(id) {
                tracing::debug!(error = %err, "patient selection ignored");
            }
            Task::none()
        }
        PatientSelectorEvent::StartNew => reset_session(ctx),
    }
}

pub fn handle_recommendations_message(
    ctx: &mut UpdateContext<'_>,
    message: food_recommendations::Message,
) -> Task<Message> {
    match food_recommendations::update(&message) {
        RecommendationsEvent::ShowReport => open_report(ctx),
        RecommendationsEvent::Reset => reset_session(ctx),
        RecommendationsEvent::Back => {
            ctx.session.go_back();
            *ctx.report = None;
            Task::none()
        }
    }
}

fn open_report(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let Some(id) = ctx.session.selected_patient().map(|patient| patient.id()) else {
        return Task::none();
    };
    if let Err(err) = ctx.session.show_report() {
        tracing::debug!(error = %err, "report not opened");
        return Task::none();
    }
    *ctx.report = Some(report_viewer::State::loading(id));
    fetch_report(ctx, id)
}

fn fetch_report(ctx: &mut UpdateContext<'_>, patient: PatientId) -> Task<Message> {
    match ctx.api.cloned() {
        Some(api) => Task::perform(
            async move { api.fetch_report(patient).await },
            move |result| Message::ReportLoaded { patient, result },
        ),
        None => Task::done(Message::ReportLoaded {
            patient,
            result: Err(ApiError::InvalidBaseUrl(String::new())),
        }),
    }
}

pub fn handle_report_message(
    ctx: &mut UpdateContext<'_>,
    message: report_viewer::Message,
) -> Task<Message> {
    let Some(state) = ctx.report.as_mut() else {
        return Task::none();
    };

    match report_viewer::update(state, &message) {
        ReportEvent::None => Task::none(),
        ReportEvent::Back => {
            let task = leave_fullscreen(ctx);
            if let Err(err) = ctx.session.hide_report() {
                tracing::debug!(error = %err, "report already closed");
            }
            *ctx.report = None;
            task
        }
        ReportEvent::SetFullscreen(fullscreen) => set_window_mode(ctx, fullscreen),
        ReportEvent::Download(patient) => start_download(ctx, patient),
        ReportEvent::Reset => reset_session(ctx),
        ReportEvent::Refetch(patient) => fetch_report(ctx, patient),
    }
}

pub fn handle_report_loaded(
    ctx: &mut UpdateContext<'_>,
    patient: PatientId,
    result: Result<String, ApiError>,
) -> Task<Message> {
    match ctx.report.as_mut() {
        Some(state) => {
            state.apply(patient, result);
        }
        None => tracing::debug!(%patient, "report arrived after the view was closed"),
    }
    Task::none()
}

fn start_download(ctx: &mut UpdateContext<'_>, patient: PatientId) -> Task<Message> {
    let Some(api) = ctx.api.cloned() else {
        return Task::done(Message::DownloadStarted(Err(ApiError::InvalidBaseUrl(
            String::new(),
        ))));
    };

    tracing::info!(url = %api.download_url(patient), "downloading report");
    Task::perform(
        async move {
            api.start_download(patient)
                .await
                .map(|download| DownloadHandle::new(patient, download))
        },
        Message::DownloadStarted,
    )
}

/// Headers are in: ask where to save.
pub fn handle_download_started(
    ctx: &mut UpdateContext<'_>,
    result: Result<DownloadHandle, ApiError>,
) -> Task<Message> {
    let handle = match result {
        Ok(handle) => handle,
        Err(err) => {
            tracing::warn!(error = %err, "report download failed");
            finish_download(ctx);
            ctx.notifications
                .push(Notification::error("notification.downloadError"));
            return Task::none();
        }
    };

    let file_name = handle
        .file_name()
        .unwrap_or_else(|| api::default_report_file_name(handle.patient()));
    let last_save_directory = ctx.app_state.last_save_directory.clone();

    Task::perform(
        async move {
            let mut dialog = rfd::AsyncFileDialog::new()
                .set_file_name(&file_name)
                .add_filter("HTML", &["html", "htm"]);

            if let Some(dir) = last_save_directory {
                if dir.exists() {
                    dialog = dialog.set_directory(&dir);
                }
            }

            dialog.save_file().await.map(|h| h.path().to_path_buf())
        },
        move |destination| Message::DownloadDestination {
            download: handle,
            destination,
        },
    )
}

pub fn handle_download_destination(
    ctx: &mut UpdateContext<'_>,
    download: DownloadHandle,
    destination: Option<PathBuf>,
) -> Task<Message> {
    let Some(destination) = destination else {
        tracing::debug!("report download cancelled");
        finish_download(ctx);
        return Task::none();
    };
    let Some(download) = download.take() else {
        finish_download(ctx);
        return Task::none();
    };

    ctx.app_state.set_last_save_directory_from_file(&destination);
    save_app_state(ctx);

    Task::perform(
        {
            let destination = destination.clone();
            async move { download.save_to(&destination).await }
        },
        move |result| Message::DownloadCompleted {
            destination,
            result,
        },
    )
}

pub fn handle_download_completed(
    ctx: &mut UpdateContext<'_>,
    destination: &std::path::Path,
    result: Result<u64, ApiError>,
) -> Task<Message> {
    finish_download(ctx);
    match result {
        Ok(bytes) => {
            tracing::info!(path = %destination.display(), bytes, "report saved");
            ctx.notifications
                .push(Notification::success("notification.downloadSuccess"));
        }
        Err(err) => {
            tracing::warn!(path = %destination.display(), error = %err, "report could not be saved");
            ctx.notifications
                .push(Notification::error("notification.downloadError"));
        }
    }
    Task::none()
}

fn finish_download(ctx: &mut UpdateContext<'_>) {
    if let Some(state) = ctx.report.as_mut() {
        state.finish_download();
    }
}

/// Drops closer than this to the first drop of a gesture belong to it.
const DROP_BURST_WINDOW: Duration = Duration::from_millis(500);

/// Handles one file of a window drop.
///
/// The window reports a multi-file drop as one event per file. Only the first
/// file of a gesture is considered, whether or not it is a CSV.
pub fn handle_file_dropped(
    ctx: &mut UpdateContext<'_>,
    path: PathBuf,
    accepts_drops: bool,
    now: Instant,
) -> Task<Message> {
    *ctx.drag_active = false;
    if !accepts_drops {
        tracing::debug!(path = %path.display(), "file drop ignored outside the upload screen");
        return Task::none();
    }
    if !starts_drop_gesture(*ctx.drop_burst, now) {
        tracing::debug!(path = %path.display(), "extra file of a multi-file drop ignored");
        return Task::none();
    }
    *ctx.drop_burst = Some(now);
    begin_upload(ctx, path)
}

fn starts_drop_gesture(burst: Option<Instant>, now: Instant) -> bool {
    burst.is_none_or(|first| now.saturating_duration_since(first) >= DROP_BURST_WINDOW)
}

pub fn handle_tick(ctx: &mut UpdateContext<'_>, now: Instant) -> Task<Message> {
    ctx.notifications.tick(now);
    if is_busy(ctx.uploader, ctx.report.as_ref()) {
        *ctx.spinner_angle = animated_spinner::advance(*ctx.spinner_angle);
    }
    Task::none()
}

/// An upload or a report fetch is in flight.
#[must_use]
pub fn is_busy(uploader: &Uploader, report: Option<&report_viewer::State>) -> bool {
    uploader.is_uploading()
        || report.is_some_and(|state| matches!(state.status(), report_viewer::Status::Loading))
}

/// Back to the upload screen, dropping every result.
fn reset_session(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let task = leave_fullscreen(ctx);
    ctx.session.reset();
    *ctx.report = None;
    task
}

fn leave_fullscreen(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let fullscreen = ctx
        .report
        .as_ref()
        .is_some_and(report_viewer::State::is_fullscreen);
    if !fullscreen {
        return Task::none();
    }
    if let Some(state) = ctx.report.as_mut() {
        state.set_fullscreen(false);
    }
    set_window_mode(ctx, false)
}

fn set_window_mode(ctx: &UpdateContext<'_>, fullscreen: bool) -> Task<Message> {
    let Some(window_id) = *ctx.window_id else {
        tracing::debug!("no window id yet, fullscreen change skipped");
        return Task::none();
    };
    let mode = if fullscreen {
        window::Mode::Fullscreen
    } else {
        window::Mode::Windowed
    };
    window::set_mode(window_id, mode)
}

fn save_app_state(ctx: &mut UpdateContext<'_>) {
    if let Some(key) = ctx.app_state.save_to(ctx.data_dir.clone()) {
        ctx.notifications.push(Notification::warning(key));
    }
}
