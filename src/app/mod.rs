// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the upload, patient,
//! recommendation and report screens.
//!
//! The `App` struct owns the session, the uploader, the notifications and the
//! translator, and turns component events into session transitions and
//! backend requests.

pub mod config;
mod message;
pub mod paths;
pub mod persisted_state;
mod screen;
mod subscription;
mod update;
mod view;

pub use message::{DownloadHandle, Flags, Message};
pub use screen::Screen;

use crate::api::ApiClient;
use crate::domain::PatientId;
use crate::i18n::{self, Catalog, LanguageStore, Translator};
use crate::session::Session;
use crate::ui::notifications;
use crate::ui::report_viewer;
use crate::upload::Uploader;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Root Iced application state.
pub struct App {
    language: LanguageStore,
    translator: Translator,
    /// `None` when the configured base URL is unusable.
    api: Option<ApiClient>,
    session: Session,
    uploader: Uploader,
    /// Present while the report screen is open.
    report: Option<report_viewer::State>,
    notifications: notifications::Manager,
    /// Persisted application state (last open and save directories).
    app_state: persisted_state::AppState,
    /// Directory override for `state.cbor`.
    data_dir: Option<PathBuf>,
    /// A file is being dragged over the window.
    drag_active: bool,
    /// Time of the first drop of the current gesture.
    drop_burst: Option<Instant>,
    spinner_angle: f32,
    window_id: Option<window::Id>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen())
            .field("language", &self.translator.language())
            .field("uploading", &self.uploader.is_uploading())
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 760;
pub const WINDOW_DEFAULT_WIDTH: u32 = 1100;
pub const MIN_WINDOW_HEIGHT: u32 = 560;
pub const MIN_WINDOW_WIDTH: u32 = 720;

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced requires an `Fn` boot function; the flags are consumed on the
    // first call and later calls boot with defaults.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes application state from the flags and persisted files.
    pub fn new(flags: Flags) -> (Self, Task<Message>) {
        Self::with_dirs(flags, None, None)
    }

    /// Same as [`App::new`] with explicit config and data directories.
    fn with_dirs(
        flags: Flags,
        config_dir: Option<PathBuf>,
        data_dir: Option<PathBuf>,
    ) -> (Self, Task<Message>) {
        let mut notifications = notifications::Manager::new();

        let (config, config_warning) = config::load_with_override(config_dir.clone());
        let (app_state, state_warning) = persisted_state::AppState::load_from(data_dir.clone());
        for key in [config_warning, state_warning].into_iter().flatten() {
            notifications.push(notifications::Notification::warning(key));
        }

        let initial = i18n::resolve_language(
            flags.lang.as_deref(),
            config.general.language.as_deref(),
        );
        let language = LanguageStore::with_config_dir(initial, config_dir);
        let translator = language.translator(Arc::new(Catalog::embedded()));

        let server_url = config.resolve_server_url(flags.server.as_deref());
        let api = match ApiClient::new(&server_url) {
            Ok(api) => {
                tracing::info!(server = api.base_url(), language = %initial, "client ready");
                Some(api)
            }
            Err(err) => {
                tracing::error!(server = %server_url, error = %err, "unusable backend URL");
                notifications.push(notifications::Notification::error(
                    "notification.invalidServer",
                ));
                None
            }
        };

        let task = match (flags.analysis, api.clone()) {
            (Some(id), Some(api)) => {
                let id = PatientId::new(id);
                tracing::info!(%id, "opening stored analysis");
                Task::perform(
                    async move { api.fetch_analysis(id).await },
                    Message::AnalysisLoaded,
                )
            }
            _ => Task::none(),
        };

        let app = Self {
            language,
            translator,
            api,
            session: Session::new(),
            uploader: Uploader::new(),
            report: None,
            notifications,
            app_state,
            data_dir,
            drag_active: false,
            drop_burst: None,
            spinner_angle: 0.0,
            window_id: None,
        };

        (app, task)
    }

    /// Screen for the current session state.
    #[must_use]
    pub fn screen(&self) -> Screen {
        Screen::from(self.session.view())
    }

    fn title(&self) -> String {
        let app_name = self.translator.resolve("app.title");
        match self.session.selected_patient() {
            Some(patient) => format!("{} - {app_name}", patient.name()),
            None => app_name,
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        let event_sub = subscription::create_event_subscription(self.screen());
        let tick_sub = subscription::create_tick_subscription(
            update::is_busy(&self.uploader, self.report.as_ref()),
            self.notifications.has_notifications(),
        );

        Subscription::batch([event_sub, tick_sub])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let accepts_drops = self.screen().accepts_file_drops();
        let mut ctx = update::UpdateContext {
            translator: &self.translator,
            language: &self.language,
            api: self.api.as_ref(),
            session: &mut self.session,
            uploader: &mut self.uploader,
            report: &mut self.report,
            notifications: &mut self.notifications,
            app_state: &mut self.app_state,
            data_dir: self.data_dir.clone(),
            drag_active: &mut self.drag_active,
            drop_burst: &mut self.drop_burst,
            spinner_angle: &mut self.spinner_angle,
            window_id: &mut self.window_id,
        };

        match message {
            Message::Header(message) => update::handle_header_message(&mut ctx, message),
            Message::Uploader(message) => update::handle_uploader_message(&mut ctx, message),
            Message::PatientSelector(message) => {
                update::handle_patient_selector_message(&mut ctx, message)
            }
            Message::Recommendations(message) => {
                update::handle_recommendations_message(&mut ctx, message)
            }
            Message::ReportViewer(message) => update::handle_report_message(&mut ctx, message),
            Message::Notification(message) => {
                ctx.notifications.handle_message(&message);
                Task::none()
            }
            Message::Tick(now) => update::handle_tick(&mut ctx, now),
            Message::WindowSeen(id) => {
                *ctx.window_id = Some(id);
                Task::none()
            }
            Message::FileHovered => {
                *ctx.drag_active = accepts_drops;
                *ctx.drop_burst = None;
                Task::none()
            }
            Message::FilesHoveredLeft => {
                *ctx.drag_active = false;
                *ctx.drop_burst = None;
                Task::none()
            }
            Message::FileDropped(path) => {
                update::handle_file_dropped(&mut ctx, path, accepts_drops, Instant::now())
            }
            Message::OpenFileDialogResult(Some(path)) => update::begin_upload(&mut ctx, path),
            Message::OpenFileDialogResult(None) => Task::none(),
            Message::UploadCompleted(result) => update::handle_upload_completed(&mut ctx, result),
            Message::AnalysisLoaded(result) => update::handle_analysis_loaded(&mut ctx, result),
            Message::ReportLoaded { patient, result } => {
                update::handle_report_loaded(&mut ctx, patient, result)
            }
            Message::DownloadStarted(result) => update::handle_download_started(&mut ctx, result),
            Message::DownloadDestination {
                download,
                destination,
            } => update::handle_download_destination(&mut ctx, download, destination),
            Message::DownloadCompleted {
                destination,
                result,
            } => update::handle_download_completed(&mut ctx, &destination, result),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            translator: &self.translator,
            screen: self.screen(),
            session: &self.session,
            report: self.report.as_ref(),
            notifications: &self.notifications,
            drag_active: self.drag_active,
            uploading: self.uploader.is_uploading(),
            spinner_angle: self.spinner_angle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::UploadResponse;
    use crate::error::ApiError;
    use crate::i18n::Language;
    use crate::ui::{food_recommendations, header, patient_selector};
    use serde_json::json;
    use std::path::Path;
    use tempfile::TempDir;

    fn app_in(dir: &TempDir, flags: Flags) -> App {
        let (app, _task) = App::with_dirs(
            Flags {
                server: flags.server.or_else(|| Some("http://localhost:8000".to_string())),
                ..flags
            },
            Some(dir.path().join("config")),
            Some(dir.path().join("data")),
        );
        app
    }

    fn two_patients() -> UploadResponse {
        serde_json::from_value(json!({
            "patients": [
                {
                    "id": 11,
                    "patient_id": "P-001",
                    "patient_name": "Alice",
                    "age": 54,
                    "supplements": ["Vitamin D", "Omega-3"],
                    "recommendations": [
                        {"food": "Salmon", "reason": "r", "mechanism": "m", "nutrients": ["EPA"]},
                        {"food": "", "reason": "r", "mechanism": "m"}
                    ]
                },
                {"id": 12, "patient_name": "Bob", "supplements": [], "recommendations": []}
            ],
            "total_patients": 2
        }))
        .expect("valid payload")
    }

    fn first_key(app: &App) -> Option<String> {
        app.notifications
            .visible()
            .next()
            .map(|n| n.message_key().to_string())
    }

    #[test]
    fn starts_on_upload_screen() {
        let dir = tempfile::tempdir().expect("temp dir");
        let app = app_in(&dir, Flags::default());

        assert_eq!(app.screen(), Screen::Upload);
        assert!(app.api.is_some());
        assert!(!app.notifications.has_notifications());
    }

    #[test]
    fn cli_language_is_used_at_startup() {
        let dir = tempfile::tempdir().expect("temp dir");
        let app = app_in(
            &dir,
            Flags {
                lang: Some("ar".to_string()),
                ..Flags::default()
            },
        );

        assert_eq!(app.translator.language(), Language::Ar);
        assert!(app.translator.is_rtl());
    }

    #[test]
    fn invalid_server_url_disables_api() {
        let dir = tempfile::tempdir().expect("temp dir");
        let app = app_in(
            &dir,
            Flags {
                server: Some("not a url".to_string()),
                ..Flags::default()
            },
        );

        assert!(app.api.is_none());
        assert_eq!(first_key(&app).as_deref(), Some("notification.invalidServer"));
    }

    #[test]
    fn successful_upload_lists_patients() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut app = app_in(&dir, Flags::default());

        let _ = app.update(Message::UploadCompleted(Ok(two_patients())));

        assert_eq!(app.screen(), Screen::Patients);
        assert_eq!(app.session.patients().map(<[_]>::len), Some(2));
        let keys: Vec<&str> = app.notifications.visible().map(|n| n.message_key()).collect();
        assert!(keys.contains(&"notification.success"));
        assert!(keys.contains(&"notification.malformed"));
    }

    #[test]
    fn empty_upload_keeps_session_and_warns() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut app = app_in(&dir, Flags::default());
        let empty: UploadResponse =
            serde_json::from_value(json!({"patients": [], "total_patients": 0})).expect("payload");

        let _ = app.update(Message::UploadCompleted(Ok(empty)));

        assert_eq!(app.screen(), Screen::Upload);
        assert_eq!(first_key(&app).as_deref(), Some("notification.noData"));
    }

    #[test]
    fn failed_upload_shows_generic_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut app = app_in(&dir, Flags::default());

        let _ = app.update(Message::UploadCompleted(Err(ApiError::Http { status: 500 })));

        assert_eq!(app.screen(), Screen::Upload);
        assert_eq!(first_key(&app).as_deref(), Some("analysis.error"));
        assert!(!app.uploader.is_uploading());
    }

    #[test]
    fn dropped_csv_starts_single_upload() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut app = app_in(&dir, Flags::default());

        let _ = app.update(Message::FileHovered);
        assert!(app.drag_active);

        let _ = app.update(Message::FileDropped(dir.path().join("first.csv")));
        let _ = app.update(Message::FileDropped(dir.path().join("second.csv")));
        assert!(!app.drag_active);
        assert_eq!(app.uploader.current_file(), Some("first.csv"));
        assert_eq!(
            app.app_state.last_open_directory.as_deref(),
            Some(dir.path())
        );
    }

    #[test]
    fn multi_file_drop_only_considers_the_first_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut app = app_in(&dir, Flags::default());

        let _ = app.update(Message::FileHovered);
        let _ = app.update(Message::FileHovered);
        let _ = app.update(Message::FileDropped(dir.path().join("notes.txt")));
        let _ = app.update(Message::FileDropped(dir.path().join("patients.csv")));
        assert!(!app.uploader.is_uploading());

        // A new drag gesture starts over.
        let _ = app.update(Message::FileHovered);
        let _ = app.update(Message::FileDropped(dir.path().join("patients.csv")));
        assert_eq!(app.uploader.current_file(), Some("patients.csv"));
    }

    #[test]
    fn drops_are_ignored_outside_upload_screen() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut app = app_in(&dir, Flags::default());
        let _ = app.update(Message::UploadCompleted(Ok(two_patients())));

        let _ = app.update(Message::FileHovered);
        let _ = app.update(Message::FileDropped(Path::new("/tmp/next.csv").to_path_buf()));

        assert!(!app.drag_active);
        assert!(!app.uploader.is_uploading());
    }

    #[test]
    fn navigating_to_report_and_back() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut app = app_in(&dir, Flags::default());
        let _ = app.update(Message::UploadCompleted(Ok(two_patients())));

        let _ = app.update(Message::PatientSelector(
            patient_selector::Message::PatientClicked(PatientId::new(12)),
        ));
        assert_eq!(app.screen(), Screen::Recommendations);
        assert_eq!(app.title(), "Bob - OncoCross Nutrition");

        let _ = app.update(Message::Recommendations(
            food_recommendations::Message::ViewReportClicked,
        ));
        assert_eq!(app.screen(), Screen::Report);
        assert!(app.report.is_some());

        let _ = app.update(Message::ReportLoaded {
            patient: PatientId::new(11),
            result: Ok("<p>stale</p>".to_string()),
        });
        assert!(matches!(
            app.report.as_ref().map(report_viewer::State::status),
            Some(report_viewer::Status::Loading)
        ));

        let _ = app.update(Message::ReportViewer(report_viewer::Message::BackClicked));
        assert_eq!(app.screen(), Screen::Recommendations);
        assert!(app.report.is_none());

        let _ = app.update(Message::Recommendations(food_recommendations::Message::BackClicked));
        assert_eq!(app.screen(), Screen::Patients);
    }

    #[test]
    fn new_analysis_from_report_resets_everything() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut app = app_in(&dir, Flags::default());
        let _ = app.update(Message::UploadCompleted(Ok(two_patients())));
        let _ = app.update(Message::PatientSelector(
            patient_selector::Message::PatientClicked(PatientId::new(11)),
        ));
        let _ = app.update(Message::Recommendations(
            food_recommendations::Message::ViewReportClicked,
        ));

        let _ = app.update(Message::ReportViewer(
            report_viewer::Message::NewAnalysisClicked,
        ));

        assert_eq!(app.screen(), Screen::Upload);
        assert!(app.session.is_initial());
        assert!(app.report.is_none());
    }

    #[test]
    fn stored_analysis_opens_recommendations() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut app = app_in(&dir, Flags::default());
        let record = serde_json::from_value(json!({
            "id": 42,
            "patient_data": {"patient_id": "P-9", "name": "Dana", "age": "61"},
            "supplements": ["Curcumin"],
            "recommendations": []
        }))
        .expect("valid record");

        let _ = app.update(Message::AnalysisLoaded(Ok(record)));

        assert_eq!(app.screen(), Screen::Recommendations);
        assert_eq!(
            app.session.selected_patient().map(|p| p.name().to_string()),
            Some("Dana".to_string())
        );
    }

    #[test]
    fn language_selection_is_persisted() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut app = app_in(&dir, Flags::default());

        let _ = app.update(Message::Header(header::Message::SelectLanguage(Language::Ko)));

        assert_eq!(app.translator.language(), Language::Ko);
        let (config, warning) = config::load_with_override(Some(dir.path().join("config")));
        assert!(warning.is_none());
        assert_eq!(config.general.language.as_deref(), Some("ko"));
    }

    #[test]
    fn download_failure_is_reported() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut app = app_in(&dir, Flags::default());

        let _ = app.update(Message::DownloadStarted(Err(ApiError::Http { status: 404 })));

        assert_eq!(first_key(&app).as_deref(), Some("notification.downloadError"));
    }
}
