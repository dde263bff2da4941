// SPDX-License-Identifier: MPL-2.0
//! Report screen: the backend's HTML report rendered as text, with
//! fullscreen, download and navigation actions.
//!
//! The component owns the load state of the report it shows. Responses are
//! keyed by patient so a late response for a patient that is no longer open
//! is dropped.

use crate::domain::PatientId;
use crate::error::ApiError;
use crate::i18n::Translator;
use crate::report::{Block, ReportDocument};
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::layout;
use crate::ui::styles;
use crate::ui::widgets::AnimatedSpinner;
use iced::widget::{button, scrollable, Column, Container, Space, Text};
use iced::{alignment, Element, Length};

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Loading,
    Ready(ReportDocument),
    Failed(ApiError),
}

#[derive(Debug, Clone)]
pub struct State {
    patient: PatientId,
    status: Status,
    fullscreen: bool,
    downloading: bool,
}

impl State {
    /// Fresh state for a report about to be fetched.
    #[must_use]
    pub fn loading(patient: PatientId) -> Self {
        Self {
            patient,
            status: Status::Loading,
            fullscreen: false,
            downloading: false,
        }
    }

    #[must_use]
    pub fn patient(&self) -> PatientId {
        self.patient
    }

    #[must_use]
    pub fn status(&self) -> &Status {
        &self.status
    }

    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }

    #[must_use]
    pub fn is_downloading(&self) -> bool {
        self.downloading
    }

    pub fn finish_download(&mut self) {
        self.downloading = false;
    }

    /// Applies a fetch result. Returns `false` when it belongs to another
    /// patient and was ignored.
    pub fn apply(&mut self, patient: PatientId, result: Result<String, ApiError>) -> bool {
        if patient != self.patient {
            tracing::debug!(%patient, showing = %self.patient, "discarding stale report");
            return false;
        }
        self.status = match result {
            Ok(html) => Status::Ready(ReportDocument::from_html(&html)),
            Err(err) => {
                tracing::warn!(%patient, error = %err, "report fetch failed");
                Status::Failed(err)
            }
        };
        true
    }
}

pub struct ViewContext<'a> {
    pub translator: &'a Translator,
    pub state: &'a State,
    pub patient_name: &'a str,
    pub spinner_angle: f32,
}

#[derive(Debug, Clone)]
pub enum Message {
    BackClicked,
    FullscreenToggled,
    DownloadClicked,
    NewAnalysisClicked,
    RetryClicked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    Back,
    SetFullscreen(bool),
    Download(PatientId),
    Reset,
    Refetch(PatientId),
}

pub fn update(state: &mut State, message: &Message) -> Event {
    match message {
        Message::BackClicked => Event::Back,
        Message::FullscreenToggled => {
            state.fullscreen = !state.fullscreen;
            Event::SetFullscreen(state.fullscreen)
        }
        Message::DownloadClicked => {
            if state.downloading {
                Event::None
            } else {
                state.downloading = true;
                Event::Download(state.patient)
            }
        }
        Message::NewAnalysisClicked => Event::Reset,
        Message::RetryClicked => {
            if matches!(state.status, Status::Failed(_)) {
                state.status = Status::Loading;
                Event::Refetch(state.patient)
            } else {
                Event::None
            }
        }
    }
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let t = ctx.translator;
    let rtl = t.is_rtl();
    let state = ctx.state;

    let fullscreen_label = if state.fullscreen {
        t.resolve("report.exitFullscreen")
    } else {
        t.resolve("report.fullscreen")
    };

    let download = button(Text::new(t.resolve("report.download"))).padding([spacing::XS, spacing::MD]);
    let download = if state.downloading {
        download.style(styles::button::disabled())
    } else {
        download
            .style(styles::button::primary)
            .on_press(Message::DownloadClicked)
    };

    let toolbar = layout::row(
        rtl,
        vec![
            button(Text::new(t.resolve("report.back")))
                .padding([spacing::XS, spacing::MD])
                .style(styles::button::secondary)
                .on_press(Message::BackClicked)
                .into(),
            Space::new().width(Length::Fill).into(),
            button(Text::new(fullscreen_label))
                .padding([spacing::XS, spacing::MD])
                .style(styles::button::secondary)
                .on_press(Message::FullscreenToggled)
                .into(),
            download.into(),
            button(Text::new(t.resolve("report.newAnalysis")))
                .padding([spacing::XS, spacing::MD])
                .style(styles::button::secondary)
                .on_press(Message::NewAnalysisClicked)
                .into(),
        ],
    )
    .spacing(spacing::SM)
    .align_y(alignment::Vertical::Center);

    let title = Text::new(format!("{} · {}", t.resolve("report.title"), ctx.patient_name))
        .size(typography::TITLE_LG);

    let body: Element<'a, Message> = match &state.status {
        Status::Loading => centered(
            Column::new()
                .spacing(spacing::MD)
                .align_x(alignment::Horizontal::Center)
                .push(AnimatedSpinner::new(palette::PRIMARY_400, ctx.spinner_angle).into_element())
                .push(Text::new(t.resolve("report.loading")).color(palette::GRAY_400)),
        ),
        Status::Failed(_) => centered(
            Container::new(
                Column::new()
                    .spacing(spacing::MD)
                    .align_x(alignment::Horizontal::Center)
                    .push(Text::new(t.resolve("report.error")).color(palette::ERROR_500))
                    .push(
                        button(Text::new(t.resolve("report.retry")))
                            .padding([spacing::XS, spacing::MD])
                            .style(styles::button::primary)
                            .on_press(Message::RetryClicked),
                    ),
            )
            .padding(spacing::LG)
            .style(styles::container::error_box),
        ),
        Status::Ready(document) if document.is_empty() => centered(
            Text::new(t.resolve("report.empty")).color(palette::GRAY_400),
        ),
        Status::Ready(document) => document_view(document, rtl),
    };

    let content = Column::new()
        .spacing(spacing::LG)
        .padding(spacing::LG)
        .push(toolbar)
        .push(layout::aligned(rtl, title))
        .push(body);

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn centered<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
}

fn document_view<'a>(document: &'a ReportDocument, rtl: bool) -> Element<'a, Message> {
    let mut column = Column::new()
        .spacing(spacing::SM)
        .max_width(sizing::CONTENT_MAX_WIDTH)
        .padding(spacing::LG);

    if let Some(title) = document.title() {
        column = column.push(layout::aligned(
            rtl,
            Text::new(title).size(typography::TITLE_LG),
        ));
    }

    for block in document.blocks() {
        let element: Element<'a, Message> = match block {
            Block::Heading { level, text } => Text::new(text.as_str())
                .size(heading_size(*level))
                .color(palette::PRIMARY_400)
                .into(),
            Block::Paragraph(text) => Text::new(text.as_str()).size(typography::BODY).into(),
            Block::ListItem(text) => {
                let bullet = if rtl {
                    format!("{text} •")
                } else {
                    format!("• {text}")
                };
                Text::new(bullet).size(typography::BODY).into()
            }
        };
        column = column.push(layout::aligned(rtl, element));
    }

    Container::new(scrollable(
        Container::new(column)
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Center),
    ))
    .width(Length::Fill)
    .height(Length::Fill)
    .style(styles::container::panel)
    .into()
}

fn heading_size(level: u8) -> f32 {
    match level {
        1 => typography::TITLE_LG,
        2 => typography::TITLE_MD,
        _ => typography::TITLE_SM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_ignores_other_patient() {
        let mut state = State::loading(PatientId::new(1));
        assert!(!state.apply(PatientId::new(2), Ok("<p>x</p>".to_string())));
        assert_eq!(state.status(), &Status::Loading);
    }

    #[test]
    fn apply_parses_report() {
        let mut state = State::loading(PatientId::new(1));
        assert!(state.apply(PatientId::new(1), Ok("<h1>Report</h1>".to_string())));
        match state.status() {
            Status::Ready(document) => assert_eq!(document.blocks().len(), 1),
            other => panic!("unexpected status {other:?}"),
        }
    }

    #[test]
    fn failed_report_can_be_retried() {
        let mut state = State::loading(PatientId::new(3));
        state.apply(PatientId::new(3), Err(ApiError::Http { status: 404 }));

        let event = update(&mut state, &Message::RetryClicked);

        assert_eq!(event, Event::Refetch(PatientId::new(3)));
        assert_eq!(state.status(), &Status::Loading);
    }

    #[test]
    fn retry_is_ignored_unless_failed() {
        let mut state = State::loading(PatientId::new(3));
        assert_eq!(update(&mut state, &Message::RetryClicked), Event::None);
    }

    #[test]
    fn fullscreen_toggles() {
        let mut state = State::loading(PatientId::new(1));
        assert_eq!(
            update(&mut state, &Message::FullscreenToggled),
            Event::SetFullscreen(true)
        );
        assert_eq!(
            update(&mut state, &Message::FullscreenToggled),
            Event::SetFullscreen(false)
        );
    }

    #[test]
    fn download_is_single_flight() {
        let mut state = State::loading(PatientId::new(8));
        assert_eq!(
            update(&mut state, &Message::DownloadClicked),
            Event::Download(PatientId::new(8))
        );
        assert_eq!(update(&mut state, &Message::DownloadClicked), Event::None);

        state.finish_download();
        assert!(!state.is_downloading());
    }

    #[test]
    fn navigation_buttons_map_to_events() {
        let mut state = State::loading(PatientId::new(1));
        assert_eq!(update(&mut state, &Message::BackClicked), Event::Back);
        assert_eq!(update(&mut state, &Message::NewAnalysisClicked), Event::Reset);
    }
}
