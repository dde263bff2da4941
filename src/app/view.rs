// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! This module handles the `view()` function that renders the current screen
//! based on application state.

use super::{Message, Screen};
use crate::i18n::Translator;
use crate::session::Session;
use crate::ui::food_recommendations;
use crate::ui::header;
use crate::ui::notifications::{Manager, Toast};
use crate::ui::patient_selector;
use crate::ui::report_viewer;
use crate::ui::uploader;
use iced::widget::{Column, Container, Stack, Text};
use iced::{alignment, Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub translator: &'a Translator,
    pub screen: Screen,
    pub session: &'a Session,
    pub report: Option<&'a report_viewer::State>,
    pub notifications: &'a Manager,
    pub drag_active: bool,
    pub uploading: bool,
    pub spinner_angle: f32,
}

/// Renders the current application view based on the active screen.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let translator = ctx.translator;

    let current_view: Element<'_, Message> = match ctx.screen {
        Screen::Upload => uploader::view(uploader::ViewContext {
            translator,
            drag_active: ctx.drag_active,
            uploading: ctx.uploading,
            spinner_angle: ctx.spinner_angle,
        })
        .map(Message::Uploader),
        Screen::Patients => match ctx.session.patients() {
            Some(patients) => patient_selector::view(patient_selector::ViewContext {
                translator,
                patients,
            })
            .map(Message::PatientSelector),
            None => inconsistent_state(translator),
        },
        Screen::Recommendations => match ctx.session.selected_patient() {
            Some(patient) => food_recommendations::view(food_recommendations::ViewContext {
                translator,
                patient,
            })
            .map(Message::Recommendations),
            None => inconsistent_state(translator),
        },
        Screen::Report => match (ctx.report, ctx.session.selected_patient()) {
            (Some(state), Some(patient)) => report_viewer::view(report_viewer::ViewContext {
                translator,
                state,
                patient_name: patient.name(),
                spinner_angle: ctx.spinner_angle,
            })
            .map(Message::ReportViewer),
            _ => inconsistent_state(translator),
        },
    };

    let fullscreen = ctx.report.is_some_and(report_viewer::State::is_fullscreen);
    let mut column = Column::new().width(Length::Fill).height(Length::Fill);
    if !fullscreen {
        column = column.push(header::view(header::ViewContext { translator }).map(Message::Header));
    }
    column = column.push(
        Container::new(current_view)
            .width(Length::Fill)
            .height(Length::Fill),
    );

    let toasts = Toast::view_overlay(ctx.notifications, translator).map(Message::Notification);

    Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(column)
        .push(toasts)
        .into()
}

/// Fallback when a screen's data is missing; the session never produces it.
fn inconsistent_state<'a>(translator: &Translator) -> Element<'a, Message> {
    Container::new(Text::new(translator.resolve("analysis.error")))
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
}
