// SPDX-License-Identifier: MPL-2.0
//! Patient list shown after a successful upload.

use crate::domain::{Patient, PatientId};
use crate::i18n::Translator;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::layout;
use crate::ui::styles;
use iced::widget::{button, scrollable, Column, Container, Row, Space, Text};
use iced::{alignment, Element, Length};

/// Supplements shown on a card before collapsing into "+N more".
pub const SUPPLEMENT_PREVIEW: usize = 3;

/// Cards per row.
const COLUMNS: usize = 3;

pub struct ViewContext<'a> {
    pub translator: &'a Translator,
    pub patients: &'a [Patient],
}

#[derive(Debug, Clone)]
pub enum Message {
    PatientClicked(PatientId),
    StartNewClicked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SelectPatient(PatientId),
    StartNew,
}

#[must_use]
pub fn update(message: &Message) -> Event {
    match message {
        Message::PatientClicked(id) => Event::SelectPatient(*id),
        Message::StartNewClicked => Event::StartNew,
    }
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let t = ctx.translator;
    let rtl = t.is_rtl();
    let count = ctx.patients.len().to_string();

    let header = layout::row(
        rtl,
        vec![
            Text::new(t.resolve("patients.title"))
                .size(typography::TITLE_LG)
                .into(),
            Text::new(t.resolve_with_args("patients.count", &[("count", count.as_str())]))
                .size(typography::BODY)
                .color(palette::GRAY_400)
                .into(),
            Space::new().width(Length::Fill).into(),
            button(Text::new(t.resolve("patients.startNew")))
                .padding([spacing::XS, spacing::MD])
                .style(styles::button::secondary)
                .on_press(Message::StartNewClicked)
                .into(),
        ],
    )
    .spacing(spacing::MD)
    .align_y(alignment::Vertical::Center);

    let mut grid = Column::new().spacing(spacing::MD);
    for chunk in ctx.patients.chunks(COLUMNS) {
        let cards: Vec<Element<'a, Message>> =
            chunk.iter().map(|patient| patient_card(t, patient)).collect();
        grid = grid.push(layout::row(rtl, cards).spacing(spacing::MD));
    }

    let content = Column::new()
        .spacing(spacing::LG)
        .padding(spacing::LG)
        .max_width(sizing::CONTENT_MAX_WIDTH + sizing::PATIENT_CARD_WIDTH)
        .push(header)
        .push(scrollable(grid).height(Length::Fill));

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .into()
}

/// `"+N more"` label for hidden supplements, if any are hidden.
#[must_use]
pub fn more_label(hidden: usize, more: &str) -> Option<String> {
    (hidden > 0).then(|| format!("+{hidden} {more}"))
}

fn patient_card<'a>(t: &Translator, patient: &'a Patient) -> Element<'a, Message> {
    let rtl = t.is_rtl();

    let details = format!(
        "{}: {} | {}: {}",
        t.resolve("patients.id"),
        patient.patient_code(),
        t.resolve("patients.age"),
        patient.age()
    );

    let heading = layout::row(
        rtl,
        vec![
            Column::new()
                .spacing(spacing::XXS)
                .width(Length::Fill)
                .align_x(layout::start_alignment(rtl))
                .push(Text::new(patient.name()).size(typography::TITLE_SM))
                .push(
                    Text::new(details)
                        .size(typography::BODY_SM)
                        .color(palette::GRAY_400),
                )
                .into(),
            Text::new(if rtl { "‹" } else { "›" })
                .size(typography::TITLE_MD)
                .color(palette::PRIMARY_400)
                .into(),
        ],
    )
    .align_y(alignment::Vertical::Center);

    let (shown, hidden) = patient.supplement_preview(SUPPLEMENT_PREVIEW);
    let mut tags: Vec<Element<'a, Message>> = shown
        .iter()
        .map(|name| supplement_tag(name.as_str()))
        .collect();
    if let Some(label) = more_label(hidden, &t.resolve("patients.more")) {
        tags.push(
            Text::new(label)
                .size(typography::CAPTION)
                .color(palette::GRAY_400)
                .into(),
        );
    }
    if tags.is_empty() {
        tags.push(
            Text::new(t.resolve("patients.none"))
                .size(typography::CAPTION)
                .color(palette::GRAY_400)
                .into(),
        );
    }

    let supplements = Column::new()
        .spacing(spacing::XS)
        .width(Length::Fill)
        .align_x(layout::start_alignment(rtl))
        .push(
            Text::new(format!("{}:", t.resolve("patients.supplementsDetected")))
                .size(typography::CAPTION)
                .color(palette::GRAY_400),
        )
        .push(Row::with_children(layout::ordered(rtl, tags)).spacing(spacing::XXS).wrap());

    let body = Column::new()
        .spacing(spacing::MD)
        .push(heading)
        .push(supplements);

    button(body)
        .width(Length::Fixed(sizing::PATIENT_CARD_WIDTH))
        .padding(spacing::MD)
        .style(styles::button::card)
        .on_press(Message::PatientClicked(patient.id()))
        .into()
}

fn supplement_tag<'a>(name: &'a str) -> Element<'a, Message> {
    Container::new(Text::new(name).size(typography::CAPTION))
        .padding([spacing::XXS, spacing::XS])
        .style(styles::container::pill(palette::PRIMARY_400))
        .into()
}
