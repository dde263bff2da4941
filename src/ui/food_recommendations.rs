// SPDX-License-Identifier: MPL-2.0
//! Detail screen: a patient's detected supplements and food recommendations.

use crate::domain::{Patient, Recommendation, RecommendationSource};
use crate::i18n::Translator;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::layout;
use crate::ui::styles;
use iced::widget::text::IntoFragment;
use iced::widget::{button, scrollable, Column, Container, Row, Space, Text};
use iced::{alignment, Color, Element, Length};

pub struct ViewContext<'a> {
    pub translator: &'a Translator,
    pub patient: &'a Patient,
}

#[derive(Debug, Clone)]
pub enum Message {
    ViewReportClicked,
    NewAnalysisClicked,
    BackClicked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ShowReport,
    Reset,
    Back,
}

#[must_use]
pub fn update(message: &Message) -> Event {
    match message {
        Message::ViewReportClicked => Event::ShowReport,
        Message::NewAnalysisClicked => Event::Reset,
        Message::BackClicked => Event::Back,
    }
}

/// Two-digit card number, 1-based: `01`, `02`, ...
#[must_use]
pub fn card_number(index: usize) -> String {
    format!("{:02}", index + 1)
}

/// Badge text for a recommendation source; unknown labels are shown verbatim.
#[must_use]
pub fn source_label(source: &RecommendationSource, t: &Translator) -> String {
    match source {
        RecommendationSource::Database => t.resolve("results.sourceDatabase"),
        RecommendationSource::Ai => t.resolve("results.sourceAi"),
        RecommendationSource::Other(label) => label.clone(),
    }
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let t = ctx.translator;
    let rtl = t.is_rtl();
    let patient = ctx.patient;

    let back = button(Text::new(if rtl {
        format!("{} →", t.resolve("results.back"))
    } else {
        format!("← {}", t.resolve("results.back"))
    }))
    .padding([spacing::XS, spacing::MD])
    .style(styles::button::secondary)
    .on_press(Message::BackClicked);

    let title = Column::new()
        .spacing(spacing::XXS)
        .align_x(layout::start_alignment(rtl))
        .push(Text::new(t.resolve("results.title")).size(typography::TITLE_LG))
        .push(
            Text::new(format!(
                "{} · {}",
                patient.name(),
                t.resolve("results.subtitle")
            ))
            .size(typography::BODY)
            .color(palette::GRAY_400),
        );

    let mut content = Column::new()
        .spacing(spacing::LG)
        .max_width(sizing::CONTENT_MAX_WIDTH)
        .push(layout::aligned(rtl, back))
        .push(layout::aligned(rtl, title))
        .push(supplements_section(t, patient));

    content = content.push(layout::aligned(
        rtl,
        Text::new(t.resolve("results.recommendations")).size(typography::TITLE_SM),
    ));

    if patient.recommendations().is_empty() {
        content = content.push(layout::aligned(
            rtl,
            Text::new(t.resolve("results.empty"))
                .size(typography::BODY)
                .color(palette::GRAY_400),
        ));
    } else {
        for (index, recommendation) in patient.recommendations().iter().enumerate() {
            content = content.push(food_card(t, index, recommendation));
        }
    }

    let actions = layout::row(
        rtl,
        vec![
            button(Text::new(t.resolve("results.viewReport")))
                .padding([spacing::SM, spacing::LG])
                .style(styles::button::primary)
                .on_press(Message::ViewReportClicked)
                .into(),
            button(Text::new(t.resolve("results.newAnalysis")))
                .padding([spacing::SM, spacing::LG])
                .style(styles::button::secondary)
                .on_press(Message::NewAnalysisClicked)
                .into(),
        ],
    )
    .spacing(spacing::MD);
    content = content.push(
        Container::new(actions)
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Center),
    );

    Container::new(scrollable(
        Container::new(content.padding(spacing::LG))
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Center),
    ))
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

fn supplements_section<'a>(t: &Translator, patient: &'a Patient) -> Element<'a, Message> {
    let rtl = t.is_rtl();
    let pills: Vec<Element<'a, Message>> = patient
        .supplements()
        .iter()
        .map(|name| pill(name.as_str(), palette::PRIMARY_400))
        .collect();

    let body: Element<'a, Message> = if pills.is_empty() {
        Text::new(t.resolve("patients.none"))
            .size(typography::BODY_SM)
            .color(palette::GRAY_400)
            .into()
    } else {
        Row::with_children(layout::ordered(rtl, pills))
            .spacing(spacing::XS)
            .wrap()
            .into()
    };

    Container::new(
        Column::new()
            .spacing(spacing::SM)
            .width(Length::Fill)
            .align_x(layout::start_alignment(rtl))
            .push(Text::new(t.resolve("results.supplements")).size(typography::TITLE_SM))
            .push(body),
    )
    .width(Length::Fill)
    .padding(spacing::MD)
    .style(styles::container::panel)
    .into()
}

fn food_card<'a>(t: &Translator, index: usize, rec: &'a Recommendation) -> Element<'a, Message> {
    let rtl = t.is_rtl();

    let mut heading: Vec<Element<'a, Message>> = vec![
        Text::new(rec.food()).size(typography::TITLE_MD).into(),
        Space::new().width(Length::Fill).into(),
    ];
    if let Some(source) = rec.source() {
        heading.push(pill(source_label(source, t), palette::INFO_500));
    }
    heading.push(
        Text::new(card_number(index))
            .size(typography::TITLE_MD)
            .color(palette::PRIMARY_400)
            .into(),
    );

    let mut body = Column::new()
        .spacing(spacing::SM)
        .width(Length::Fill)
        .align_x(layout::start_alignment(rtl))
        .push(
            layout::row(rtl, heading)
                .spacing(spacing::SM)
                .align_y(alignment::Vertical::Center),
        )
        .push(labelled(t.resolve("results.reason"), rec.reason()))
        .push(labelled(t.resolve("results.mechanism"), rec.mechanism()));

    if !rec.nutrients().is_empty() {
        let tags: Vec<Element<'a, Message>> = rec
            .nutrients()
            .iter()
            .map(|tag| pill(tag.as_str(), palette::ACCENT_500))
            .collect();
        body = body
            .push(
                Text::new(t.resolve("results.nutrients"))
                    .size(typography::CAPTION)
                    .color(palette::GRAY_400),
            )
            .push(
                Row::with_children(layout::ordered(rtl, tags))
                    .spacing(spacing::XXS)
                    .wrap(),
            );
    }

    if let Some(reference) = rec.reference() {
        body = body.push(
            Text::new(format!("{}: {reference}", t.resolve("results.reference")))
                .size(typography::CAPTION)
                .color(palette::GRAY_400),
        );
    }

    Container::new(body)
        .width(Length::Fill)
        .padding(spacing::MD)
        .style(styles::container::panel)
        .into()
}

fn labelled<'a>(label: String, value: &'a str) -> Element<'a, Message> {
    Column::new()
        .spacing(spacing::XXS)
        .push(
            Text::new(format!("{label}:"))
                .size(typography::CAPTION)
                .color(palette::PRIMARY_400),
        )
        .push(Text::new(value).size(typography::BODY))
        .into()
}

fn pill<'a>(label: impl IntoFragment<'a>, color: Color) -> Element<'a, Message> {
    Container::new(Text::new(label).size(typography::CAPTION))
        .padding([spacing::XXS, spacing::XS])
        .style(styles::container::pill(color))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Catalog, Language, LanguageStore};
    use std::sync::Arc;

    #[test]
    fn buttons_map_to_events() {
        assert_eq!(update(&Message::ViewReportClicked), Event::ShowReport);
        assert_eq!(update(&Message::NewAnalysisClicked), Event::Reset);
        assert_eq!(update(&Message::BackClicked), Event::Back);
    }

    #[test]
    fn cards_are_numbered_with_two_digits() {
        assert_eq!(card_number(0), "01");
        assert_eq!(card_number(9), "10");
        assert_eq!(card_number(99), "100");
    }

    #[test]
    fn source_badges_are_translated() {
        let catalog = Catalog::from_sources([(
            Language::En,
            "results =\n    .sourceDatabase = Clinical database\n    .sourceAi = AI generated\n"
                .to_string(),
        )]);
        let t = LanguageStore::new(Language::En).translator(Arc::new(catalog));

        assert_eq!(source_label(&RecommendationSource::Ai, &t), "AI generated");
        assert_eq!(
            source_label(&RecommendationSource::Database, &t),
            "Clinical database"
        );
        assert_eq!(
            source_label(&RecommendationSource::Other("journal".to_string()), &t),
            "journal"
        );
    }
}
