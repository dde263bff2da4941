// SPDX-License-Identifier: MPL-2.0
//! Top bar: app name and language selector.

use crate::i18n::{Language, Translator};
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::layout;
use crate::ui::styles;
use iced::widget::{button, Container, Row, Space, Text};
use iced::{alignment, Element, Length};

pub struct ViewContext<'a> {
    pub translator: &'a Translator,
}

#[derive(Debug, Clone)]
pub enum Message {
    SelectLanguage(Language),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    LanguageSelected(Language),
}

/// Picking the language already active is a no-op.
#[must_use]
pub fn update(message: &Message, current: Language) -> Event {
    match message {
        Message::SelectLanguage(language) if *language == current => Event::None,
        Message::SelectLanguage(language) => Event::LanguageSelected(*language),
    }
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let translator = ctx.translator;
    let rtl = translator.is_rtl();
    let current = translator.language();

    let title = Text::new(translator.resolve("app.title")).size(typography::TITLE_MD);

    let mut items: Vec<Element<'a, Message>> = vec![Text::new(translator.resolve("app.language"))
        .size(typography::BODY_SM)
        .into()];
    items.extend(Language::ALL.into_iter().map(|language| {
        let style = if language == current {
            styles::button::selected
        } else {
            styles::button::unselected
        };
        button(Text::new(language.native_name()).size(typography::BODY_SM))
            .on_press(Message::SelectLanguage(language))
            .padding([spacing::XXS, spacing::SM])
            .style(style)
            .into()
    }));

    let selector = layout::row(rtl, items)
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center);

    let bar: Row<'a, Message> = layout::row(
        rtl,
        vec![
            title.into(),
            Space::new().width(Length::Fill).into(),
            selector.into(),
        ],
    )
    .align_y(alignment::Vertical::Center);

    Container::new(bar)
        .width(Length::Fill)
        .padding([spacing::SM, spacing::LG])
        .style(styles::container::header)
        .into()
}
