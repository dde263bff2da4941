// SPDX-License-Identifier: MPL-2.0
//! Upload screen: hero text and the CSV drop zone.
//!
//! Files reach the app through window drop events; this view only renders
//! the zone and the "choose file" button. Both are inert while an upload is
//! in flight.

use crate::i18n::Translator;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::widgets::AnimatedSpinner;
use iced::widget::{button, Column, Container, Text};
use iced::{alignment, Element, Length};

pub struct ViewContext<'a> {
    pub translator: &'a Translator,
    /// A file is hovering over the window.
    pub drag_active: bool,
    pub uploading: bool,
    pub spinner_angle: f32,
}

#[derive(Debug, Clone)]
pub enum Message {
    BrowseClicked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    OpenFileDialog,
}

#[must_use]
pub fn update(message: &Message, uploading: bool) -> Event {
    match message {
        Message::BrowseClicked if uploading => Event::None,
        Message::BrowseClicked => Event::OpenFileDialog,
    }
}

/// Translation key of the drop zone headline.
#[must_use]
pub fn headline_key(drag_active: bool, uploading: bool) -> &'static str {
    if uploading {
        "upload.processing"
    } else if drag_active {
        "upload.drop"
    } else {
        "upload.title"
    }
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let t = ctx.translator;

    let hero = Column::new()
        .spacing(spacing::XS)
        .align_x(alignment::Horizontal::Center)
        .push(Text::new(t.resolve("hero.title")).size(typography::DISPLAY))
        .push(
            Text::new(t.resolve("hero.subtitle"))
                .size(typography::BODY_LG)
                .color(palette::GRAY_400),
        );

    let headline = Text::new(t.resolve(headline_key(ctx.drag_active, ctx.uploading)))
        .size(typography::TITLE_MD);

    let zone_content = if ctx.uploading {
        Column::new()
            .push(AnimatedSpinner::new(palette::PRIMARY_400, ctx.spinner_angle).into_element())
            .push(headline)
            .push(
                Text::new(t.resolve("upload.analyzing"))
                    .size(typography::BODY)
                    .color(palette::GRAY_400),
            )
    } else {
        let browse = button(Text::new(t.resolve("upload.browse")))
            .padding([spacing::SM, spacing::LG])
            .style(styles::button::primary)
            .on_press(Message::BrowseClicked);

        Column::new()
            .push(Text::new("⬆").size(sizing::ICON_XL).color(palette::PRIMARY_400))
            .push(headline)
            .push(
                Text::new(t.resolve("upload.subtitle"))
                    .size(typography::BODY)
                    .color(palette::GRAY_400),
            )
            .push(browse)
            .push(
                Text::new(format!("CSV · {}", t.resolve("upload.format")))
                    .size(typography::CAPTION)
                    .color(palette::GRAY_400),
            )
    }
    .spacing(spacing::MD)
    .align_x(alignment::Horizontal::Center);

    let drop_zone = Container::new(zone_content)
        .width(Length::Fixed(sizing::DROP_ZONE_WIDTH))
        .height(Length::Fixed(sizing::DROP_ZONE_HEIGHT))
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(styles::container::drop_zone(ctx.drag_active && !ctx.uploading));

    let content = Column::new()
        .spacing(spacing::XL)
        .align_x(alignment::Horizontal::Center)
        .push(hero)
        .push(drop_zone);

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
}
