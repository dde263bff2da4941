// SPDX-License-Identifier: MPL-2.0
//! Toast rendering.

use super::manager::{Manager, Message};
use super::notification::Notification;
use crate::i18n::Translator;
use crate::ui::design_tokens::{border, opacity, palette, radius, shadow, sizing, spacing, typography};
use crate::ui::layout;
use iced::widget::{button, container, Column, Container, Space, Text};
use iced::{alignment, Color, Element, Length, Theme};

pub struct Toast;

impl Toast {
    /// Resolves the notification text in the active language.
    #[must_use]
    pub fn message_text(notification: &Notification, translator: &Translator) -> String {
        if notification.message_args().is_empty() {
            return translator.resolve(notification.message_key());
        }
        let args: Vec<(&str, &str)> = notification
            .message_args()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        translator.resolve_with_args(notification.message_key(), &args)
    }

    pub fn view<'a>(notification: &'a Notification, translator: &Translator) -> Element<'a, Message> {
        let severity = notification.severity();
        let accent = severity.color();

        let glyph = Container::new(
            Text::new(severity.glyph())
                .size(typography::BODY_LG)
                .color(accent),
        )
        .width(Length::Fixed(sizing::ICON_MD))
        .align_x(alignment::Horizontal::Center);

        let message = Text::new(Self::message_text(notification, translator))
            .size(typography::BODY)
            .width(Length::Fill);

        let dismiss = button(Text::new("×").size(typography::BODY_LG))
            .on_press(Message::Dismiss(notification.id()))
            .padding([0.0, spacing::XS])
            .style(dismiss_button_style);

        let content = layout::row(
            translator.is_rtl(),
            vec![glyph.into(), message.into(), dismiss.into()],
        )
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center);

        Container::new(content)
            .width(Length::Fixed(sizing::TOAST_WIDTH))
            .padding(spacing::SM)
            .style(move |theme: &Theme| toast_container_style(theme, accent))
            .into()
    }

    /// Stacks visible toasts in the bottom corner (left for RTL).
    pub fn view_overlay<'a>(manager: &'a Manager, translator: &Translator) -> Element<'a, Message> {
        if manager.visible_count() == 0 {
            return Space::new().width(Length::Shrink).height(Length::Shrink).into();
        }

        let horizontal = layout::end_alignment(translator.is_rtl());
        let toasts = Column::with_children(
            manager
                .visible()
                .map(|notification| Self::view(notification, translator)),
        )
        .spacing(spacing::XS)
        .align_x(horizontal);

        Container::new(toasts)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(horizontal)
            .align_y(alignment::Vertical::Bottom)
            .padding(spacing::MD)
            .into()
    }
}

fn toast_container_style(theme: &Theme, accent: Color) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(
            theme.extended_palette().background.base.color,
        )),
        border: iced::Border {
            color: accent,
            width: border::WIDTH_MD,
            radius: radius::MD.into(),
        },
        shadow: shadow::MD,
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}

fn dismiss_button_style(theme: &Theme, status: button::Status) -> button::Style {
    let text_color = theme.extended_palette().background.base.text;
    let background = match status {
        button::Status::Hovered => Some(opacity::OVERLAY_SUBTLE),
        button::Status::Pressed => Some(opacity::OVERLAY_MEDIUM),
        button::Status::Active | button::Status::Disabled => None,
    }
    .map(|a| iced::Background::Color(Color { a, ..palette::GRAY_400 }));

    button::Style {
        background,
        text_color,
        border: iced::Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}
