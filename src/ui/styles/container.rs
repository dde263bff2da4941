// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{border, opacity, palette, radius, shadow};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Generic surface for cards and panels.
///
/// Derived from the theme background with a slight opacity so it reads as a
/// layer above the window.
pub fn panel(theme: &Theme) -> container::Style {
    let base = theme.extended_palette().background.weak.color;

    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::SURFACE,
            ..base
        })),
        border: Border {
            color: palette::GRAY_700,
            width: border::WIDTH_SM,
            radius: radius::LG.into(),
        },
        shadow: shadow::SM,
        ..Default::default()
    }
}

/// Top bar with the app name and language selector.
pub fn header(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::GRAY_900)),
        border: Border {
            color: palette::GRAY_800,
            width: border::WIDTH_SM,
            radius: 0.0.into(),
        },
        ..Default::default()
    }
}

/// Upload drop zone; highlighted while a file hovers the window.
pub fn drop_zone(active: bool) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| {
        let (accent, alpha) = if active {
            (palette::PRIMARY_400, opacity::OVERLAY_SUBTLE)
        } else {
            (palette::GRAY_400, opacity::TRANSPARENT)
        };

        container::Style {
            background: Some(Background::Color(Color {
                a: alpha,
                ..palette::PRIMARY_500
            })),
            border: Border {
                color: accent,
                width: border::WIDTH_MD,
                radius: radius::LG.into(),
            },
            ..Default::default()
        }
    }
}

/// Rounded tag, used for supplements and nutrients.
pub fn pill(color: Color) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_SUBTLE,
            ..color
        })),
        text_color: Some(color),
        border: Border {
            color,
            width: border::WIDTH_SM,
            radius: radius::FULL.into(),
        },
        ..Default::default()
    }
}

/// Inline error box inside a screen.
pub fn error_box(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_SUBTLE,
            ..palette::ERROR_500
        })),
        border: Border {
            color: palette::ERROR_500,
            width: border::WIDTH_SM,
            radius: radius::MD.into(),
        },
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_zone_border_reflects_drag_state() {
        let idle = drop_zone(false)(&Theme::Dark);
        let active = drop_zone(true)(&Theme::Dark);
        assert_eq!(idle.border.color, palette::GRAY_400);
        assert_eq!(active.border.color, palette::PRIMARY_400);
    }

    #[test]
    fn pill_uses_given_color_for_text() {
        let style = pill(palette::ACCENT_500)(&Theme::Dark);
        assert_eq!(style.text_color, Some(palette::ACCENT_500));
    }
}
