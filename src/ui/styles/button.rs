// SPDX-License-Identifier: MPL-2.0
//! Centralized button styles.

use crate::ui::design_tokens::{
    opacity,
    palette::{self, WHITE},
    radius, shadow,
};
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

/// Main call to action (upload, view report, download).
pub fn primary(_theme: &Theme, status: button::Status) -> button::Style {
    let (background, border_color, elevation) = match status {
        button::Status::Active | button::Status::Pressed => {
            (palette::PRIMARY_500, palette::PRIMARY_600, shadow::SM)
        }
        button::Status::Hovered => (palette::PRIMARY_400, palette::PRIMARY_500, shadow::MD),
        button::Status::Disabled => return disabled_style(),
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color: WHITE,
        border: Border {
            color: border_color,
            width: 1.0,
            radius: radius::MD.into(),
        },
        shadow: elevation,
        snap: true,
    }
}

/// Secondary actions: back, new analysis, fullscreen.
pub fn secondary(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered => palette::GRAY_700,
        button::Status::Disabled => return disabled_style(),
        button::Status::Active | button::Status::Pressed => palette::GRAY_800,
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color: WHITE,
        border: Border {
            color: palette::GRAY_700,
            width: 1.0,
            radius: radius::MD.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Active entry of a toggle group (current language).
pub fn selected(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered => palette::PRIMARY_400,
        _ => palette::PRIMARY_600,
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color: WHITE,
        border: Border {
            color: palette::PRIMARY_500,
            width: 1.0,
            radius: radius::FULL.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Inactive entry of a toggle group.
pub fn unselected(_theme: &Theme, status: button::Status) -> button::Style {
    let (background, border_color) = match status {
        button::Status::Hovered => (
            Some(Background::Color(Color {
                a: opacity::OVERLAY_SUBTLE,
                ..palette::PRIMARY_500
            })),
            palette::PRIMARY_500,
        ),
        _ => (None, palette::GRAY_700),
    };

    button::Style {
        background,
        text_color: palette::GRAY_100,
        border: Border {
            color: border_color,
            width: 1.0,
            radius: radius::FULL.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Whole-card buttons in the patient selector.
pub fn card(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().background.weak.color;
    let border_color = match status {
        button::Status::Hovered | button::Status::Pressed => palette::PRIMARY_500,
        _ => palette::GRAY_700,
    };

    button::Style {
        background: Some(Background::Color(Color {
            a: opacity::SURFACE,
            ..base
        })),
        text_color: theme.palette().text,
        border: Border {
            color: border_color,
            width: 1.0,
            radius: radius::LG.into(),
        },
        shadow: if matches!(status, button::Status::Hovered) {
            shadow::MD
        } else {
            shadow::SM
        },
        snap: true,
    }
}

/// Grayed-out look for controls that cannot be used right now.
pub fn disabled() -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme: &Theme, _status: button::Status| disabled_style()
}

fn disabled_style() -> button::Style {
    button::Style {
        background: Some(Background::Color(palette::GRAY_700)),
        text_color: palette::GRAY_400,
        border: Border {
            color: palette::GRAY_700,
            width: 1.0,
            radius: radius::MD.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_button_uses_brand_colors() {
        let style = primary(&Theme::Dark, button::Status::Active);
        assert_eq!(
            style.background,
            Some(Background::Color(palette::PRIMARY_500))
        );
    }

    #[test]
    fn disabled_status_falls_back_to_gray() {
        let style = primary(&Theme::Dark, button::Status::Disabled);
        assert_eq!(style.text_color, palette::GRAY_400);
        assert_eq!(style.shadow, shadow::NONE);
    }

    #[test]
    fn unselected_highlights_on_hover() {
        let idle = unselected(&Theme::Dark, button::Status::Active);
        let hover = unselected(&Theme::Dark, button::Status::Hovered);
        assert!(idle.background.is_none());
        assert!(hover.background.is_some());
    }
}
