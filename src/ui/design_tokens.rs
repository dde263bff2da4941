// SPDX-License-Identifier: MPL-2.0
//! Design tokens shared by every view.
//!
//! - **Palette**: base and semantic colors
//! - **Opacity**: overlay and surface alpha levels
//! - **Spacing**: 8px grid
//! - **Sizing**: fixed component sizes
//! - **Typography**: font size scale
//! - **Border** / **Radius** / **Shadow**
//!
//! ```
//! use oncocross::ui::design_tokens::{palette, spacing, opacity};
//! use iced::Color;
//!
//! let hover = Color { a: opacity::OVERLAY_SUBTLE, ..palette::PRIMARY_500 };
//! let gap = spacing::MD;
//! # let _ = (hover, gap);
//! ```

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use super::Color;

    // Grayscale
    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_900: Color = Color::from_rgb(0.09, 0.11, 0.13);
    pub const GRAY_800: Color = Color::from_rgb(0.14, 0.16, 0.19);
    pub const GRAY_700: Color = Color::from_rgb(0.22, 0.25, 0.29);
    pub const GRAY_400: Color = Color::from_rgb(0.55, 0.58, 0.62);
    pub const GRAY_200: Color = Color::from_rgb(0.78, 0.8, 0.83);
    pub const GRAY_100: Color = Color::from_rgb(0.9, 0.91, 0.93);

    // Brand colors (teal scale)
    pub const PRIMARY_100: Color = Color::from_rgb(0.84, 0.96, 0.94);
    pub const PRIMARY_400: Color = Color::from_rgb(0.25, 0.78, 0.7);
    pub const PRIMARY_500: Color = Color::from_rgb(0.13, 0.66, 0.6);
    pub const PRIMARY_600: Color = Color::from_rgb(0.08, 0.54, 0.49);
    pub const PRIMARY_700: Color = Color::from_rgb(0.06, 0.42, 0.38);

    // Accent for nutrient tags
    pub const ACCENT_500: Color = Color::from_rgb(0.96, 0.62, 0.25);

    // Semantic colors
    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
    pub const WARNING_500: Color = Color::from_rgb(0.945, 0.651, 0.125);
    pub const SUCCESS_500: Color = Color::from_rgb(0.263, 0.702, 0.404);
    pub const INFO_500: Color = Color::from_rgb(0.392, 0.588, 1.0);
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    pub const TRANSPARENT: f32 = 0.0;
    pub const OVERLAY_SUBTLE: f32 = 0.2;
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    pub const OVERLAY_STRONG: f32 = 0.7;
    pub const OPAQUE: f32 = 1.0;

    /// Cards and panels drawn over the window background.
    pub const SURFACE: f32 = 0.95;
}

// ============================================================================
// Spacing Scale (8px baseline grid)
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 4.0;
    pub const XS: f32 = 8.0;
    pub const SM: f32 = 12.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;
    pub const XL: f32 = 32.0;
    pub const XXL: f32 = 48.0;
}

// ============================================================================
// Sizing Scale
// ============================================================================

pub mod sizing {
    pub const ICON_SM: f32 = 16.0;
    pub const ICON_MD: f32 = 24.0;
    pub const ICON_LG: f32 = 32.0;
    pub const ICON_XL: f32 = 48.0;

    pub const BUTTON_HEIGHT: f32 = 36.0;

    pub const TOAST_WIDTH: f32 = 320.0;

    /// Upload drop zone.
    pub const DROP_ZONE_WIDTH: f32 = 560.0;
    pub const DROP_ZONE_HEIGHT: f32 = 280.0;

    /// Patient card in the selector grid.
    pub const PATIENT_CARD_WIDTH: f32 = 300.0;

    /// Readable line length for report text and recommendation cards.
    pub const CONTENT_MAX_WIDTH: f32 = 880.0;
}

// ============================================================================
// Typography Scale
// ============================================================================

pub mod typography {
    /// Hero heading on the upload screen.
    pub const DISPLAY: f32 = 36.0;

    /// Screen titles.
    pub const TITLE_LG: f32 = 28.0;

    /// App name, card titles.
    pub const TITLE_MD: f32 = 20.0;

    /// Section headers.
    pub const TITLE_SM: f32 = 18.0;

    pub const BODY_LG: f32 = 16.0;

    pub const BODY: f32 = 14.0;

    pub const BODY_SM: f32 = 13.0;

    /// Badges and tags.
    pub const CAPTION: f32 = 12.0;
}

// ============================================================================
// Border Scale
// ============================================================================

pub mod border {
    pub const WIDTH_SM: f32 = 1.0;
    pub const WIDTH_MD: f32 = 2.0;
}

// ============================================================================
// Border Radius Scale
// ============================================================================

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
    pub const LG: f32 = 12.0;
    pub const FULL: f32 = 9999.0; // Pill shape
}

// ============================================================================
// Shadow Definitions
// ============================================================================

pub mod shadow {
    use super::palette;
    use iced::{Shadow, Vector};

    pub const NONE: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector::ZERO,
        blur_radius: 0.0,
    };

    pub const SM: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 2.0 },
        blur_radius: 4.0,
    };

    pub const MD: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 4.0 },
        blur_radius: 8.0,
    };
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    assert!(spacing::XS > 0.0);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);

    assert!(opacity::TRANSPARENT == 0.0);
    assert!(opacity::OPAQUE == 1.0);
    assert!(opacity::SURFACE > 0.0 && opacity::SURFACE < 1.0);

    assert!(typography::DISPLAY > typography::TITLE_LG);
    assert!(typography::TITLE_LG > typography::TITLE_MD);
    assert!(typography::TITLE_MD > typography::TITLE_SM);
    assert!(typography::TITLE_SM > typography::BODY_LG);
    assert!(typography::BODY > typography::BODY_SM);
    assert!(typography::BODY_SM > typography::CAPTION);

    assert!(sizing::DROP_ZONE_WIDTH > sizing::PATIENT_CARD_WIDTH);
    assert!(sizing::CONTENT_MAX_WIDTH > sizing::DROP_ZONE_WIDTH);
};
