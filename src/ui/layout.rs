// SPDX-License-Identifier: MPL-2.0
//! Direction-aware layout helpers.
//!
//! Iced lays rows out left to right. For right-to-left languages rows are
//! built with their children reversed and text blocks hug the right edge.

use iced::alignment::Horizontal;
use iced::widget::{Container, Row};
use iced::{Element, Length};

/// Puts `items` in visual order for the given direction.
#[must_use]
pub fn ordered<T>(rtl: bool, mut items: Vec<T>) -> Vec<T> {
    if rtl {
        items.reverse();
    }
    items
}

/// A row whose children read in the language's direction.
pub fn row<'a, Message: 'a>(rtl: bool, children: Vec<Element<'a, Message>>) -> Row<'a, Message> {
    Row::with_children(ordered(rtl, children))
}

/// Edge where reading starts.
#[must_use]
pub fn start_alignment(rtl: bool) -> Horizontal {
    if rtl {
        Horizontal::Right
    } else {
        Horizontal::Left
    }
}

/// Edge where reading ends.
#[must_use]
pub fn end_alignment(rtl: bool) -> Horizontal {
    if rtl {
        Horizontal::Left
    } else {
        Horizontal::Right
    }
}

/// Full-width wrapper that aligns `content` to the reading start.
pub fn aligned<'a, Message: 'a>(
    rtl: bool,
    content: impl Into<Element<'a, Message>>,
) -> Container<'a, Message> {
    Container::new(content)
        .width(Length::Fill)
        .align_x(start_alignment(rtl))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ltr_keeps_order() {
        assert_eq!(ordered(false, vec![1, 2, 3]), [1, 2, 3]);
    }

    #[test]
    fn rtl_reverses_order() {
        assert_eq!(ordered(true, vec!["icon", "label", "close"]), ["close", "label", "icon"]);
    }

    #[test]
    fn alignment_edges_swap_for_rtl() {
        assert_eq!(start_alignment(false), Horizontal::Left);
        assert_eq!(start_alignment(true), Horizontal::Right);
        assert_eq!(end_alignment(true), Horizontal::Left);
    }
}
