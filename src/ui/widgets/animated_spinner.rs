// SPDX-License-Identifier: MPL-2.0
//! Canvas spinner shown while an upload or report request is in flight.
//!
//! The spinner is stateless: the caller advances the angle on each tick and
//! rebuilds the widget.

use crate::ui::design_tokens::sizing;
use iced::widget::canvas::{self, Cache, Canvas, Frame, Geometry, Path, Stroke};
use iced::{mouse, Color, Length, Point, Rectangle, Renderer, Theme};
use std::f32::consts::{PI, TAU};

/// Radians added per animation tick.
pub const STEP: f32 = 0.35;

/// Advances `angle` by one step, wrapping at a full turn.
#[must_use]
pub fn advance(angle: f32) -> f32 {
    (angle + STEP) % TAU
}

pub struct AnimatedSpinner {
    cache: Cache,
    rotation: f32,
    color: Color,
    size: f32,
}

impl AnimatedSpinner {
    #[must_use]
    pub fn new(color: Color, rotation: f32) -> Self {
        Self {
            cache: Cache::default(),
            rotation,
            color,
            size: sizing::ICON_XL,
        }
    }

    #[must_use]
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn into_element<Message: 'static>(self) -> iced::Element<'static, Message> {
        let size = self.size;
        Canvas::new(self)
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .into()
    }

    fn arc(&self, frame: &Frame, radius: f32) -> Path {
        let center = frame.center();
        // Start at 12 o'clock and sweep half a turn.
        let start = self.rotation - PI / 2.0;
        let segments: u16 = 30;

        let mut builder = canvas::path::Builder::new();
        builder.move_to(Point::new(
            center.x + radius * start.cos(),
            center.y + radius * start.sin(),
        ));
        for i in 1..=segments {
            let angle = start + PI * f32::from(i) / f32::from(segments);
            builder.line_to(Point::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            ));
        }
        builder.build()
    }
}

impl<Message> canvas::Program<Message> for AnimatedSpinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self.cache.draw(renderer, bounds.size(), |frame: &mut Frame| {
            let radius = frame.width().min(frame.height()) / 2.0 - 4.0;

            frame.stroke(
                &Path::circle(frame.center(), radius),
                Stroke::default().with_width(3.0).with_color(Color {
                    a: 0.25,
                    ..self.color
                }),
            );

            let arc = self.arc(frame, radius);
            frame.stroke(
                &arc,
                Stroke::default()
                    .with_width(3.0)
                    .with_color(self.color)
                    .with_line_cap(canvas::LineCap::Round),
            );
        });

        vec![geometry]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_wraps_at_full_turn() {
        let mut angle = 0.0;
        for _ in 0..100 {
            angle = advance(angle);
            assert!((0.0..TAU).contains(&angle));
        }
    }
}
