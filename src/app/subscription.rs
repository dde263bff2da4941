// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Routes native window events to top-level messages. File drag events are
//! only routed while the upload screen is visible.

use super::{Message, Screen};
use iced::{event, time, window, Subscription};
use std::time::Duration;

/// Tick interval driving toast expiry and the spinner.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Creates the window event subscription for the current screen.
pub fn create_event_subscription(screen: Screen) -> Subscription<Message> {
    if screen.accepts_file_drops() {
        event::listen_with(|event, _status, window_id| match event {
            event::Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
            event::Event::Window(window::Event::FilesHoveredLeft) => {
                Some(Message::FilesHoveredLeft)
            }
            event::Event::Window(window::Event::FileDropped(path)) => {
                Some(Message::FileDropped(path))
            }
            event::Event::Window(window::Event::Opened { .. } | window::Event::Focused) => {
                Some(Message::WindowSeen(window_id))
            }
            _ => None,
        })
    } else {
        event::listen_with(|event, _status, window_id| match event {
            event::Event::Window(window::Event::Opened { .. } | window::Event::Focused) => {
                Some(Message::WindowSeen(window_id))
            }
            _ => None,
        })
    }
}

/// Creates a periodic tick while something is animating or waiting to expire.
pub fn create_tick_subscription(busy: bool, has_notifications: bool) -> Subscription<Message> {
    if busy || has_notifications {
        time::every(TICK_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
