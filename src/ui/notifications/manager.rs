// SPDX-License-Identifier: MPL-2.0
//! Toast queue: at most [`MAX_VISIBLE`] on screen, the rest wait.

use super::notification::{Notification, NotificationId, Severity};
use std::collections::VecDeque;
use std::time::Instant;

pub const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone)]
pub enum Message {
    Dismiss(NotificationId),
    Tick,
}

#[derive(Debug, Default)]
pub struct Manager {
    /// Newest first.
    visible: VecDeque<Notification>,
    queue: VecDeque<Notification>,
}

impl Manager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        match notification.severity() {
            Severity::Error => tracing::debug!(key = notification.message_key(), "error toast"),
            Severity::Warning => {
                tracing::debug!(key = notification.message_key(), "warning toast");
            }
            Severity::Success | Severity::Info => {}
        }

        if self.visible.len() < MAX_VISIBLE {
            self.visible.push_front(notification);
        } else {
            self.queue.push_back(notification);
        }
    }

    /// Removes a visible or queued toast. Returns whether it existed.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        if let Some(pos) = self.visible.iter().position(|n| n.id() == id) {
            self.visible.remove(pos);
            self.promote_from_queue();
            return true;
        }
        if let Some(pos) = self.queue.iter().position(|n| n.id() == id) {
            self.queue.remove(pos);
            return true;
        }
        false
    }

    /// Drops visible toasts whose display time has elapsed at `now`.
    pub fn tick(&mut self, now: Instant) {
        let before = self.visible.len();
        self.visible.retain(|n| !n.is_expired(now));
        if self.visible.len() < before {
            self.promote_from_queue();
        }
    }

    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Dismiss(id) => {
                self.dismiss(*id);
            }
            Message::Tick => self.tick(Instant::now()),
        }
    }

    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.visible.iter()
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.visible.is_empty() || !self.queue.is_empty()
    }

    fn promote_from_queue(&mut self) {
        while self.visible.len() < MAX_VISIBLE {
            match self.queue.pop_front() {
                Some(notification) => self.visible.push_back(notification),
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn new_manager_is_empty() {
        let manager = Manager::new();
        assert!(!manager.has_notifications());
    }

    #[test]
    fn overflow_is_queued() {
        let mut manager = Manager::new();
        for i in 0..=MAX_VISIBLE {
            manager.push(Notification::info(format!("key-{i}")));
        }
        assert_eq!(manager.visible_count(), MAX_VISIBLE);
        assert_eq!(manager.queued_count(), 1);
    }

    #[test]
    fn newest_is_shown_first() {
        let mut manager = Manager::new();
        manager.push(Notification::info("first"));
        manager.push(Notification::info("second"));
        let keys: Vec<&str> = manager.visible().map(Notification::message_key).collect();
        assert_eq!(keys, ["second", "first"]);
    }

    #[test]
    fn dismiss_promotes_from_queue() {
        let mut manager = Manager::new();
        let first = Notification::error("first");
        let first_id = first.id();
        manager.push(first);
        for i in 0..MAX_VISIBLE {
            manager.push(Notification::error(format!("more-{i}")));
        }

        assert!(manager.dismiss(first_id));
        assert_eq!(manager.visible_count(), MAX_VISIBLE);
        assert_eq!(manager.queued_count(), 0);
    }

    #[test]
    fn dismiss_unknown_id_returns_false() {
        let mut manager = Manager::new();
        let stray = Notification::info("stray").id();
        assert!(!manager.dismiss(stray));
    }

    #[test]
    fn handle_message_dismisses() {
        let mut manager = Manager::new();
        let notification = Notification::warning("notification.malformed");
        let id = notification.id();
        manager.push(notification);

        manager.handle_message(&Message::Dismiss(id));
        assert!(!manager.has_notifications());
    }

    #[test]
    fn tick_removes_expired_only() {
        let mut manager = Manager::new();
        manager.push(Notification::success("done").auto_dismiss(Duration::ZERO));
        manager.push(Notification::error("analysis.error"));

        manager.tick(Instant::now());

        let keys: Vec<&str> = manager.visible().map(Notification::message_key).collect();
        assert_eq!(keys, ["analysis.error"]);
    }

    #[test]
    fn tick_promotes_queued_after_expiry() {
        let mut manager = Manager::new();
        for _ in 0..MAX_VISIBLE {
            manager.push(Notification::success("short").auto_dismiss(Duration::ZERO));
        }
        manager.push(Notification::error("waiting"));
        assert_eq!(manager.queued_count(), 1);

        manager.tick(Instant::now());

        assert_eq!(manager.visible_count(), 1);
        assert_eq!(manager.queued_count(), 0);
    }
}
