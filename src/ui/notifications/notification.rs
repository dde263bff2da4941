// SPDX-License-Identifier: MPL-2.0
//! Notification data: severity, translation key and arguments.

use crate::ui::design_tokens::palette;
use iced::Color;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Drives the accent color, the glyph and how long a toast stays up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Success,
    Info,
    Warning,
    /// Stays until dismissed.
    Error,
}

impl Severity {
    #[must_use]
    pub fn color(self) -> Color {
        match self {
            Severity::Success => palette::SUCCESS_500,
            Severity::Info => palette::INFO_500,
            Severity::Warning => palette::WARNING_500,
            Severity::Error => palette::ERROR_500,
        }
    }

    /// Single character shown in front of the message.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Severity::Success => "✓",
            Severity::Info => "i",
            Severity::Warning => "!",
            Severity::Error => "✕",
        }
    }

    #[must_use]
    pub fn auto_dismiss_duration(self) -> Option<Duration> {
        match self {
            Severity::Success | Severity::Info => Some(Duration::from_secs(3)),
            Severity::Warning => Some(Duration::from_secs(5)),
            Severity::Error => None,
        }
    }
}

/// A toast waiting to be shown or on screen.
///
/// The text is kept as a translation key and resolved when rendered, so a
/// language switch also retranslates visible toasts.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    message_key: String,
    message_args: Vec<(String, String)>,
    created_at: Instant,
    dismiss_after: Option<Duration>,
}

impl Notification {
    pub fn new(severity: Severity, message_key: impl Into<String>) -> Self {
        Self {
            id: NotificationId::next(),
            severity,
            message_key: message_key.into(),
            message_args: Vec::new(),
            created_at: Instant::now(),
            dismiss_after: severity.auto_dismiss_duration(),
        }
    }

    pub fn success(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Success, message_key)
    }

    pub fn info(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Info, message_key)
    }

    pub fn warning(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message_key)
    }

    pub fn error(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Error, message_key)
    }

    /// Adds a Fluent argument, e.g. `("count", "3")`.
    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.message_args.push((key.into(), value.into()));
        self
    }

    /// Overrides the severity's display time.
    #[must_use]
    pub fn auto_dismiss(mut self, duration: Duration) -> Self {
        self.dismiss_after = Some(duration);
        self
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    #[must_use]
    pub fn message_args(&self) -> &[(String, String)] {
        &self.message_args
    }

    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        self.dismiss_after
            .is_some_and(|limit| now.saturating_duration_since(self.created_at) >= limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(
            Notification::success("a").id(),
            Notification::success("a").id()
        );
    }

    #[test]
    fn severities_have_distinct_colors_and_glyphs() {
        let all = [
            Severity::Success,
            Severity::Info,
            Severity::Warning,
            Severity::Error,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.color(), b.color());
                assert_ne!(a.glyph(), b.glyph());
            }
        }
    }

    #[test]
    fn errors_never_expire() {
        let notification = Notification::error("analysis.error");
        let far_future = Instant::now() + Duration::from_secs(3600);
        assert!(!notification.is_expired(far_future));
    }

    #[test]
    fn warnings_outlast_success() {
        let created = Notification::success("x");
        let at_four_seconds = Instant::now() + Duration::from_secs(4);
        assert!(created.is_expired(at_four_seconds));
        assert!(!Notification::warning("x").is_expired(at_four_seconds));
    }

    #[test]
    fn arguments_are_kept_in_order() {
        let notification = Notification::success("notification.success")
            .with_arg("count", "2")
            .with_arg("file", "patients.csv");
        assert_eq!(
            notification.message_args(),
            [
                ("count".to_string(), "2".to_string()),
                ("file".to_string(), "patients.csv".to_string())
            ]
        );
    }
}
