// SPDX-License-Identifier: MPL-2.0
//! Toast notifications.
//!
//! Notifications carry a translation key rather than text. The [`Manager`]
//! keeps up to three on screen and queues the rest; success and info toasts
//! go away after 3 s, warnings after 5 s, errors stay until dismissed.
//!
//! ```ignore
//! let mut manager = Manager::new();
//! manager.push(Notification::success("notification.success").with_arg("count", "3"));
//! let overlay = Toast::view_overlay(&manager, &translator).map(Message::Notification);
//! ```

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage, MAX_VISIBLE};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::Toast;
