// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! Every screen follows the Elm-style "state down, messages up" pattern: a
//! `ViewContext` carries what the view needs, `Message` is what the widgets
//! emit and `update` turns a message into an `Event` for the app.
//!
//! # Screens
//!
//! - [`uploader`] - CSV drop zone and file picker
//! - [`patient_selector`] - analyzed patients as cards
//! - [`food_recommendations`] - supplements and foods for one patient
//! - [`report_viewer`] - the generated report, fullscreen and download
//!
//! # Shared
//!
//! - [`header`] - app name and language selector
//! - [`notifications`] - toasts
//! - [`layout`] - right-to-left aware rows and alignment
//! - [`widgets`] - canvas spinner
//! - [`styles`] / [`design_tokens`] - look and feel

pub mod design_tokens;
pub mod food_recommendations;
pub mod header;
pub mod layout;
pub mod notifications;
pub mod patient_selector;
pub mod report_viewer;
pub mod styles;
pub mod uploader;
pub mod widgets;
