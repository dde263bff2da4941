// SPDX-License-Identifier: MPL-2.0
//! `oncocross` is a desktop client for the OncoCross nutrition backend,
//! built with the Iced GUI framework.
//!
//! It uploads one CSV of patient data, lists the analyzed patients with
//! their detected supplements and food recommendations, and shows or
//! downloads the generated nutrition report. The interface is localized in
//! English, Korean, Chinese and Arabic, with a right-to-left layout for
//! Arabic.

pub mod api;
pub mod app;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod report;
pub mod session;
pub mod ui;
pub mod upload;
