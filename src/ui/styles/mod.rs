// SPDX-License-Identifier: MPL-2.0
//! Styles shared by all views.

pub mod button;
pub mod container;
