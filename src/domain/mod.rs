// SPDX-License-Identifier: MPL-2.0
//! Domain layer - validated patient data.
//!
//! Types here have no dependency on the UI toolkit or on I/O. The API layer
//! converts wire payloads into them, and views only ever see these.
//!
//! # Modules
//!
//! - [`patient`]: [`Patient`](patient::Patient), [`Recommendation`](patient::Recommendation)
//!   and the [`PatientId`](patient::PatientId) newtype

pub mod patient;

pub use patient::{Patient, PatientId, Recommendation, RecommendationError, RecommendationSource};
