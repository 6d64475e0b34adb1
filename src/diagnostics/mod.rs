// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for collecting and exporting activity reports.
//!
//! Recovered failures (an image that would not load, a transform a widget
//! rejected) never interrupt the user. They are logged through `tracing`
//! and also recorded here so a report can be exported afterwards.
//!
//! # Architecture
//!
//! - [`EventRing`]: bounded history that counts evicted events
//! - [`DiagnosticEvent`]: user actions, warnings and errors
//! - [`DiagnosticsCollector`] / [`DiagnosticsHandle`]: channel-fed store
//!
//! # Privacy
//!
//! Messages are sanitized before storage: file paths and inline image
//! data never reach a report.

mod buffer;
mod collector;
mod events;
mod sanitizer;

pub use buffer::{EventCapacity, EventRing};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{
    DiagnosticEvent, DiagnosticEventKind, ErrorEvent, UserAction, WarningEvent,
};
pub use sanitizer::{sanitize_message, ErrorType, WarningType};
