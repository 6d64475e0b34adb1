// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types.
//!
//! Events record what the user did to the sheet and every problem the
//! engines recovered from, so a report can show what led to a broken
//! layout.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::{ErrorType, WarningType};
use crate::domain::grid::{LayoutMode, PaperSize};

/// User-initiated operations on the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UserAction {
    SetMode { mode: LayoutMode },
    SetPaperSize { paper: PaperSize },
    AssignImages { requested: usize, assigned: usize },
    ImportImages { count: usize },
    ReorderGroups,
    ClearSlot,
    OpenFullscreen,
    CloseFullscreen { committed: bool },
    ResetCrop,
    SaveProject,
    RestoreProject,
    CreateStamp,
    DeleteStamp,
}

/// A recovered problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningEvent {
    pub warning_type: WarningType,
    pub message: String,
}

impl WarningEvent {
    #[must_use]
    pub fn new(warning_type: WarningType, message: impl Into<String>) -> Self {
        Self {
            warning_type,
            message: message.into(),
        }
    }
}

/// A failed operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEvent {
    pub error_type: ErrorType,
    pub message: String,
}

impl ErrorEvent {
    #[must_use]
    pub fn new(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
        }
    }
}

/// A diagnostic event with its capture time.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// Monotonic capture time.
    pub timestamp: Instant,
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }

    #[must_use]
    pub fn with_timestamp(kind: DiagnosticEventKind, timestamp: Instant) -> Self {
        Self { timestamp, kind }
    }
}

/// Type and payload of a diagnostic event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    UserAction {
        action: UserAction,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
    Warning {
        event: WarningEvent,
    },
    Error {
        event: ErrorEvent,
    },
}
