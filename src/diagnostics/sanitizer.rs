// SPDX-License-Identifier: MPL-2.0
//! Message sanitization and warning/error categories.
//!
//! Diagnostic messages often embed image sources. File paths are private
//! and inline `data:` URLs can be megabytes long, so both are replaced by
//! placeholders before a message is stored.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

// =============================================================================
// Warning and Error Type Enums
// =============================================================================

/// Categories of recovered problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningType {
    /// An image could not be loaded; its slot stays empty.
    ImageLoadFailed,
    /// A stored or foreign crop transform was rejected; fit-to-cell used.
    TransformRejected,
    /// A crop widget could not be created for a cell.
    WidgetBindFailed,
    /// A configuration file was unreadable and defaults were used.
    ConfigurationIssue,
    Other,
}

/// Categories of failed operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Reading or writing a file failed.
    IoError,
    /// A project snapshot was rejected as a whole.
    RestoreRejected,
    /// Internal invariant violation.
    InternalError,
    Other,
}

// =============================================================================
// Message Sanitization
// =============================================================================

static DATA_URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // Media type and parameters are kept, the payload is dropped.
    Regex::new(r"data:([A-Za-z0-9.+/-]*)[^,\s]*,[^\s\x22']*").expect("data URL regex should compile")
});

static PATH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"("#,
        r#"/home/[^\s"'()\[\]]+"#,
        r#"|/Users/[^\s"'()\[\]]+"#,
        r#"|/tmp/[^\s"'()\[\]]+"#,
        r#"|/var/[^\s"'()\[\]]+"#,
        r#"|~/[^\s"'()\[\]]+"#,
        r#"|[A-Za-z]:\\[^\s"'()\[\]]+"#,
        r#"|\\\\[^\s"'()\[\]]+"#,
        r#")"#,
    ))
    .expect("path regex should compile")
});

/// Replaces file paths with `<path>` and data URL payloads with
/// `<data:media/type>`.
///
/// # Examples
///
/// ```
/// use sticker_sheet::diagnostics::sanitize_message;
///
/// let msg = "Failed to open /home/user/photos/cat.png";
/// assert_eq!(sanitize_message(msg), "Failed to open <path>");
///
/// let msg = "Cannot decode data:image/png;base64,iVBORw0KGgo=";
/// assert_eq!(sanitize_message(msg), "Cannot decode <data:image/png>");
/// ```
#[must_use]
pub fn sanitize_message(message: &str) -> String {
    let without_data = DATA_URL_PATTERN.replace_all(message, "<data:$1>");
    PATH_PATTERN.replace_all(&without_data, "<path>").into_owned()
}
