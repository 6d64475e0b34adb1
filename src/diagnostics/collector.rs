// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector.
//!
//! The grid and navigation engines hold cloneable [`DiagnosticsHandle`]s
//! and push events through a bounded channel; the owner of the
//! [`DiagnosticsCollector`] drains the channel into a circular buffer once
//! per frame and can export everything as a JSON report.

use std::fs;
use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender};
use serde::Serialize;

use super::{
    sanitize_message, DiagnosticEvent, DiagnosticEventKind, ErrorEvent, EventRing,
    ErrorType, EventCapacity, UserAction, WarningEvent, WarningType,
};

/// Handle for sending diagnostic events to the collector.
///
/// Sends never block: when the channel is full the event is dropped.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    pub fn log_action(&self, action: UserAction) {
        self.log_action_with_details(action, None);
    }

    pub fn log_action_with_details(&self, action: UserAction, details: Option<String>) {
        let details = details.map(|d| sanitize_message(&d));
        self.send(DiagnosticEventKind::UserAction { action, details });
    }

    /// Logs a recovered problem. The message is sanitized.
    pub fn log_warning(&self, warning_type: WarningType, message: impl AsRef<str>) {
        let event = WarningEvent::new(warning_type, sanitize_message(message.as_ref()));
        self.send(DiagnosticEventKind::Warning { event });
    }

    /// Logs a failed operation. The message is sanitized.
    pub fn log_error(&self, error_type: ErrorType, message: impl AsRef<str>) {
        let event = ErrorEvent::new(error_type, sanitize_message(message.as_ref()));
        self.send(DiagnosticEventKind::Error { event });
    }

    fn send(&self, kind: DiagnosticEventKind) {
        let _ = self.event_tx.try_send(DiagnosticEvent::new(kind));
    }
}

/// Channel depth between handles and the collector.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Central store of diagnostic events.
pub struct DiagnosticsCollector {
    buffer: EventRing<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    event_tx: Sender<DiagnosticEvent>,
    started_at: Instant,
    started_at_utc: DateTime<Utc>,
}

impl DiagnosticsCollector {
    #[must_use]
    pub fn new(capacity: EventCapacity) -> Self {
        let (event_tx, event_rx) = bounded(DEFAULT_CHANNEL_CAPACITY);
        Self {
            buffer: EventRing::new(capacity),
            event_rx,
            event_tx,
            started_at: Instant::now(),
            started_at_utc: Utc::now(),
        }
    }

    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Moves every queued event into the buffer.
    pub fn process_pending(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.buffer.push(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    /// Number of buffered warnings of `warning_type`.
    #[must_use]
    pub fn warning_count(&self, warning_type: WarningType) -> usize {
        self.iter()
            .filter(|e| {
                matches!(&e.kind, DiagnosticEventKind::Warning { event } if event.warning_type == warning_type)
            })
            .count()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Exports the buffered events as a pretty-printed JSON report.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.build_report())
    }

    /// Writes the JSON report to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn export_to_file(&self, path: impl AsRef<Path>) -> crate::error::Result<()> {
        let json = self.export_json()?;
        fs::write(path, json)?;
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation)] // Milliseconds since start fit in u64
    fn build_report(&self) -> DiagnosticReport<'_> {
        DiagnosticReport {
            generated_at: Utc::now().to_rfc3339(),
            collection_started_at: self.started_at_utc.to_rfc3339(),
            app_version: env!("CARGO_PKG_VERSION"),
            event_count: self.buffer.len(),
            evicted_count: self.buffer.evicted(),
            events: self
                .buffer
                .iter()
                .map(|event| ReportedEvent {
                    offset_ms: event.timestamp.saturating_duration_since(self.started_at).as_millis()
                        as u64,
                    kind: &event.kind,
                })
                .collect(),
        }
    }
}

#[derive(Serialize)]
struct DiagnosticReport<'a> {
    generated_at: String,
    collection_started_at: String,
    app_version: &'static str,
    event_count: usize,
    evicted_count: u64,
    events: Vec<ReportedEvent<'a>>,
}

#[derive(Serialize)]
struct ReportedEvent<'a> {
    offset_ms: u64,
    #[serde(flatten)]
    kind: &'a DiagnosticEventKind,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::LayoutMode;

    #[test]
    fn handle_events_arrive_after_processing() {
        let mut collector = DiagnosticsCollector::new(EventCapacity::default());
        let handle = collector.handle();
        handle.log_action(UserAction::SetMode {
            mode: LayoutMode::Single,
        });
        handle.log_warning(WarningType::ImageLoadFailed, "bad file");
        assert!(collector.is_empty());

        collector.process_pending();
        assert_eq!(collector.len(), 2);
        assert_eq!(collector.warning_count(WarningType::ImageLoadFailed), 1);
    }

    #[test]
    fn warnings_are_sanitized() {
        let mut collector = DiagnosticsCollector::new(EventCapacity::default());
        collector
            .handle()
            .log_warning(WarningType::ImageLoadFailed, "cannot open /home/ann/cat.png");
        collector.process_pending();

        let event = collector.iter().next().unwrap();
        match &event.kind {
            DiagnosticEventKind::Warning { event } => {
                assert_eq!(event.message, "cannot open <path>");
            }
            other => panic!("expected warning, got {other:?}"),
        }
    }

    #[test]
    fn export_json_lists_events() {
        let mut collector = DiagnosticsCollector::new(EventCapacity::default());
        collector.handle().log_error(ErrorType::RestoreRejected, "images: not an array");
        collector.process_pending();

        let json = collector.export_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["event_count"], 1);
        assert_eq!(value["evicted_count"], 0);
        assert_eq!(value["events"][0]["type"], "error");
        assert_eq!(value["events"][0]["event"]["error_type"], "restore_rejected");
    }

    #[test]
    fn overflow_is_reported_as_evicted() {
        let capacity = EventCapacity::new(0);
        let mut collector = DiagnosticsCollector::new(capacity);
        let handle = collector.handle();
        for _ in 0..capacity.value() + 3 {
            handle.log_action(UserAction::ResetCrop);
        }
        collector.process_pending();

        assert_eq!(collector.len(), capacity.value());
        let value: serde_json::Value =
            serde_json::from_str(&collector.export_json().unwrap()).unwrap();
        assert_eq!(value["evicted_count"], 3);
    }

    #[test]
    fn export_to_file_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let collector = DiagnosticsCollector::new(EventCapacity::default());
        collector.export_to_file(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"event_count\": 0"));
    }
}
