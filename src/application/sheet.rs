// SPDX-License-Identifier: MPL-2.0
//! The sticker sheet: grid plus stamps, with save and restore.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use super::grid::{GridController, GridSettings};
use super::port::{CropWidgetFactory, ImageSource};
use super::snapshot::{ProjectSnapshot, RestoreError, SnapshotStamp, SNAPSHOT_VERSION};
use super::stamps::{Placement, StampLayer};
use crate::diagnostics::{DiagnosticsHandle, ErrorType, UserAction};
use crate::domain::grid::PaperSize;
use crate::domain::stamp::{Stamp, StampContent, StampId};

/// A whole sheet.
pub struct StickerSheet<S: ImageSource, F: CropWidgetFactory> {
    grid: GridController<S, F>,
    stamps: StampLayer,
    diagnostics: Option<DiagnosticsHandle>,
}

impl<S: ImageSource, F: CropWidgetFactory> StickerSheet<S, F> {
    pub fn new(source: S, factory: F, settings: GridSettings) -> Self {
        Self {
            grid: GridController::new(source, factory, settings),
            stamps: StampLayer::new(settings.paper.sheet_center_px()),
            diagnostics: None,
        }
    }

    #[must_use]
    pub fn with_diagnostics(mut self, handle: DiagnosticsHandle) -> Self {
        self.grid = self.grid.with_diagnostics(handle.clone());
        self.diagnostics = Some(handle);
        self
    }

    #[must_use]
    pub fn grid(&self) -> &GridController<S, F> {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut GridController<S, F> {
        &mut self.grid
    }

    #[must_use]
    pub fn stamps(&self) -> &StampLayer {
        &self.stamps
    }

    pub fn stamps_mut(&mut self) -> &mut StampLayer {
        &mut self.stamps
    }

    fn log_action(&self, action: UserAction) {
        if let Some(diagnostics) = &self.diagnostics {
            diagnostics.log_action(action);
        }
    }

    /// Changes the paper format; stamps keep their positions.
    pub fn set_paper_size(&mut self, paper: PaperSize) {
        self.grid.set_paper_size(paper);
        self.stamps.set_paper_center(paper.sheet_center_px());
    }

    pub fn create_stamp(&mut self, content: StampContent, placement: Placement) -> StampId {
        let id = self.stamps.create(content, placement);
        self.log_action(UserAction::CreateStamp);
        id
    }

    pub fn remove_stamp(&mut self, id: StampId) -> bool {
        let removed = self.stamps.remove(id);
        if removed {
            self.log_action(UserAction::DeleteStamp);
        }
        removed
    }

    /// Drives one animation frame of every engine.
    pub fn on_frame(&mut self) {
        self.grid.on_frame();
        self.stamps.on_frame();
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Captures the sheet in portable form.
    #[must_use]
    pub fn serialize_state(&self) -> ProjectSnapshot {
        ProjectSnapshot {
            version: SNAPSHOT_VERSION,
            mode: self.grid.mode(),
            paper: self.grid.paper_size(),
            images: self.grid.export_images(),
            stamps: self
                .stamps
                .iter()
                .map(|s| SnapshotStamp {
                    content: s.content.clone(),
                    position: s.position,
                    size: s.size,
                    rotation_deg: s.rotation_deg,
                })
                .collect(),
        }
    }

    /// Replaces the sheet with `snapshot`.
    ///
    /// The snapshot is validated first; on error nothing changes. Images
    /// that fail to load leave their slot empty.
    ///
    /// # Errors
    ///
    /// Returns the validation error.
    pub fn restore_state(&mut self, snapshot: &ProjectSnapshot) -> Result<(), RestoreError> {
        if let Err(err) = snapshot.validate() {
            warn!(error = %err, "project rejected");
            if let Some(diagnostics) = &self.diagnostics {
                diagnostics.log_error(ErrorType::RestoreRejected, err.to_string());
            }
            return Err(err);
        }

        self.grid
            .restore(snapshot.mode, snapshot.paper, &snapshot.images);
        self.stamps.set_paper_center(snapshot.paper.sheet_center_px());
        let stamps = snapshot
            .stamps
            .iter()
            .zip(1..)
            .map(|(s, raw)| Stamp {
                id: StampId::new(raw),
                content: s.content.clone(),
                position: s.position,
                size: s.size,
                rotation_deg: s.rotation_deg,
            })
            .collect();
        self.stamps.replace_all(stamps);
        info!(
            mode = %snapshot.mode,
            images = self.grid.store().occupied(),
            stamps = self.stamps.len(),
            "project restored"
        );
        Ok(())
    }

    /// Parses, validates and restores a JSON project. All or nothing.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed or invalid documents.
    pub fn restore_json(&mut self, json: &str) -> Result<(), RestoreError> {
        let snapshot = match ProjectSnapshot::from_json(json) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(error = %err, "project rejected");
                if let Some(diagnostics) = &self.diagnostics {
                    diagnostics.log_error(ErrorType::RestoreRejected, err.to_string());
                }
                return Err(err);
            }
        };
        self.restore_state(&snapshot)
    }

    /// Writes the project as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> crate::error::Result<()> {
        let json = self.serialize_state().to_json()?;
        fs::write(path, json)?;
        self.log_action(UserAction::SaveProject);
        Ok(())
    }

    /// Reads and restores a JSON project.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is rejected.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> crate::error::Result<()> {
        let json = fs::read_to_string(path)?;
        self.restore_json(&json)?;
        Ok(())
    }
}
