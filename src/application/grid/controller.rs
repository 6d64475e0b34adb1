// SPDX-License-Identifier: MPL-2.0
//! The grid controller.
//!
//! Owns the image slots, one crop widget per bound cell, the pending crop
//! propagations and the deferred import. All mutation goes through it so
//! the ordering rules hold everywhere:
//!
//! - the store always has exactly `mode.group_count()` slots;
//! - a widget showing an image is torn down before that image is released;
//! - a mode switch cancels any import still waiting to be assigned.

use tracing::{debug, info, warn};

use super::fullscreen::FullscreenEditor;
use super::store::{GroupImage, GroupImageStore};
use super::sync::{fan_out, CellBinding, CropSync, InitialCrop, PendingEdit};
use super::{AssignReport, EditOutcome, GridSettings, ResolvedCell};
use crate::application::port::{CropWidget, CropWidgetFactory, ImageSource};
use crate::application::scheduler::FrameScheduler;
use crate::application::snapshot::SnapshotImage;
use crate::diagnostics::{DiagnosticsHandle, UserAction, WarningType};
use crate::domain::grid::{
    CellIndex, CropTransform, GridError, GroupIndex, ImageRef, LayoutMode, PaperSize,
    PortableImage, CELL_COUNT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GridTask {
    Propagate(GroupIndex),
    AssignImport,
}

/// Owner of the sheet's grid state.
pub struct GridController<S: ImageSource, F: CropWidgetFactory> {
    source: S,
    factory: F,
    settings: GridSettings,
    mode: LayoutMode,
    paper: PaperSize,
    store: GroupImageStore,
    /// Indexed by cell.
    bindings: Vec<Option<CellBinding<F::Widget>>>,
    sync: CropSync,
    scheduler: FrameScheduler<GridTask>,
    pending_import: Vec<PortableImage>,
    fullscreen: Option<FullscreenEditor<F::Widget>>,
    diagnostics: Option<DiagnosticsHandle>,
}

impl<S: ImageSource, F: CropWidgetFactory> GridController<S, F> {
    /// Creates an empty sheet in the configured initial mode.
    pub fn new(source: S, factory: F, settings: GridSettings) -> Self {
        let mode = settings.initial_mode;
        Self {
            source,
            factory,
            settings,
            mode,
            paper: settings.paper,
            store: GroupImageStore::new(mode.group_count()),
            bindings: (0..CELL_COUNT).map(|_| None).collect(),
            sync: CropSync::new(),
            scheduler: FrameScheduler::new(),
            pending_import: Vec::new(),
            fullscreen: None,
            diagnostics: None,
        }
    }

    /// Records user actions and recovered failures to `handle`.
    #[must_use]
    pub fn with_diagnostics(mut self, handle: DiagnosticsHandle) -> Self {
        self.diagnostics = Some(handle);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    #[must_use]
    pub fn paper_size(&self) -> PaperSize {
        self.paper
    }

    #[must_use]
    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }

    #[must_use]
    pub fn store(&self) -> &GroupImageStore {
        &self.store
    }

    #[must_use]
    pub fn group_image(&self, group: GroupIndex) -> Option<&GroupImage> {
        self.store.get(group)
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    #[must_use]
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Whether `cell` currently has a live widget.
    #[must_use]
    pub fn is_bound(&self, cell: CellIndex) -> bool {
        self.binding(cell).is_some()
    }

    /// Transform the widget of `cell` currently shows.
    #[must_use]
    pub fn cell_transform(&self, cell: CellIndex) -> Option<CropTransform> {
        self.binding(cell).map(|b| b.widget.transform())
    }

    /// Widget of `cell`, for hosts that forward pointer input to it.
    pub fn cell_widget_mut(&mut self, cell: CellIndex) -> Option<&mut F::Widget> {
        self.binding_mut(cell).map(|b| &mut b.widget)
    }

    /// True while propagations or a deferred import are waiting.
    #[must_use]
    pub fn has_pending_work(&self) -> bool {
        !self.scheduler.is_idle()
    }

    /// True while an import is waiting for the layout to settle.
    #[must_use]
    pub fn has_pending_import(&self) -> bool {
        self.scheduler.is_pending(&GridTask::AssignImport)
    }

    fn binding(&self, cell: CellIndex) -> Option<&CellBinding<F::Widget>> {
        self.bindings.get(cell.value()).and_then(Option::as_ref)
    }

    fn binding_mut(&mut self, cell: CellIndex) -> Option<&mut CellBinding<F::Widget>> {
        self.bindings.get_mut(cell.value()).and_then(Option::as_mut)
    }

    fn check_group(&self, group: GroupIndex) -> Result<(), GridError> {
        if group.value() < self.store.len() {
            Ok(())
        } else {
            Err(GridError::GroupOutOfRange {
                index: group.value(),
                count: self.store.len(),
            })
        }
    }

    fn log_action(&self, action: UserAction) {
        if let Some(diagnostics) = &self.diagnostics {
            diagnostics.log_action(action);
        }
    }

    fn log_warning(&self, warning_type: WarningType, message: impl AsRef<str>) {
        if let Some(diagnostics) = &self.diagnostics {
            diagnostics.log_warning(warning_type, message);
        }
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Switches the layout mode.
    ///
    /// The first `min(old, new)` slots survive, the rest are released.
    /// Every cell is rebuilt even when the mode does not change, and a
    /// pending import is cancelled.
    pub fn set_mode(&mut self, mode: LayoutMode) {
        debug!(from = %self.mode, to = %mode, "switching layout mode");
        self.discard_fullscreen();
        self.cancel_import();
        self.commit_all_pending();

        self.teardown_all();
        let released = self.store.resize(mode.group_count());
        self.mode = mode;
        self.release(released);
        self.render_all();

        self.log_action(UserAction::SetMode { mode });
    }

    /// Changes the paper format and rebinds every cell to the new cell
    /// aspect ratio. Stored transforms are kept.
    pub fn set_paper_size(&mut self, paper: PaperSize) {
        self.discard_fullscreen();
        self.commit_all_pending();
        self.teardown_all();
        self.paper = paper;
        self.render_all();
        self.log_action(UserAction::SetPaperSize { paper });
    }

    fn teardown_cells(&mut self, group: GroupIndex) {
        for cell in self.mode.cells_in_group(group) {
            self.bindings[cell.value()] = None;
        }
    }

    fn teardown_all(&mut self) {
        for binding in &mut self.bindings {
            *binding = None;
        }
    }

    fn render_all(&mut self) {
        for cell in CellIndex::all() {
            self.bind_cell(cell);
        }
    }

    fn render_group(&mut self, group: GroupIndex) {
        self.teardown_cells(group);
        let cells: Vec<CellIndex> = self.mode.cells_in_group(group).collect();
        for cell in cells {
            self.bind_cell(cell);
        }
    }

    /// Transforms a fresh widget for `image` should try, in order.
    fn initial_candidates(&self, image: &GroupImage) -> Vec<CropTransform> {
        let aspect = self.paper.cell_aspect_ratio();
        image
            .transform
            .into_iter()
            .chain(image.legacy_box.and_then(|legacy| legacy.to_transform(aspect)))
            .collect()
    }

    fn bind_cell(&mut self, cell: CellIndex) {
        self.bindings[cell.value()] = None;
        let group = self.mode.resolve_group(cell);
        let Some(image) = self.store.get(group).copied() else {
            return;
        };
        let Some(dimensions) = self.source.dimensions(image.source) else {
            warn!(%cell, image = %image.source, "image has no dimensions, leaving cell unbound");
            return;
        };
        let aspect = self.paper.cell_aspect_ratio();
        let widget = match self.factory.create(image.source, dimensions, aspect) {
            Ok(widget) => widget,
            Err(err) => {
                warn!(%cell, error = %err, "failed to create crop widget");
                self.log_warning(WarningType::WidgetBindFailed, format!("{cell}: {err}"));
                return;
            }
        };
        let candidates = self.initial_candidates(&image);
        self.bindings[cell.value()] =
            Some(CellBinding::new(group, image.source, widget).with_initial(candidates));
        self.settle_cell(cell);
    }

    /// Loads the initial transform of `cell` if its widget became ready.
    fn settle_cell(&mut self, cell: CellIndex) {
        let outcome = self.binding_mut(cell).and_then(CellBinding::apply_initial);
        if outcome == Some(InitialCrop::Rejected) {
            self.log_warning(
                WarningType::TransformRejected,
                format!("{cell}: stored crop rejected, using fit"),
            );
        }
    }

    fn release(&mut self, images: Vec<ImageRef>) {
        for image in images {
            debug_assert!(
                !self.bindings.iter().flatten().any(|b| b.image == image),
                "{image} released while still bound"
            );
            self.source.release(image);
        }
    }

    // =========================================================================
    // Images
    // =========================================================================

    /// Loads `sources` into consecutive slots starting at `start`.
    ///
    /// Sources beyond the last slot are skipped. A source that fails to
    /// load leaves its slot as it was and the batch carries on.
    pub fn assign_images(&mut self, sources: &[PortableImage], start: GroupIndex) -> AssignReport {
        let slots = self.store.len().saturating_sub(start.value());
        let take = sources.len().min(slots);
        let mut report = AssignReport {
            skipped: sources.len() - take,
            ..AssignReport::default()
        };

        for (offset, portable) in sources.iter().take(take).enumerate() {
            let group = GroupIndex::new(start.value() + offset);
            match self.source.acquire(portable) {
                Ok(image) => {
                    self.replace_image(group, image);
                    report.assigned.push(group);
                }
                Err(err) => {
                    warn!(%group, source = %portable.label(), error = %err, "image failed to load");
                    self.log_warning(WarningType::ImageLoadFailed, format!("{group}: {err}"));
                    report.failed.push((group, err));
                }
            }
        }

        self.log_action(UserAction::AssignImages {
            requested: sources.len(),
            assigned: report.assigned.len(),
        });
        report
    }

    /// Puts a freshly acquired `image` into an in-range `group`.
    fn replace_image(&mut self, group: GroupIndex, image: ImageRef) {
        if self.fullscreen.as_ref().is_some_and(|f| f.group() == group) {
            self.discard_fullscreen();
        }
        self.drop_pending(group);
        match self.store.set_image(group, image) {
            Ok(displaced) => {
                self.teardown_cells(group);
                self.release(displaced.into_iter().collect());
                self.render_group(group);
            }
            Err(err) => {
                warn!(error = %err, "no slot for acquired image");
                self.source.release(image);
            }
        }
    }

    /// Replaces the image of a single slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot does not exist under the current mode
    /// or the image fails to load. The slot is unchanged in both cases.
    pub fn upload(&mut self, group: GroupIndex, source: &PortableImage) -> crate::error::Result<()> {
        self.check_group(group)?;
        let report = self.assign_images(std::slice::from_ref(source), group);
        match report.failed.into_iter().next() {
            Some((_, err)) => Err(err.into()),
            None => Ok(()),
        }
    }

    /// Imports an ordered batch handed over by another surface.
    ///
    /// The mode is chosen from the count (capped at 16) and switched right
    /// away; the images are assigned once the new layout has settled.
    /// Returns the chosen mode, or `None` for an empty batch.
    pub fn import_images(&mut self, sources: Vec<PortableImage>) -> Option<LayoutMode> {
        let batch: Vec<PortableImage> = sources.into_iter().take(CELL_COUNT).collect();
        let mode = LayoutMode::for_image_count(batch.len())?;
        info!(count = batch.len(), %mode, "importing images");

        self.set_mode(mode);
        self.pending_import = batch;
        self.scheduler
            .schedule_after(GridTask::AssignImport, self.settings.settle_frames.value());
        self.log_action(UserAction::ImportImages {
            count: self.pending_import.len(),
        });
        Some(mode)
    }

    fn cancel_import(&mut self) {
        if self.scheduler.cancel(&GridTask::AssignImport) {
            debug!(count = self.pending_import.len(), "pending import superseded");
        }
        self.pending_import.clear();
    }

    /// Swaps the images (and transforms) of two slots.
    ///
    /// # Errors
    ///
    /// Returns an error if either slot does not exist under the current mode.
    pub fn reorder(&mut self, a: GroupIndex, b: GroupIndex) -> Result<(), GridError> {
        self.check_group(a)?;
        self.check_group(b)?;
        if a == b {
            return Ok(());
        }
        if self.fullscreen.as_ref().is_some_and(|f| f.group() == a || f.group() == b) {
            self.discard_fullscreen();
        }
        self.commit_pending(a);
        self.commit_pending(b);
        self.store.swap(a, b)?;
        self.render_group(a);
        self.render_group(b);
        self.log_action(UserAction::ReorderGroups);
        Ok(())
    }

    /// Empties one slot and releases its image.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot does not exist under the current mode.
    pub fn clear_slot(&mut self, group: GroupIndex) -> Result<(), GridError> {
        self.check_group(group)?;
        if self.fullscreen.as_ref().is_some_and(|f| f.group() == group) {
            self.discard_fullscreen();
        }
        self.drop_pending(group);
        let displaced = self.store.clear(group)?;
        self.teardown_cells(group);
        self.release(displaced.into_iter().collect());
        self.log_action(UserAction::ClearSlot);
        Ok(())
    }

    // =========================================================================
    // Crop synchronization
    // =========================================================================

    /// Handles a crop edit reported by the widget of `cell`.
    ///
    /// Edits are coalesced: the group propagates at most once per frame
    /// with the latest value.
    pub fn on_crop_edited(&mut self, cell: CellIndex, transform: CropTransform) -> EditOutcome {
        let Some(binding) = self.binding_mut(cell) else {
            return EditOutcome::Ignored;
        };
        if binding.take_echo(transform) {
            return EditOutcome::Echo;
        }
        let group = binding.group;
        self.sync.record(
            group,
            PendingEdit {
                origin: cell,
                transform,
            },
        );
        self.scheduler.schedule_if_absent(GridTask::Propagate(group));
        EditOutcome::Queued
    }

    /// Ends a drag or pinch on `cell`: the settled transform goes to the
    /// store and to every sibling right away.
    pub fn end_interaction(&mut self, cell: CellIndex) {
        let Some(binding) = self.binding(cell) else {
            return;
        };
        let group = binding.group;
        let transform = binding.widget.transform();
        self.drop_pending(group);
        self.propagate(group, Some(cell), transform);
    }

    /// Zooms the widget of `cell` (mouse wheel) and syncs the group.
    pub fn zoom_cell(&mut self, cell: CellIndex, delta: f32) {
        let Some(binding) = self.binding_mut(cell) else {
            return;
        };
        if !binding.widget.is_ready() {
            return;
        }
        binding.widget.zoom_by(delta);
        self.end_interaction(cell);
    }

    /// Returns every cell of `group` to fit-to-cell.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot does not exist under the current mode.
    pub fn reset_crop(&mut self, group: GroupIndex) -> Result<(), GridError> {
        self.drop_pending(group);
        self.store.reset_transform(group)?;
        let cells: Vec<CellIndex> = self.mode.cells_in_group(group).collect();
        for cell in cells {
            if let Some(binding) = self.binding_mut(cell) {
                binding.reset();
            }
        }
        self.log_action(UserAction::ResetCrop);
        Ok(())
    }

    fn propagate(&mut self, group: GroupIndex, origin: Option<CellIndex>, transform: CropTransform) {
        match self.store.set_transform(group, transform) {
            Ok(_) => {}
            Err(err) => {
                warn!(error = %err, "dropping crop edit for missing group");
                return;
            }
        }
        let outcome = fan_out(&mut self.bindings, self.mode, group, origin, transform);
        for cell in &outcome.rejected {
            self.log_warning(
                WarningType::TransformRejected,
                format!("{cell}: propagated crop rejected, using fit"),
            );
        }
        debug!(%group, written = outcome.written, "crop propagated");
    }

    /// Forgets the pending propagation of `group`.
    fn drop_pending(&mut self, group: GroupIndex) {
        self.sync.take(group);
        self.scheduler.cancel(&GridTask::Propagate(group));
    }

    /// Writes the pending value of `group` to the store without fan-out.
    fn commit_pending(&mut self, group: GroupIndex) {
        self.scheduler.cancel(&GridTask::Propagate(group));
        if let Some(edit) = self.sync.take(group) {
            if let Err(err) = self.store.set_transform(group, edit.transform) {
                warn!(error = %err, "dropping pending crop for missing group");
            }
        }
    }

    fn commit_all_pending(&mut self) {
        for group in (0..self.store.len()).map(GroupIndex::new) {
            self.commit_pending(group);
        }
        self.sync.clear();
        self.scheduler
            .cancel_where(|task| matches!(task, GridTask::Propagate(_)));
    }

    // =========================================================================
    // Frame driving
    // =========================================================================

    /// Runs one animation frame: widgets that became ready get their
    /// initial transform, then due propagations and a due import run.
    ///
    /// Returns the import's report when it ran this frame.
    pub fn on_frame(&mut self) -> Option<AssignReport> {
        self.settle_widgets();
        let due = self.scheduler.advance();
        self.run_tasks(due)
    }

    /// Runs everything pending now, regardless of delays.
    pub fn settle(&mut self) -> Option<AssignReport> {
        self.settle_widgets();
        let due = self.scheduler.drain_all();
        let report = self.run_tasks(due);
        self.settle_widgets();
        report
    }

    fn settle_widgets(&mut self) {
        for cell in CellIndex::all() {
            if self.binding(cell).is_some_and(CellBinding::has_pending_initial) {
                self.settle_cell(cell);
            }
        }
        if let Some(editor) = self.fullscreen.as_mut() {
            editor.settle();
        }
    }

    fn run_tasks(&mut self, due: Vec<GridTask>) -> Option<AssignReport> {
        let mut import_report = None;
        for task in due {
            match task {
                GridTask::Propagate(group) => {
                    if let Some(edit) = self.sync.take(group) {
                        self.propagate(group, Some(edit.origin), edit.transform);
                    }
                }
                GridTask::AssignImport => {
                    let batch = std::mem::take(&mut self.pending_import);
                    import_report = Some(self.assign_images(&batch, GroupIndex::new(0)));
                }
            }
        }
        import_report
    }

    // =========================================================================
    // Fullscreen editing
    // =========================================================================

    /// Opens the fullscreen editor on the group of `cell`.
    ///
    /// Returns false when the group has no image or no widget could be
    /// created. An editor already open is closed without committing.
    pub fn open_fullscreen(&mut self, cell: CellIndex) -> bool {
        self.discard_fullscreen();
        let group = self.mode.resolve_group(cell);
        self.commit_pending(group);
        let Some(image) = self.store.get(group).copied() else {
            return false;
        };
        let Some(dimensions) = self.source.dimensions(image.source) else {
            return false;
        };
        let aspect = self.paper.cell_aspect_ratio();
        let widget = match self.factory.create(image.source, dimensions, aspect) {
            Ok(widget) => widget,
            Err(err) => {
                warn!(%cell, error = %err, "failed to open fullscreen editor");
                self.log_warning(WarningType::WidgetBindFailed, format!("fullscreen: {err}"));
                return false;
            }
        };
        let candidates = self.initial_candidates(&image);
        let mut editor = FullscreenEditor::new(
            cell,
            group,
            image.source,
            widget,
            candidates,
            dimensions,
            aspect,
            self.settings.max_crop_scale,
        );
        if editor.settle() == Some(InitialCrop::Rejected) {
            self.log_warning(WarningType::TransformRejected, "fullscreen: stored crop rejected");
        }
        self.fullscreen = Some(editor);
        self.log_action(UserAction::OpenFullscreen);
        true
    }

    #[must_use]
    pub fn fullscreen(&self) -> Option<&FullscreenEditor<F::Widget>> {
        self.fullscreen.as_ref()
    }

    pub fn fullscreen_mut(&mut self) -> Option<&mut FullscreenEditor<F::Widget>> {
        self.fullscreen.as_mut()
    }

    /// Closes the fullscreen editor.
    ///
    /// With `commit`, the final transform is stored and applied to every
    /// cell of the group, the originating cell included. Returns the
    /// committed transform.
    pub fn close_fullscreen(&mut self, commit: bool) -> Option<CropTransform> {
        let editor = self.fullscreen.take()?;
        let group = editor.group();
        let image = editor.image();
        let transform = editor.finish();
        self.log_action(UserAction::CloseFullscreen { committed: commit });
        if !commit {
            return None;
        }
        if self.store.get(group).map(|g| g.source) != Some(image) {
            warn!(%group, "group image changed while editing, dropping fullscreen result");
            return None;
        }
        self.drop_pending(group);
        self.propagate(group, None, transform);
        Some(transform)
    }

    fn discard_fullscreen(&mut self) {
        if self.fullscreen.take().is_some() {
            debug!("fullscreen editor discarded");
        }
    }

    // =========================================================================
    // Export and persistence
    // =========================================================================

    /// Effective transform of a slot: stored, else legacy, else fit,
    /// clamped to the image.
    fn effective_transform(&self, image: &GroupImage) -> CropTransform {
        let aspect = self.paper.cell_aspect_ratio();
        let raw = image
            .transform
            .or_else(|| image.legacy_box.and_then(|legacy| legacy.to_transform(aspect)))
            .unwrap_or(CropTransform::FIT);
        match self.source.dimensions(image.source) {
            Some(dimensions) => raw.clamped(dimensions, aspect, self.settings.max_crop_scale),
            None => CropTransform::FIT,
        }
    }

    /// Per-cell `(group, image, transform)` triples for rendering.
    #[must_use]
    pub fn resolved_cells(&self) -> Vec<ResolvedCell> {
        CellIndex::all()
            .map(|cell| {
                let group = self.mode.resolve_group(cell);
                let image = self.store.get(group);
                ResolvedCell {
                    cell,
                    group,
                    image: image.map(|i| i.source),
                    transform: image.map_or(CropTransform::FIT, |i| self.effective_transform(i)),
                }
            })
            .collect()
    }

    /// Portable form of every slot, for saving.
    ///
    /// Pending edits are included. A slot whose image cannot be exported
    /// is saved as empty.
    #[must_use]
    pub fn export_images(&self) -> Vec<Option<SnapshotImage>> {
        self.store
            .iter()
            .map(|(group, slot)| {
                let image = slot?;
                let Some(source) = self.source.export(image.source) else {
                    warn!(%group, "image cannot be exported, saving slot as empty");
                    return None;
                };
                let pending = self.sync.peek(group).map(|edit| edit.transform);
                Some(SnapshotImage {
                    source,
                    transform: pending.or(image.transform),
                    legacy_box: image.legacy_box,
                })
            })
            .collect()
    }

    /// Replaces the whole grid with validated snapshot content.
    ///
    /// Images that fail to load leave their slot empty.
    pub fn restore(&mut self, mode: LayoutMode, paper: PaperSize, images: &[Option<SnapshotImage>]) {
        self.discard_fullscreen();
        self.cancel_import();
        self.sync.clear();
        self.scheduler.drain_all();

        self.teardown_all();
        let released = self.store.clear_all();
        self.release(released);
        let released = self.store.resize(mode.group_count());
        self.release(released);
        self.mode = mode;
        self.paper = paper;

        for (index, entry) in images.iter().enumerate().take(self.store.len()) {
            let Some(entry) = entry else {
                continue;
            };
            let group = GroupIndex::new(index);
            let image = match self.source.acquire(&entry.source) {
                Ok(image) => image,
                Err(err) => {
                    warn!(%group, error = %err, "restored image failed to load");
                    self.log_warning(WarningType::ImageLoadFailed, format!("{group}: {err}"));
                    continue;
                }
            };
            if let Err(err) = self.store.set_image(group, image) {
                warn!(error = %err, "no slot for restored image");
                self.source.release(image);
                continue;
            }
            match entry.transform {
                Some(transform) if !transform.is_usable() => {
                    warn!(%group, ?transform, "restored crop is invalid, using fit");
                    self.log_warning(
                        WarningType::TransformRejected,
                        format!("{group}: restored crop is invalid, using fit"),
                    );
                }
                Some(transform) => {
                    if let Err(err) = self.store.set_transform(group, transform) {
                        warn!(error = %err, "no slot for restored crop");
                    }
                }
                None => {}
            }
            if let Some(legacy) = entry.legacy_box {
                if let Err(err) = self.store.set_legacy_box(group, legacy) {
                    warn!(error = %err, "no slot for restored crop box");
                }
            }
        }

        self.render_all();
        self.log_action(UserAction::RestoreProject);
    }
}

impl<S: ImageSource, F: CropWidgetFactory> Drop for GridController<S, F> {
    fn drop(&mut self) {
        self.fullscreen = None;
        self.teardown_all();
        let released = self.store.clear_all();
        for image in released {
            self.source.release(image);
        }
    }
}
