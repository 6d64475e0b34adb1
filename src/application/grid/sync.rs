// SPDX-License-Identifier: MPL-2.0
//! Crop synchronization.
//!
//! Every cell of a group shows the same image through its own crop widget.
//! When the user pans or zooms one of them, the new transform is written
//! to the group's slot once and then applied to the sibling widgets.
//!
//! Applying a transform to a widget makes it report a crop edit of its
//! own a little later. Each binding keeps the transforms the engine wrote
//! and the widget has not reported back yet, oldest first. A report
//! matching one of them is an echo and is dropped instead of starting
//! another round of propagation.

use std::collections::{BTreeMap, VecDeque};

use tracing::warn;

use crate::application::port::{CropWidget, CropWidgetError};
use crate::domain::grid::{CellIndex, CropTransform, GroupIndex, ImageRef, LayoutMode};

// Widgets that never report back must not grow the queue forever.
const MAX_OUTSTANDING_ECHOES: usize = 8;

/// A live crop widget bound to one cell.
#[derive(Debug)]
pub struct CellBinding<W> {
    pub group: GroupIndex,
    pub image: ImageRef,
    pub widget: W,
    echoes: VecDeque<CropTransform>,
    // Transforms to try, in order, once the widget is ready.
    initial: Option<Vec<CropTransform>>,
}

/// How a freshly bound widget got its first transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialCrop {
    /// Nothing stored; the widget stays at fit-to-cell.
    Fit,
    /// A stored transform was applied. `fallback` is set when an earlier
    /// candidate was rejected first.
    Applied { fallback: bool },
    /// Every candidate was rejected; the widget was reset to fit.
    Rejected,
}

impl<W: CropWidget> CellBinding<W> {
    #[must_use]
    pub fn new(group: GroupIndex, image: ImageRef, widget: W) -> Self {
        Self {
            group,
            image,
            widget,
            echoes: VecDeque::new(),
            initial: None,
        }
    }

    /// Sets the transforms to try, in order, when the widget is ready.
    #[must_use]
    pub fn with_initial(mut self, candidates: Vec<CropTransform>) -> Self {
        self.initial = Some(candidates);
        self
    }

    #[must_use]
    pub fn has_pending_initial(&self) -> bool {
        self.initial.is_some()
    }

    /// Applies the first acceptable initial candidate.
    ///
    /// Returns `None` while the widget is not ready or when the initial
    /// transform was already applied.
    pub fn apply_initial(&mut self) -> Option<InitialCrop> {
        if !self.widget.is_ready() {
            return None;
        }
        let candidates = self.initial.take()?;
        if candidates.is_empty() {
            return Some(InitialCrop::Fit);
        }
        for (index, candidate) in candidates.into_iter().enumerate() {
            match self.apply(candidate) {
                Ok(_) => return Some(InitialCrop::Applied { fallback: index > 0 }),
                Err(err) => {
                    warn!(group = %self.group, error = %err, "stored crop rejected");
                }
            }
        }
        self.reset();
        Some(InitialCrop::Rejected)
    }

    /// Applies `transform` unless the widget already shows it.
    ///
    /// Returns whether a write happened.
    ///
    /// # Errors
    ///
    /// Returns the widget's error when it rejects the value.
    pub fn apply(&mut self, transform: CropTransform) -> Result<bool, CropWidgetError> {
        // An explicit write supersedes whatever the binding started with.
        self.initial = None;
        if self.widget.transform() == transform {
            return Ok(false);
        }
        self.widget.set_transform(transform)?;
        self.expect_echo();
        Ok(true)
    }

    /// Returns to fit-to-cell, expecting the matching echo.
    pub fn reset(&mut self) {
        self.initial = None;
        self.widget.reset();
        self.expect_echo();
    }

    /// Returns true when `reported` is the widget repeating something the
    /// engine told it.
    ///
    /// The matching write is acknowledged together with every older one,
    /// since a widget reports its writes in order.
    pub fn take_echo(&mut self, reported: CropTransform) -> bool {
        match self.echoes.iter().position(|echo| *echo == reported) {
            Some(index) => {
                self.echoes.drain(..=index);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn outstanding_echoes(&self) -> usize {
        self.echoes.len()
    }

    fn expect_echo(&mut self) {
        if self.echoes.len() == MAX_OUTSTANDING_ECHOES {
            self.echoes.pop_front();
        }
        self.echoes.push_back(self.widget.transform());
    }
}

/// Latest transform waiting to be propagated for a group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingEdit {
    pub origin: CellIndex,
    pub transform: CropTransform,
}

/// Pending propagations, at most one per group.
#[derive(Debug, Clone, Default)]
pub struct CropSync {
    pending: BTreeMap<GroupIndex, PendingEdit>,
}

impl CropSync {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an edit. Later edits overwrite the pending value.
    ///
    /// Returns true when nothing was pending for the group yet, meaning
    /// the caller should schedule a propagation.
    pub fn record(&mut self, group: GroupIndex, edit: PendingEdit) -> bool {
        self.pending.insert(group, edit).is_none()
    }

    pub fn take(&mut self, group: GroupIndex) -> Option<PendingEdit> {
        self.pending.remove(&group)
    }

    #[must_use]
    pub fn peek(&self, group: GroupIndex) -> Option<&PendingEdit> {
        self.pending.get(&group)
    }

    #[must_use]
    pub fn is_pending(&self, group: GroupIndex) -> bool {
        self.pending.contains_key(&group)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

/// Outcome of a fan-out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FanOut {
    /// Widgets that received a write.
    pub written: usize,
    /// Cells whose widget rejected the transform and fell back to fit.
    pub rejected: Vec<CellIndex>,
}

/// Applies `transform` to every ready cell of `group` except `skip`.
///
/// Unbound and not-ready cells are skipped. A widget that rejects the
/// value is reset to fit-to-cell.
pub fn fan_out<W: CropWidget>(
    bindings: &mut [Option<CellBinding<W>>],
    mode: LayoutMode,
    group: GroupIndex,
    skip: Option<CellIndex>,
    transform: CropTransform,
) -> FanOut {
    let mut outcome = FanOut::default();
    for cell in mode.cells_in_group(group) {
        if Some(cell) == skip {
            continue;
        }
        let Some(binding) = bindings.get_mut(cell.value()).and_then(Option::as_mut) else {
            continue;
        };
        if !binding.widget.is_ready() {
            continue;
        }
        match binding.apply(transform) {
            Ok(true) => outcome.written += 1,
            Ok(false) => {}
            Err(err) => {
                warn!(%cell, %group, error = %err, "crop widget rejected transform, resetting to fit");
                binding.reset();
                outcome.rejected.push(cell);
            }
        }
    }
    outcome
}
