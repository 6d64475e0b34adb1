// SPDX-License-Identifier: MPL-2.0
//! Stamp layer: decorative emoji and text placed freely over the grid.
//!
//! Pointer gestures are coalesced like crop edits: moves only record the
//! latest pointer position, and the gesture is applied at most once per
//! frame from the state captured when it began.

use tracing::debug;

use crate::domain::geometry::{Point, Rect};
use crate::domain::navigation::{ElementId, ElementKind, FocusableElement};
use crate::domain::stamp::{stamp_size_bounds, Stamp, StampContent, StampId};

/// Stamps occupy the upper half of the element id space so they never
/// collide with host controls.
const STAMP_ELEMENT_BASE: u64 = 1 << 32;

/// Navigation id of a stamp.
#[must_use]
pub fn element_id(stamp: StampId) -> ElementId {
    ElementId::new(STAMP_ELEMENT_BASE + stamp.raw())
}

/// Stamp behind a navigation id, if it is one.
#[must_use]
pub fn stamp_for(element: ElementId) -> Option<StampId> {
    element
        .raw()
        .checked_sub(STAMP_ELEMENT_BASE)
        .map(StampId::new)
}

/// What a pointer gesture on a stamp does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    Drag,
    Resize,
    Rotate,
}

#[derive(Debug, Clone, Copy)]
struct Interaction {
    stamp: StampId,
    kind: InteractionKind,
    start_pointer: Point,
    start_position: Point,
    start_size: f32,
    start_rotation: f32,
    latest: Option<Point>,
}

/// Optional overrides for [`StampLayer::create`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Placement {
    pub position: Option<Point>,
    pub size: Option<f32>,
    pub rotation_deg: Option<f32>,
}

/// All stamps of a sheet, in paint order.
#[derive(Debug, Clone)]
pub struct StampLayer {
    stamps: Vec<Stamp>,
    next_id: u64,
    paper_center: Point,
    selected: Option<StampId>,
    interaction: Option<Interaction>,
}

impl StampLayer {
    /// Creates an empty layer; new stamps default to `paper_center`.
    #[must_use]
    pub fn new(paper_center: Point) -> Self {
        Self {
            stamps: Vec::new(),
            next_id: 1,
            paper_center,
            selected: None,
            interaction: None,
        }
    }

    pub fn set_paper_center(&mut self, center: Point) {
        self.paper_center = center;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: StampId) -> Option<&Stamp> {
        self.stamps.iter().find(|s| s.id == id)
    }

    fn get_mut(&mut self, id: StampId) -> Option<&mut Stamp> {
        self.stamps.iter_mut().find(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stamp> {
        self.stamps.iter()
    }

    #[must_use]
    pub fn bounds(&self, id: StampId) -> Option<Rect> {
        self.get(id).map(Stamp::bounds)
    }

    /// Places a new stamp and returns its id.
    ///
    /// Sizes below the minimum are raised to it; a non-finite size falls
    /// back to the default for the content kind.
    pub fn create(&mut self, content: StampContent, placement: Placement) -> StampId {
        let id = StampId::new(self.next_id);
        self.next_id += 1;
        let size = placement
            .size
            .filter(|s| s.is_finite())
            .unwrap_or_else(|| content.default_size())
            .max(stamp_size_bounds::MIN);
        let stamp = Stamp {
            id,
            content,
            position: placement.position.unwrap_or(self.paper_center),
            size,
            rotation_deg: placement.rotation_deg.filter(|r| r.is_finite()).unwrap_or(0.0),
        };
        debug!(%id, content = stamp.content.as_str(), "stamp created");
        self.stamps.push(stamp);
        id
    }

    /// Removes a stamp. Returns false if it did not exist.
    pub fn remove(&mut self, id: StampId) -> bool {
        let before = self.stamps.len();
        self.stamps.retain(|s| s.id != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.interaction.is_some_and(|i| i.stamp == id) {
            self.interaction = None;
        }
        self.stamps.len() != before
    }

    /// Moves a stamp by `(dx, dy)`.
    pub fn translate(&mut self, id: StampId, dx: f32, dy: f32) -> bool {
        match self.get_mut(id) {
            Some(stamp) => {
                stamp.position = stamp.position.translated(dx, dy);
                true
            }
            None => false,
        }
    }

    /// Selects `id`, replacing the previous selection.
    pub fn select(&mut self, id: StampId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.selected = Some(id);
        true
    }

    pub fn deselect(&mut self) -> Option<StampId> {
        self.selected.take()
    }

    #[must_use]
    pub fn selected(&self) -> Option<StampId> {
        self.selected
    }

    /// Removes every stamp.
    pub fn clear(&mut self) {
        self.stamps.clear();
        self.selected = None;
        self.interaction = None;
    }

    /// Replaces the layer content with restored stamps.
    ///
    /// Later stamps with an id already taken are dropped.
    pub fn replace_all(&mut self, stamps: Vec<Stamp>) {
        self.clear();
        for stamp in stamps {
            if self.get(stamp.id).is_none() {
                self.stamps.push(stamp);
            }
        }
        self.next_id = self.stamps.iter().map(|s| s.id.raw()).max().unwrap_or(0) + 1;
    }

    /// Navigation elements for every stamp.
    #[must_use]
    pub fn elements(&self) -> Vec<FocusableElement> {
        self.stamps
            .iter()
            .map(|s| FocusableElement::new(element_id(s.id), ElementKind::Stamp, s.bounds()))
            .collect()
    }

    // =========================================================================
    // Pointer interaction
    // =========================================================================

    /// Starts a gesture on `id` at `pointer`. A gesture already running is
    /// finished first.
    pub fn begin_interaction(&mut self, id: StampId, kind: InteractionKind, pointer: Point) -> bool {
        self.end_interaction();
        let Some(stamp) = self.get(id) else {
            return false;
        };
        self.interaction = Some(Interaction {
            stamp: id,
            kind,
            start_pointer: pointer,
            start_position: stamp.position,
            start_size: stamp.size,
            start_rotation: stamp.rotation_deg,
            latest: None,
        });
        self.selected = Some(id);
        true
    }

    #[must_use]
    pub fn is_interacting(&self) -> bool {
        self.interaction.is_some()
    }

    /// Records the latest pointer position.
    ///
    /// Returns true when the caller should schedule a frame, i.e. this is
    /// the first move since the last one was applied.
    pub fn pointer_moved(&mut self, pointer: Point) -> bool {
        let Some(interaction) = self.interaction.as_mut() else {
            return false;
        };
        interaction.latest.replace(pointer).is_none()
    }

    /// Applies the latest recorded pointer position, if any.
    pub fn on_frame(&mut self) {
        let Some(interaction) = self.interaction.as_mut() else {
            return;
        };
        let Some(pointer) = interaction.latest.take() else {
            return;
        };
        let interaction = *interaction;
        if let Some(stamp) = self.get_mut(interaction.stamp) {
            apply_gesture(stamp, &interaction, pointer);
        }
    }

    /// Applies any pending move and finishes the gesture.
    pub fn end_interaction(&mut self) {
        self.on_frame();
        self.interaction = None;
    }
}

fn apply_gesture(stamp: &mut Stamp, interaction: &Interaction, pointer: Point) {
    let start = interaction.start_pointer;
    match interaction.kind {
        InteractionKind::Drag => {
            stamp.position = interaction
                .start_position
                .translated(pointer.x - start.x, pointer.y - start.y);
        }
        InteractionKind::Resize => {
            let center = interaction.start_position;
            let initial = start.distance_to(center);
            if initial > 0.0 {
                let ratio = pointer.distance_to(center) / initial;
                stamp.size = (interaction.start_size * ratio).max(stamp_size_bounds::MIN);
            }
        }
        InteractionKind::Rotate => {
            let center = interaction.start_position;
            let delta = pointer.angle_from(center) - start.angle_from(center);
            stamp.rotation_deg = interaction.start_rotation + delta.to_degrees();
        }
    }
}
