// SPDX-License-Identifier: MPL-2.0
//! Interactive elements as seen by directional navigation.

use crate::domain::geometry::Rect;
use std::fmt;

/// Host-assigned identifier of an on-screen element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element#{}", self.0)
    }
}

/// What kind of control an element is.
///
/// Registries select the kinds they navigate over, the way a page would
/// pick elements by selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Push button.
    Button,
    /// Drop-down selector.
    Select,
    /// Text, colour or file input.
    Input,
    /// Per-group upload slot.
    UploadSlot,
    /// Close button of a modal dialog.
    ModalClose,
    /// Captured snap in the viewer gallery.
    Thumbnail,
    /// Freely positioned stamp; accept grabs it instead of clicking.
    Stamp,
}

impl ElementKind {
    /// Whether accepting this element grabs it for direct manipulation.
    #[must_use]
    pub fn is_grabbable(self) -> bool {
        matches!(self, ElementKind::Stamp)
    }
}

/// Snapshot of an element's navigation-relevant state.
///
/// Produced fresh on every navigation step; never cache one across a
/// render, since layout, visibility and enabled state change continuously.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusableElement {
    pub id: ElementId,
    pub kind: ElementKind,
    /// Layout box in screen pixels.
    pub bounds: Rect,
    pub enabled: bool,
    /// The element's own visibility.
    pub visible: bool,
    /// False when some ancestor hides it (closed modal, collapsed panel).
    pub ancestors_visible: bool,
}

impl FocusableElement {
    /// Creates a visible, enabled element.
    #[must_use]
    pub fn new(id: ElementId, kind: ElementKind, bounds: Rect) -> Self {
        Self {
            id,
            kind,
            bounds,
            enabled: true,
            visible: true,
            ancestors_visible: true,
        }
    }

    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    #[must_use]
    pub fn inside_hidden_ancestor(mut self) -> Self {
        self.ancestors_visible = false;
        self
    }

    /// Rendered, enabled and not hidden by itself or an ancestor.
    #[must_use]
    pub fn is_navigable(&self) -> bool {
        self.enabled && self.visible && self.ancestors_visible && !self.bounds.is_empty()
    }
}
