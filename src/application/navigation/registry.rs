// SPDX-License-Identifier: MPL-2.0
//! Live set of focusable elements.

use crate::application::port::NavigationHost;
use crate::domain::navigation::{ElementId, ElementKind, FocusableElement};

/// Elements a navigation engine may move focus to.
///
/// The set is recomputed from the host on every [`refresh`](Self::refresh);
/// nothing is cached across steps.
#[derive(Debug, Clone, Default)]
pub struct FocusRegistry {
    kinds: Option<Vec<ElementKind>>,
    elements: Vec<FocusableElement>,
}

impl FocusRegistry {
    /// Registry accepting every element kind.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry accepting only `kinds`.
    #[must_use]
    pub fn with_kinds(kinds: &[ElementKind]) -> Self {
        Self {
            kinds: Some(kinds.to_vec()),
            elements: Vec::new(),
        }
    }

    /// Re-reads the host, keeping navigable elements of accepted kinds in
    /// host order.
    pub fn refresh(&mut self, host: &impl NavigationHost) -> &[FocusableElement] {
        let kinds = self.kinds.as_deref();
        self.elements = host
            .elements()
            .into_iter()
            .filter(|e| e.is_navigable())
            .filter(|e| kinds.is_none_or(|k| k.contains(&e.kind)))
            .collect();
        &self.elements
    }

    #[must_use]
    pub fn elements(&self) -> &[FocusableElement] {
        &self.elements
    }

    #[must_use]
    pub fn first(&self) -> Option<&FocusableElement> {
        self.elements.first()
    }

    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&FocusableElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
