// SPDX-License-Identifier: MPL-2.0
//! Per-group image slots.
//!
//! The store holds exactly one slot per group of the active layout mode.
//! Methods that displace an image return its handle instead of releasing
//! it: the caller must first tear down every widget still showing it.

use crate::domain::grid::{CropTransform, GridError, GroupIndex, ImageRef, LegacyBoxData};

/// Image bound to one group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupImage {
    pub source: ImageRef,
    /// `None` means fit-to-cell.
    pub transform: Option<CropTransform>,
    /// Absolute crop geometry from an older project, used only when no
    /// normalized transform is stored.
    pub legacy_box: Option<LegacyBoxData>,
}

impl GroupImage {
    #[must_use]
    pub fn new(source: ImageRef) -> Self {
        Self {
            source,
            transform: None,
            legacy_box: None,
        }
    }
}

/// Fixed-length list of group slots.
#[derive(Debug, Clone, Default)]
pub struct GroupImageStore {
    slots: Vec<Option<GroupImage>>,
}

impl GroupImageStore {
    /// Creates a store with `count` empty slots.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            slots: vec![None; count],
        }
    }

    /// Number of slots (the group count of the active mode).
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of slots holding an image.
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    fn check(&self, group: GroupIndex) -> Result<usize, GridError> {
        let index = group.value();
        if index < self.slots.len() {
            Ok(index)
        } else {
            Err(GridError::GroupOutOfRange {
                index,
                count: self.slots.len(),
            })
        }
    }

    /// Image of `group`, or `None` when empty or out of range.
    #[must_use]
    pub fn get(&self, group: GroupIndex) -> Option<&GroupImage> {
        self.slots.get(group.value()).and_then(Option::as_ref)
    }

    /// Puts `source` in `group` with a fresh fit-to-cell transform.
    ///
    /// Returns the displaced handle, if any.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::GroupOutOfRange`] for a slot the mode lacks.
    pub fn set_image(&mut self, group: GroupIndex, source: ImageRef) -> Result<Option<ImageRef>, GridError> {
        let index = self.check(group)?;
        let displaced = self.slots[index].replace(GroupImage::new(source));
        Ok(displaced.map(|image| image.source))
    }

    /// Empties `group`, returning the displaced handle.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::GroupOutOfRange`] for a slot the mode lacks.
    pub fn clear(&mut self, group: GroupIndex) -> Result<Option<ImageRef>, GridError> {
        let index = self.check(group)?;
        Ok(self.slots[index].take().map(|image| image.source))
    }

    /// Stores `transform` for `group`.
    ///
    /// Returns true if the stored value changed. An empty slot keeps no
    /// transform and reports no change.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::GroupOutOfRange`] for a slot the mode lacks.
    pub fn set_transform(&mut self, group: GroupIndex, transform: CropTransform) -> Result<bool, GridError> {
        let index = self.check(group)?;
        let Some(image) = self.slots[index].as_mut() else {
            return Ok(false);
        };
        if image.transform == Some(transform) {
            return Ok(false);
        }
        image.transform = Some(transform);
        Ok(true)
    }

    /// Returns `group` to fit-to-cell and forgets any legacy geometry.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::GroupOutOfRange`] for a slot the mode lacks.
    pub fn reset_transform(&mut self, group: GroupIndex) -> Result<(), GridError> {
        let index = self.check(group)?;
        if let Some(image) = self.slots[index].as_mut() {
            image.transform = None;
            image.legacy_box = None;
        }
        Ok(())
    }

    /// Attaches legacy crop geometry to `group`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::GroupOutOfRange`] for a slot the mode lacks.
    pub fn set_legacy_box(&mut self, group: GroupIndex, legacy: LegacyBoxData) -> Result<(), GridError> {
        let index = self.check(group)?;
        if let Some(image) = self.slots[index].as_mut() {
            image.legacy_box = Some(legacy);
        }
        Ok(())
    }

    /// Exchanges two slots, transforms included.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::GroupOutOfRange`] if either slot is missing.
    pub fn swap(&mut self, a: GroupIndex, b: GroupIndex) -> Result<(), GridError> {
        let a = self.check(a)?;
        let b = self.check(b)?;
        self.slots.swap(a, b);
        Ok(())
    }

    /// Grows or shrinks to `count` slots, keeping the first
    /// `min(len, count)` positionally. Returns the handles cut off.
    pub fn resize(&mut self, count: usize) -> Vec<ImageRef> {
        let released = if count < self.slots.len() {
            self.slots.drain(count..).flatten().map(|image| image.source).collect()
        } else {
            Vec::new()
        };
        self.slots.resize(count, None);
        released
    }

    /// Empties every slot, returning all handles.
    pub fn clear_all(&mut self) -> Vec<ImageRef> {
        self.slots.iter_mut().filter_map(Option::take).map(|image| image.source).collect()
    }

    /// Iterates over `(group, slot)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (GroupIndex, Option<&GroupImage>)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, slot)| (GroupIndex::new(index), slot.as_ref()))
    }
}
