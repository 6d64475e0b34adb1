// SPDX-License-Identifier: MPL-2.0
//! Navigation host port.
//!
//! The host owns the actual on-screen controls. Navigation controllers
//! query it for the live element set on every step and ask it to perform
//! the resulting actions.

use crate::domain::navigation::{ElementId, FocusableElement};
use std::fmt;

/// Status changes reported to the host for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationStatus {
    /// A controller was connected.
    Connected,
    /// The controller was disconnected.
    Disconnected,
    /// Back in menu navigation.
    MenuMode,
    /// A grabbable element received focus or was grabbed.
    Selected(ElementId),
    /// A grabbable element lost its selection without losing focus.
    Deselected(ElementId),
    /// An object is now moved directly by the stick.
    Grabbing(ElementId),
    /// The grabbed object was dropped in place.
    Dropped(ElementId),
    /// The grabbed object was deleted.
    Deleted(ElementId),
    /// The configured button sequence was entered.
    SequenceCompleted,
}

impl fmt::Display for NavigationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationStatus::Connected => write!(f, "Controller connected"),
            NavigationStatus::Disconnected => write!(f, "Controller disconnected"),
            NavigationStatus::MenuMode => write!(f, "Menu mode"),
            NavigationStatus::Selected(_) => write!(f, "Stamp selected (A to move)"),
            NavigationStatus::Deselected(_) => write!(f, "Stamp deselected"),
            NavigationStatus::Grabbing(_) => write!(f, "Grab mode (A drop, B delete)"),
            NavigationStatus::Dropped(_) => write!(f, "Stamp dropped"),
            NavigationStatus::Deleted(_) => write!(f, "Stamp deleted"),
            NavigationStatus::SequenceCompleted => write!(f, "Secret unlocked"),
        }
    }
}

/// The surface navigation runs against.
pub trait NavigationHost {
    /// Every candidate element with its current layout and visibility.
    fn elements(&self) -> Vec<FocusableElement>;

    /// Runs the default action of `id` (click).
    fn activate(&mut self, id: ElementId);

    /// Closes the topmost open modal. Returns false when none is open.
    fn close_top_modal(&mut self) -> bool;

    /// Moves a free-floating object by `(dx, dy)` pixels.
    fn move_object(&mut self, id: ElementId, dx: f32, dy: f32);

    /// Removes a free-floating object from the surface.
    fn remove_object(&mut self, id: ElementId);

    /// Reports a status change.
    fn notify(&mut self, status: NavigationStatus);

    /// Focus moved to `id`; the host draws the focus ring.
    fn focus_changed(&mut self, id: Option<ElementId>) {
        let _ = id;
    }
}
