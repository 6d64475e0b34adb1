// SPDX-License-Identifier: MPL-2.0
//! Sheet navigation: the MENU / GRAB state machine.
//!
//! In MENU mode the stick and d-pad move focus between controls using the
//! geometric selector. Accepting a grabbable element (a stamp) switches to
//! GRAB mode, where the stick moves the object directly every frame until
//! it is dropped or deleted.

use tracing::debug;

use super::input::{GamepadState, GamepadTracker, InputFrame, InputSource, Key, KONAMI_KEYBOARD};
use super::registry::FocusRegistry;
use super::NavigationSettings;
use crate::application::port::{NavigationHost, NavigationStatus};
use crate::domain::geometry::Vector2;
use crate::domain::navigation::{
    select_next, ElementId, ElementKind, SequenceDetector, KONAMI_GAMEPAD,
};

/// A focus step needs a push past this on either axis, whatever the
/// deadzone.
const STEP_THRESHOLD: f32 = 0.5;

/// Element kinds the sheet navigates over.
pub const SHEET_ELEMENT_KINDS: [ElementKind; 6] = [
    ElementKind::Button,
    ElementKind::Select,
    ElementKind::Input,
    ElementKind::UploadSlot,
    ElementKind::Stamp,
    ElementKind::ModalClose,
];

/// Current navigation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMode {
    Menu,
    /// The element is being moved by the stick.
    Grab(ElementId),
}

/// Gamepad and keyboard navigation over a [`NavigationHost`].
#[derive(Debug, Clone)]
pub struct NavigationController {
    settings: NavigationSettings,
    registry: FocusRegistry,
    tracker: GamepadTracker,
    gamepad_sequence: SequenceDetector<u8>,
    keyboard_sequence: SequenceDetector<Key>,
    connected: bool,
    mode: NavigationMode,
    focused: Option<ElementId>,
    cooldown: u32,
}

impl NavigationController {
    #[must_use]
    pub fn new(settings: NavigationSettings) -> Self {
        Self {
            settings,
            registry: FocusRegistry::with_kinds(&SHEET_ELEMENT_KINDS),
            tracker: GamepadTracker::new(),
            gamepad_sequence: SequenceDetector::new(KONAMI_GAMEPAD),
            keyboard_sequence: SequenceDetector::new(KONAMI_KEYBOARD),
            connected: false,
            mode: NavigationMode::Menu,
            focused: None,
            cooldown: 0,
        }
    }

    #[must_use]
    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    #[must_use]
    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    #[must_use]
    pub fn settings(&self) -> &NavigationSettings {
        &self.settings
    }

    // =========================================================================
    // Device lifecycle
    // =========================================================================

    /// A controller was plugged in: start polling and focus the first
    /// element.
    pub fn connect(&mut self, host: &mut impl NavigationHost) {
        self.connected = true;
        self.tracker.reset();
        self.gamepad_sequence.reset();
        self.cooldown = 0;
        self.mode = NavigationMode::Menu;
        host.notify(NavigationStatus::Connected);
        self.registry.refresh(host);
        self.focus_first(host);
    }

    /// The controller went away; polling stops. A grab in progress ends
    /// where the object is.
    pub fn disconnect(&mut self, host: &mut impl NavigationHost) {
        if !self.connected {
            return;
        }
        self.connected = false;
        self.mode = NavigationMode::Menu;
        host.notify(NavigationStatus::Disconnected);
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Processes one polled frame of controller state. Does nothing while
    /// disconnected.
    pub fn poll(&mut self, host: &mut impl NavigationHost, state: &GamepadState) {
        if !self.connected {
            return;
        }
        let just_pressed = self.tracker.update(state);
        if let Some(first) = just_pressed.first() {
            if self.gamepad_sequence.push(first) {
                debug!("gamepad sequence completed");
                host.notify(NavigationStatus::SequenceCompleted);
            }
        }
        let deadzone = match self.mode {
            NavigationMode::Menu => self.settings.menu_deadzone.value(),
            NavigationMode::Grab(_) => self.settings.grab_deadzone.value(),
        };
        let frame = InputFrame::from_gamepad(state, &just_pressed, deadzone);
        self.handle(host, &frame);
    }

    /// Processes one key press.
    pub fn key_pressed(&mut self, host: &mut impl NavigationHost, key: Key) {
        if self.keyboard_sequence.push(&key) {
            debug!("keyboard sequence completed");
            host.notify(NavigationStatus::SequenceCompleted);
        }
        self.handle(host, &InputFrame::from_key(key));
    }

    /// Runs one step of the state machine.
    pub fn handle(&mut self, host: &mut impl NavigationHost, frame: &InputFrame) {
        match self.mode {
            NavigationMode::Menu => self.handle_menu(host, frame),
            NavigationMode::Grab(id) => self.handle_grab(host, frame, id),
        }
    }

    fn handle_menu(&mut self, host: &mut impl NavigationHost, frame: &InputFrame) {
        let direction = frame.direction;
        let wants_step = direction.dx.abs() > STEP_THRESHOLD || direction.dy.abs() > STEP_THRESHOLD;
        match frame.source {
            InputSource::Keyboard => {
                if !direction.is_zero() {
                    self.move_focus(host, direction);
                }
            }
            InputSource::Gamepad => {
                self.cooldown = self.cooldown.saturating_sub(1);
                if !wants_step {
                    self.cooldown = 0;
                } else if self.cooldown == 0 {
                    self.move_focus(host, direction);
                    self.cooldown = self.settings.cooldown.value();
                }
            }
        }

        if frame.accept {
            self.accept(host);
        }
        if frame.cancel {
            self.cancel(host);
        }
    }

    fn accept(&mut self, host: &mut impl NavigationHost) {
        let Some(id) = self.focused else {
            return;
        };
        self.registry.refresh(host);
        let Some(element) = self.registry.get(id) else {
            return;
        };
        if element.kind.is_grabbable() {
            self.mode = NavigationMode::Grab(id);
            host.notify(NavigationStatus::Grabbing(id));
        } else {
            host.activate(id);
        }
    }

    fn cancel(&mut self, host: &mut impl NavigationHost) {
        if host.close_top_modal() {
            return;
        }
        if let Some(id) = self.focused.filter(|&id| self.is_grabbable(id)) {
            host.notify(NavigationStatus::Deselected(id));
        }
    }

    fn handle_grab(&mut self, host: &mut impl NavigationHost, frame: &InputFrame, id: ElementId) {
        self.registry.refresh(host);
        if !self.registry.contains(id) {
            debug!(%id, "grabbed object vanished");
            self.mode = NavigationMode::Menu;
            self.focus_first(host);
            return;
        }

        if !frame.direction.is_zero() {
            let speed = self.settings.move_speed.value()
                * if frame.boost {
                    self.settings.boost.value()
                } else {
                    1.0
                };
            let step = frame.direction.scaled(speed);
            host.move_object(id, step.dx, step.dy);
        }

        if frame.accept {
            self.mode = NavigationMode::Menu;
            self.focused = Some(id);
            host.focus_changed(Some(id));
            host.notify(NavigationStatus::Dropped(id));
        } else if frame.cancel {
            host.remove_object(id);
            self.mode = NavigationMode::Menu;
            self.focused = None;
            self.registry.refresh(host);
            self.focus_first(host);
            host.notify(NavigationStatus::Deleted(id));
        }
    }

    // =========================================================================
    // Focus
    // =========================================================================

    fn is_grabbable(&self, id: ElementId) -> bool {
        self.registry
            .get(id)
            .is_some_and(|e| e.kind.is_grabbable())
    }

    fn move_focus(&mut self, host: &mut impl NavigationHost, direction: Vector2) {
        self.registry.refresh(host);
        let Some(current) = self.focused.and_then(|id| self.registry.get(id)) else {
            self.focus_first(host);
            return;
        };
        let next = select_next(
            current,
            self.registry.elements(),
            direction,
            self.settings.perpendicular_weight.value(),
        )
        .map(|e| e.id);
        if let Some(next) = next {
            self.set_focus(host, next);
        }
    }

    fn focus_first(&mut self, host: &mut impl NavigationHost) {
        match self.registry.first().map(|e| e.id) {
            Some(id) => self.set_focus(host, id),
            None => {
                self.focused = None;
                host.focus_changed(None);
                host.notify(NavigationStatus::MenuMode);
            }
        }
    }

    fn set_focus(&mut self, host: &mut impl NavigationHost, id: ElementId) {
        if let Some(previous) = self.focused.filter(|&p| p != id) {
            if self.is_grabbable(previous) {
                host.notify(NavigationStatus::Deselected(previous));
            }
        }
        self.focused = Some(id);
        host.focus_changed(Some(id));
        if self.is_grabbable(id) {
            host.notify(NavigationStatus::Selected(id));
        } else {
            host.notify(NavigationStatus::MenuMode);
        }
    }
}
