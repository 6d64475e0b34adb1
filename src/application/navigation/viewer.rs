// SPDX-License-Identifier: MPL-2.0
//! Capture viewer navigation.
//!
//! A lighter controller for the camera surface: axis-aligned focus steps
//! throttled to one per window, plus a video mode toggled by holding all
//! four shoulder buttons, in which the face buttons and stick drive the
//! live view's zoom and pan instead of focus.

use tracing::debug;

use super::input::{buttons, GamepadState, GamepadTracker};
use super::registry::FocusRegistry;
use crate::application::port::NavigationHost;
use crate::domain::geometry::Vector2;
use crate::domain::navigation::{select_next_axis, ElementId, ElementKind};
use crate::domain::tuning::FrameCount;

/// Shoulder chord toggling video mode.
pub const VIDEO_MODE_CHORD: [u8; 4] = [buttons::L1, buttons::R1, buttons::L2, buttons::R2];

/// Element kinds the viewer navigates over.
pub const VIEWER_ELEMENT_KINDS: [ElementKind; 3] =
    [ElementKind::Button, ElementKind::Select, ElementKind::Thumbnail];

const ZOOM_STEP: f32 = 0.2;
const ZOOM_MIN: f32 = 1.0;
const ZOOM_MAX: f32 = 5.0;
const PAN_SPEED: f32 = 10.0;
const PAN_DEADZONE: f32 = 0.2;
const MENU_DEADZONE: f32 = 0.5;

/// Zoom and pan of the live view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub zoom: f32,
    pub pan_x: f32,
    pub pan_y: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            zoom: ZOOM_MIN,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

/// What the viewer asks its surface to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerEvent {
    VideoModeChanged(bool),
    ViewChanged(ViewTransform),
    Screenshot,
    StartCamera,
}

/// Navigation controller of the capture viewer.
#[derive(Debug, Clone)]
pub struct ViewerController {
    registry: FocusRegistry,
    tracker: GamepadTracker,
    throttle: FrameCount,
    throttle_left: u32,
    chord_held: bool,
    video_mode: bool,
    view: ViewTransform,
    focused: Option<ElementId>,
    default_element: Option<ElementId>,
    connected: bool,
}

impl ViewerController {
    #[must_use]
    pub fn new(throttle: FrameCount) -> Self {
        Self {
            registry: FocusRegistry::with_kinds(&VIEWER_ELEMENT_KINDS),
            tracker: GamepadTracker::new(),
            throttle,
            throttle_left: 0,
            chord_held: false,
            video_mode: false,
            view: ViewTransform::default(),
            focused: None,
            default_element: None,
            connected: false,
        }
    }

    /// Element focused by the first step when nothing has focus yet.
    /// Without one, the first registered element is used.
    #[must_use]
    pub fn with_default_element(mut self, id: ElementId) -> Self {
        self.default_element = Some(id);
        self
    }

    pub fn connect(&mut self) {
        self.connected = true;
        self.tracker.reset();
        self.throttle_left = 0;
    }

    pub fn disconnect(&mut self) {
        self.connected = false;
    }

    #[must_use]
    pub fn is_video_mode(&self) -> bool {
        self.video_mode
    }

    #[must_use]
    pub fn view(&self) -> ViewTransform {
        self.view
    }

    #[must_use]
    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    /// Processes one polled frame and returns what the surface must do.
    pub fn poll(&mut self, host: &mut impl NavigationHost, state: &GamepadState) -> Vec<ViewerEvent> {
        let mut events = Vec::new();
        if !self.connected {
            return events;
        }
        let just_pressed = self.tracker.update(state);
        let clicked = |b: u8| just_pressed.contains(&b);

        if state.chord(&VIDEO_MODE_CHORD) {
            if !self.chord_held {
                self.chord_held = true;
                self.video_mode = !self.video_mode;
                debug!(video_mode = self.video_mode, "viewer mode toggled");
                events.push(ViewerEvent::VideoModeChanged(self.video_mode));
            }
        } else {
            self.chord_held = false;
        }

        if self.video_mode {
            let before = self.view;
            if clicked(buttons::A) {
                self.view.zoom = (self.view.zoom + ZOOM_STEP).min(ZOOM_MAX);
            }
            if clicked(buttons::B) {
                self.view.zoom = (self.view.zoom - ZOOM_STEP).max(ZOOM_MIN);
            }
            if clicked(buttons::X) {
                self.view = ViewTransform::default();
            }
            let stick = state.left_stick();
            if stick.dx.abs() > PAN_DEADZONE {
                self.view.pan_x -= stick.dx * PAN_SPEED;
            }
            if stick.dy.abs() > PAN_DEADZONE {
                self.view.pan_y -= stick.dy * PAN_SPEED;
            }
            if self.view.zoom <= ZOOM_MIN {
                self.view.pan_x = 0.0;
                self.view.pan_y = 0.0;
            }
            if self.view != before {
                events.push(ViewerEvent::ViewChanged(self.view));
            }
        } else {
            let direction = menu_direction(state);
            if direction.is_zero() {
                self.throttle_left = 0;
            } else if self.throttle_left == 0 {
                self.move_focus(host, direction);
                self.throttle_left = self.throttle.value();
            } else {
                self.throttle_left -= 1;
            }

            if clicked(buttons::A) {
                if let Some(id) = self.focused {
                    host.activate(id);
                }
            }
            if clicked(buttons::X) {
                events.push(ViewerEvent::Screenshot);
            }
            if clicked(buttons::START) {
                events.push(ViewerEvent::StartCamera);
            }
        }
        events
    }

    fn move_focus(&mut self, host: &mut impl NavigationHost, direction: Vector2) {
        self.registry.refresh(host);
        let Some(current) = self.focused.and_then(|id| self.registry.get(id)) else {
            let fallback = self
                .default_element
                .filter(|&id| self.registry.contains(id))
                .or_else(|| self.registry.first().map(|e| e.id));
            self.focused = fallback;
            host.focus_changed(fallback);
            return;
        };
        if let Some(next) = select_next_axis(current, self.registry.elements(), direction).map(|e| e.id) {
            self.focused = Some(next);
            host.focus_changed(Some(next));
        }
    }
}

/// Sign of each stick axis past the deadzone, else the d-pad.
fn menu_direction(state: &GamepadState) -> Vector2 {
    let stick = state.left_stick();
    let dpad = state.dpad();
    let pick = |axis: f32, pad: f32| {
        if axis.abs() > MENU_DEADZONE {
            axis.signum()
        } else {
            pad
        }
    };
    Vector2::new(pick(stick.dx, dpad.dx), pick(stick.dy, dpad.dy))
}
