// SPDX-License-Identifier: MPL-2.0
//! Controller and keyboard input as the navigation engines see it.

use crate::domain::geometry::Vector2;

/// Standard gamepad button indices.
pub mod buttons {
    pub const A: u8 = 0;
    pub const B: u8 = 1;
    pub const X: u8 = 2;
    pub const Y: u8 = 3;
    pub const L1: u8 = 4;
    pub const R1: u8 = 5;
    pub const L2: u8 = 6;
    pub const R2: u8 = 7;
    pub const SELECT: u8 = 8;
    pub const START: u8 = 9;
    pub const DPAD_UP: u8 = 12;
    pub const DPAD_DOWN: u8 = 13;
    pub const DPAD_LEFT: u8 = 14;
    pub const DPAD_RIGHT: u8 = 15;
}

/// Raw controller state for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GamepadState {
    pub buttons: Vec<bool>,
    pub axes: Vec<f32>,
}

impl GamepadState {
    /// State with the given buttons held and sticks centred.
    #[must_use]
    pub fn with_pressed(pressed: &[u8]) -> Self {
        let mut state = Self {
            buttons: vec![false; 17],
            axes: vec![0.0; 4],
        };
        for &button in pressed {
            state.set_button(button, true);
        }
        state
    }

    /// Sets the left stick.
    #[must_use]
    pub fn with_left_stick(mut self, x: f32, y: f32) -> Self {
        if self.axes.len() < 2 {
            self.axes.resize(2, 0.0);
        }
        self.axes[0] = x;
        self.axes[1] = y;
        self
    }

    pub fn set_button(&mut self, button: u8, pressed: bool) {
        let index = usize::from(button);
        if self.buttons.len() <= index {
            self.buttons.resize(index + 1, false);
        }
        self.buttons[index] = pressed;
    }

    /// Missing buttons read as released.
    #[must_use]
    pub fn pressed(&self, button: u8) -> bool {
        self.buttons.get(usize::from(button)).copied().unwrap_or(false)
    }

    /// Missing or non-finite axes read as centred.
    #[must_use]
    pub fn axis(&self, index: usize) -> f32 {
        self.axes
            .get(index)
            .copied()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }

    #[must_use]
    pub fn left_stick(&self) -> Vector2 {
        Vector2::new(self.axis(0), self.axis(1))
    }

    /// D-pad as a vector with unit components.
    #[must_use]
    pub fn dpad(&self) -> Vector2 {
        let mut v = Vector2::ZERO;
        if self.pressed(buttons::DPAD_UP) {
            v.dy = -1.0;
        }
        if self.pressed(buttons::DPAD_DOWN) {
            v.dy = 1.0;
        }
        if self.pressed(buttons::DPAD_LEFT) {
            v.dx = -1.0;
        }
        if self.pressed(buttons::DPAD_RIGHT) {
            v.dx = 1.0;
        }
        v
    }

    /// D-pad direction, with each stick axis past `deadzone` overriding
    /// the matching d-pad component.
    #[must_use]
    pub fn direction(&self, deadzone: f32) -> Vector2 {
        let mut v = self.dpad();
        let stick = self.left_stick();
        if stick.dx.abs() > deadzone {
            v.dx = stick.dx;
        }
        if stick.dy.abs() > deadzone {
            v.dy = stick.dy;
        }
        v
    }

    /// True when every button in `chord` is held.
    #[must_use]
    pub fn chord(&self, chord: &[u8]) -> bool {
        chord.iter().all(|&b| self.pressed(b))
    }
}

/// Detects buttons that went down since the previous frame.
#[derive(Debug, Clone, Default)]
pub struct GamepadTracker {
    previous: Vec<bool>,
}

impl GamepadTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the buttons pressed this frame but not the last, in index
    /// order, and remembers `state` for the next call.
    pub fn update(&mut self, state: &GamepadState) -> Vec<u8> {
        let just: Vec<u8> = state
            .buttons
            .iter()
            .enumerate()
            .filter(|&(i, &down)| down && !self.previous.get(i).copied().unwrap_or(false))
            .filter_map(|(i, _)| u8::try_from(i).ok())
            .collect();
        self.previous.clone_from(&state.buttons);
        just
    }

    /// Forgets the previous frame; held buttons count as new presses.
    pub fn reset(&mut self) {
        self.previous.clear();
    }
}

/// Keyboard keys the navigation engines understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    Char(char),
}

impl Key {
    /// Unit direction of an arrow key.
    #[must_use]
    pub fn direction(self) -> Option<Vector2> {
        match self {
            Key::Up => Some(Vector2::UP),
            Key::Down => Some(Vector2::DOWN),
            Key::Left => Some(Vector2::LEFT),
            Key::Right => Some(Vector2::RIGHT),
            _ => None,
        }
    }
}

/// Keyboard form of the unlock sequence.
pub const KONAMI_KEYBOARD: [Key; 11] = [
    Key::Up,
    Key::Up,
    Key::Down,
    Key::Down,
    Key::Left,
    Key::Right,
    Key::Left,
    Key::Right,
    Key::Char('b'),
    Key::Char('a'),
    Key::Enter,
];

/// Where an input frame came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputSource {
    /// Polled every frame; focus steps are rate limited.
    #[default]
    Gamepad,
    /// One event per key press; never rate limited.
    Keyboard,
}

/// Device-independent input for one navigation step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputFrame {
    pub source: InputSource,
    /// Deadzone-filtered direction.
    pub direction: Vector2,
    /// Accept went down this frame.
    pub accept: bool,
    /// Cancel went down this frame.
    pub cancel: bool,
    /// Boost is held.
    pub boost: bool,
}

impl InputFrame {
    /// Builds a frame from controller state and this frame's new presses.
    #[must_use]
    pub fn from_gamepad(state: &GamepadState, just_pressed: &[u8], deadzone: f32) -> Self {
        Self {
            source: InputSource::Gamepad,
            direction: state.direction(deadzone),
            accept: just_pressed.contains(&buttons::A),
            cancel: just_pressed.contains(&buttons::B),
            boost: state.pressed(buttons::L1),
        }
    }

    /// Builds a frame for one key press.
    #[must_use]
    pub fn from_key(key: Key) -> Self {
        Self {
            source: InputSource::Keyboard,
            direction: key.direction().unwrap_or(Vector2::ZERO),
            accept: key == Key::Enter,
            cancel: key == Key::Escape,
            boost: false,
        }
    }
}
