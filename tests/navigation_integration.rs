// SPDX-License-Identifier: MPL-2.0
use sticker_sheet::application::navigation::input::buttons;
use sticker_sheet::application::navigation::{
    GamepadState, Key, NavigationController, NavigationMode, NavigationSettings,
};
use sticker_sheet::application::port::{NavigationHost, NavigationStatus};
use sticker_sheet::application::stamps::{element_id, stamp_for, Placement, StampLayer};
use sticker_sheet::domain::geometry::{Point, Rect};
use sticker_sheet::domain::navigation::{ElementId, ElementKind, FocusableElement};
use sticker_sheet::domain::stamp::{StampContent, StampId};

/// A toolbar of buttons above a stamp layer.
struct SheetHost {
    buttons: Vec<FocusableElement>,
    stamps: StampLayer,
    activated: Vec<ElementId>,
    statuses: Vec<NavigationStatus>,
    focus: Option<ElementId>,
    modal_open: bool,
}

impl SheetHost {
    fn new() -> Self {
        let buttons = [(1, 100.0), (2, 300.0), (3, 500.0)]
            .into_iter()
            .map(|(id, x)| {
                FocusableElement::new(
                    ElementId::new(id),
                    ElementKind::Button,
                    Rect::centered_at(Point::new(x, 20.0), 80.0, 30.0),
                )
            })
            .collect();
        Self {
            buttons,
            stamps: StampLayer::new(Point::new(300.0, 300.0)),
            activated: Vec::new(),
            statuses: Vec::new(),
            focus: None,
            modal_open: false,
        }
    }

    fn add_stamp(&mut self, x: f32, y: f32) -> StampId {
        self.stamps.create(
            StampContent::Emoji {
                glyph: "🌸".into(),
            },
            Placement {
                position: Some(Point::new(x, y)),
                ..Placement::default()
            },
        )
    }

    fn position(&self, id: StampId) -> Point {
        self.stamps.get(id).expect("stamp exists").position
    }
}

impl NavigationHost for SheetHost {
    fn elements(&self) -> Vec<FocusableElement> {
        let mut elements = self.buttons.clone();
        elements.extend(self.stamps.elements());
        elements
    }

    fn activate(&mut self, id: ElementId) {
        self.activated.push(id);
    }

    fn close_top_modal(&mut self) -> bool {
        std::mem::replace(&mut self.modal_open, false)
    }

    fn move_object(&mut self, id: ElementId, dx: f32, dy: f32) {
        if let Some(stamp) = stamp_for(id) {
            self.stamps.translate(stamp, dx, dy);
        }
    }

    fn remove_object(&mut self, id: ElementId) {
        if let Some(stamp) = stamp_for(id) {
            self.stamps.remove(stamp);
        }
    }

    fn notify(&mut self, status: NavigationStatus) {
        self.statuses.push(status);
    }

    fn focus_changed(&mut self, id: Option<ElementId>) {
        self.focus = id;
    }
}

fn connected() -> (NavigationController, SheetHost, StampId) {
    let mut host = SheetHost::new();
    let stamp = host.add_stamp(100.0, 300.0);
    let mut nav = NavigationController::new(NavigationSettings::default());
    nav.connect(&mut host);
    (nav, host, stamp)
}

fn stick(x: f32, y: f32) -> GamepadState {
    GamepadState::with_pressed(&[]).with_left_stick(x, y)
}

#[test]
fn connect_focuses_first_control() {
    let (nav, host, _) = connected();
    assert_eq!(nav.focused(), Some(ElementId::new(1)));
    assert_eq!(host.focus, Some(ElementId::new(1)));
    assert_eq!(host.statuses.first(), Some(&NavigationStatus::Connected));
}

#[test]
fn keyboard_steps_down_onto_stamp_and_selects_it() {
    let (mut nav, mut host, stamp) = connected();
    nav.key_pressed(&mut host, Key::Down);
    assert_eq!(nav.focused(), Some(element_id(stamp)));
    assert_eq!(
        host.statuses.last(),
        Some(&NavigationStatus::Selected(element_id(stamp)))
    );
}

#[test]
fn held_stick_repeats_after_cooldown() {
    let (mut nav, mut host, _) = connected();
    let cooldown = NavigationSettings::default().cooldown.value();

    nav.poll(&mut host, &stick(1.0, 0.0));
    assert_eq!(nav.focused(), Some(ElementId::new(2)));
    for _ in 0..cooldown - 1 {
        nav.poll(&mut host, &stick(1.0, 0.0));
    }
    assert_eq!(nav.focused(), Some(ElementId::new(2)));
    nav.poll(&mut host, &stick(1.0, 0.0));
    assert_eq!(nav.focused(), Some(ElementId::new(3)));

    // Releasing the stick re-arms an immediate step.
    nav.poll(&mut host, &stick(0.0, 0.0));
    nav.poll(&mut host, &stick(-1.0, 0.0));
    assert_eq!(nav.focused(), Some(ElementId::new(2)));
}

#[test]
fn grab_move_and_drop_with_gamepad() {
    let (mut nav, mut host, stamp) = connected();
    let settings = NavigationSettings::default();
    nav.key_pressed(&mut host, Key::Down);
    nav.poll(&mut host, &GamepadState::with_pressed(&[buttons::A]));
    assert_eq!(nav.mode(), NavigationMode::Grab(element_id(stamp)));

    nav.poll(&mut host, &GamepadState::with_pressed(&[]));
    for _ in 0..10 {
        nav.poll(&mut host, &stick(1.0, 0.0));
    }
    let moved = host.position(stamp);
    assert!((moved.x - (100.0 + 10.0 * settings.move_speed.value())).abs() < 1e-3);
    assert!((moved.y - 300.0).abs() < 1e-3);

    let boosted = GamepadState::with_pressed(&[buttons::L1]).with_left_stick(0.0, 1.0);
    nav.poll(&mut host, &boosted);
    let expected_y = 300.0 + settings.move_speed.value() * settings.boost.value();
    assert!((host.position(stamp).y - expected_y).abs() < 1e-3);

    nav.poll(&mut host, &GamepadState::with_pressed(&[]));
    nav.poll(&mut host, &GamepadState::with_pressed(&[buttons::A]));
    assert_eq!(nav.mode(), NavigationMode::Menu);
    assert_eq!(nav.focused(), Some(element_id(stamp)));
    assert!(host
        .statuses
        .contains(&NavigationStatus::Dropped(element_id(stamp))));
}

#[test]
fn cancel_in_grab_deletes_and_refocuses() {
    let (mut nav, mut host, stamp) = connected();
    nav.key_pressed(&mut host, Key::Down);
    nav.key_pressed(&mut host, Key::Enter);
    assert_eq!(nav.mode(), NavigationMode::Grab(element_id(stamp)));

    nav.key_pressed(&mut host, Key::Escape);
    assert!(host.stamps.is_empty());
    assert_eq!(nav.mode(), NavigationMode::Menu);
    assert_eq!(nav.focused(), Some(ElementId::new(1)));
    assert!(host
        .statuses
        .contains(&NavigationStatus::Deleted(element_id(stamp))));
}

#[test]
fn accept_on_button_activates_it() {
    let (mut nav, mut host, _) = connected();
    nav.key_pressed(&mut host, Key::Right);
    nav.key_pressed(&mut host, Key::Enter);
    assert_eq!(host.activated, vec![ElementId::new(2)]);
    assert_eq!(nav.mode(), NavigationMode::Menu);
}

#[test]
fn cancel_closes_modal_before_anything_else() {
    let (mut nav, mut host, stamp) = connected();
    nav.key_pressed(&mut host, Key::Down);
    host.modal_open = true;
    nav.key_pressed(&mut host, Key::Escape);
    assert!(!host.modal_open);
    assert!(!host
        .statuses
        .contains(&NavigationStatus::Deselected(element_id(stamp))));

    nav.key_pressed(&mut host, Key::Escape);
    assert!(host
        .statuses
        .contains(&NavigationStatus::Deselected(element_id(stamp))));
}

#[test]
fn new_stamps_are_reachable_without_reconnecting() {
    let (mut nav, mut host, first) = connected();
    let second = host.add_stamp(400.0, 300.0);
    nav.key_pressed(&mut host, Key::Down);
    assert_eq!(nav.focused(), Some(element_id(first)));
    nav.key_pressed(&mut host, Key::Right);
    assert_eq!(nav.focused(), Some(element_id(second)));
}

#[test]
fn disconnect_during_grab_leaves_object_in_place() {
    let (mut nav, mut host, stamp) = connected();
    nav.key_pressed(&mut host, Key::Down);
    nav.key_pressed(&mut host, Key::Enter);
    nav.poll(&mut host, &stick(1.0, 0.0));
    let position = host.position(stamp);

    nav.disconnect(&mut host);
    assert_eq!(nav.mode(), NavigationMode::Menu);
    nav.poll(&mut host, &stick(1.0, 0.0));
    assert_eq!(host.position(stamp), position);
    assert_eq!(host.statuses.last(), Some(&NavigationStatus::Disconnected));
}

#[test]
fn keyboard_sequence_unlocks() {
    let mut host = SheetHost::new();
    let mut nav = NavigationController::new(NavigationSettings::default());
    nav.connect(&mut host);
    for key in sticker_sheet::application::navigation::KONAMI_KEYBOARD {
        nav.key_pressed(&mut host, key);
    }
    assert!(host.statuses.contains(&NavigationStatus::SequenceCompleted));
}
