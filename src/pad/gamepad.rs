use tracing::debug;

use crate::math::Vec2f;
use crate::pad::backend::PollBackend;
use crate::pad::state::{Button, PadState, Slot};

/// Per-slot polling facade with edge-triggered button queries.
///
/// Holds the previous and current [`PadState`] snapshots; [`Gamepad::poll`]
/// must run once per logical tick for the edge queries to mean "since last
/// tick". The backend is injected by the caller, who owns the single
/// long-lived instance.
#[derive(Clone, Debug)]
pub struct Gamepad {
    slot: Slot,
    last: PadState,
    curr: PadState,
}

impl Gamepad {
    pub fn new(slot: Slot) -> Self {
        Gamepad {
            slot,
            last: PadState::default(),
            curr: PadState::default(),
        }
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// Rotates the current snapshot into the previous one, fetches a fresh
    /// state for this slot, and reports whether the controller is connected.
    pub fn poll(&mut self, backend: &mut impl PollBackend) -> bool {
        self.last = self.curr;
        self.curr = backend.state(self.slot);
        self.curr.connected
    }

    /// Fresh connection query; does not read or update the stored snapshots.
    pub fn is_connected(&self, backend: &mut impl PollBackend) -> bool {
        backend.state(self.slot).connected
    }

    /// Whether the two stored snapshots differ in any field.
    pub fn state_changed(&self) -> bool {
        self.curr != self.last
    }

    /// Zeroes both snapshots (disconnect/reset).
    pub fn clear(&mut self) {
        debug!("clearing snapshots for slot {:?}", self.slot);
        self.last = PadState::default();
        self.curr = PadState::default();
    }

    /// The current snapshot.
    pub fn state(&self) -> &PadState {
        &self.curr
    }

    pub fn left_stick(&self) -> Vec2f {
        self.curr.left_stick
    }

    pub fn right_stick(&self) -> Vec2f {
        self.curr.right_stick
    }

    pub fn left_trigger(&self) -> f32 {
        self.curr.left_trigger
    }

    pub fn right_trigger(&self) -> f32 {
        self.curr.right_trigger
    }

    pub fn is_button_down(&self, button: Button) -> bool {
        self.curr.is_down(button)
    }

    /// Rising edge: down now, not down in the previous snapshot.
    pub fn was_button_pressed(&self, button: Button) -> bool {
        self.curr.is_down(button) && !self.last.is_down(button)
    }

    /// Falling edge: not down now, down in the previous snapshot.
    pub fn was_button_released(&self, button: Button) -> bool {
        !self.curr.is_down(button) && self.last.is_down(button)
    }

    /// Rumble for this slot; see [`PollBackend::set_rumble`].
    pub fn set_rumble(&self, backend: &mut impl PollBackend, left: f32, right: f32) {
        backend.set_rumble(self.slot, left, right);
    }

    /// One-shot state query bypassing the snapshot machinery.
    pub fn fetch(backend: &mut impl PollBackend, slot: Slot) -> PadState {
        backend.state(slot)
    }

    /// One-shot state query with a caller-supplied deadzone.
    pub fn fetch_with_deadzone(backend: &mut impl PollBackend, slot: Slot, deadzone: f32) -> PadState {
        backend.state_with_deadzone(slot, deadzone)
    }

    /// One-shot rumble command without a facade instance.
    pub fn rumble(backend: &mut impl PollBackend, slot: Slot, left: f32, right: f32) {
        backend.set_rumble(slot, left, right);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    // Scripted backend: hands out queued states in order, records rumble.
    #[derive(Default)]
    struct MockBackend {
        states: VecDeque<PadState>,
        rumbles: Vec<(Slot, f32, f32)>,
    }

    impl MockBackend {
        fn queue(&mut self, state: PadState) -> &mut Self {
            self.states.push_back(state);
            self
        }
    }

    impl PollBackend for MockBackend {
        fn state(&mut self, _slot: Slot) -> PadState {
            self.states.pop_front().unwrap_or_default()
        }

        fn state_with_deadzone(&mut self, slot: Slot, _deadzone: f32) -> PadState {
            self.state(slot)
        }

        fn set_rumble(&mut self, slot: Slot, left: f32, right: f32) {
            self.rumbles.push((slot, left, right));
        }
    }

    fn connected_with_buttons(buttons: u16) -> PadState {
        PadState {
            buttons,
            connected: true,
            ..Default::default()
        }
    }

    #[test]
    fn poll_reports_connection() {
        let mut backend = MockBackend::default();
        backend.queue(connected_with_buttons(0));

        let mut pad = Gamepad::new(Slot::One);
        assert!(pad.poll(&mut backend));
        assert!(!pad.poll(&mut backend)); // queue empty: disconnected zero state
    }

    #[test]
    fn press_edge_fires_exactly_on_the_transition() {
        let mut backend = MockBackend::default();
        backend
            .queue(connected_with_buttons(0))
            .queue(connected_with_buttons(Button::X.bit()))
            .queue(connected_with_buttons(Button::X.bit()));

        let mut pad = Gamepad::new(Slot::One);

        pad.poll(&mut backend);
        assert!(!pad.was_button_pressed(Button::X));

        pad.poll(&mut backend);
        assert!(pad.was_button_pressed(Button::X));
        assert!(pad.is_button_down(Button::X));
        assert!(!pad.was_button_released(Button::X));

        // still held: no new edge
        pad.poll(&mut backend);
        assert!(!pad.was_button_pressed(Button::X));
        assert!(pad.is_button_down(Button::X));
    }

    #[test]
    fn release_edge_mirrors_press_edge() {
        let mut backend = MockBackend::default();
        backend
            .queue(connected_with_buttons(Button::A.bit()))
            .queue(connected_with_buttons(0));

        let mut pad = Gamepad::new(Slot::Two);

        pad.poll(&mut backend);
        assert!(pad.was_button_pressed(Button::A));

        pad.poll(&mut backend);
        assert!(pad.was_button_released(Button::A));
        assert!(!pad.is_button_down(Button::A));
        assert!(!pad.was_button_pressed(Button::A));
    }

    #[test]
    fn edges_are_tracked_per_button() {
        let mut backend = MockBackend::default();
        backend
            .queue(connected_with_buttons(Button::A.bit()))
            .queue(connected_with_buttons(Button::A.bit() | Button::B.bit()));

        let mut pad = Gamepad::new(Slot::One);
        pad.poll(&mut backend);
        pad.poll(&mut backend);

        assert!(pad.was_button_pressed(Button::B));
        assert!(!pad.was_button_pressed(Button::A));
        assert!(pad.is_button_down(Button::A));
    }

    #[test]
    fn state_changed_compares_snapshots_fieldwise() {
        let mut backend = MockBackend::default();
        let mut moved = connected_with_buttons(0);
        moved.left_stick = Vec2f::new(0.5, 0.0);
        backend
            .queue(connected_with_buttons(0))
            .queue(connected_with_buttons(0))
            .queue(moved);

        let mut pad = Gamepad::new(Slot::One);

        pad.poll(&mut backend);
        assert!(pad.state_changed()); // zeroed -> connected

        pad.poll(&mut backend);
        assert!(!pad.state_changed()); // identical consecutive states

        pad.poll(&mut backend);
        assert!(pad.state_changed()); // stick moved
    }

    #[test]
    fn clear_makes_snapshots_identical() {
        let mut backend = MockBackend::default();
        backend.queue(connected_with_buttons(Button::Y.bit()));

        let mut pad = Gamepad::new(Slot::One);
        pad.poll(&mut backend);
        assert!(pad.state_changed());

        pad.clear();
        assert!(!pad.state_changed());
        assert!(!pad.is_button_down(Button::Y));
        assert_eq!(*pad.state(), PadState::default());
    }

    #[test]
    fn is_connected_does_not_touch_snapshots() {
        let mut backend = MockBackend::default();
        backend.queue(connected_with_buttons(Button::A.bit()));

        let pad = Gamepad::new(Slot::One);
        assert!(pad.is_connected(&mut backend));

        // snapshots untouched by the fresh fetch
        assert!(!pad.is_button_down(Button::A));
        assert!(!pad.state_changed());
    }

    #[test]
    fn rumble_forwards_slot_and_intensities() {
        let mut backend = MockBackend::default();
        let pad = Gamepad::new(Slot::Three);

        pad.set_rumble(&mut backend, 0.5, 0.25);
        Gamepad::rumble(&mut backend, Slot::One, 1.0, 0.0);

        assert_eq!(backend.rumbles[0], (Slot::Three, 0.5, 0.25));
        assert_eq!(backend.rumbles[1], (Slot::One, 1.0, 0.0));
    }

    #[test]
    fn fetch_bypasses_snapshot_machinery() {
        let mut backend = MockBackend::default();
        backend.queue(connected_with_buttons(Button::Start.bit()));

        let state = Gamepad::fetch(&mut backend, Slot::Four);
        assert!(state.is_down(Button::Start));

        let fallback = Gamepad::fetch_with_deadzone(&mut backend, Slot::Four, 0.3);
        assert!(!fallback.connected);
    }
}
