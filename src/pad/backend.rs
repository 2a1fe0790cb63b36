//! Platform polling contract and raw-report normalization.
//!
//! A backend turns vendor device reports into [`PadState`] snapshots. The
//! normalization itself is pure and lives here so every backend shares the
//! same curve and the tests never need hardware.

use thiserror::Error;

use crate::math::Vec2f;
use crate::pad::state::{PadState, Slot};

/// Full scale of a raw stick axis.
pub const STICK_RANGE: f32 = 32767.0;

/// Full scale of a raw trigger.
pub const TRIGGER_RANGE: f32 = 255.0;

/// Full scale of a rumble motor speed.
pub const MOTOR_RANGE: f32 = 65535.0;

/// Vendor-recommended left stick deadzone (7849 raw units).
pub const LEFT_STICK_DEADZONE: f32 = 7849.0 / STICK_RANGE;

/// Vendor-recommended right stick deadzone (8689 raw units).
pub const RIGHT_STICK_DEADZONE: f32 = 8689.0 / STICK_RANGE;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Failed to initialize input backend: {0}")]
    InitializationError(String),
}

/// The three-operation platform polling contract.
///
/// One long-lived backend instance is owned by the caller and passed
/// explicitly to whatever needs it; there is no global instance. Failures
/// while reading a slot are absorbed into the zeroed, disconnected
/// [`PadState`] rather than surfaced.
pub trait PollBackend {
    /// State of `slot`, normalized with the vendor-recommended per-stick
    /// deadzones.
    fn state(&mut self, slot: Slot) -> PadState;

    /// State of `slot`, normalized with a caller-supplied deadzone radius
    /// for both sticks.
    fn state_with_deadzone(&mut self, slot: Slot, deadzone: f32) -> PadState;

    /// Fire-and-forget rumble command; intensities are [0, 1] per motor.
    fn set_rumble(&mut self, slot: Slot, left: f32, right: f32);
}

/// Vendor-shaped raw report for one gamepad.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawPadState {
    pub left_x: i16,
    pub left_y: i16,
    pub right_x: i16,
    pub right_y: i16,
    pub left_trigger: u8,
    pub right_trigger: u8,
    pub buttons: u16,
}

// Scaled deadzone curve for a single stick axis. Applied per axis,
// independently for X and Y, not over the stick's 2D magnitude; the output
// still needs the 1/(1 - deadzone) rescale applied to the stick vector.
fn scale_axis(raw: i16, deadzone: f32) -> f32 {
    let n = (raw as f32 / STICK_RANGE).max(-1.0);
    if n.abs() < deadzone {
        0.0
    } else {
        (n.abs() - deadzone) * (n * n.abs())
    }
}

/// Normalizes a raw report into a connected [`PadState`].
///
/// Stick axes are clamped to [-1, 1] and run through the scaled quadratic
/// deadzone curve, then rescaled so the physical extreme reaches ±1.
/// Triggers scale linearly to [0, 1] with no deadzone; the button bitmask
/// is copied verbatim.
pub fn normalize(raw: &RawPadState, left_deadzone: f32, right_deadzone: f32) -> PadState {
    let mut left_stick = Vec2f::new(
        scale_axis(raw.left_x, left_deadzone),
        scale_axis(raw.left_y, left_deadzone),
    );
    let mut right_stick = Vec2f::new(
        scale_axis(raw.right_x, right_deadzone),
        scale_axis(raw.right_y, right_deadzone),
    );

    left_stick *= 1.0 / (1.0 - left_deadzone);
    right_stick *= 1.0 / (1.0 - right_deadzone);

    PadState {
        left_stick,
        right_stick,
        left_trigger: raw.left_trigger as f32 / TRIGGER_RANGE,
        right_trigger: raw.right_trigger as f32 / TRIGGER_RANGE,
        buttons: raw.buttons,
        connected: true,
    }
}

/// Converts a [0, 1] rumble intensity to the vendor's 16-bit motor scale.
pub fn motor_speed(value: f32) -> u16 {
    (value * MOTOR_RANGE) as u16
}
