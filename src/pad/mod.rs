//! Gamepad polling: state snapshots, the platform backend contract, and the
//! per-slot facade with edge-triggered button queries.

pub mod backend;
pub mod gamepad;
pub mod gilrs_backend;
pub mod state;

pub use backend::{
    motor_speed, normalize, BackendError, PollBackend, RawPadState, LEFT_STICK_DEADZONE,
    MOTOR_RANGE, RIGHT_STICK_DEADZONE, STICK_RANGE, TRIGGER_RANGE,
};
pub use gamepad::Gamepad;
pub use gilrs_backend::GilrsBackend;
pub use state::{Axis, Button, PadState, Slot};
