//! Gamepad polling and fixed-size vector math for a game engine.
//!
//! Two loosely related utilities:
//! - [`math`]: generic N-dimensional vectors with component-wise arithmetic
//!   and free-function geometry helpers.
//! - [`pad`]: a per-slot gamepad facade with edge-triggered button queries
//!   over a platform polling backend (gilrs-backed by default).
//!
//! Everything is synchronous and single-threaded: the caller owns one
//! long-lived backend and passes it to whatever polls.

pub mod config;
pub mod math;
pub mod pad;

pub use config::InputConfig;
pub use math::{Vec2f, Vec3f, Vec4f, Vector};
pub use pad::{Button, Gamepad, GilrsBackend, PadState, PollBackend, Slot};
