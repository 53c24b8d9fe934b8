//! Countdown logic: counter, interval driver, controller and unit conversion.
//!
//! Nothing here knows about the terminal. The controller reports changes
//! through a listener; the UI turns snapshots into digits.

pub mod controller;
pub mod counter;
pub mod interval;
pub mod units;

pub use controller::{Countdown, CountdownConfig, CountdownState, Direction, RunState};
pub use counter::Counter;
pub use interval::Interval;
pub use units::{digits, TimeUnits};
