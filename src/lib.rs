//! crabclock: a digit-flip countdown timer for the terminal.

pub mod app;
pub mod config;
pub mod countdown;
pub mod logging;
pub mod ui;
