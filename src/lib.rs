//! A traffic light that walks a fixed schedule of green, yellow and red.
//!
//! [`Cycle`] tracks which phase is lit and when the next transition is due,
//! [`render`] turns the active color into a [`Panel`] of three indicators, and
//! [`run`] drives both on the embassy executor, writing to [`Lamps`] until a
//! [`StopSignal`] tears it down.
#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible to the other modules.
mod fmt;

mod color;
pub use color::*;
mod config;
pub use config::*;
mod cycle;
pub use cycle::*;
mod lamps;
pub use lamps::*;
mod panel;
pub use panel::*;
mod runner;
pub use runner::*;
mod sequence;
pub use sequence::*;
