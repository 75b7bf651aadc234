//! Step definitions for board synchronization scenarios.

pub mod world;

mod then;
mod when;
