//! Dispatch engine.
//!
//! The single entry point for evolving a card's runtime state. The caller
//! owns persistence and must serialize calls per card: two concurrent calls
//! on the same snapshot each return a full replacement, and whichever is
//! saved last wins.

mod dispatch;

pub use dispatch::{apply_event, SimulationResult};
