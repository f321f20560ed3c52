//! telemetry/mod.rs
//! Decode telemetry: counters, stage timers, and immutable snapshots.
//!
//! Every decoder owns its own counters and timer, so concurrent decodes
//! never share telemetry state.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
