//! Observability subsystem.
//!
//! Every subsystem emits `tracing` events with structured fields; `logging.rs`
//! decides where they go and in which format.

pub mod logging;
