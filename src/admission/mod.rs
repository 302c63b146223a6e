//! Admission control.
//!
//! Bounds how many lookups run at once. Excess requests are rejected on the
//! spot instead of queued.

pub mod gate;

pub use gate::{AdmissionGate, AdmissionToken, DEFAULT_CONCURRENCY};
