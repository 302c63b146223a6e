//! HTTP surface of the gateway.
//!
//! - [`path`]: lookup key extraction
//! - [`response`]: status and body mapping
//! - [`service`]: admission and resolution per request
//! - [`server`]: hyper connection serving

pub mod path;
pub mod response;
pub mod server;
pub mod service;

// Re-exports for convenience
pub use server::Server;
pub use service::LookupService;
