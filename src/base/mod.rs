//! Base types and error handling.
//!
//! - [`NetError`](neterror::NetError): error codes for admission, lookup and startup failures
//! - [`IoResultExt`](context::IoResultExt): context helpers for IO results

pub mod context;
pub mod neterror;
