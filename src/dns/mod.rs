//! DNS Resolution Module
//!
//! Provides the pluggable resolution capability and its deadline wrapper:
//! - System resolver (getaddrinfo via thread pool)
//! - Async hickory-dns resolver
//! - Hostname-to-IP override mechanism
//! - [`BoundedResolver`], which caps every lookup at [`LOOKUP_DEADLINE`]
//!
//! # Example
//!
//! ```rust,ignore
//! use ipservice::dns::{BoundedResolver, GaiResolver, Name};
//! use std::sync::Arc;
//!
//! let resolver = BoundedResolver::new(Arc::new(GaiResolver::new()));
//! for ip in resolver.resolve(Name::new("example.com")).await? {
//!     println!("Resolved: {}", ip);
//! }
//! ```

mod bounded;
mod gai;
mod hickory;
mod resolve;

pub use bounded::{BoundedResolver, LOOKUP_DEADLINE};
pub use gai::GaiResolver;
pub use hickory::HickoryResolver;
pub use resolve::{Addrs, DnsResolverWithOverrides, Name, Resolve, Resolving};
