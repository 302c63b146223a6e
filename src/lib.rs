//! # ipservice
//!
//! An HTTP gateway that resolves domain names to IP addresses.
//!
//! `GET /<domain>` answers with a JSON array of address strings. The gateway
//! never queues: when every lookup slot is taken it answers `420 Throttled`
//! at once, and no lookup may take longer than [`dns::LOOKUP_DEADLINE`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ipservice::config::ServiceConfig;
//! use ipservice::http::{LookupService, Server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ipservice::base::neterror::NetError> {
//!     let config = ServiceConfig::new().concurrency(16).listen(":8080");
//!     config.validate()?;
//!     let service = LookupService::from_config(&config);
//!     let server = Server::bind_any(&config.listen_addrs(), service).await?;
//!     server.run().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`admission`] - Non-blocking concurrency gate
//! - [`base`] - Error definitions
//! - [`config`] - Service configuration
//! - [`dns`] - Resolution capability and deadline enforcement
//! - [`http`] - Request handling and the HTTP server
//!
//! ## Status codes
//!
//! | Outcome           | Status | Body                    |
//! |-------------------|--------|-------------------------|
//! | resolved          | 200    | `["192.0.2.1", ...]`    |
//! | `/` or `/.`       | 500    | `Invalid input`         |
//! | bad `%` escape    | 400    | `400 Bad Request`       |
//! | saturated         | 420    | `Throttled`             |
//! | deadline exceeded | 500    | `timeout`               |
//! | lookup failed     | 500    | resolver error text     |

pub mod admission;
pub mod base;
pub mod config;
pub mod dns;
pub mod http;
