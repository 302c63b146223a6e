use std::io;
use std::sync::Arc;
use thiserror::Error;

/// Errors produced while admitting, resolving, and serving lookups.
///
/// Codes reuse the browser network stack's `net_error_list` numbers where a
/// matching entry exists.
#[derive(Debug, Error, Clone)]
pub enum NetError {
    // Request boundary
    #[error("Invalid input")]
    InvalidInput,
    /// Request path with a bad percent-escape or non-UTF-8 bytes.
    #[error("400 Bad Request")]
    MalformedPath,
    #[error("Throttled")]
    Throttled,
    #[error("timeout")]
    TimedOut,

    // Name resolution
    #[error("Name not resolved")]
    NameNotResolved,
    /// The capability's own error text is the display text.
    #[error("{source}")]
    NameNotResolvedFor {
        domain: String,
        #[source]
        source: Arc<io::Error>,
    },

    // Startup
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Address in use")]
    AddressInUse,
    #[error("Listen on {addr} failed: {source}")]
    ListenFailed {
        addr: String,
        #[source]
        source: Arc<io::Error>,
    },
}

impl NetError {
    pub fn as_i32(&self) -> i32 {
        match self {
            NetError::NameNotResolved => -105,
            NetError::NameNotResolvedFor { .. } => -105,
            NetError::TimedOut => -118,
            NetError::Throttled => -139,
            NetError::AddressInUse => -147,
            NetError::ListenFailed { .. } => -147,
            NetError::InvalidInput => -300,
            NetError::MalformedPath => -300,
            NetError::InvalidConfig(_) => -910,
        }
    }

    /// Status code the gateway answers with when this error ends a request.
    ///
    /// Throttling keeps the non-standard 420 that existing clients match on.
    pub fn http_status(&self) -> u16 {
        match self {
            NetError::Throttled => 420,
            NetError::MalformedPath => 400,
            _ => 500,
        }
    }

    /// Wraps a capability failure for `domain`.
    pub fn dns_failed(domain: &str, error: io::Error) -> Self {
        NetError::NameNotResolvedFor {
            domain: domain.to_string(),
            source: Arc::new(error),
        }
    }

    /// Wraps a bind failure for `addr`.
    pub fn listen_failed(addr: &str, error: io::Error) -> Self {
        NetError::ListenFailed {
            addr: addr.to_string(),
            source: Arc::new(error),
        }
    }

    /// Whether the error came from the resolution capability rather than the gateway.
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            NetError::NameNotResolved | NetError::NameNotResolvedFor { .. }
        )
    }
}
