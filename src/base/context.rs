//! Ergonomic error context helpers.
//!
//! Provides extension traits for adding context to `Result` types,
//! converting IO errors into context-rich `NetError` variants.

use crate::base::neterror::NetError;
use std::io;

/// Extension trait for adding context to IO Results.
pub trait IoResultExt<T> {
    /// Add DNS resolution context to an IO error.
    ///
    /// # Example
    /// ```ignore
    /// use ipservice::base::context::IoResultExt;
    ///
    /// let addrs = ("example.com", 0).to_socket_addrs().dns_context("example.com")?;
    /// ```
    fn dns_context(self, domain: &str) -> Result<T, NetError>;

    /// Add listen address context to an IO error.
    ///
    /// `AddrInUse` collapses to [`NetError::AddressInUse`].
    fn listen_context(self, addr: &str) -> Result<T, NetError>;
}

impl<T> IoResultExt<T> for Result<T, io::Error> {
    fn dns_context(self, domain: &str) -> Result<T, NetError> {
        self.map_err(|e| NetError::dns_failed(domain, e))
    }

    fn listen_context(self, addr: &str) -> Result<T, NetError> {
        self.map_err(|e| match e.kind() {
            io::ErrorKind::AddrInUse => NetError::AddressInUse,
            _ => NetError::listen_failed(addr, e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_dns_context() {
        let result: Result<(), io::Error> = Err(Error::new(ErrorKind::NotFound, "no such host"));
        let err = result.dns_context("unknown.example.com").unwrap_err();

        match err {
            NetError::NameNotResolvedFor { ref domain, .. } => {
                assert_eq!(domain, "unknown.example.com");
            }
            _ => panic!("Expected NameNotResolvedFor"),
        }
        assert_eq!(err.to_string(), "no such host");
    }

    #[test]
    fn test_listen_context_addr_in_use() {
        let result: Result<(), io::Error> = Err(Error::new(ErrorKind::AddrInUse, "in use"));
        let err = result.listen_context("0.0.0.0:8080").unwrap_err();
        assert!(matches!(err, NetError::AddressInUse));
    }

    #[test]
    fn test_listen_context_other() {
        let result: Result<(), io::Error> =
            Err(Error::new(ErrorKind::PermissionDenied, "permission denied"));
        let err = result.listen_context("0.0.0.0:80").unwrap_err();

        match err {
            NetError::ListenFailed { addr, .. } => assert_eq!(addr, "0.0.0.0:80"),
            _ => panic!("Expected ListenFailed"),
        }
    }
}
