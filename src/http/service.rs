//! The lookup request handler.
//!
//! Flow per request: percent-decode the path, take the last segment, reject
//! root markers, claim an admission slot or answer 420, resolve under the
//! deadline, release the slot, write the outcome.

use crate::admission::AdmissionGate;
use crate::base::neterror::NetError;
use crate::config::ServiceConfig;
use crate::dns::{BoundedResolver, Name};
use crate::http::path::{decode_path, is_valid_key, lookup_key};
use crate::http::response::{self, Body};
use http::{Request, Response};
use std::net::IpAddr;

/// Admission gate plus bounded resolver, shared by every connection.
#[derive(Clone, Debug)]
pub struct LookupService {
    gate: AdmissionGate,
    resolver: BoundedResolver,
}

impl LookupService {
    pub fn new(gate: AdmissionGate, resolver: BoundedResolver) -> Self {
        Self { gate, resolver }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(config.build_gate(), config.build_resolver())
    }

    pub fn gate(&self) -> &AdmissionGate {
        &self.gate
    }

    /// Resolves `domain` if a slot is free.
    ///
    /// Invalid keys fail before admission and consume nothing. The slot is
    /// held until this future completes or is dropped.
    pub async fn lookup(&self, domain: &str) -> Result<Vec<IpAddr>, NetError> {
        if !is_valid_key(domain) {
            return Err(NetError::InvalidInput);
        }

        let _token = self.gate.try_acquire().ok_or_else(|| {
            tracing::warn!(
                domain = %domain,
                capacity = self.gate.capacity(),
                "throttled: all lookup slots in use"
            );
            NetError::Throttled
        })?;

        self.resolver.resolve(Name::new(domain)).await
    }

    /// Answers one HTTP request. The request body is ignored.
    ///
    /// The key is taken from the percent-decoded path; a path that does not
    /// decode is answered with 400 before admission.
    pub async fn handle<B>(&self, req: Request<B>) -> Result<Response<Body>, http::Error> {
        let path = match decode_path(req.uri().path()) {
            Ok(path) => path,
            Err(e) => {
                tracing::debug!(path = %req.uri().path(), error = %e, "undecodable request path");
                return response::error(&e);
            }
        };
        let domain = lookup_key(&path);
        tracing::debug!(method = %req.method(), path = %path, domain = %domain, "lookup request");

        match self.lookup(domain).await {
            Ok(addrs) => {
                tracing::debug!(domain = %domain, count = addrs.len(), "lookup succeeded");
                response::addresses(&addrs)
            }
            Err(e) => {
                tracing::debug!(domain = %domain, error = %e, code = e.as_i32(), "lookup failed");
                response::error(&e)
            }
        }
    }
}
