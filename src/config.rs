//! Service configuration.

use crate::admission::{AdmissionGate, DEFAULT_CONCURRENCY};
use crate::base::neterror::NetError;
use crate::dns::{
    BoundedResolver, DnsResolverWithOverrides, GaiResolver, HickoryResolver, Resolve,
    LOOKUP_DEADLINE,
};
use std::borrow::Cow;
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

/// Default listen address. A leading `:` means every interface.
pub const DEFAULT_LISTEN: &str = ":8080";

/// Which resolution capability answers lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ResolverKind {
    /// The operating system's `getaddrinfo`.
    #[default]
    System,
    /// hickory-dns with the system's resolver configuration.
    Hickory,
}

/// Gateway configuration, fixed at process start.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Maximum concurrent lookups
    pub concurrency: usize,
    /// Listen address, `host:port` or `:port`
    pub listen: String,
    /// Per-lookup deadline
    pub deadline: Duration,
    /// Resolution backend
    pub resolver: ResolverKind,
    /// Names answered from a fixed table instead of the backend
    pub overrides: HashMap<String, Vec<IpAddr>>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            listen: DEFAULT_LISTEN.to_string(),
            deadline: LOOKUP_DEADLINE,
            resolver: ResolverKind::default(),
            overrides: HashMap::new(),
        }
    }
}

impl ServiceConfig {
    /// Create a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the concurrency ceiling.
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set the listen address.
    pub fn listen(mut self, listen: impl Into<String>) -> Self {
        self.listen = listen.into();
        self
    }

    /// Set the per-lookup deadline.
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Select the resolution backend.
    pub fn resolver(mut self, resolver: ResolverKind) -> Self {
        self.resolver = resolver;
        self
    }

    /// Answer `host` with `addrs` without consulting the backend.
    pub fn add_override(mut self, host: impl Into<String>, addrs: Vec<IpAddr>) -> Self {
        self.overrides.insert(host.into(), addrs);
        self
    }

    /// Rejects settings the gateway cannot run with.
    pub fn validate(&self) -> Result<(), NetError> {
        if self.concurrency == 0 {
            return Err(NetError::InvalidConfig(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if self.deadline.is_zero() {
            return Err(NetError::InvalidConfig(
                "deadline must be greater than zero".to_string(),
            ));
        }
        if self.listen.trim().is_empty() {
            return Err(NetError::InvalidConfig("listen address is empty".to_string()));
        }
        Ok(())
    }

    /// Addresses to try, in order, when binding the listener.
    ///
    /// `:8080` becomes `[::]:8080` then `0.0.0.0:8080`, so hosts without IPv6
    /// still listen on every IPv4 interface. Anything else is tried as given.
    pub fn listen_addrs(&self) -> Vec<String> {
        match self.listen.strip_prefix(':') {
            Some(port) => vec![format!("[::]:{}", port), format!("0.0.0.0:{}", port)],
            None => vec![self.listen.clone()],
        }
    }

    /// Builds the admission gate for this configuration.
    pub fn build_gate(&self) -> AdmissionGate {
        AdmissionGate::new(self.concurrency)
    }

    /// Builds the deadline-bounded resolver for this configuration.
    pub fn build_resolver(&self) -> BoundedResolver {
        let backend: Arc<dyn Resolve> = match self.resolver {
            ResolverKind::System => Arc::new(GaiResolver::new()),
            ResolverKind::Hickory => Arc::new(HickoryResolver::new()),
        };

        let capability: Arc<dyn Resolve> = if self.overrides.is_empty() {
            backend
        } else {
            let overrides = self
                .overrides
                .iter()
                .map(|(host, addrs)| (Cow::Owned(host.clone()), addrs.clone()))
                .collect();
            Arc::new(DnsResolverWithOverrides::new(backend, overrides))
        };

        BoundedResolver::with_deadline(capability, self.deadline)
    }
}

/// Parses an override of the form `host=ip[,ip...]`.
pub fn parse_override(value: &str) -> Result<(String, Vec<IpAddr>), NetError> {
    let (host, ips) = value
        .split_once('=')
        .ok_or_else(|| NetError::InvalidConfig(format!("override `{}` is not host=ip", value)))?;

    let host = host.trim();
    if host.is_empty() {
        return Err(NetError::InvalidConfig(format!(
            "override `{}` has an empty host",
            value
        )));
    }

    let addrs = ips
        .split(',')
        .map(|ip| {
            ip.trim().parse::<IpAddr>().map_err(|e| {
                NetError::InvalidConfig(format!("override `{}`: bad address `{}`: {}", value, ip, e))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok((host.to_string(), addrs))
}
