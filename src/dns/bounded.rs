//! Deadline-bounded resolution.
//!
//! [`BoundedResolver`] runs one lookup as an independent task and races it
//! against a timer. The task reports through a oneshot channel; if the timer
//! wins, the receiver is dropped and the task's late `send` fails silently,
//! so a slow answer can never reach a later request.

use super::{Name, Resolve};
use crate::base::neterror::NetError;
use std::{fmt, net::IpAddr, sync::Arc, time::Duration};
use tokio::sync::oneshot;

/// Maximum wall-clock time allowed for one lookup.
pub const LOOKUP_DEADLINE: Duration = Duration::from_secs(5);

/// Wraps a [`Resolve`] capability with a hard deadline.
#[derive(Clone)]
pub struct BoundedResolver {
    inner: Arc<dyn Resolve>,
    deadline: Duration,
}

impl BoundedResolver {
    /// Bounds `inner` by [`LOOKUP_DEADLINE`].
    pub fn new(inner: Arc<dyn Resolve>) -> Self {
        Self::with_deadline(inner, LOOKUP_DEADLINE)
    }

    pub fn with_deadline(inner: Arc<dyn Resolve>, deadline: Duration) -> Self {
        Self { inner, deadline }
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Resolves `name` once, without retrying.
    ///
    /// Returns the capability's answer if it arrives before the deadline,
    /// its error if it fails before the deadline, and [`NetError::TimedOut`]
    /// otherwise. The in-flight lookup is not cancelled on timeout.
    pub async fn resolve(&self, name: Name) -> Result<Vec<IpAddr>, NetError> {
        let (tx, rx) = oneshot::channel();
        let lookup = self.inner.resolve(name.clone());

        tokio::spawn(async move {
            let outcome = lookup.await.map(|addrs| addrs.collect::<Vec<_>>());
            // Err here means the waiter already gave up.
            let _ = tx.send(outcome);
        });

        match tokio::time::timeout(self.deadline, rx).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(_)) => {
                // Sender dropped without sending: the lookup task panicked.
                tracing::error!(domain = %name, "resolution task ended without an answer");
                Err(NetError::NameNotResolved)
            }
            Err(_) => {
                tracing::warn!(domain = %name, deadline = ?self.deadline, "resolution timed out");
                Err(NetError::TimedOut)
            }
        }
    }
}

impl fmt::Debug for BoundedResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedResolver")
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}
