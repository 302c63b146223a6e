//! HTTP/1 listener and per-connection serving.

use crate::base::context::IoResultExt;
use crate::base::neterror::NetError;
use crate::http::service::LookupService;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;

/// Pause after a failed `accept` so fd exhaustion does not spin the loop.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(10);

/// HTTP/1 front end for a [`LookupService`].
///
/// Each connection is served on its own task; a broken connection is
/// logged and dropped without affecting the listener.
pub struct Server {
    listener: TcpListener,
    service: LookupService,
}

impl Server {
    /// Binds `addr`. Failure here is the only fatal error the gateway has.
    pub async fn bind(addr: &str, service: LookupService) -> Result<Self, NetError> {
        Self::bind_any(&[addr], service).await
    }

    /// Binds the first of `addrs` that succeeds.
    ///
    /// If none does, the error from the last attempt is returned.
    pub async fn bind_any<A: AsRef<str>>(
        addrs: &[A],
        service: LookupService,
    ) -> Result<Self, NetError> {
        let mut last_err = NetError::InvalidConfig("listen address is empty".to_string());

        for addr in addrs {
            let addr: &str = addr.as_ref();
            match TcpListener::bind(addr).await.listen_context(addr) {
                Ok(listener) => {
                    tracing::info!(
                        addr = %addr,
                        concurrency = service.gate().capacity(),
                        "listening"
                    );
                    return Ok(Self { listener, service });
                }
                Err(e) => {
                    tracing::debug!(addr = %addr, error = %e, "bind attempt failed");
                    last_err = e;
                }
            }
        }

        Err(last_err)
    }

    pub fn local_addr(&self) -> Result<SocketAddr, NetError> {
        self.listener
            .local_addr()
            .map_err(|e| NetError::listen_failed("listener", e))
    }

    /// Serves until the process exits.
    pub async fn run(self) {
        self.run_until(std::future::pending()).await
    }

    /// Serves until `shutdown` completes. Connections already accepted keep
    /// running on their own tasks.
    pub async fn run_until<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("shutting down listener");
                    return;
                }
                accepted = self.listener.accept() => {
                    let (stream, peer) = match accepted {
                        Ok(conn) => conn,
                        Err(e) => {
                            tracing::warn!(error = %e, "accept failed");
                            tokio::time::sleep(ACCEPT_BACKOFF).await;
                            continue;
                        }
                    };
                    self.spawn_connection(stream, peer);
                }
            }
        }
    }

    fn spawn_connection(&self, stream: tokio::net::TcpStream, peer: SocketAddr) {
        let service = self.service.clone();
        tokio::spawn(async move {
            let io = TokioIo::new(stream);
            let svc = service_fn(move |req| {
                let service = service.clone();
                async move { service.handle(req).await }
            });

            if let Err(e) = http1::Builder::new().serve_connection(io, svc).await {
                tracing::debug!(peer = %peer, error = %e, "connection error");
            }
        });
    }
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("local_addr", &self.listener.local_addr().ok())
            .field("service", &self.service)
            .finish()
    }
}
