use clap::Parser;
use ipservice::admission::DEFAULT_CONCURRENCY;
use ipservice::base::neterror::NetError;
use ipservice::config::{parse_override, ResolverKind, ServiceConfig, DEFAULT_LISTEN};
use ipservice::http::{LookupService, Server};
use std::net::IpAddr;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Resolve domain names over HTTP", long_about = None)]
struct Args {
    /// Maximum number of lookups in flight; extra requests get 420
    #[arg(short = 'c', long = "concurrency", default_value_t = DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// Listen address (`:port` listens on every interface)
    #[arg(long, default_value = DEFAULT_LISTEN)]
    addr: String,

    /// Resolution backend
    #[arg(long, value_enum, default_value_t = ResolverKind::System)]
    resolver: ResolverKind,

    /// Answer HOST with fixed addresses, e.g. --override api.local=127.0.0.1,::1
    #[arg(long = "override", value_name = "HOST=IP[,IP]", value_parser = parse_override)]
    overrides: Vec<(String, Vec<IpAddr>)>,
}

impl Args {
    fn into_config(self) -> ServiceConfig {
        self.overrides.into_iter().fold(
            ServiceConfig::new()
                .concurrency(self.concurrency)
                .listen(self.addr)
                .resolver(self.resolver),
            |config, (host, addrs)| config.add_override(host, addrs),
        )
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for ctrl-c, running until killed");
        std::future::pending::<()>().await;
    }
}

async fn run(config: ServiceConfig) -> Result<(), NetError> {
    config.validate()?;
    let service = LookupService::from_config(&config);
    let server = Server::bind_any(&config.listen_addrs(), service).await?;
    server.run_until(shutdown_signal()).await;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Args::parse().into_config();

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, code = e.as_i32(), "ipservice failed");
            ExitCode::FAILURE
        }
    }
}
