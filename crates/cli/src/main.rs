use anyhow::Context;
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use zonegate_domain::CliOverrides;
use zonegate_infrastructure::dns::DnsServerHandler;
use zonegate_jobs::{CacheMaintenanceJob, JobRunner};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "zonegate")]
#[command(version)]
#[command(about = "Zonegate - DNS responder with a local zone, answer cache and client access gate")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Upstream resolver (host:port)
    #[arg(short = 'u', long)]
    upstream: Option<String>,

    /// JSON zone file
    #[arg(short = 'z', long, value_name = "FILE")]
    zone_file: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind,
        upstream: cli.upstream,
        zone_file: cli.zone_file,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config.logging)?;

    info!("Starting Zonegate v{}", env!("CARGO_PKG_VERSION"));

    let dns_services = di::DnsServices::new(&config).await?;
    let shutdown = CancellationToken::new();

    let mut runner = JobRunner::new().with_shutdown_token(shutdown.clone());
    if let Some(maintenance) = dns_services.cache_maintenance.clone() {
        runner = runner.with_cache_maintenance(
            CacheMaintenanceJob::new(maintenance).with_interval(config.cache.sweep_interval_secs),
        );
    }
    let job_handles = runner.start().await;

    let bind_ip: IpAddr = config
        .server
        .bind_address
        .parse()
        .with_context(|| format!("Invalid bind address '{}'", config.server.bind_address))?;
    let dns_addr = SocketAddr::new(bind_ip, config.server.dns_port);
    let dns_handler = Arc::new(DnsServerHandler::new(dns_services.dispatcher.clone()));

    if let Err(e) = server::start_dns_server(dns_addr, dns_handler, shutdown.clone()).await {
        error!(error = %e, "DNS server error");
        shutdown.cancel();
        return Err(e);
    }

    shutdown.cancel();
    for handle in job_handles {
        let _ = handle.await;
    }

    if let Some(cache) = &dns_services.cache {
        let metrics = cache.metrics();
        info!(
            hits = metrics.hits,
            misses = metrics.misses,
            insertions = metrics.insertions,
            expirations = metrics.expirations,
            hit_rate = format!("{:.1}%", metrics.hit_rate),
            "Final cache statistics"
        );
    }

    info!("Server shutdown complete");
    Ok(())
}
