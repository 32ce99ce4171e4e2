use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use perfmon::config::{self, Config, LogFormat};
use perfmon::logging::init_tracing;
use perfmon::server;
use perfmon::system::collector::Collector;
use perfmon::system::monitor::PerformanceMonitor;
use perfmon::system::source::MetricSource;
use perfmon::units::format_bytes;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "perfmon",
    about = "Host CPU, memory and disk sampler with a JSON performance endpoint"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to listen on, e.g. 127.0.0.1:8080
    #[arg(long)]
    bind: Option<String>,

    /// Log filter directive, e.g. info or perfmon=debug
    #[arg(long)]
    log_level: Option<String>,

    /// Log output format
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);
    init_tracing(&config.logging)?;

    let cancel = CancellationToken::new();
    let mut collector = Collector::new();
    log_monitored_volume(&mut collector);

    let (monitor, sampler) = PerformanceMonitor::start(collector, cancel.clone());

    let listener = TcpListener::bind(&config.server.bind)
        .await
        .wrap_err_with(|| format!("failed to bind {}", config.server.bind))?;
    info!(addr = %listener.local_addr()?, "serving /api/performance");

    tokio::spawn(shutdown_on_ctrl_c(cancel.clone()));
    server::serve(listener, monitor, cancel.clone()).await?;

    // The server can also stop on its own; make sure the loop follows.
    cancel.cancel();
    sampler.await?;
    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => config::load_config_from_path(path),
        None => config::load_config(),
    };

    if let Some(ref bind) = cli.bind {
        config.server.bind = bind.clone();
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }

    config
}

fn log_monitored_volume(collector: &mut Collector) {
    match collector.disk_usage() {
        Ok(usage) => info!(
            device = collector.monitored_device(),
            total = %format_bytes(usage.total_bytes),
            "monitoring volume"
        ),
        Err(error) => warn!(%error, "monitored volume not found, disk figures will read zero"),
    }
}

async fn shutdown_on_ctrl_c(cancel: CancellationToken) {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "failed to listen for ctrl-c");
        return;
    }
    info!("shutting down");
    cancel.cancel();
}
