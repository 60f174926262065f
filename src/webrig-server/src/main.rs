// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

mod config;

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::signal;
use tokio::sync::watch;
use tracing::{info, warn};

use webrig_app::init_logging;
use webrig_core::DynResult;
use webrig_frontend_http::{spawn_frontend, AuthConfig, FrontendContext};
use webrig_rigctld::{parse_endpoint, run_poller, RigctldClient, Supervisor};

use config::ServerConfig;

const PKG_DESCRIPTION: &str = concat!(env!("CARGO_PKG_NAME"), " - web control for rigctld radios");
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

#[derive(Debug, Parser)]
#[command(
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = PKG_DESCRIPTION,
)]
struct Cli {
    /// Path to configuration file
    #[arg(long = "config", short = 'C', value_name = "FILE")]
    config: Option<PathBuf>,
    /// Print example configuration and exit
    #[arg(long = "print-config")]
    print_config: bool,
    /// rigctld address (host[:port])
    #[arg(long = "rigctld", value_name = "HOST[:PORT]")]
    rigctld: Option<String>,
    /// HTTP frontend listen address
    #[arg(long = "http-listen")]
    http_listen: Option<IpAddr>,
    /// HTTP frontend listen port
    #[arg(long = "http-port")]
    http_port: Option<u16>,
    /// State poll interval in milliseconds
    #[arg(long = "poll-interval")]
    poll_interval_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> DynResult<()> {
    let cli = Cli::parse();

    if cli.print_config {
        println!("{}", ServerConfig::example_toml());
        return Ok(());
    }

    let (mut cfg, config_path) = if let Some(ref path) = cli.config {
        let cfg = ServerConfig::load_from_file(path)?;
        (cfg, Some(path.clone()))
    } else {
        ServerConfig::load_from_default_paths()?
    };

    // CLI > config file > defaults
    if let Some(ref addr) = cli.rigctld {
        let endpoint = parse_endpoint(addr).map_err(|e| format!("Invalid --rigctld: {}", e))?;
        cfg.rigctld.host = endpoint.host;
        cfg.rigctld.port = endpoint.port;
    }
    if let Some(listen) = cli.http_listen {
        cfg.http.listen = listen;
    }
    if let Some(port) = cli.http_port {
        cfg.http.port = port;
    }
    if let Some(interval) = cli.poll_interval_ms {
        cfg.polling.interval_ms = interval;
    }

    init_logging(cfg.general.log_level.as_deref());

    if let Some(ref path) = config_path {
        info!("Loaded configuration from {}", path.display());
    }
    cfg.validate()
        .map_err(|e| format!("Invalid configuration: {}", e))?;

    let endpoint = cfg.rigctld.endpoint();
    let http_addr = SocketAddr::new(cfg.http.listen, cfg.http.port);
    info!(
        "Starting webrig-server (rigctld: {}, http: {})",
        endpoint, http_addr
    );

    let client = Arc::new(RigctldClient::new(endpoint, cfg.rigctld.connect_timeout()));
    let supervisor = Arc::new(Supervisor::new(
        client.clone(),
        cfg.rigctld.reconnect_policy(),
    ));
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (state_tx, state_rx) = watch::channel(None);

    // The web UI comes up regardless of whether the radio is reachable.
    let frontend = spawn_frontend(
        http_addr,
        FrontendContext {
            client: client.clone(),
            state_rx,
            link_rx: supervisor.subscribe(),
        },
        AuthConfig::new(cfg.auth.username.clone(), cfg.auth.password.clone()),
        shutdown_rx.clone(),
    );

    if !supervisor.startup().await.is_connected() {
        warn!("rigctld unavailable, retrying in background");
    }

    let supervisor_task = {
        let supervisor = supervisor.clone();
        let shutdown_rx = shutdown_rx.clone();
        tokio::spawn(async move { supervisor.run(shutdown_rx).await })
    };
    let poller_task = tokio::spawn(run_poller(
        client.clone(),
        Duration::from_millis(cfg.polling.interval_ms),
        state_tx,
        shutdown_rx,
    ));

    signal::ctrl_c().await?;
    info!("Ctrl+C received, shutting down");
    let _ = shutdown_tx.send(true);

    for (name, task) in [
        ("supervisor", supervisor_task),
        ("poller", poller_task),
        ("http frontend", frontend),
    ] {
        if tokio::time::timeout(SHUTDOWN_GRACE, task).await.is_err() {
            warn!("{} did not stop within {:?}", name, SHUTDOWN_GRACE);
        }
    }
    client.disconnect().await;
    Ok(())
}
