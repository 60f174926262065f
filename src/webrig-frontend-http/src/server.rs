// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

#[path = "api.rs"]
mod api;
#[path = "auth.rs"]
pub mod auth;
#[path = "dispatch.rs"]
pub mod dispatch;
#[path = "status.rs"]
pub mod status;
#[path = "ws.rs"]
mod ws;

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

use webrig_core::{LinkState, RadioSnapshot};
use webrig_rigctld::RigctldClient;

use self::auth::{AuthConfig, AuthMiddleware};

/// Everything a request handler needs, shared by all workers.
pub struct FrontendContext {
    pub client: Arc<RigctldClient>,
    pub state_rx: watch::Receiver<Option<RadioSnapshot>>,
    pub link_rx: watch::Receiver<LinkState>,
}

/// Run the HTTP frontend until `shutdown_rx` flips to true.
pub fn spawn_frontend(
    listen_addr: SocketAddr,
    context: FrontendContext,
    auth: AuthConfig,
    shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = serve(listen_addr, context, auth, shutdown_rx).await {
            error!("HTTP frontend error: {:?}", e);
        }
    })
}

async fn serve(
    addr: SocketAddr,
    context: FrontendContext,
    auth: AuthConfig,
    mut shutdown_rx: watch::Receiver<bool>,
) -> std::io::Result<()> {
    let server = build_server(addr, context, auth)?;
    let handle = server.handle();
    tokio::spawn(async move {
        while !*shutdown_rx.borrow() {
            if shutdown_rx.changed().await.is_err() {
                break;
            }
        }
        handle.stop(true).await;
    });
    info!("http frontend listening on {}", addr);
    server.await
}

fn build_server(
    addr: SocketAddr,
    context: FrontendContext,
    auth: AuthConfig,
) -> std::io::Result<Server> {
    let context = web::Data::new(context);
    let auth = web::Data::new(auth);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(context.clone())
            .app_data(auth.clone())
            .wrap(AuthMiddleware)
            .configure(api::configure)
    })
    .shutdown_timeout(1)
    .disable_signals()
    .bind(addr)?
    .run();
    Ok(server)
}
