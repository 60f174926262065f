// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Browser control sessions over WebSocket.
//!
//! - Server pushes the link state and every new radio snapshot as JSON text
//! - Browser sends JSON commands and gets one reply per command

use std::sync::Arc;

use actix_web::{get, web, Error, HttpRequest, HttpResponse};
use actix_ws::{CloseReason, Message, MessageStream, Session};
use tracing::{debug, error, info, warn};

use webrig_core::UiMessage;

use crate::server::dispatch;
use crate::server::FrontendContext;

#[get("/ws")]
pub async fn ws(
    req: HttpRequest,
    body: web::Payload,
    context: web::Data<FrontendContext>,
) -> Result<HttpResponse, Error> {
    let (response, session, msg_stream) = actix_ws::handle(&req, body)?;
    let peer = req
        .peer_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|| "unknown".into());
    actix_web::rt::spawn(run_session(context.into_inner(), session, msg_stream, peer));
    Ok(response)
}

async fn send(session: &mut Session, message: &UiMessage) -> Result<(), actix_ws::Closed> {
    match serde_json::to_string(message) {
        Ok(json) => session.text(json).await,
        Err(e) => {
            error!("Failed to encode UI message: {}", e);
            Ok(())
        }
    }
}

async fn run_session(
    context: Arc<FrontendContext>,
    mut session: Session,
    mut msg_stream: MessageStream,
    peer: String,
) {
    info!("WS session opened from {}", peer);
    let mut state_rx = context.state_rx.clone();
    let mut link_rx = context.link_rx.clone();

    let link = *link_rx.borrow_and_update();
    if send(&mut session, &UiMessage::Link { state: link }).await.is_err() {
        return;
    }
    let snapshot = state_rx.borrow_and_update().clone();
    if let Some(snapshot) = snapshot {
        if send(&mut session, &UiMessage::State(snapshot)).await.is_err() {
            return;
        }
    }

    let close_reason: Option<CloseReason> = loop {
        tokio::select! {
            changed = state_rx.changed() => {
                if changed.is_err() {
                    break None;
                }
                let snapshot = state_rx.borrow_and_update().clone();
                if let Some(snapshot) = snapshot {
                    if send(&mut session, &UiMessage::State(snapshot)).await.is_err() {
                        return;
                    }
                }
            }
            changed = link_rx.changed() => {
                if changed.is_err() {
                    break None;
                }
                let state = *link_rx.borrow_and_update();
                if send(&mut session, &UiMessage::Link { state }).await.is_err() {
                    return;
                }
            }
            msg = msg_stream.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let reply = match dispatch::parse_command(&text) {
                            Ok(command) => {
                                debug!("WS {} -> {:?}", peer, command);
                                dispatch::execute(&context.client, command).await
                            }
                            Err(reply) => reply,
                        };
                        if send(&mut session, &reply).await.is_err() {
                            return;
                        }
                    }
                    Some(Ok(Message::Ping(bytes))) => {
                        if session.pong(&bytes).await.is_err() {
                            return;
                        }
                    }
                    Some(Ok(Message::Close(reason))) => break reason,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!("WS {} protocol error: {}", peer, e);
                        break None;
                    }
                    None => break None,
                }
            }
        }
    };

    let _ = session.close(close_reason).await;
    info!("WS session from {} closed", peer);
}
