// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

use actix_web::http::header;
use actix_web::{get, web, HttpResponse, Responder};
use serde::Serialize;

use webrig_core::{LinkState, RadioSnapshot};

use crate::server::status;
use crate::server::FrontendContext;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(status_api)
        .service(crate::server::ws::ws);
}

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "text/html; charset=utf-8"))
        .body(status::index_html())
}

#[derive(Debug, Serialize)]
struct StatusView {
    link: LinkState,
    state: Option<RadioSnapshot>,
}

#[get("/status")]
async fn status_api(context: web::Data<FrontendContext>) -> impl Responder {
    let view = StatusView {
        link: *context.link_rx.borrow(),
        state: context.state_rx.borrow().clone(),
    };
    HttpResponse::Ok().json(view)
}
