// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! HTTP authentication for the web frontend.
//!
//! Pages and `/status` use HTTP Basic credentials. Browsers cannot attach
//! an Authorization header to a WebSocket handshake, so `/ws` carries the
//! same credentials as a `token=user:pass` query parameter instead. Both
//! are checked before the request reaches a handler.

use std::fmt;

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::{header, StatusCode},
    web, Error, HttpResponse, ResponseError,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use futures_util::future::LocalBoxFuture;
use serde::Deserialize;

const REALM: &str = "webrig";

/// Single user allowed to operate the radio.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
}

impl AuthConfig {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn check_credentials(&self, username: &str, password: &str) -> bool {
        // Evaluate both halves so timing does not reveal which one failed.
        let user_ok = constant_time_eq(username, &self.username);
        let pass_ok = constant_time_eq(password, &self.password);
        user_ok & pass_ok
    }

    /// Check an `Authorization: Basic ...` header value.
    pub fn check_basic_header(&self, value: &str) -> bool {
        let Some(encoded) = value.trim().strip_prefix("Basic ") else {
            return false;
        };
        let Ok(decoded) = STANDARD.decode(encoded.trim()) else {
            return false;
        };
        let Ok(decoded) = String::from_utf8(decoded) else {
            return false;
        };
        self.check_token(&decoded)
    }

    /// Check a `user:pass` token. The password may itself contain ':'.
    pub fn check_token(&self, token: &str) -> bool {
        match token.split_once(':') {
            Some((username, password)) => self.check_credentials(username, password),
            None => false,
        }
    }
}

/// Constant-time string comparison to mitigate timing attacks
fn constant_time_eq(a: &str, b: &str) -> bool {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    if a_bytes.len() != b_bytes.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a_bytes.iter().zip(b_bytes.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RouteAccess {
    /// Credentials in the Authorization header.
    Basic,
    /// Credentials in the `token` query parameter.
    Token,
}

impl RouteAccess {
    fn from_path(path: &str) -> Self {
        if path == "/ws" {
            Self::Token
        } else {
            Self::Basic
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

fn request_allowed(req: &ServiceRequest, auth: &AuthConfig) -> bool {
    match RouteAccess::from_path(req.path()) {
        RouteAccess::Basic => req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| auth.check_basic_header(value)),
        RouteAccess::Token => web::Query::<TokenQuery>::from_query(req.query_string())
            .ok()
            .and_then(|query| query.into_inner().token)
            .is_some_and(|token| auth.check_token(&token)),
    }
}

/// Rejection carrying the Basic challenge so browsers prompt for a login.
#[derive(Debug)]
struct Unauthorized;

impl fmt::Display for Unauthorized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Unauthorized")
    }
}

impl ResponseError for Unauthorized {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::Unauthorized()
            .insert_header((
                header::WWW_AUTHENTICATE,
                format!("Basic realm=\"{REALM}\", charset=\"UTF-8\""),
            ))
            .body("Unauthorized")
    }
}

/// Authentication middleware
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Without configured credentials nothing is reachable.
        let allowed = req
            .app_data::<web::Data<AuthConfig>>()
            .is_some_and(|auth| request_allowed(&req, auth));

        if !allowed {
            return Box::pin(async move { Err(Unauthorized.into()) });
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use actix_web::test as http_test;
    use actix_web::App;

    fn auth() -> AuthConfig {
        AuthConfig::new("op", "s3cret:x")
    }

    fn basic(user_pass: &str) -> String {
        format!("Basic {}", STANDARD.encode(user_pass))
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq("test", "test"));
        assert!(!constant_time_eq("test", "fail"));
        assert!(!constant_time_eq("test", "test2"));
        assert!(!constant_time_eq("", "test"));
    }

    #[test]
    fn test_route_access() {
        assert_eq!(RouteAccess::from_path("/"), RouteAccess::Basic);
        assert_eq!(RouteAccess::from_path("/status"), RouteAccess::Basic);
        assert_eq!(RouteAccess::from_path("/ws"), RouteAccess::Token);
    }

    #[test]
    fn test_check_token() {
        let auth = auth();
        assert!(auth.check_token("op:s3cret:x"));
        assert!(!auth.check_token("op:s3cret"));
        assert!(!auth.check_token("op"));
        assert!(!auth.check_token(""));
    }

    #[test]
    fn test_check_basic_header() {
        let auth = auth();
        assert!(auth.check_basic_header(&basic("op:s3cret:x")));
        assert!(!auth.check_basic_header(&basic("op:wrong")));
        assert!(!auth.check_basic_header("Basic !!!not-base64"));
        assert!(!auth.check_basic_header("Bearer abc"));
    }

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn test_basic_guard() {
        let app = http_test::init_service(
            App::new()
                .app_data(web::Data::new(auth()))
                .wrap(AuthMiddleware)
                .route("/status", web::get().to(ok)),
        )
        .await;

        let req = http_test::TestRequest::get().uri("/status").to_request();
        let err = http_test::try_call_service(&app, req).await.unwrap_err();
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));

        let req = http_test::TestRequest::get()
            .uri("/status")
            .insert_header((header::AUTHORIZATION, basic("op:s3cret:x")))
            .to_request();
        let resp = http_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_token_guard() {
        let app = http_test::init_service(
            App::new()
                .app_data(web::Data::new(auth()))
                .wrap(AuthMiddleware)
                .route("/ws", web::get().to(ok)),
        )
        .await;

        let req = http_test::TestRequest::get().uri("/ws?token=op:nope").to_request();
        let err = http_test::try_call_service(&app, req).await.unwrap_err();
        assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);

        let req = http_test::TestRequest::get()
            .uri("/ws?token=op%3As3cret%3Ax")
            .to_request();
        let resp = http_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
