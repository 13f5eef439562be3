//! `tiny_http` server adapter
//!
//! Handles routing and response conversion for `tiny_http`.

use std::io::Cursor;

use serde::Serialize;
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

use crate::api::{self, ApiError, ErrorBody, ServiceState};

/// Routes served by the deploy trigger service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `GET /`
    Health,
    /// `GET /run` or `POST /run`
    Run,
    /// A known path with a method it does not accept
    MethodNotAllowed,
    /// Anything else
    NotFound,
}

/// Map a method and URL to a route; the query string is ignored
#[must_use]
pub fn route(method: &Method, url: &str) -> Route {
    let path = url.split_once('?').map_or(url, |(path, _)| path);

    match (method, path) {
        (&Method::Get, "/") => Route::Health,
        (&Method::Get | &Method::Post, "/run") => Route::Run,
        (_, "/" | "/run") => Route::MethodNotAllowed,
        _ => Route::NotFound,
    }
}

/// Bind the listener on all interfaces
pub fn bind(port: u16) -> anyhow::Result<Server> {
    let addr = format!("0.0.0.0:{port}");
    Server::http(&addr).map_err(|e| anyhow::anyhow!("Failed to start server on {addr}: {e}"))
}

/// Serve requests until the listener shuts down
///
/// Handlers never block on a deployment, so one loop serves every caller.
pub fn serve(server: &Server, state: &ServiceState) {
    for request in server.incoming_requests() {
        let response = handle_request(&request, state);
        if let Err(e) = request.respond(response) {
            log::warn!("failed to send response: {e}");
        }
    }
}

/// Handle one request
pub fn handle_request(request: &Request, state: &ServiceState) -> Response<Cursor<Vec<u8>>> {
    let method = request.method();
    let url = request.url();
    log::debug!("{method} {url}");

    match route(method, url) {
        Route::Health => json_response(&api::health(state), 200),
        Route::Run => match api::trigger_run(state) {
            Ok(data) => json_response(&data, 200),
            Err(e) => error_response(&e),
        },
        Route::MethodNotAllowed => error_response(&ApiError::method_not_allowed(format!(
            "Method {method} not allowed for {url}"
        ))),
        Route::NotFound => error_response(&ApiError::not_found(format!(
            "Endpoint not found: {method} {url}"
        ))),
    }
}

// =============================================================================
// RESPONSE CONVERSION
// =============================================================================

/// Create an error JSON response with appropriate status code
fn error_response(error: &ApiError) -> Response<Cursor<Vec<u8>>> {
    if error.status_code() >= 500 {
        log::error!("{error}");
    }
    json_response(&ErrorBody::from(error), error.status_code())
}

/// Serialize data to JSON response with status code
fn json_response<T: Serialize>(data: &T, status: u16) -> Response<Cursor<Vec<u8>>> {
    let json = serde_json::to_string(data).unwrap_or_else(|_| r#"{"error":{}}"#.to_string());
    let mut response = Response::from_data(json.into_bytes()).with_status_code(StatusCode(status));
    if let Ok(header) = Header::from_bytes("Content-Type", "application/json") {
        response.add_header(header);
    }
    response
}
