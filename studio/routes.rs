use std::io::{Cursor, Read};

use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use ferrite_playground::PlaygroundError;

use crate::handlers;
use crate::state::SharedState;

pub type JsonResponse = Response<Cursor<Vec<u8>>>;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

fn json_header() -> Vec<Header> {
    Header::from_bytes(b"Content-Type", b"application/json")
        .ok()
        .into_iter()
        .collect()
}

pub fn raw_json_response(status: u16, body: String) -> JsonResponse {
    let bytes = body.into_bytes();
    let len = bytes.len();
    Response::new(StatusCode(status), json_header(), Cursor::new(bytes), Some(len), None)
}

pub fn json_response<T: Serialize>(body: &T) -> JsonResponse {
    match serde_json::to_string(body) {
        Ok(json) => raw_json_response(200, json),
        Err(e) => error_response(500, &e.to_string()),
    }
}

pub fn error_response(status: u16, message: &str) -> JsonResponse {
    let body = serde_json::json!({ "error": message }).to_string();
    raw_json_response(status, body)
}

/// 400 for engine errors, except I/O failures which are the server's fault.
pub fn engine_error(err: &PlaygroundError) -> JsonResponse {
    let status = match err {
        PlaygroundError::Io(_) => 500,
        _ => 400,
    };
    error_response(status, &err.to_string())
}

pub fn conflict() -> JsonResponse {
    error_response(409, "training is running; stop it first")
}

pub fn not_found() -> JsonResponse {
    error_response(404, "not found")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Reads the request body as JSON. An empty body yields `T::default()`.
pub fn read_json<T: DeserializeOwned + Default>(request: &mut Request) -> Result<T, JsonResponse> {
    let mut body = String::new();
    request
        .as_reader()
        .read_to_string(&mut body)
        .map_err(|e| error_response(400, &format!("could not read body: {e}")))?;
    if body.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(&body).map_err(|e| error_response(400, &format!("invalid JSON: {e}")))
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Dispatches incoming requests to the appropriate handler.
///
/// All handlers (except SSE) receive a `&mut Request` so that the dispatcher
/// retains ownership and can call `request.respond(response)` at the end.
/// The SSE handler takes ownership to perform long-lived streaming.
pub fn dispatch(mut request: Request, state: SharedState) {
    let method = request.method().clone();
    let url    = request.url().to_owned();

    let (path, query) = match url.split_once('?') {
        Some((path, query)) => (path.to_owned(), query.to_owned()),
        None => (url.clone(), String::new()),
    };
    debug!("{method:?} {path}");

    if method == Method::Get && path == "/train/events" {
        handlers::train_sse::handle(request, state);
        return;
    }

    let response = match (method, path.as_str()) {
        (Method::Get,  "/state")       => handlers::snapshot::handle_get(state),
        (Method::Post, "/dataset")     => handlers::dataset::handle_post(&mut request, state),
        (Method::Post, "/network")     => handlers::network::handle_post(&mut request, state),
        (Method::Post, "/train/start") => handlers::train::handle_start(&mut request, state),
        (Method::Post, "/train/stop")  => handlers::train::handle_stop(state),
        (Method::Post, "/step")        => handlers::train::handle_step(state),
        (Method::Get,  "/predict")     => handlers::predict::handle_get(&query, state),
        _ => not_found(),
    };

    if let Err(e) = request.respond(response) {
        warn!("failed to send response: {e}");
    }
}
