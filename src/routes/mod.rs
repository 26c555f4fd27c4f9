//! Router assembly and transport middleware.

pub mod common;
pub mod user;

pub use common::common_routes;
pub use user::user_routes;

use crate::config::StatusMode;
use crate::error::ErrorOutcome;
use crate::response::Envelope;
use crate::state::AppState;
use axum::{
    extract::{DefaultBodyLimit, Request, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    Json, Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Request bodies are a handful of short strings.
const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Full service: user and common routes behind request id, tracing, the
/// status-mode mapper, panic recovery and timeout.
pub fn app(state: AppState, request_timeout: Duration) -> Router {
    let mode = state.status_mode;
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(user_routes(state))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(request_span)
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(middleware::map_response_with_state(mode, apply_status_mode))
                .map_response(IntoResponse::into_response)
                .layer(CatchPanicLayer::new())
                .layer(TimeoutLayer::new(request_timeout)),
        )
}

fn request_span(req: &Request) -> tracing::Span {
    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    tracing::info_span!(
        "request",
        method = %req.method(),
        uri = %req.uri(),
        request_id = %request_id,
    )
}

/// Shapes every error response for the configured [`StatusMode`].
///
/// Handler errors already carry an envelope and an [`ErrorOutcome`]; in
/// `Http` mode they are rewritten with the error's HTTP status. Bare
/// timeout and panic responses are wrapped in an envelope in both modes.
pub async fn apply_status_mode(State(mode): State<StatusMode>, response: Response) -> Response {
    let outcome = match response.extensions().get::<ErrorOutcome>().cloned() {
        Some(_) if mode == StatusMode::Envelope => return response,
        Some(outcome) => outcome,
        None => match ErrorOutcome::from_transport(response.status()) {
            Some(outcome) => outcome,
            None => return response,
        },
    };
    let (status, envelope) = match mode {
        StatusMode::Envelope => (StatusCode::OK, Envelope::error(outcome.message)),
        StatusMode::Http => {
            let status = outcome.kind.http_status();
            (status, Envelope::error(outcome.message).with_status(status))
        }
    };
    let mut rewritten = (status, Json(envelope)).into_response();
    rewritten.extensions_mut().insert(outcome);
    rewritten
}
