use std::time::Instant;
use warp::http::StatusCode;
use warp::reject::Rejection;
use warp::reply::Reply;
use warp::Filter;

use crate::errors::ErrorResponse;

/// Rejection raised when a request negotiates no JSON-capable response.
#[derive(Debug)]
pub struct FormatNotAcceptable;

impl warp::reject::Reject for FormatNotAcceptable {}

/// The content-negotiation predicate: a request is acceptable when its
/// `Accept` header (default `*/*`) mentions JSON, or when its first
/// `$format` query parameter (default `html`) is exactly `json`.
pub fn accepts_json(accept: Option<&str>, query: &[(String, String)]) -> bool {
    if accept.unwrap_or("*/*").contains("json") {
        return true;
    }
    let format = query
        .iter()
        .find(|(key, _)| key.as_str() == "$format")
        .map(|(_, value)| value.as_str())
        .unwrap_or("html");
    format == "json"
}

/// Gate composed ahead of the dealing routes; rejects non-JSON-acceptable
/// requests with [`FormatNotAcceptable`] before any business logic runs.
/// The OpenAPI routes do not compose this filter, their format is fixed by
/// the path.
pub fn require_json() -> impl Filter<Extract = (), Error = Rejection> + Clone {
    warp::header::optional::<String>("accept")
        .and(warp::query::<Vec<(String, String)>>())
        .and_then(
            |accept: Option<String>, query: Vec<(String, String)>| async move {
                if accepts_json(accept.as_deref(), &query) {
                    Ok(())
                } else {
                    Err(warp::reject::custom(FormatNotAcceptable))
                }
            },
        )
        .untuple_one()
}

/// Terminal rejection handler for the composed route set. Total: every
/// rejection maps to a response, nothing is re-raised.
pub async fn handle_rejection(err: Rejection) -> Result<warp::reply::Response, Rejection> {
    let (status, response) = if err.find::<FormatNotAcceptable>().is_some() {
        (
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(
                "bad_request_format",
                "request does not accept a JSON response",
            ),
        )
    } else if err.find::<warp::reject::InvalidQuery>().is_some() {
        (
            StatusCode::BAD_REQUEST,
            ErrorResponse::new("invalid_request", "query string is not decodable"),
        )
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            ErrorResponse::new("method_not_allowed", "method not allowed on this endpoint"),
        )
    } else if err.is_not_found() {
        (
            StatusCode::NOT_FOUND,
            ErrorResponse::new("not_found", "no such endpoint"),
        )
    } else {
        tracing::error!(?err, "unhandled rejection");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new("internal_error", "unexpected server error"),
        )
    };

    Ok(response.into_response(status))
}

/// Middleware for logging HTTP requests and responses
pub fn with_request_logging<F, T>(
    filter: F,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone
where
    F: Filter<Extract = (T,), Error = Rejection> + Clone + Send + Sync + 'static,
    T: Reply,
{
    warp::any()
        .and(warp::path::full())
        .and(warp::method())
        .map(|path: warp::path::FullPath, method: warp::http::Method| {
            let start = Instant::now();
            tracing::info!(
                path = %path.as_str(),
                method = %method,
                "incoming request"
            );
            start
        })
        .and(filter)
        .map(|start: Instant, reply: T| {
            let duration = start.elapsed();
            tracing::info!(duration_ms = duration.as_millis(), "request completed");
            reply
        })
}
