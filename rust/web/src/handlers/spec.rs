use std::convert::Infallible;
use std::sync::Arc;

use warp::reply::{self, Response};
use warp::{Filter, Rejection, Reply};

use crate::errors::IntoErrorResponse;
use crate::spec::ApiSpec;

/// GET /dealer/openapi.yaml
///
/// Serves the API description as YAML. Exempt from the JSON negotiation
/// gate: the path names the format.
pub fn openapi_yaml(
    spec: Arc<ApiSpec>,
) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    warp::path!("dealer" / "openapi.yaml")
        .and(warp::get())
        .and(with_spec(spec))
        .and_then(|spec: Arc<ApiSpec>| async move {
            Ok::<_, Infallible>(render(spec.to_yaml(), "application/yaml"))
        })
}

/// GET /dealer/openapi.json
///
/// Serves the API description as JSON. Also exempt from the gate.
pub fn openapi_json(
    spec: Arc<ApiSpec>,
) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    warp::path!("dealer" / "openapi.json")
        .and(warp::get())
        .and(with_spec(spec))
        .and_then(|spec: Arc<ApiSpec>| async move {
            Ok::<_, Infallible>(render(spec.to_json(), "application/json"))
        })
}

fn with_spec(
    spec: Arc<ApiSpec>,
) -> impl Filter<Extract = (Arc<ApiSpec>,), Error = Infallible> + Clone {
    warp::any().map(move || Arc::clone(&spec))
}

fn render(body: Result<String, crate::spec::SpecError>, content_type: &'static str) -> Response {
    match body {
        Ok(body) => reply::with_header(body, "content-type", content_type).into_response(),
        Err(err) => err.into_http_response(),
    }
}
