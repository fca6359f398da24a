use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::CONTENT_TYPE, uri::PathAndQuery, HeaderValue, Method, StatusCode, Uri},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::warn;

use crate::config::ServerConfig;
use crate::headers::{script_content_type, with_cors_headers};

/// Build the asset server: static files from `config.root`, index rewrite,
/// module MIME overrides and CORS headers on every response.
pub fn app(config: &ServerConfig) -> Router {
    let files = ServeDir::new(&config.root);
    let index: Arc<str> = Arc::from(config.index_path());

    let router = Router::new()
        .fallback_service(files)
        .layer(middleware::from_fn(override_script_mime))
        .layer(middleware::from_fn_with_state(index, rewrite_index))
        .layer(middleware::from_fn(answer_preflight))
        .layer(middleware::from_fn(add_request_id))
        .layer(TraceLayer::new_for_http());

    with_cors_headers(router)
}

fn is_index_path(path: &str) -> bool {
    path == "/" || path == "/index.html"
}

/// Serve the configured index file for `/` and `/index.html`, in place.
pub async fn rewrite_index(
    State(index): State<Arc<str>>,
    mut request: Request,
    next: Next,
) -> Response {
    if is_index_path(request.uri().path()) {
        let target = match request.uri().query() {
            Some(query) => format!("{index}?{query}"),
            None => index.to_string(),
        };
        match rewrite_uri(request.uri(), &target) {
            Some(uri) => *request.uri_mut() = uri,
            None => warn!("Could not rewrite {} to {}", request.uri(), target),
        }
    }
    next.run(request).await
}

fn rewrite_uri(uri: &Uri, path_and_query: &str) -> Option<Uri> {
    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query.parse::<PathAndQuery>().ok()?);
    Uri::from_parts(parts).ok()
}

/// Label `.ts`/`.tsx`/`.jsx` modules as JavaScript so browsers execute them.
pub async fn override_script_mime(request: Request, next: Next) -> Response {
    let content_type = script_content_type(request.uri().path());
    let mut response = next.run(request).await;

    if let Some(content_type) = content_type {
        let status = response.status();
        if status.is_success() || status == StatusCode::NOT_MODIFIED {
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        }
    }
    response
}

/// Preflight requests are answered directly; the CORS headers come from the outer layer.
pub async fn answer_preflight(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::NO_CONTENT.into_response();
    }
    next.run(request).await
}

// Request ID middleware for tracing
async fn add_request_id(mut request: Request, next: Next) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();
    let Ok(value) = HeaderValue::from_str(&request_id) else {
        return next.run(request).await;
    };
    request.headers_mut().insert("x-request-id", value.clone());
    let mut response = next.run(request).await;
    response.headers_mut().insert("x-request-id", value);
    response
}
