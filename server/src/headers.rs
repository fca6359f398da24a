//! Response headers added on top of the static file service.
//!
//! The app is loaded in the browser straight from source through an import
//! map, so `.ts`/`.tsx`/`.jsx` modules have to be labelled as JavaScript and
//! every response carries permissive CORS headers.

use axum::{
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
        HeaderValue,
    },
    Router,
};
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";

pub const JAVASCRIPT_CONTENT_TYPE: &str = "application/javascript; charset=utf-8";

const SCRIPT_EXTENSIONS: [&str; 3] = [".ts", ".tsx", ".jsx"];

/// Content type to force for a request path, if it names a source module.
///
/// Only the path is inspected; callers pass `Uri::path()`, so query strings
/// never affect the result.
pub fn script_content_type(path: &str) -> Option<&'static str> {
    SCRIPT_EXTENSIONS
        .iter()
        .any(|ext| path.ends_with(ext))
        .then_some(JAVASCRIPT_CONTENT_TYPE)
}

/// Wrap `router` so that every response, errors included, carries the CORS headers.
pub fn with_cors_headers(router: Router) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(SetResponseHeaderLayer::overriding(
                ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static(ALLOW_ORIGIN),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static(ALLOW_METHODS),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static(ALLOW_HEADERS),
            )),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_extensions() {
        assert_eq!(script_content_type("/index.tsx"), Some(JAVASCRIPT_CONTENT_TYPE));
        assert_eq!(script_content_type("/types.ts"), Some(JAVASCRIPT_CONTENT_TYPE));
        assert_eq!(
            script_content_type("/components/NavBar.jsx"),
            Some(JAVASCRIPT_CONTENT_TYPE)
        );
    }

    #[test]
    fn test_other_extensions_untouched() {
        assert_eq!(script_content_type("/js/app.js"), None);
        assert_eq!(script_content_type("/index-ai-studio.html"), None);
        assert_eq!(script_content_type("/video.mts.mp4"), None);
        assert_eq!(script_content_type("/"), None);
    }
}
