//! Common utilities for integration tests

use std::fs;
use std::path::Path;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, Response},
    Router,
};
use tempfile::TempDir;
use tower::ServiceExt;

use ai_studio_server::{app, ServerConfig};

pub const INDEX_BODY: &str = "<!doctype html><title>AI Studio</title><script type=\"importmap\"></script>";
pub const TSX_BODY: &str = "export default function App() { return null; }";
pub const TS_BODY: &str = "export type Grade = 'A' | 'B';";
pub const JSX_BODY: &str = "export const NavBar = () => null;";

fn write(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, body).unwrap();
}

/// Asset tree resembling the app checkout, plus a router serving it
pub fn create_test_app() -> (TempDir, Router) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write(root, "index-ai-studio.html", INDEX_BODY);
    write(root, "index.tsx", TSX_BODY);
    write(root, "types.ts", TS_BODY);
    write(root, "components/NavBar.jsx", JSX_BODY);
    write(root, "js/app.js", "console.log('app');");
    write(root, "docs/index.html", "<p>docs</p>");

    let config = ServerConfig {
        root: root.to_path_buf(),
        ..ServerConfig::default()
    };
    (dir, app(&config))
}

pub async fn send(app: &Router, method: Method, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri).await
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
