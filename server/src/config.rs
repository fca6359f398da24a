// Configuration for the asset server

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::http::uri::PathAndQuery;

use crate::error::ServerError;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_INDEX_FILE: &str = "index-ai-studio.html";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory the assets are served from
    pub root: PathBuf,
    /// File answered for `/` and `/index.html`
    pub index_file: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            root: PathBuf::from("."),
            index_file: DEFAULT_INDEX_FILE.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = std::env::var("HOST")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.host);

        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.port);

        let root = std::env::var("ASSET_ROOT")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.root);

        let index_file = std::env::var("INDEX_FILE")
            .ok()
            .map(|v| v.trim().trim_start_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.index_file);

        Self {
            host,
            port,
            root,
            index_file,
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ServerError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ServerError::InvalidAddress(addr))
    }

    /// URI path the index requests are rewritten to.
    pub fn index_path(&self) -> String {
        format!("/{}", self.index_file.trim_start_matches('/'))
    }

    /// The index name must form a bare URI path: no spaces, query or fragment.
    pub fn check_index_file(&self) -> Result<(), ServerError> {
        let path = self.index_path();
        let valid = !path.contains(['?', '#'])
            && path.parse::<PathAndQuery>().is_ok_and(|pq| pq.as_str() == path);
        if valid {
            Ok(())
        } else {
            Err(ServerError::InvalidIndexFile(self.index_file.clone()))
        }
    }

    /// Fail early when the asset root is missing.
    pub fn check_root(&self) -> Result<(), ServerError> {
        if self.root.is_dir() {
            Ok(())
        } else {
            Err(ServerError::InvalidRoot(self.root.clone()))
        }
    }
}
