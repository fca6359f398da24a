use std::{net::SocketAddr, path::PathBuf};

use thiserror::Error;

/// Startup and serving errors
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Asset root {0} is not a directory")]
    InvalidRoot(PathBuf),

    #[error("Index file {0:?} cannot be used as a URI path")]
    InvalidIndexFile(String),

    #[error("Invalid listen address: {0}")]
    InvalidAddress(String),

    #[error("Failed to bind {addr}: {source}. Try a different PORT.")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}
