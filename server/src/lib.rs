//! Static asset server for running the app the way AI Studio does: sources
//! are fetched directly by the browser through an import map instead of a
//! bundler, so the server only has to serve files with the right headers.

pub mod config;
pub mod error;
pub mod headers;
pub mod routes;

pub use config::ServerConfig;
pub use error::ServerError;
pub use routes::app;
