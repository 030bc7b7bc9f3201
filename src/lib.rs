//! CMS bridge library.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod render;

pub use config::schema::BridgeConfig;
pub use error::{BridgeError, BridgeResult};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
