//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, environment overlay)
//!     → validation.rs (semantic checks)
//!     → BridgeConfig (validated, immutable)
//!     → shared via Arc to handlers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - The API token comes from the environment, never from the client

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::BlogConfig;
pub use schema::BrandConfig;
pub use schema::BridgeConfig;
pub use schema::CorsConfig;
pub use schema::UpstreamConfig;
