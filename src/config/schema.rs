//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the bridge.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the CMS bridge.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BridgeConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream CMS API settings.
    pub upstream: UpstreamConfig,

    /// Inbound request timeouts.
    pub timeouts: TimeoutConfig,

    /// Cross-origin resource sharing.
    pub cors: CorsConfig,

    /// Blog listing defaults.
    pub blog: BlogConfig,

    /// Branding used by the HTML views.
    pub brand: BrandConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Upstream CMS API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Scheme and host of the CMS API, without a path.
    pub base_url: String,

    /// Versioned API prefix prepended to every upstream path.
    pub api_prefix: String,

    /// API token. Prefer `token_env`; an inline token is only for local use.
    #[serde(skip_serializing)]
    pub token: Option<String>,

    /// Environment variable that holds the API token.
    pub token_env: String,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Read timeout for upstream responses in seconds.
    pub read_timeout_secs: u64,

    /// Honor `HTTP_PROXY`/`HTTPS_PROXY` for upstream calls.
    pub system_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.buttercms.com".to_string(),
            api_prefix: "/v2".to_string(),
            token: None,
            token_env: "BUTTER_API_TOKEN".to_string(),
            connect_timeout_secs: 20,
            read_timeout_secs: 30,
            system_proxy: true,
        }
    }
}

impl UpstreamConfig {
    /// The configured token, trimmed. Blank tokens count as missing.
    pub fn api_token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total time allowed to serve one inbound request, in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 60 }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins; `"*"` allows any origin.
    pub allowed_origins: Vec<String>,

    /// Allowed methods; `"*"` allows any method.
    pub allowed_methods: Vec<String>,

    /// Allowed request headers; `"*"` allows any header.
    pub allowed_headers: Vec<String>,

    /// Whether browsers may send credentials.
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            allowed_methods: vec!["*".to_string()],
            allowed_headers: vec!["*".to_string()],
            allow_credentials: true,
        }
    }
}

/// Blog listing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BlogConfig {
    /// Posts per page when the client does not ask for a size.
    pub default_page_size: u32,

    /// Largest page size forwarded upstream.
    pub max_page_size: u32,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            default_page_size: 9,
            max_page_size: 50,
        }
    }
}

/// Branding rendered into the HTML shell.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BrandConfig {
    pub name: String,
    pub emoji: String,
    pub tagline: String,

    /// Value of the `<html lang>` attribute.
    pub lang: String,

    /// Appended to the brand name in the home page title.
    pub home_title_suffix: String,

    /// Appended to the brand name in the blog index title.
    pub blog_title_suffix: String,

    pub copyright_year: u16,
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            name: "Nannyfy".to_string(),
            emoji: "🧸".to_string(),
            tagline: "Tu plataforma de cuidado infantil de confianza".to_string(),
            lang: "es".to_string(),
            home_title_suffix: "Cuidado Infantil de Confianza".to_string(),
            blog_title_suffix: "Blog de Crianza y Cuidado Infantil".to_string(),
            copyright_year: 2025,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_upstream_api() {
        let config = BridgeConfig::default();
        assert_eq!(config.upstream.base_url, "https://api.buttercms.com");
        assert_eq!(config.upstream.api_prefix, "/v2");
        assert_eq!(config.upstream.connect_timeout_secs, 20);
        assert_eq!(config.upstream.read_timeout_secs, 30);
        assert_eq!(config.blog.default_page_size, 9);
        assert_eq!(config.blog.max_page_size, 50);
    }

    #[test]
    fn test_blank_token_is_missing() {
        let mut upstream = UpstreamConfig::default();
        assert_eq!(upstream.api_token(), None);

        upstream.token = Some("   ".into());
        assert_eq!(upstream.api_token(), None);

        upstream.token = Some("  abc123 \n".into());
        assert_eq!(upstream.api_token(), Some("abc123"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: BridgeConfig = toml::from_str(
            r#"
            [upstream]
            api_prefix = "/v3"

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.upstream.api_prefix, "/v3");
        assert_eq!(config.upstream.base_url, "https://api.buttercms.com");
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.listener.bind_address, "0.0.0.0:8000");
    }
}
