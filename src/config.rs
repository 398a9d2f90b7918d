//! Configuration management using Figment
//!
//! Configuration is loaded from multiple sources with the following
//! precedence (highest to lowest):
//! 1. Environment variables (prefix: MARQUEE_, nested keys joined with `__`)
//! 2. Current working directory: ./marquee.toml
//! 3. Default values

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service configuration
    pub service: ServiceConfig,

    /// JWT configuration
    pub jwt: JwtConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name
    #[serde(default = "default_name")]
    pub name: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// JWT configuration
///
/// HS256 only; the secret doubles as signing and verification key. Token
/// issuance beyond this shared-secret contract is handled by an external
/// identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Shared HMAC secret
    #[serde(default = "default_jwt_secret")]
    pub secret: String,

    /// Issuer to validate, if any
    #[serde(default)]
    pub issuer: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                name: default_name(),
                port: default_port(),
                log_level: default_log_level(),
                timeout_secs: default_timeout(),
            },
            jwt: JwtConfig {
                secret: default_jwt_secret(),
                issuer: None,
            },
        }
    }
}

impl Config {
    /// Load configuration from defaults, `./marquee.toml`, and environment
    pub fn load() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("marquee.toml"))
            .merge(Env::prefixed("MARQUEE_").split("__"))
            .extract()
    }
}

fn default_name() -> String {
    "marquee".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_jwt_secret() -> String {
    // Development fallback; override in deployment.
    "insecure-dev-secret".to_string()
}
