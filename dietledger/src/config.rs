//! Application configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable
//! overrides. The configuration file path defaults to `config.yaml` but can
//! be specified via `-f` flag or the `DIETLEDGER_CONFIG` environment
//! variable.
//!
//! ## Loading Priority
//!
//! Sources are merged in the following order (later sources override earlier
//! ones):
//!
//! 1. **YAML config file** - Base configuration (default: `config.yaml`)
//! 2. **Environment variables** - Variables prefixed with `DIETLEDGER_`
//! 3. **DATABASE_URL** - Special case: overrides `database.url` if set
//!
//! For nested config values, use double underscores in environment variables:
//! `DIETLEDGER_SESSION__COOKIE_NAME=sid` sets `session.cookie_name`.
//!
//! ## Configuration Structure
//!
//! - **Server**: `host`, `port`
//! - **Database**: `database.url`, `database.max_connections`
//! - **Session**: `session.cookie_name`, `session.lifetime` (humantime form,
//!   e.g. `7d`), `session.cookie_secure`, `session.cookie_same_site`

use clap::Parser;
use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Simple CLI args - just for specifying config file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "DIETLEDGER_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without starting the server.
    #[arg(long)]
    pub validate: bool,
}

/// Main application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server host to bind to (e.g., "0.0.0.0" for all interfaces)
    pub host: String,
    /// HTTP server port to bind to
    pub port: u16,
    /// Database connection settings
    pub database: DatabaseConfig,
    /// Session cookie contract
    pub session: SessionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3333,
            database: DatabaseConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,
    /// Connection pool size
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/dietledger".to_string(),
            max_connections: 8,
        }
    }
}

/// The session cookie contract: name, lifetime, and scope.
///
/// The cookie is issued only on the minting response (first bootstrap write
/// or registration) and never re-issued afterwards.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Cookie name carried by every request
    pub cookie_name: String,
    /// Cookie lifetime (Max-Age), humantime form
    #[serde(with = "humantime_serde")]
    pub lifetime: Duration,
    /// Emit the Secure attribute
    pub cookie_secure: bool,
    /// SameSite attribute value
    pub cookie_same_site: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "sessionId".to_string(),
            lifetime: Duration::from_secs(60 * 60 * 24 * 7),
            cookie_secure: false,
            cookie_same_site: "Lax".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment.
    pub fn load(args: &Args) -> anyhow::Result<Self> {
        let figment = Figment::new()
            .merge(Yaml::file(&args.config))
            .merge(Env::prefixed("DIETLEDGER_").split("__"));

        let mut config: Config = figment.extract()?;

        // DATABASE_URL wins over everything else, matching deployment tooling
        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database.url = url;
        }

        Ok(config)
    }
}
