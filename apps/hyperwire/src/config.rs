//! # Application Configuration
//!
//! Optional TOML file with network and logging settings.
//!
//! ```toml
//! [network]
//! max_dispatch_steps = 50000
//!
//! [log]
//! filter = "hyperwire=debug,hyperwire_core=trace"
//! ```
//!
//! Every section and key is optional; missing values fall back to the
//! defaults below.

use crate::files::read_text;
use hyperwire_core::{HyperwireError, NetworkConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Log filter used when neither `RUST_LOG` nor the config file sets one.
pub const DEFAULT_LOG_FILTER: &str = "hyperwire=info,hyperwire_core=warn";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Settings passed to every `Network` the app builds.
    pub network: NetworkConfig,
    /// Logging settings.
    pub log: LogConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence.
    pub filter: Option<String>,
}

impl AppConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, HyperwireError> {
        let config: Self =
            toml::from_str(text).map_err(|e| HyperwireError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration at `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, HyperwireError> {
        match path {
            Some(path) => Self::from_toml(&read_text(path)?),
            None => Ok(Self::default()),
        }
    }

    /// The log filter directive to use when `RUST_LOG` is unset.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    fn validate(&self) -> Result<(), HyperwireError> {
        if self.network.max_dispatch_steps == 0 {
            return Err(HyperwireError::Config(
                "network.max_dispatch_steps must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
