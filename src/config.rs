//! # Search Configuration
//!
//! Settings are layered: built-in defaults, then an optional YAML/TOML file, then
//! `POSTSEARCH_*` environment variables. The loaded value is validated before use.
//!
//! ```rust,no_run
//! use postsearch_core::config::SearchConfig;
//!
//! # fn main() -> postsearch_core::Result<()> {
//! let config = SearchConfig::load(Some(std::path::Path::new("config/search.yaml")))?;
//! let limits = config.page_limits();
//! assert!(limits.default_limit <= limits.max_limit);
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, SearchError};
use crate::filters::PageLimits;
use crate::query_builder::PlaceholderStyle;
use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_LIMIT: u32 = 50;
pub const MAX_LIMIT: u32 = 100;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    /// Page size used when the caller gives none (or a non-positive one)
    pub default_limit: u32,
    /// Larger requested page sizes are clamped to this
    pub max_limit: u32,
    pub placeholder_style: PlaceholderStyle,
    /// Deadline attached to every search call; `None` leaves it to the caller
    pub statement_timeout_ms: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            database_url: "postgresql://localhost/postsearch_development".to_string(),
            max_connections: 10,
            acquire_timeout_seconds: 30,
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
            placeholder_style: PlaceholderStyle::Dollar,
            statement_timeout_ms: None,
        }
    }
}

impl SearchConfig {
    /// Defaults, overlaid by `path` (if given and present) and `POSTSEARCH_*` variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }

        let config: Self = builder
            .add_source(Environment::with_prefix("POSTSEARCH").try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Defaults overlaid by `DATABASE_URL` and the `POSTSEARCH_*` limit variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(db_url) = std::env::var("DATABASE_URL") {
            config.database_url = db_url;
        }

        if let Ok(default_limit) = std::env::var("POSTSEARCH_DEFAULT_LIMIT") {
            config.default_limit = default_limit.parse().map_err(|e| {
                SearchError::configuration(format!("Invalid default_limit: {e}"))
            })?;
        }

        if let Ok(max_limit) = std::env::var("POSTSEARCH_MAX_LIMIT") {
            config.max_limit = max_limit
                .parse()
                .map_err(|e| SearchError::configuration(format!("Invalid max_limit: {e}")))?;
        }

        if let Ok(timeout) = std::env::var("POSTSEARCH_STATEMENT_TIMEOUT_MS") {
            config.statement_timeout_ms = Some(timeout.parse().map_err(|e| {
                SearchError::configuration(format!("Invalid statement_timeout_ms: {e}"))
            })?);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_limit == 0 {
            return Err(SearchError::configuration("default_limit must be positive"));
        }
        if self.max_limit < self.default_limit {
            return Err(SearchError::configuration(format!(
                "max_limit ({}) must be at least default_limit ({})",
                self.max_limit, self.default_limit
            )));
        }
        if self.max_connections == 0 {
            return Err(SearchError::configuration("max_connections must be positive"));
        }
        Ok(())
    }

    pub fn page_limits(&self) -> PageLimits {
        PageLimits {
            default_limit: self.default_limit,
            max_limit: self.max_limit,
        }
    }

    pub fn statement_timeout(&self) -> Option<Duration> {
        self.statement_timeout_ms.map(Duration::from_millis)
    }
}
