//! Pagination configuration
//!
//! Defaults can be overridden by deserializing (e.g. from a config file
//! section) or from environment variables:
//!
//! | Variable                     | Default |
//! |------------------------------|---------|
//! | `QUERY_HELPERS_DEFAULT_PAGE` | 1       |
//! | `QUERY_HELPERS_DEFAULT_SIZE` | 10      |
//! | `QUERY_HELPERS_MIN_SIZE`     | 3       |
//! | `QUERY_HELPERS_MAX_SIZE`     | 100     |

use anyhow::{Context, Result};
use serde::Deserialize;
use validator::Validate;

use super::constants::{
    DEFAULT_PAGE, DEFAULT_PAGE_SIZE, ENV_DEFAULT_PAGE, ENV_DEFAULT_SIZE, ENV_MAX_SIZE,
    ENV_MIN_SIZE, MAX_PAGE_SIZE, MIN_PAGE_SIZE,
};

/// Page defaults and the page size bounds accepted from requests
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(default)]
pub struct PaginationConfig {
    #[validate(range(min = 1, message = "default_page must be >= 1"))]
    pub default_page: u32,
    #[validate(range(min = 1, message = "default_size must be >= 1"))]
    pub default_size: u32,
    #[validate(range(min = 1, message = "min_size must be >= 1"))]
    pub min_size: u32,
    #[validate(range(min = 1, message = "max_size must be >= 1"))]
    pub max_size: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: DEFAULT_PAGE,
            default_size: DEFAULT_PAGE_SIZE,
            min_size: MIN_PAGE_SIZE,
            max_size: MAX_PAGE_SIZE,
        }
    }
}

impl PaginationConfig {
    /// Defaults overlaid with `QUERY_HELPERS_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`, keyed by variable name
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        overlay(&lookup, ENV_DEFAULT_PAGE, &mut config.default_page)?;
        overlay(&lookup, ENV_DEFAULT_SIZE, &mut config.default_size)?;
        overlay(&lookup, ENV_MIN_SIZE, &mut config.min_size)?;
        overlay(&lookup, ENV_MAX_SIZE, &mut config.max_size)?;
        config.check()?;
        tracing::debug!(?config, "Loaded pagination config");
        Ok(config)
    }

    /// Validate the configuration for consistency
    pub fn check(&self) -> Result<()> {
        self.validate()
            .context("Configuration error: invalid pagination settings")?;

        if self.min_size > self.max_size {
            anyhow::bail!(
                "Configuration error: min_size ({}) must not exceed max_size ({})",
                self.min_size,
                self.max_size
            );
        }

        if !(self.min_size..=self.max_size).contains(&self.default_size) {
            anyhow::bail!(
                "Configuration error: default_size ({}) must be between {} and {}",
                self.default_size,
                self.min_size,
                self.max_size
            );
        }

        Ok(())
    }

    /// True when `size` is within the accepted bounds
    pub fn accepts_size(&self, size: u32) -> bool {
        (self.min_size..=self.max_size).contains(&size)
    }
}

fn overlay(lookup: &impl Fn(&str) -> Option<String>, key: &str, target: &mut u32) -> Result<()> {
    if let Some(raw) = lookup(key) {
        *target = raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for {}: {:?}", key, raw))?;
    }
    Ok(())
}
