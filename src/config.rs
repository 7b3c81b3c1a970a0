//! Service configuration sourced from command-line flags and environment.

use clap::Parser;
use std::net::SocketAddr;
use thiserror::Error;

/// Default number of tasks returned per listing page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Default upper bound on a requested page size.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Runtime configuration for the task service.
#[derive(Debug, Clone, Parser)]
#[command(name = "taskhub", version, about = "Task-tracking record service")]
pub struct ServiceConfig {
    /// Socket address the HTTP server listens on.
    #[arg(long, env = "TASKHUB_BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind_addr: SocketAddr,

    /// `PostgreSQL` connection URL; the in-memory store is used when unset.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum number of pooled database connections.
    #[arg(long, env = "TASKHUB_DB_POOL_SIZE", default_value_t = 8)]
    pub db_pool_size: u32,

    /// Page size used when a listing request does not specify one.
    #[arg(long, env = "TASKHUB_DEFAULT_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    pub default_page_size: u32,

    /// Largest page size a listing request may obtain.
    #[arg(long, env = "TASKHUB_MAX_PAGE_SIZE", default_value_t = MAX_PAGE_SIZE)]
    pub max_page_size: u32,

    /// Tracing filter directive, e.g. `info` or `taskhub=debug,tower_http=info`.
    #[arg(long, env = "TASKHUB_LOG", default_value = "info")]
    pub log_level: String,
}

/// Errors raised for inconsistent configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A page size setting is zero.
    #[error("{0} must be at least 1")]
    ZeroPageSize(&'static str),

    /// The default page size exceeds the maximum.
    #[error("default page size {default} exceeds maximum page size {max}")]
    DefaultExceedsMax {
        /// Configured default.
        default: u32,
        /// Configured maximum.
        max: u32,
    },

    /// The connection pool would hold no connections.
    #[error("database pool size must be at least 1")]
    ZeroPoolSize,
}

impl ServiceConfig {
    /// Checks that the settings are mutually consistent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] describing the first inconsistency found.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.default_page_size == 0 {
            return Err(ConfigError::ZeroPageSize("default page size"));
        }
        if self.max_page_size == 0 {
            return Err(ConfigError::ZeroPageSize("maximum page size"));
        }
        if self.default_page_size > self.max_page_size {
            return Err(ConfigError::DefaultExceedsMax {
                default: self.default_page_size,
                max: self.max_page_size,
            });
        }
        if self.db_pool_size == 0 {
            return Err(ConfigError::ZeroPoolSize);
        }
        Ok(())
    }

    /// Returns the paging limits for the HTTP listing endpoint.
    #[must_use]
    pub const fn listing_limits(&self) -> ListingLimits {
        ListingLimits {
            default_page_size: self.default_page_size,
            max_page_size: self.max_page_size,
        }
    }
}

/// Paging limits applied to listing requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingLimits {
    /// Size used when the request omits one.
    pub default_page_size: u32,
    /// Requested sizes above this are capped to it.
    pub max_page_size: u32,
}

impl ListingLimits {
    /// Resolves the effective page size for a request.
    ///
    /// Zero is passed through so that page construction can reject it.
    #[must_use]
    pub fn effective_size(self, requested: Option<u32>) -> u32 {
        requested.map_or(self.default_page_size, |size| size.min(self.max_page_size))
    }
}

impl Default for ListingLimits {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}
