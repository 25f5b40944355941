//! Application configuration loaded from environment variables.

use std::env;

use postboard_core::domain::{FeedConfig, FeedOrdering};
use postboard_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    /// Apply pending migrations before serving.
    pub run_migrations: bool,
    pub feed: FeedConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parse_var("DB_MAX_CONNECTIONS").unwrap_or(100),
            min_connections: parse_var("DB_MIN_CONNECTIONS").unwrap_or(10),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(8080),
            database,
            run_migrations: env::var("RUN_MIGRATIONS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            feed: Self::feed_from_env(),
        }
    }

    /// Feed settings from FEED_PAGE_SIZE, FEED_MAX_PAGE_SIZE and FEED_ORDERING.
    /// Example: FEED_ORDERING=-data_criacao
    fn feed_from_env() -> FeedConfig {
        let defaults = FeedConfig::default();

        let ordering = match env::var("FEED_ORDERING") {
            Ok(raw) => raw.parse::<FeedOrdering>().unwrap_or_else(|e| {
                tracing::warn!("Ignoring FEED_ORDERING: {}", e);
                defaults.ordering
            }),
            Err(_) => defaults.ordering,
        };

        FeedConfig {
            default_page_size: parse_var("FEED_PAGE_SIZE").unwrap_or(defaults.default_page_size),
            max_page_size: parse_var("FEED_MAX_PAGE_SIZE").unwrap_or(defaults.max_page_size),
            ordering,
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}
