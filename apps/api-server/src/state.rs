//! Application state - shared across all handlers.

use std::sync::Arc;

use postboard_core::PostService;
use postboard_core::domain::FeedConfig;
use postboard_core::ports::PostRepository;
use postboard_infra::InMemoryPostRepository;

#[cfg(feature = "postgres")]
use migration::{Migrator, MigratorTrait};
#[cfg(feature = "postgres")]
use postboard_infra::PostgresPostRepository;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub feed: FeedConfig,
    /// Name of the storage backend, reported by the health check.
    pub storage: &'static str,
}

impl AppState {
    fn with_repo(repo: Arc<dyn PostRepository>, storage: &'static str, feed: FeedConfig) -> Self {
        Self {
            posts: PostService::new(repo),
            feed,
            storage,
        }
    }

    /// State backed by the in-memory repository.
    pub fn in_memory(feed: FeedConfig) -> Self {
        Self::with_repo(Arc::new(InMemoryPostRepository::new()), "memory", feed)
    }

    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        {
            if let Some(db_config) = &config.database {
                match postboard_infra::database::connect(db_config).await {
                    Ok(conn) => {
                        if config.run_migrations {
                            match Migrator::up(&conn, None).await {
                                Ok(()) => tracing::info!("Migrations applied"),
                                Err(e) => tracing::error!("Failed to apply migrations: {}", e),
                            }
                        }
                        tracing::info!("Application state initialized (postgres)");
                        return Self::with_repo(
                            Arc::new(PostgresPostRepository::new(conn)),
                            "postgres",
                            config.feed.clone(),
                        );
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "postgres"))]
        {
            if config.database.is_some() {
                tracing::warn!("Built without postgres feature - DATABASE_URL is ignored");
            }
        }

        tracing::info!("Application state initialized (memory)");
        Self::in_memory(config.feed.clone())
    }
}
