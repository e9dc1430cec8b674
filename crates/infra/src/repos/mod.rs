mod reminder;
mod shared;

pub use reminder::IReminderRepo;
use reminder::{InMemoryReminderRepo, PostgresReminderRepo, UnconfiguredReminderRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub reminders: Arc<dyn IReminderRepo>,
}

impl Repos {
    /// Connections are opened lazily, so an unreachable database fails
    /// the dispatch runs instead of the server start.
    pub fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("Creating postgres connection pool for reminders");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_lazy(connection_string)?;

        Ok(Self {
            reminders: Arc::new(PostgresReminderRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            reminders: Arc::new(InMemoryReminderRepo::new()),
        }
    }

    pub fn create_unconfigured(reason: impl Into<String>) -> Self {
        Self {
            reminders: Arc::new(UnconfiguredReminderRepo::new(reason)),
        }
    }
}
