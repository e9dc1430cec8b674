mod inmemory;
mod postgres;
mod unconfigured;

pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;
pub use unconfigured::UnconfiguredReminderRepo;

use chrono::NaiveDate;
use reminder_scheduler_domain::{Reminder, ID};

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>>;
    /// All `Reminder`s with `reminder_date == date` that are not sent yet.
    /// The order is stable: oldest `created_at` first, ties broken by id.
    async fn find_due(&self, date: NaiveDate) -> anyhow::Result<Vec<Reminder>>;
    /// Sets `is_sent` for the given `Reminder` and nothing else. Marking an
    /// already sent or unknown `Reminder` is not an error.
    async fn mark_sent(&self, reminder_id: &ID) -> anyhow::Result<()>;
}
