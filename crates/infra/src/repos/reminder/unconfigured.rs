use super::IReminderRepo;
use chrono::NaiveDate;
use reminder_scheduler_domain::{Reminder, ID};

/// Stands in for the store when no credentials were provided, so that
/// the server still starts and every run reports the problem.
pub struct UnconfiguredReminderRepo {
    reason: String,
}

impl UnconfiguredReminderRepo {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn error(&self) -> anyhow::Error {
        anyhow::anyhow!("Reminder store is not configured: {}", self.reason)
    }
}

#[async_trait::async_trait]
impl IReminderRepo for UnconfiguredReminderRepo {
    async fn insert(&self, _reminder: &Reminder) -> anyhow::Result<()> {
        Err(self.error())
    }

    async fn find(&self, _reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        Err(self.error())
    }

    async fn find_due(&self, _date: NaiveDate) -> anyhow::Result<Vec<Reminder>> {
        Err(self.error())
    }

    async fn mark_sent(&self, _reminder_id: &ID) -> anyhow::Result<()> {
        Err(self.error())
    }
}
