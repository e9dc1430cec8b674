mod base;
mod reminder;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
pub use reminder::ReminderClient;
pub use reminder_scheduler_api_structs::dtos::*;
pub use reminder_scheduler_api_structs::send_reminders::APIResponse as SendRemindersResponse;
pub use reminder_scheduler_domain::ID;
pub use status::StatusClient;
use std::sync::Arc;

/// Reminder Scheduler Server SDK
///
/// The SDK contains methods for interacting with the Reminder Scheduler
/// server API. External schedulers use it to trigger dispatch runs.
#[derive(Clone)]
pub struct ReminderSchedulerSDK {
    pub reminders: ReminderClient,
    pub status: StatusClient,
}

impl ReminderSchedulerSDK {
    pub fn new(address: String) -> Self {
        let base = Arc::new(BaseClient::new(address));
        let reminders = ReminderClient::new(base.clone());
        let status = StatusClient::new(base);

        Self { reminders, status }
    }
}
