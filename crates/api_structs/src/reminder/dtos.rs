use reminder_scheduler_domain::{DispatchOutcome, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReminderResultStatus {
    Success,
    Error,
}

/// The outcome of one `Reminder` as reported to the invoker
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReminderResultDTO {
    pub id: ID,
    pub email: String,
    pub phone: String,
    pub status: ReminderResultStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReminderResultDTO {
    pub fn new(outcome: DispatchOutcome) -> Self {
        let (status, error) = if outcome.is_success() {
            (ReminderResultStatus::Success, None)
        } else {
            (ReminderResultStatus::Error, outcome.error_message())
        };

        Self {
            id: outcome.reminder_id,
            email: outcome.email,
            phone: outcome.phone_number,
            status,
            error,
        }
    }
}
