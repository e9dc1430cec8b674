use crate::{APIResponse, BaseClient};
use reminder_scheduler_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Triggers a dispatch run for the `Reminder`s that are due today
    pub async fn send_due(&self) -> APIResponse<send_reminders::APIResponse> {
        self.base
            .post("send-reminders".into(), StatusCode::OK)
            .await
    }
}
