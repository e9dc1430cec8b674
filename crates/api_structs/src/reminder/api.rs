use crate::dtos::ReminderResultDTO;
use reminder_scheduler_domain::BatchReport;
use serde::{Deserialize, Serialize};

/// Envelope returned when a run could not be performed at all
#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

pub mod send_reminders {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        pub success: bool,
        pub processed: usize,
        pub results: Vec<ReminderResultDTO>,
    }

    impl APIResponse {
        pub fn new(report: BatchReport) -> Self {
            let processed = report.processed();
            Self {
                success: true,
                processed,
                results: report
                    .outcomes
                    .into_iter()
                    .map(ReminderResultDTO::new)
                    .collect(),
            }
        }
    }
}
