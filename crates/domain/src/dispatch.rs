use crate::{shared::entity::ID, Reminder};

/// Result of one channel attempt for one `Reminder`
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelStatus {
    Success,
    Failure(String),
}

impl ChannelStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    fn failure_reason(&self) -> Option<&str> {
        match self {
            Self::Success => None,
            Self::Failure(reason) => Some(reason),
        }
    }
}

/// What happened to a single `Reminder` during one dispatch run
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    pub reminder_id: ID,
    pub email: String,
    pub phone_number: String,
    pub email_status: ChannelStatus,
    pub sms_status: ChannelStatus,
    /// Whether the `Reminder` was marked as sent in the store
    pub committed: bool,
    /// Failure that is not tied to a channel, e.g. the commit
    /// was rejected by the store
    pub error: Option<String>,
}

impl DispatchOutcome {
    pub fn new(reminder: &Reminder, email_status: ChannelStatus, sms_status: ChannelStatus) -> Self {
        Self {
            reminder_id: reminder.id.clone(),
            email: reminder.email.clone(),
            phone_number: reminder.phone_number.clone(),
            email_status,
            sms_status,
            committed: false,
            error: None,
        }
    }

    /// Outcome for a `Reminder` whose processing broke down before the
    /// channel results could be collected
    pub fn aborted(reminder: &Reminder, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self::new(
            reminder,
            ChannelStatus::Failure(reason.clone()),
            ChannelStatus::Failure(reason),
        )
    }

    /// Both channels delivered, so the `Reminder` may be committed
    pub fn all_channels_succeeded(&self) -> bool {
        self.email_status.is_success() && self.sms_status.is_success()
    }

    pub fn is_success(&self) -> bool {
        self.committed
    }

    /// Human readable description of everything that went wrong
    pub fn error_message(&self) -> Option<String> {
        if self.email_status == self.sms_status {
            if let ChannelStatus::Failure(reason) = &self.email_status {
                return Some(reason.clone());
            }
        }

        let mut reasons = Vec::new();
        if let Some(reason) = self.email_status.failure_reason() {
            reasons.push(format!("email: {}", reason));
        }
        if let Some(reason) = self.sms_status.failure_reason() {
            reasons.push(format!("sms: {}", reason));
        }
        if let Some(reason) = &self.error {
            reasons.push(reason.clone());
        }

        if reasons.is_empty() {
            None
        } else {
            Some(reasons.join("; "))
        }
    }
}

/// All the `DispatchOutcome`s of one run, in selection order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub outcomes: Vec<DispatchOutcome>,
}

impl BatchReport {
    pub fn new(outcomes: Vec<DispatchOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn processed(&self) -> usize {
        self.outcomes.len()
    }

    pub fn committed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.committed).count()
    }

    pub fn failed(&self) -> usize {
        self.processed() - self.committed()
    }
}
