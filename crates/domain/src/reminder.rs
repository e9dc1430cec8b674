use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, NaiveDate, Utc};

/// A `Reminder` is a user authored message that should be delivered to
/// its owner by email and SMS on `reminder_date`.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    /// Name used to greet the recipient in every notification
    pub full_name: String,
    /// Recipient of the email notification
    pub email: String,
    /// Recipient of the SMS notification
    pub phone_number: String,
    /// The text the owner wants to be reminded about
    pub custom_message: String,
    /// The calendar date on which this `Reminder` is due
    pub reminder_date: NaiveDate,
    /// Set once both channels have delivered this `Reminder`.
    /// It is never reset, so a sent `Reminder` is never selected again.
    pub is_sent: bool,
    pub created_at: DateTime<Utc>,
}

impl Reminder {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        phone_number: impl Into<String>,
        custom_message: impl Into<String>,
        reminder_date: NaiveDate,
    ) -> Self {
        Self {
            id: Default::default(),
            full_name: full_name.into(),
            email: email.into(),
            phone_number: phone_number.into(),
            custom_message: custom_message.into(),
            reminder_date,
            is_sent: false,
            created_at: Utc::now(),
        }
    }

    /// Whether this `Reminder` should be dispatched on the given date
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.reminder_date == today && !self.is_sent
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}
