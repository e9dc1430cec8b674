mod dispatch;
mod notification;
mod reminder;
mod shared;

pub use dispatch::{BatchReport, ChannelStatus, DispatchOutcome};
pub use notification::{EmailMessage, SmsMessage};
pub use reminder::Reminder;
pub use shared::entity::{Entity, InvalidIDError, ID};
