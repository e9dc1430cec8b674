mod notification;

pub use notification::{
    ChannelError, INotificationChannel, ProviderReceipt, ResendEmailChannel, TwilioSmsChannel,
};
