use super::{read_provider_response, ChannelError, INotificationChannel, ProviderReceipt};
use crate::config::SmsProviderConfig;
use reminder_scheduler_domain::SmsMessage;
use reqwest::Client;

/// Delivers text messages through the Twilio REST api
pub struct TwilioSmsChannel {
    client: Client,
    config: SmsProviderConfig,
}

impl TwilioSmsChannel {
    pub fn new(client: Client, config: SmsProviderConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait::async_trait]
impl INotificationChannel for TwilioSmsChannel {
    type Message = SmsMessage;

    fn name(&self) -> &'static str {
        "sms"
    }

    async fn send(&self, message: &SmsMessage) -> Result<ProviderReceipt, ChannelError> {
        let creds = self.config.credentials().ok_or_else(|| {
            ChannelError::Configuration("Twilio credentials not configured".into())
        })?;

        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.base_url.trim_end_matches('/'),
            creds.account_sid
        );
        let form = [
            ("From", creds.from_number),
            ("To", message.recipient.as_str()),
            ("Body", message.body.as_str()),
        ];

        let res = self
            .client
            .post(&url)
            .basic_auth(creds.account_sid, Some(creds.auth_token))
            .form(&form)
            .send()
            .await;

        read_provider_response(res, "SMS").await
    }
}
