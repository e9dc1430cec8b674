use super::{read_provider_response, ChannelError, INotificationChannel, ProviderReceipt};
use crate::config::EmailProviderConfig;
use reminder_scheduler_domain::EmailMessage;
use reqwest::Client;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
    html: &'a str,
}

/// Delivers emails through the Resend REST api
pub struct ResendEmailChannel {
    client: Client,
    config: EmailProviderConfig,
}

impl ResendEmailChannel {
    pub fn new(client: Client, config: EmailProviderConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait::async_trait]
impl INotificationChannel for ResendEmailChannel {
    type Message = EmailMessage;

    fn name(&self) -> &'static str {
        "email"
    }

    async fn send(&self, message: &EmailMessage) -> Result<ProviderReceipt, ChannelError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| ChannelError::Configuration("RESEND_API_KEY not configured".into()))?;

        let url = format!("{}/emails", self.config.base_url.trim_end_matches('/'));
        let body = SendEmailRequest {
            from: &self.config.from,
            to: &message.recipient,
            subject: &message.subject,
            text: &message.plain_body,
            html: &message.html_body,
        };

        let res = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await;

        read_provider_response(res, "email").await
    }
}
