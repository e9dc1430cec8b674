mod email;
mod sms;

pub use email::ResendEmailChannel;
pub use sms::TwilioSmsChannel;

use reqwest::Response;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChannelError {
    /// A credential needed by the provider is missing
    #[error("{0}")]
    Configuration(String),
    /// The provider could not be reached or rejected the message
    #[error("{0}")]
    Delivery(String),
}

/// Raw body the provider answered a successful send with
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderReceipt(pub String);

/// A way of delivering a notification to a recipient
#[async_trait::async_trait]
pub trait INotificationChannel: Send + Sync {
    type Message: Send + Sync;

    /// Short name used in logs
    fn name(&self) -> &'static str;

    async fn send(&self, message: &Self::Message) -> Result<ProviderReceipt, ChannelError>;
}

fn delivery_error(kind: &str, reason: impl std::fmt::Display) -> ChannelError {
    ChannelError::Delivery(format!("Failed to send {}: {}", kind, reason))
}

/// Turns the provider response into a receipt, using the response body
/// as the error detail for non 2xx responses.
async fn read_provider_response(
    res: Result<Response, reqwest::Error>,
    kind: &str,
) -> Result<ProviderReceipt, ChannelError> {
    let res = res.map_err(|e| delivery_error(kind, e))?;
    let status = res.status();
    let body = res.text().await.map_err(|e| delivery_error(kind, e))?;

    if status.is_success() {
        Ok(ProviderReceipt(body))
    } else if body.is_empty() {
        Err(delivery_error(kind, status))
    } else {
        Err(delivery_error(kind, body))
    }
}
