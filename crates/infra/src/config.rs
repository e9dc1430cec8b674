use std::time::Duration;
use tracing::{info, warn};

const DEFAULT_PORT: usize = 5000;
const DEFAULT_DISPATCH_CONCURRENCY: usize = 4;
const DEFAULT_CHANNEL_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Postgres connection string. When it is missing every dispatch
    /// run fails when selecting the due `Reminder`s.
    pub database_url: Option<String>,
    /// Maximum number of `Reminder`s that are dispatched at the same time
    pub dispatch_concurrency: usize,
    /// How long a single request to a notification provider may take
    /// before it is treated as a failed delivery
    pub channel_timeout: Duration,
    pub email: EmailProviderConfig,
    pub sms: SmsProviderConfig,
}

#[derive(Debug, Clone)]
pub struct EmailProviderConfig {
    pub api_key: Option<String>,
    pub from: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct SmsProviderConfig {
    pub account_sid: Option<String>,
    pub auth_token: Option<String>,
    pub from_number: Option<String>,
    pub base_url: String,
}

/// Credentials needed to deliver an SMS
pub struct SmsCredentials<'a> {
    pub account_sid: &'a str,
    pub auth_token: &'a str,
    pub from_number: &'a str,
}

impl SmsProviderConfig {
    pub fn credentials(&self) -> Option<SmsCredentials<'_>> {
        Some(SmsCredentials {
            account_sid: self.account_sid.as_deref()?,
            auth_token: self.auth_token.as_deref()?,
            from_number: self.from_number.as_deref()?,
        })
    }
}

impl Config {
    pub fn new() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the `Config` from the given variable lookup. Empty values
    /// are treated as missing.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = parse_or_default(var("PORT"), "PORT", DEFAULT_PORT);
        let dispatch_concurrency = match parse_or_default(
            var("DISPATCH_CONCURRENCY"),
            "DISPATCH_CONCURRENCY",
            DEFAULT_DISPATCH_CONCURRENCY,
        ) {
            0 => {
                warn!("DISPATCH_CONCURRENCY must be at least 1, using 1.");
                1
            }
            concurrency => concurrency,
        };
        let channel_timeout = Duration::from_secs(parse_or_default(
            var("CHANNEL_TIMEOUT_SECS"),
            "CHANNEL_TIMEOUT_SECS",
            DEFAULT_CHANNEL_TIMEOUT_SECS,
        ));

        let email = EmailProviderConfig {
            api_key: var("RESEND_API_KEY"),
            from: var("EMAIL_FROM")
                .unwrap_or_else(|| "Reminder Scheduler <reminders@yourdomain.com>".into()),
            base_url: var("EMAIL_API_BASE_URL").unwrap_or_else(|| "https://api.resend.com".into()),
        };
        if email.api_key.is_none() {
            warn!("Did not find RESEND_API_KEY environment variable. Email notifications will fail.");
        }

        let sms = SmsProviderConfig {
            account_sid: var("TWILIO_ACCOUNT_SID"),
            auth_token: var("TWILIO_AUTH_TOKEN"),
            from_number: var("TWILIO_PHONE_NUMBER"),
            base_url: var("SMS_API_BASE_URL").unwrap_or_else(|| "https://api.twilio.com".into()),
        };
        if sms.credentials().is_none() {
            warn!("Twilio credentials are not fully configured. SMS notifications will fail.");
        }

        let database_url = var("DATABASE_URL");
        if database_url.is_none() {
            warn!("Did not find DATABASE_URL environment variable. Dispatch runs will fail.");
        }

        info!(
            "Dispatching reminders with concurrency: {} and channel timeout: {:?}",
            dispatch_concurrency, channel_timeout
        );

        Self {
            port,
            database_url,
            dispatch_concurrency,
            channel_timeout,
            email,
            sms,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_or_default<T>(value: Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match value {
        None => default,
        Some(value) => match value.trim().parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    key, value, default
                );
                default
            }
        },
    }
}
