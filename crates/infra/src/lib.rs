mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, EmailProviderConfig, SmsCredentials, SmsProviderConfig};
pub use repos::{IReminderRepo, Repos};
pub use services::*;
use reminder_scheduler_domain::{EmailMessage, SmsMessage};
use reqwest::Client;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::{ISys, RealSys};
use tracing::error;

/// The notification channels every `Reminder` is delivered through
#[derive(Clone)]
pub struct Channels {
    pub email: Arc<dyn INotificationChannel<Message = EmailMessage>>,
    pub sms: Arc<dyn INotificationChannel<Message = SmsMessage>>,
}

impl Channels {
    pub fn create(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(config.channel_timeout).build()?;
        Ok(Self::with_client(client, config))
    }

    fn with_client(client: Client, config: &Config) -> Self {
        Self {
            email: Arc::new(ResendEmailChannel::new(
                client.clone(),
                config.email.clone(),
            )),
            sms: Arc::new(TwilioSmsChannel::new(client, config.sms.clone())),
        }
    }
}

#[derive(Clone)]
pub struct ReminderContext {
    pub repos: Repos,
    pub channels: Channels,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

impl ReminderContext {
    fn create(config: Config) -> anyhow::Result<Self> {
        let repos = match &config.database_url {
            Some(connection_string) => match Repos::create_postgres(connection_string) {
                Ok(repos) => repos,
                Err(e) => {
                    error!("Unable to use the DATABASE_URL: {:?}", e);
                    Repos::create_unconfigured("DATABASE_URL is invalid")
                }
            },
            None => Repos::create_unconfigured("DATABASE_URL env var is missing"),
        };
        let channels = Channels::create(&config)?;

        Ok(Self {
            repos,
            channels,
            config,
            sys: Arc::new(RealSys {}),
        })
    }

    /// Context backed by an inmemory store and default `Config`, used by
    /// tests. The channels have no credentials until replaced.
    pub fn create_inmemory() -> Self {
        let config = Config::from_lookup(|_| None);
        let channels = Channels::with_client(Client::new(), &config);

        Self {
            repos: Repos::create_inmemory(),
            channels,
            config,
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<ReminderContext> {
    ReminderContext::create(Config::new())
}

/// Applies the SQL migrations of this crate to the database at `DATABASE_URL`
pub async fn run_migration(connection_string: &str) -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(connection_string)
        .await?;

    sqlx::migrate!().run(&pool).await
}
