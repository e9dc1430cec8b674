use chrono::NaiveDate;
use reminder_scheduler_api::Application;
use reminder_scheduler_domain::Reminder;
use reminder_scheduler_infra::{
    Channels, EmailProviderConfig, ISys, ReminderContext, SmsProviderConfig,
};
use reminder_scheduler_sdk::{ReminderSchedulerSDK, ID};
use std::sync::Arc;
use wiremock::MockServer;

pub struct StaticTimeSys {
    pub today: NaiveDate,
}
impl ISys for StaticTimeSys {
    fn today(&self) -> NaiveDate {
        self.today
    }
}

pub struct TestApp {
    pub ctx: ReminderContext,
    pub address: String,
    pub email_provider: MockServer,
    pub sms_provider: MockServer,
}

impl TestApp {
    pub async fn insert_reminder(&self, reminder: &Reminder) {
        self.ctx
            .repos
            .reminders
            .insert(reminder)
            .await
            .expect("To insert reminder");
    }

    /// Calls the dispatch endpoint without the SDK so that headers can be inspected
    pub async fn call_send_reminders(&self, method: reqwest::Method) -> reqwest::Response {
        reqwest::Client::new()
            .request(method, format!("{}/api/v1/send-reminders", self.address))
            .send()
            .await
            .expect("To reach the server")
    }

    pub async fn is_sent(&self, reminder_id: &ID) -> bool {
        self.ctx
            .repos
            .reminders
            .find(reminder_id)
            .await
            .expect("Store to be available")
            .expect("Reminder to exist")
            .is_sent
    }
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

pub fn ada() -> Reminder {
    Reminder::new("Ada", "ada@x.com", "+15551234567", "Renew license", today())
}

pub async fn spawn_app() -> (TestApp, ReminderSchedulerSDK) {
    spawn_app_with(|_| {}).await
}

// Launch the application as a background task with the providers mocked
pub async fn spawn_app_with<F>(customize: F) -> (TestApp, ReminderSchedulerSDK)
where
    F: FnOnce(&mut ReminderContext),
{
    let email_provider = MockServer::start().await;
    let sms_provider = MockServer::start().await;

    let mut ctx = ReminderContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.email = EmailProviderConfig {
        api_key: Some("re_test".into()),
        from: "Reminder Scheduler <reminders@yourdomain.com>".into(),
        base_url: email_provider.uri(),
    };
    ctx.config.sms = SmsProviderConfig {
        account_sid: Some("AC123".into()),
        auth_token: Some("token".into()),
        from_number: Some("+15550000000".into()),
        base_url: sms_provider.uri(),
    };
    ctx.sys = Arc::new(StaticTimeSys { today: today() });
    customize(&mut ctx);
    ctx.channels = Channels::create(&ctx.config).expect("To create channels");

    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let sdk = ReminderSchedulerSDK::new(address.clone());
    let app = TestApp {
        ctx,
        address,
        email_provider,
        sms_provider,
    };
    (app, sdk)
}
