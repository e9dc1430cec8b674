use chrono::NaiveDate;
use reminder_scheduler_domain::{EmailMessage, Reminder, SmsMessage, ID};
use reminder_scheduler_infra::{
    ChannelError, INotificationChannel, IReminderRepo, ISys, ProviderReceipt, ReminderContext,
    Repos,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

pub struct StaticTimeSys {
    pub today: NaiveDate,
}
impl ISys for StaticTimeSys {
    fn today(&self) -> NaiveDate {
        self.today
    }
}

pub trait Recipient {
    fn recipient(&self) -> &str;
}

impl Recipient for EmailMessage {
    fn recipient(&self) -> &str {
        &self.recipient
    }
}

impl Recipient for SmsMessage {
    fn recipient(&self) -> &str {
        &self.recipient
    }
}

/// Channel that records every delivery and fails or panics for
/// selected recipients
pub struct StubChannel<M> {
    name: &'static str,
    failing: Mutex<HashSet<String>>,
    panicking: Mutex<HashSet<String>>,
    sent: Mutex<Vec<String>>,
    _message: std::marker::PhantomData<fn(M)>,
}

impl<M> StubChannel<M> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            failing: Default::default(),
            panicking: Default::default(),
            sent: Default::default(),
            _message: Default::default(),
        }
    }

    pub fn fail_for(&self, recipient: &str) {
        self.failing.lock().unwrap().insert(recipient.to_string());
    }

    pub fn recover_for(&self, recipient: &str) {
        self.failing.lock().unwrap().remove(recipient);
    }

    pub fn panic_for(&self, recipient: &str) {
        self.panicking.lock().unwrap().insert(recipient.to_string());
    }

    /// Recipients of the successful deliveries, in order
    pub fn sent_to(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl<M: Recipient + Send + Sync> INotificationChannel for StubChannel<M> {
    type Message = M;

    fn name(&self) -> &'static str {
        self.name
    }

    async fn send(&self, message: &M) -> Result<ProviderReceipt, ChannelError> {
        let recipient = message.recipient().to_string();
        if self.panicking.lock().unwrap().contains(&recipient) {
            panic!("{} channel blew up", self.name);
        }
        if self.failing.lock().unwrap().contains(&recipient) {
            return Err(ChannelError::Delivery(format!(
                "Failed to send {}: provider said no",
                self.name
            )));
        }
        self.sent.lock().unwrap().push(recipient);
        Ok(ProviderReceipt("{}".into()))
    }
}

/// Store whose commits always fail, either by returning an error or by panicking
pub struct FailingCommitRepo {
    inner: Arc<dyn IReminderRepo>,
    panics: bool,
}

#[async_trait::async_trait]
impl IReminderRepo for FailingCommitRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        self.inner.insert(reminder).await
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        self.inner.find(reminder_id).await
    }

    async fn find_due(&self, date: NaiveDate) -> anyhow::Result<Vec<Reminder>> {
        self.inner.find_due(date).await
    }

    async fn mark_sent(&self, _reminder_id: &ID) -> anyhow::Result<()> {
        if self.panics {
            panic!("store connection dropped mid update");
        }
        Err(anyhow::anyhow!("store rejected the update"))
    }
}

pub struct TestSetup {
    pub ctx: ReminderContext,
    pub email: Arc<StubChannel<EmailMessage>>,
    pub sms: Arc<StubChannel<SmsMessage>>,
    pub today: NaiveDate,
}

impl TestSetup {
    pub fn new() -> Self {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let email = Arc::new(StubChannel::new("email"));
        let sms = Arc::new(StubChannel::new("SMS"));

        let mut ctx = ReminderContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys { today });
        ctx.channels.email = email.clone();
        ctx.channels.sms = sms.clone();

        Self {
            ctx,
            email,
            sms,
            today,
        }
    }

    pub fn with_failing_commits() -> Self {
        Self::with_commit_repo(false)
    }

    pub fn with_panicking_commits() -> Self {
        Self::with_commit_repo(true)
    }

    fn with_commit_repo(panics: bool) -> Self {
        let mut setup = Self::new();
        setup.ctx.repos.reminders = Arc::new(FailingCommitRepo {
            inner: setup.ctx.repos.reminders.clone(),
            panics,
        });
        setup
    }

    pub fn with_unconfigured_store() -> Self {
        let mut setup = Self::new();
        setup.ctx.repos = Repos::create_unconfigured("DATABASE_URL env var is missing");
        setup
    }

    /// Inserts a `Reminder` with unique recipients that is due today
    pub async fn insert_due(&self, name: &str) -> Reminder {
        self.insert_on(name, self.today).await
    }

    pub async fn insert_on(&self, name: &str, date: NaiveDate) -> Reminder {
        let id = ID::default();
        let mut reminder = Reminder::new(
            name,
            format!("{}@x.com", id),
            format!("+1555{}", &id.as_string()[..8]),
            "Renew license",
            date,
        );
        reminder.id = id;
        self.ctx
            .repos
            .reminders
            .insert(&reminder)
            .await
            .expect("To insert reminder");
        reminder
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
