use super::IReminderRepo;
use chrono::{DateTime, NaiveDate, Utc};
use reminder_scheduler_domain::{Reminder, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    id: Uuid,
    full_name: String,
    email: String,
    phone_number: String,
    custom_message: String,
    reminder_date: NaiveDate,
    is_sent: bool,
    created_at: DateTime<Utc>,
}

impl From<ReminderRaw> for Reminder {
    fn from(raw: ReminderRaw) -> Self {
        Self {
            id: raw.id.into(),
            full_name: raw.full_name,
            email: raw.email,
            phone_number: raw.phone_number,
            custom_message: raw.custom_message,
            reminder_date: raw.reminder_date,
            is_sent: raw.is_sent,
            created_at: raw.created_at,
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminders
            (id, full_name, email, phone_number, custom_message, reminder_date, is_sent, created_at)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(&reminder.full_name)
        .bind(&reminder.email)
        .bind(&reminder.phone_number)
        .bind(&reminder.custom_message)
        .bind(reminder.reminder_date)
        .bind(reminder.is_sent)
        .bind(reminder.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        let reminder = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.id = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(reminder.map(|r| r.into()))
    }

    async fn find_due(&self, date: NaiveDate) -> anyhow::Result<Vec<Reminder>> {
        let reminders = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.reminder_date = $1 AND r.is_sent = FALSE
            ORDER BY r.created_at, r.id
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(reminders.into_iter().map(|r| r.into()).collect())
    }

    async fn mark_sent(&self, reminder_id: &ID) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE reminders
            SET is_sent = TRUE
            WHERE id = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
