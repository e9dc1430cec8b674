use futures::{stream, FutureExt, StreamExt};
use reminder_scheduler_domain::{
    BatchReport, ChannelStatus, DispatchOutcome, EmailMessage, Reminder, SmsMessage,
};
use reminder_scheduler_infra::{Channels, INotificationChannel, IReminderRepo, ReminderContext};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Delivers `Reminder`s through every channel and marks the fully
/// delivered ones as sent.
///
/// Every `Reminder` is processed in isolation: whatever happens to one of
/// them ends up in its own `DispatchOutcome` and never stops the others.
pub struct ReminderDispatcher {
    channels: Channels,
    reminders: Arc<dyn IReminderRepo>,
    concurrency: usize,
}

impl ReminderDispatcher {
    pub fn new(ctx: &ReminderContext) -> Self {
        Self {
            channels: ctx.channels.clone(),
            reminders: ctx.repos.reminders.clone(),
            concurrency: ctx.config.dispatch_concurrency.max(1),
        }
    }

    /// Dispatches the given `Reminder`s with at most `concurrency` of them
    /// in flight. Outcomes keep the order of the input.
    pub async fn run(&self, reminders: Vec<Reminder>) -> BatchReport {
        let outcomes = stream::iter(reminders)
            .map(|reminder| self.dispatch_isolated(reminder))
            .buffered(self.concurrency)
            .collect::<Vec<_>>()
            .await;

        BatchReport::new(outcomes)
    }

    async fn dispatch_isolated(&self, reminder: Reminder) -> DispatchOutcome {
        match AssertUnwindSafe(self.dispatch_reminder(&reminder))
            .catch_unwind()
            .await
        {
            Ok(outcome) => outcome,
            Err(_) => {
                error!("Processing of reminder {} panicked", reminder.id);
                DispatchOutcome::aborted(&reminder, "Unexpected failure while processing reminder")
            }
        }
    }

    #[tracing::instrument(name = "Dispatching reminder", skip(self, reminder), fields(reminder_id = %reminder.id))]
    async fn dispatch_reminder(&self, reminder: &Reminder) -> DispatchOutcome {
        let email = EmailMessage::for_reminder(reminder);
        let sms = SmsMessage::for_reminder(reminder);

        // Both attempts always run to completion before deciding on the commit
        let (email_status, sms_status) = futures::join!(
            send_on_channel(self.channels.email.as_ref(), &email),
            send_on_channel(self.channels.sms.as_ref(), &sms),
        );
        let mut outcome = DispatchOutcome::new(reminder, email_status, sms_status);

        // A partially delivered reminder stays unsent so that the next run retries it
        if !outcome.all_channels_succeeded() {
            warn!(
                "Reminder {} was not delivered on every channel and is kept for the next run",
                reminder.id
            );
            return outcome;
        }

        // The channel statuses are already final, a failing commit only sets the error
        match AssertUnwindSafe(self.reminders.mark_sent(&reminder.id))
            .catch_unwind()
            .await
        {
            Ok(Ok(())) => {
                outcome.committed = true;
                info!("Reminder {} marked as sent", reminder.id);
            }
            Ok(Err(e)) => {
                error!("Unable to mark reminder {} as sent: {:?}", reminder.id, e);
                outcome.error = Some(format!("Failed to mark reminder as sent: {}", e));
            }
            Err(_) => {
                error!("Marking reminder {} as sent panicked", reminder.id);
                outcome.error = Some("Failed to mark reminder as sent: unexpected failure".into());
            }
        }

        outcome
    }
}

async fn send_on_channel<M>(
    channel: &dyn INotificationChannel<Message = M>,
    message: &M,
) -> ChannelStatus
where
    M: Send + Sync,
{
    match AssertUnwindSafe(channel.send(message)).catch_unwind().await {
        Ok(Ok(_receipt)) => {
            info!("Sent {} notification", channel.name());
            ChannelStatus::Success
        }
        Ok(Err(e)) => {
            warn!("Unable to send {} notification: {}", channel.name(), e);
            ChannelStatus::Failure(e.to_string())
        }
        Err(_) => {
            error!("Sending {} notification panicked", channel.name());
            ChannelStatus::Failure(format!("Unexpected failure in the {} channel", channel.name()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::test_helpers::*;
    use reminder_scheduler_domain::ID;

    #[actix_web::test]
    async fn commits_reminder_when_both_channels_succeed() {
        let setup = TestSetup::new();
        let reminder = setup.insert_due("Ada").await;

        let report = ReminderDispatcher::new(&setup.ctx)
            .run(vec![reminder.clone()])
            .await;

        assert_eq!(report.processed(), 1);
        let outcome = &report.outcomes[0];
        assert_eq!(outcome.reminder_id, reminder.id);
        assert_eq!(outcome.email_status, ChannelStatus::Success);
        assert_eq!(outcome.sms_status, ChannelStatus::Success);
        assert!(outcome.committed);
        assert!(setup.is_sent(&reminder.id).await);
        assert_eq!(setup.email.sent_to(), vec![reminder.email.clone()]);
        assert_eq!(setup.sms.sent_to(), vec![reminder.phone_number.clone()]);
    }

    #[actix_web::test]
    async fn email_failure_still_attempts_sms_and_skips_commit() {
        let setup = TestSetup::new();
        let reminder = setup.insert_due("Ada").await;
        setup.email.fail_for(&reminder.email);

        let report = ReminderDispatcher::new(&setup.ctx)
            .run(vec![reminder.clone()])
            .await;

        let outcome = &report.outcomes[0];
        assert_eq!(
            outcome.email_status,
            ChannelStatus::Failure("Failed to send email: provider said no".into())
        );
        assert_eq!(outcome.sms_status, ChannelStatus::Success);
        assert!(!outcome.committed);
        assert_eq!(setup.sms.sent_to(), vec![reminder.phone_number.clone()]);
        assert!(!setup.is_sent(&reminder.id).await);
    }

    #[actix_web::test]
    async fn sms_failure_skips_commit() {
        let setup = TestSetup::new();
        let reminder = setup.insert_due("Ada").await;
        setup.sms.fail_for(&reminder.phone_number);

        let report = ReminderDispatcher::new(&setup.ctx)
            .run(vec![reminder.clone()])
            .await;

        let outcome = &report.outcomes[0];
        assert_eq!(outcome.email_status, ChannelStatus::Success);
        assert!(!outcome.sms_status.is_success());
        assert!(!outcome.committed);
        assert!(!setup.is_sent(&reminder.id).await);
    }

    #[actix_web::test]
    async fn one_failing_reminder_does_not_affect_the_others() {
        let setup = TestSetup::new();
        let mut reminders = Vec::new();
        for i in 0..5 {
            reminders.push(setup.insert_due(&format!("User {}", i)).await);
        }
        let failing = reminders[2].clone();
        setup.sms.fail_for(&failing.phone_number);

        let report = ReminderDispatcher::new(&setup.ctx)
            .run(reminders.clone())
            .await;

        assert_eq!(report.processed(), 5);
        for (reminder, outcome) in reminders.iter().zip(report.outcomes.iter()) {
            assert_eq!(outcome.reminder_id, reminder.id);
            let should_fail = reminder.id == failing.id;
            assert_eq!(outcome.committed, !should_fail);
            assert_eq!(setup.is_sent(&reminder.id).await, !should_fail);
        }
        assert_eq!(report.failed(), 1);
    }

    #[actix_web::test]
    async fn panicking_channel_is_contained_to_its_reminder() {
        let setup = TestSetup::new();
        let first = setup.insert_due("First").await;
        let broken = setup.insert_due("Broken").await;
        let last = setup.insert_due("Last").await;
        setup.email.panic_for(&broken.email);

        let report = ReminderDispatcher::new(&setup.ctx)
            .run(vec![first.clone(), broken.clone(), last.clone()])
            .await;

        assert_eq!(report.processed(), 3);
        assert!(report.outcomes[0].committed);
        assert!(report.outcomes[2].committed);

        let outcome = &report.outcomes[1];
        assert!(!outcome.committed);
        assert_eq!(outcome.sms_status, ChannelStatus::Success);
        assert_eq!(
            outcome.email_status,
            ChannelStatus::Failure("Unexpected failure in the email channel".into())
        );
        assert!(!setup.is_sent(&broken.id).await);
    }

    #[actix_web::test]
    async fn failed_commit_keeps_reminder_eligible() {
        let setup = TestSetup::with_failing_commits();
        let reminder = setup.insert_due("Ada").await;

        let report = ReminderDispatcher::new(&setup.ctx)
            .run(vec![reminder.clone()])
            .await;

        let outcome = &report.outcomes[0];
        assert!(outcome.all_channels_succeeded());
        assert!(!outcome.committed);
        assert_eq!(
            outcome.error_message().as_deref(),
            Some("Failed to mark reminder as sent: store rejected the update")
        );

        let due = setup
            .ctx
            .repos
            .reminders
            .find_due(setup.today)
            .await
            .unwrap();
        assert_eq!(due.iter().map(|r| r.id.clone()).collect::<Vec<ID>>(), vec![reminder.id]);
    }

    #[actix_web::test]
    async fn panicking_commit_keeps_the_real_channel_statuses() {
        let setup = TestSetup::with_panicking_commits();
        let ada = setup.insert_due("Ada").await;
        let grace = setup.insert_due("Grace").await;

        let report = ReminderDispatcher::new(&setup.ctx)
            .run(vec![ada.clone(), grace.clone()])
            .await;

        assert_eq!(report.processed(), 2);
        assert_eq!(report.committed(), 0);
        for outcome in &report.outcomes {
            assert_eq!(outcome.email_status, ChannelStatus::Success);
            assert_eq!(outcome.sms_status, ChannelStatus::Success);
            assert!(!outcome.committed);
            assert_eq!(
                outcome.error_message().as_deref(),
                Some("Failed to mark reminder as sent: unexpected failure")
            );
        }
        assert_eq!(setup.email.sent_to(), vec![ada.email.clone(), grace.email.clone()]);
        assert!(!setup.is_sent(&ada.id).await);
        assert!(!setup.is_sent(&grace.id).await);
    }

    #[actix_web::test]
    async fn outcomes_keep_selection_order_with_concurrency() {
        let mut setup = TestSetup::new();
        setup.ctx.config.dispatch_concurrency = 3;
        let mut reminders = Vec::new();
        for i in 0..10 {
            reminders.push(setup.insert_due(&format!("User {}", i)).await);
        }

        let report = ReminderDispatcher::new(&setup.ctx)
            .run(reminders.clone())
            .await;

        let ids: Vec<_> = report.outcomes.iter().map(|o| o.reminder_id.clone()).collect();
        let expected: Vec<_> = reminders.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, expected);
        assert_eq!(report.committed(), 10);
    }

    #[actix_web::test]
    async fn empty_run_gives_empty_report() {
        let setup = TestSetup::new();
        let report = ReminderDispatcher::new(&setup.ctx).run(vec![]).await;
        assert_eq!(report, BatchReport::default());
    }
}
