use super::ReminderDispatcher;
use crate::{
    error::ApiError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use reminder_scheduler_api_structs::send_reminders::APIResponse;
use reminder_scheduler_domain::BatchReport;
use reminder_scheduler_infra::ReminderContext;
use tracing::info;

pub async fn send_reminders_controller(
    ctx: web::Data<ReminderContext>,
) -> Result<HttpResponse, ApiError> {
    let usecase = SendDueRemindersUseCase {};

    execute(usecase, &ctx)
        .await
        .map(|report| HttpResponse::Ok().json(APIResponse::new(report)))
        .map_err(ApiError::from)
}

/// Cross origin handshake, the CORS headers are added to every response
pub async fn preflight_controller() -> HttpResponse {
    HttpResponse::Ok().finish()
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError(String),
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError(message) => Self::DispatchFailed(message),
        }
    }
}

/// Sends every `Reminder` that is due today and not sent yet
#[derive(Debug)]
pub struct SendDueRemindersUseCase {}

#[async_trait::async_trait(?Send)]
impl UseCase for SendDueRemindersUseCase {
    type Response = BatchReport;

    type Error = UseCaseError;

    const NAME: &'static str = "SendDueReminders";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let today = ctx.sys.today();
        info!("Checking for reminders on {}", today);

        let reminders = ctx
            .repos
            .reminders
            .find_due(today)
            .await
            .map_err(|e| UseCaseError::StorageError(e.to_string()))?;
        info!("Found {} reminders to send", reminders.len());

        let report = ReminderDispatcher::new(ctx).run(reminders).await;
        info!(
            "Processed {} reminders: {} sent, {} failed",
            report.processed(),
            report.committed(),
            report.failed()
        );

        Ok(report)
    }
}
