use actix_web::{http::StatusCode, HttpResponse};
use reminder_scheduler_api_structs::ErrorResponse;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The due `Reminder`s could not be selected, so nothing was dispatched
    #[error("{0}")]
    DispatchFailed(String),
}

impl actix_web::error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::DispatchFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.to_string()))
    }
}
