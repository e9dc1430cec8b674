mod dispatcher;
pub mod send_due_reminders;
#[cfg(test)]
mod test_helpers;

use actix_web::{http::Method, web};
pub use dispatcher::ReminderDispatcher;
use send_due_reminders::{preflight_controller, send_reminders_controller};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/send-reminders")
            .route(web::method(Method::OPTIONS).to(preflight_controller))
            // Any other method triggers a dispatch run
            .route(web::route().to(send_reminders_controller)),
    );
}
