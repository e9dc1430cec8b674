mod telemetry;

use reminder_scheduler_api::Application;
use reminder_scheduler_infra::{run_migration, setup_context};
use telemetry::{get_subscriber, init_subscriber};
use tracing::{error, info};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("reminder_scheduler_server".into(), "info".into());
    init_subscriber(subscriber)?;

    let context = setup_context().await?;

    if let Some(database_url) = &context.config.database_url {
        info!("Running database migrations");
        if let Err(e) = run_migration(database_url).await {
            // The server still starts so that runs report the store failure
            error!("Unable to run database migrations: {:?}", e);
        }
    }

    let app = Application::new(context).await?;
    info!("Listening on port {}", app.port());
    app.start().await?;
    Ok(())
}
