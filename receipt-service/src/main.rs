use dotenvy::dotenv;
use receipt_service::config::get_configuration;
use receipt_service::observability::init_tracing;
use receipt_service::services::init_metrics;
use receipt_service::startup::Application;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let configuration = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(&configuration.telemetry)?;
    init_metrics()?;

    let application = Application::build(configuration).await?;
    application.run_until_stopped().await?;

    Ok(())
}
