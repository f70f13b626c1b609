use ajanvaraus::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting ajanvaraus");

    // Load configuration
    let config = startup::load_config()?;

    // Serve the booking API
    #[cfg(feature = "web-interface")]
    startup::start_server(config).await?;

    #[cfg(not(feature = "web-interface"))]
    info!(
        "Web interface feature not enabled, nothing to serve for {}",
        config.timezone
    );

    Ok(())
}
