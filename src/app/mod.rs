pub mod router;
pub mod server;
pub mod state;
pub mod tracing;

use crate::config;
use crate::error::ServiceError;

/// Application entry point. Initializes tracing, configuration, and starts the server.
pub async fn run() -> Result<(), ServiceError> {
    // Handle healthcheck subcommand (for Docker healthcheck in distroless image)
    if std::env::args().nth(1).as_deref() == Some("healthcheck") {
        let result = match config::get_configuration() {
            Ok(settings) => crate::healthcheck_with_port(settings.http_port).await,
            Err(_) => crate::healthcheck().await,
        };
        match result {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("Healthcheck failed: {e}");
                std::process::exit(1)
            }
        }
    }

    tracing::init_tracing(tracing::LogFormat::Json);

    let settings = config::get_configuration()?;
    ::tracing::info!("Loaded settings");

    let app_state = state::AppState::from_settings(&settings);
    let app = router::main_router(app_state.classifier);

    server::serve(app, &settings.bind_address()).await
}
