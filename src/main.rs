//! Medication tracker server.
//!
//! Resolves configuration from the environment once, builds the in-memory store and the AI
//! gateway, and serves the REST API.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use medtrack_core::{
    config::calendar_basis_from_env_value, CoreConfig, MedicationStore, UuidGenerator,
};
use medtrack_gateway::{GatewayConfig, GeminiGateway};

/// Main entry point for the medication tracker.
///
/// # Environment Variables
/// - `GEMINI_API_KEY` (or `API_KEY`): AI service key, required
/// - `MEDTRACK_MODEL`: model name (default: "gemini-2.5-flash")
/// - `MEDTRACK_GATEWAY_URL`: AI service base URL
/// - `MEDTRACK_GATEWAY_TIMEOUT_SECS`: HTTP timeout (default: 60)
/// - `MEDTRACK_CALENDAR`: `utc` or `local` date for "today" (default: "utc")
/// - `MEDTRACK_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - no API key is configured or any other setting is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("medtrack=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let core_cfg = CoreConfig::new(calendar_basis_from_env_value(
        std::env::var("MEDTRACK_CALENDAR").ok(),
    )?);
    let gateway_cfg = GatewayConfig::from_env_values(
        std::env::var("GEMINI_API_KEY").ok(),
        std::env::var("API_KEY").ok(),
        std::env::var("MEDTRACK_MODEL").ok(),
        std::env::var("MEDTRACK_GATEWAY_URL").ok(),
        std::env::var("MEDTRACK_GATEWAY_TIMEOUT_SECS").ok(),
    )?;
    let rest_addr = std::env::var("MEDTRACK_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!(
        calendar = %core_cfg.calendar_basis(),
        model = gateway_cfg.model(),
        "++ Starting medication tracker REST on {}",
        rest_addr
    );

    let state = AppState::new(
        MedicationStore::from_config(&core_cfg),
        Arc::new(GeminiGateway::new(gateway_cfg)?),
        Arc::new(UuidGenerator),
    );

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
