use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_rest::{ApiDoc, AppState};
use patient_core::{patient_data_file_from_env_value, CoreConfig, PatientService};

/// Main entry point for the patient records service
///
/// Loads the patient file into memory, then serves the REST API until interrupted.
/// The in-memory store is dropped on shutdown; every change has already been written to
/// disk by the time its request returns.
///
/// # Environment Variables
/// - `PATIENT_REST_ADDR`: REST server address (default: "0.0.0.0:8000")
/// - `PATIENT_DATA_FILE`: JSON file holding the patients (default: "patients.json")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the patient file cannot be loaded,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("patient_run=info".parse()?)
                .add_directive("patient_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("PATIENT_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".into());
    let patient_data_file =
        patient_data_file_from_env_value(std::env::var("PATIENT_DATA_FILE").ok());

    let cfg = CoreConfig::new(patient_data_file)?;
    let patients = Arc::new(PatientService::open(&cfg)?);

    let app = api_rest::router(AppState::new(patients))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive());

    tracing::info!("++ Starting patient REST API on {}", rest_addr);

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("-- Patient REST API stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
