use axum::{Router, routing::get};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portability_auth::{
    HttpTokenAuthDataGenerator, LoginSubmitCoordinator, PasswordAuthDataGenerator,
    PortableDataType, ProviderRegistry, SessionTokenCodec, job_store_from_env,
};
use portability_auth_axum::{PORTABILITY_ROUTE_PREFIX, portability_router};

mod handlers;
mod server;

use crate::{
    handlers::{AppState, copy, index, next},
    server::spawn_http_server,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store = job_store_from_env().await?;
    let codec = Arc::new(SessionTokenCodec::from_env()?);
    let registry = Arc::new(build_registry()?);
    tracing::info!("Registered {} provider generators", registry.len());

    let coordinator = Arc::new(LoginSubmitCoordinator::new(
        store.clone(),
        registry,
        codec.clone(),
    ));

    let state = AppState {
        store,
        codec,
        submit_url: format!("{}/simpleLoginSubmit", *PORTABILITY_ROUTE_PREFIX),
    };

    // The job id token for a pre-created job, for clients that do not go through "/"
    let seeded = state.create_job().await?;
    tracing::info!("Seeded job; set cookie to submit: {}", seeded);

    let app = Router::new()
        .route("/", get(index))
        .route("/next", get(next))
        .route("/copy", get(copy))
        .with_state(state)
        .merge(portability_router(coordinator));

    let port = std::env::var("DEMO_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);

    spawn_http_server(port, app).await?;
    Ok(())
}

fn build_registry() -> Result<ProviderRegistry, Box<dyn std::error::Error>> {
    let password = Arc::new(PasswordAuthDataGenerator);
    let mut builder = ProviderRegistry::builder()
        .register("demo-source", PortableDataType::Photos, password.clone())
        .register("demo-destination", PortableDataType::Photos, password.clone())
        .register("demo-source", PortableDataType::Contacts, password.clone())
        .register("demo-destination", PortableDataType::Contacts, password);

    if let Ok(endpoint) = std::env::var("DEMO_TOKEN_ENDPOINT") {
        let generator = Arc::new(HttpTokenAuthDataGenerator::new(url::Url::parse(&endpoint)?)?);
        tracing::info!(
            "Using token endpoint {} for demo-token-source",
            generator.endpoint()
        );
        builder = builder.register("demo-token-source", PortableDataType::Photos, generator);
    }

    Ok(builder.build())
}
