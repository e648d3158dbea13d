use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use session_guard_axum::guard_router;

mod pages;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}=debug,session_guard=debug,session_guard_axum=debug,tower_http=info",
                    env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let app = pages::router().merge(guard_router());

    let addr = std::env::var("GUARD_LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:3001".to_string());
    tracing::info!("Starting server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
