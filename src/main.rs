use std::sync::Arc;
use structural_insight::{router, AppState, Config, GeminiCaptioner};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "structural_insight=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let captioner = GeminiCaptioner::new(
        &config.base_url,
        &config.model,
        &config.api_key,
        config.caption_timeout,
    )?;

    let state = Arc::new(AppState {
        captioner: Arc::new(captioner),
        max_upload_bytes: config.max_upload_bytes,
    });

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    info!(addr = %config.bind_addr, model = %config.model, "Server running");

    axum::serve(listener, app).await?;

    Ok(())
}
