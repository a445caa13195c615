mod genai;
mod routes;
mod services;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");
    let upload_dir =
        PathBuf::from(std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()));
    let model = genai::model_from_env();

    // Initialize the generation client (non-fatal: chat endpoints report an
    // error until a key is configured, the health probe keeps working).
    let client: Option<Arc<dyn genai::GenAi>> = match genai::client_from_env() {
        Ok(client) => {
            tracing::info!(model = %model, "generation client initialized");
            Some(client)
        }
        Err(e) => {
            tracing::warn!(error = %e, "generation client not configured — chat disabled");
            None
        }
    };

    let state = state::AppState::new(client, model, upload_dir);
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "multimodal chat server listening");
    axum::serve(listener, app).await.expect("server failed");
}
