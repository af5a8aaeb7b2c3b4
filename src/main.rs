mod genai;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use crate::genai::GenerativeModel;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    // Initialize the generative client (non-fatal: AI endpoints return 503
    // when the key is missing, the UI itself still loads).
    let model: Option<Arc<dyn GenerativeModel>> = match genai::from_env() {
        Ok(client) => {
            tracing::info!(model = client.text_model(), "generative client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "generative client not configured — AI endpoints disabled");
            None
        }
    };

    let state = state::AppState::new(model);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "brand-studio listening");
    axum::serve(listener, app).await.expect("server failed");
}
