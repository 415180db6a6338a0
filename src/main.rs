use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quora_sessions::{
    api::{create_router, AppState},
    config::Config,
    crypto::TokenIssuer,
    db,
    error::AppError,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,quora_sessions=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("🚀 Starting Quora sessions server v{}...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Arc::new(Config::from_env()?);
    tracing::info!("✅ Configuration loaded");

    // Setup database and run migrations
    let db = db::connect(&config).await?;
    tracing::info!("✅ Database connected and migrated: {}", config.database_url);

    let issuer = match &config.token_signing_key {
        Some(seed) => TokenIssuer::from_base64_seed(seed)?,
        None => {
            tracing::warn!("TOKEN_SIGNING_KEY not set; using a per-process signing key");
            TokenIssuer::generate()
        }
    };

    if config.enforce_session_expiry {
        tracing::info!("✅ Session expiry enforced ({}h)", config.session_expiry_hours);
    } else {
        tracing::info!("Session expiry recorded but not enforced; sessions end on sign-out");
    }

    // Create shared application state
    let state = AppState::new(db, config.clone(), issuer);

    // Build router
    let app = create_router(state);

    // Bind and serve
    let addr = config.server_address();
    tracing::info!("🌐 Server listening on http://{}", addr);
    tracing::info!("🏥 Health check: http://{}/api/health", addr);
    tracing::info!("");
    tracing::info!("📚 API Endpoints:");
    tracing::info!("  POST   /user/signup                          - Register new user");
    tracing::info!("  POST   /user/signin                          - Sign in (Basic auth)");
    tracing::info!("  POST   /user/signout                         - Sign out (requires auth)");
    tracing::info!("  GET    /userprofile/{{userId}}                 - User profile (requires auth)");
    tracing::info!("  DELETE /admin/user/{{userId}}                  - Delete user (admin)");
    tracing::info!("  POST   /question/create                      - Post question (requires auth)");
    tracing::info!("  GET    /question/all[/{{userId}}]               - List questions (requires auth)");
    tracing::info!("  PUT    /question/edit/{{questionId}}           - Edit question (owner)");
    tracing::info!("  DELETE /question/delete/{{questionId}}         - Delete question (owner or admin)");
    tracing::info!("  POST   /question/{{questionId}}/answer/create  - Post answer (requires auth)");
    tracing::info!("  PUT    /answer/edit/{{answerId}}               - Edit answer (owner)");
    tracing::info!("  DELETE /answer/delete/{{answerId}}             - Delete answer (owner or admin)");
    tracing::info!("  GET    /answer/all/{{questionId}}              - List answers (requires auth)");
    tracing::info!("");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to bind to {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
