use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

use super::{handlers, state::AppState};
use crate::blob::UPLOADS_PREFIX;
use crate::providers::Providers;

pub fn build_router(providers: Providers) -> Router {
    let state = Arc::new(AppState {
        tours: providers.tours,
        blobs: providers.blobs,
    });

    let mut app = Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Tour CRUD operations
        .route(
            "/tours",
            get(handlers::list_tours).post(handlers::create_tour),
        )
        .route(
            "/tours/:id",
            get(handlers::get_tour)
                .put(handlers::update_tour)
                .delete(handlers::delete_tour),
        )
        // Media upload
        .route("/upload", post(handlers::upload_media))
        .with_state(state);

    // Disk-stored uploads are served straight from the uploads directory.
    if let Some(dir) = providers.serve_uploads_from {
        app = app.nest_service(UPLOADS_PREFIX, ServeDir::new(dir));
    }

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub async fn start_server(providers: Providers, bind_address: SocketAddr) -> Result<()> {
    let app = build_router(providers);

    info!("Server listening on {}", bind_address);

    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
