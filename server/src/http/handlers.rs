use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use shared_types::Tour;
use tracing::{info, instrument};

use super::{
    dto::UploadResponse,
    error::{ApiError, ApiResult},
    state::AppState,
};

/// GET /tours
/// The complete working set; filtering by author happens client-side.
#[instrument(skip(state))]
pub async fn list_tours(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Tour>>> {
    let tours = state.tours.list_all().await?;
    Ok(Json(tours))
}

/// GET /tours/:id
#[instrument(skip(state))]
pub async fn get_tour(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Tour>> {
    let tour = state
        .tours
        .get_by_id(&id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(tour))
}

/// POST /tours
/// Full-document upsert. The store assigns an identifier when the body omits
/// one.
#[instrument(skip(state, tour))]
pub async fn create_tour(
    State(state): State<Arc<AppState>>,
    Json(tour): Json<Tour>,
) -> ApiResult<(StatusCode, Json<Tour>)> {
    info!("Saving tour '{}'", tour.title);

    let stored = state.tours.upsert(tour).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// PUT /tours/:id
/// Merge-then-upsert: the existing record's top-level fields are overlaid by
/// the request body. Note the asymmetry with POST, which replaces the whole
/// document; both behaviors are kept per verb and pinned by tests.
#[instrument(skip(state, body))]
pub async fn update_tour(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<Json<Tour>> {
    let overlay = match body {
        serde_json::Value::Object(map) => map,
        _ => {
            return Err(ApiError::BadRequest(
                "Request body must be a JSON object".to_string(),
            ));
        }
    };

    let mut doc = match state.tours.get_by_id(&id).await? {
        Some(existing) => {
            let mut doc = serde_json::to_value(&existing).map_err(anyhow::Error::from)?;
            if let Some(fields) = doc.as_object_mut() {
                for (key, value) in overlay {
                    fields.insert(key, value);
                }
            }
            doc
        }
        None => serde_json::Value::Object(overlay),
    };

    // The path identifier wins; the record key is immutable.
    doc["id"] = serde_json::Value::String(id);

    let tour: Tour = serde_json::from_value(doc)
        .map_err(|e| ApiError::BadRequest(format!("Invalid tour body: {e}")))?;

    let stored = state.tours.upsert(tour).await?;
    Ok(Json(stored))
}

/// DELETE /tours/:id
/// 204 regardless of prior existence.
#[instrument(skip(state))]
pub async fn delete_tour(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.tours.delete_by_id(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /upload
/// Accepts a multipart form with a `file` part, fully buffered in memory
/// before the blob write.
#[instrument(skip_all)]
pub async fn upload_media(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        info!("Storing upload {} ({} bytes)", filename, data.len());

        let url = state.blobs.store(data, &filename, &content_type).await?;
        return Ok(Json(UploadResponse { url }));
    }

    Err(ApiError::BadRequest("No file uploaded".to_string()))
}

/// GET /health
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "waymark",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
