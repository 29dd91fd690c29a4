//! Bootcamp HTTP Routes

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
        DefaultBodyLimit, Multipart, Path, Query, State,
    },
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};

use super::response::body_error;
use super::state::AppState;
use crate::model::{Bootcamp, BootcampFields};
use crate::operations::errors::parse_id;
use crate::operations::{ApiError, ApiResult, Collection, PhotoUpload, Shaped, Single};
use crate::query::ListQuery;

/// Multipart field carrying the photo
const FILE_FIELD: &str = "file";

/// Multipart framing allowance on top of the photo size limit
const MULTIPART_OVERHEAD: u64 = 64 * 1024;

/// Create bootcamp routes
pub fn bootcamp_routes(state: Arc<AppState>) -> Router {
    let body_limit = state
        .bootcamps
        .max_upload_bytes()
        .saturating_add(MULTIPART_OVERHEAD);
    let body_limit = usize::try_from(body_limit).unwrap_or(usize::MAX);

    Router::new()
        .route("/bootcamps", get(list_handler).post(create_handler))
        .route(
            "/bootcamps/radius/:zipcode/:distance",
            get(radius_handler),
        )
        .route(
            "/bootcamps/:id",
            get(get_handler).put(update_handler).delete(delete_handler),
        )
        .route(
            "/bootcamps/:id/photo",
            put(upload_photo_handler).layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}

fn bootcamp_id(raw: &str) -> ApiResult<uuid::Uuid> {
    parse_id(raw, |r| ApiError::bootcamp_not_found(r))
}

// ==================
// Handlers
// ==================

async fn list_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Shaped>, ApiError> {
    let query = ListQuery::parse(&params)?;
    Ok(Json(state.bootcamps.list(&query).await?))
}

async fn get_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Single<Bootcamp>>, ApiError> {
    let id = bootcamp_id(&id)?;
    Ok(Json(state.bootcamps.get_by_id(id).await?))
}

async fn create_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BootcampFields>, JsonRejection>,
) -> Result<(StatusCode, Json<Single<Bootcamp>>), ApiError> {
    let Json(fields) = payload.map_err(body_error)?;
    let created = state.bootcamps.create(fields).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<BootcampFields>, JsonRejection>,
) -> Result<Json<Single<Bootcamp>>, ApiError> {
    let id = bootcamp_id(&id)?;
    let Json(fields) = payload.map_err(body_error)?;
    Ok(Json(state.bootcamps.update(id, fields).await?))
}

async fn delete_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Single<Bootcamp>>, ApiError> {
    let id = bootcamp_id(&id)?;
    Ok(Json(state.bootcamps.delete(id).await?))
}

async fn radius_handler(
    State(state): State<Arc<AppState>>,
    Path((zipcode, distance)): Path<(String, String)>,
) -> Result<Json<Collection<Bootcamp>>, ApiError> {
    let distance: f64 = distance
        .trim()
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid distance: {}", distance)))?;

    Ok(Json(
        state.bootcamps.find_within_radius(&zipcode, distance).await?,
    ))
}

async fn upload_photo_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Single<String>>, ApiError> {
    let id = bootcamp_id(&id)?;
    // Unknown bootcamps answer 404 before any of the body is read
    state.bootcamps.get_by_id(id).await?;

    let file = read_photo(multipart, state.bootcamps.max_upload_bytes()).await?;
    Ok(Json(state.bootcamps.upload_photo(id, file).await?))
}

/// Pull the `file` field out of a multipart body; a non-multipart request
/// carries no file
async fn read_photo(
    multipart: Result<Multipart, MultipartRejection>,
    max_upload_bytes: u64,
) -> ApiResult<Option<PhotoUpload>> {
    let Ok(mut multipart) = multipart else {
        return Ok(None);
    };

    let read_error = |e: MultipartError| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::BadRequest(format!("image file bigger than {} bytes", max_upload_bytes))
        } else {
            ApiError::BadRequest(e.body_text())
        }
    };

    while let Some(field) = multipart.next_field().await.map_err(read_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field.bytes().await.map_err(read_error)?;

        return Ok(Some(PhotoUpload {
            file_name,
            content_type,
            data: data.to_vec(),
        }));
    }

    Ok(None)
}
