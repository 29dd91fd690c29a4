//! Course HTTP Routes
//!
//! Courses are reachable on their own and nested under their bootcamp.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    routing::get,
    Json, Router,
};

use super::response::body_error;
use super::state::AppState;
use crate::model::{Course, CourseDetail, CourseFields};
use crate::operations::errors::parse_id;
use crate::operations::{ApiError, ApiResult, Collection, CourseListing, Single};
use crate::query::ListQuery;

/// Create course routes
pub fn course_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/courses", get(list_handler))
        .route(
            "/courses/:id",
            get(get_handler).put(update_handler).delete(delete_handler),
        )
        .route(
            "/bootcamps/:id/courses",
            get(list_for_bootcamp_handler).post(create_handler),
        )
        .with_state(state)
}

fn course_id(raw: &str) -> ApiResult<uuid::Uuid> {
    parse_id(raw, |r| ApiError::course_not_found(r))
}

fn parent_id(raw: &str) -> ApiResult<uuid::Uuid> {
    parse_id(raw, |r| {
        ApiError::NotFound(format!("No bootcamp found with the id of {}", r))
    })
}

// ==================
// Handlers
// ==================

async fn list_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<CourseListing>, ApiError> {
    let query = ListQuery::parse(&params)?;
    Ok(Json(state.courses.list(None, &query).await?))
}

async fn list_for_bootcamp_handler(
    State(state): State<Arc<AppState>>,
    Path(bootcamp): Path<String>,
) -> Result<Json<CourseListing>, ApiError> {
    // An id that cannot exist simply has no courses
    let Ok(bootcamp) = parent_id(&bootcamp) else {
        return Ok(Json(CourseListing::Bootcamp(Collection::new(Vec::new()))));
    };
    Ok(Json(
        state
            .courses
            .list(Some(bootcamp), &ListQuery::default())
            .await?,
    ))
}

async fn get_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Single<CourseDetail>>, ApiError> {
    let id = course_id(&id)?;
    Ok(Json(state.courses.get_by_id(id).await?))
}

async fn create_handler(
    State(state): State<Arc<AppState>>,
    Path(bootcamp): Path<String>,
    payload: Result<Json<CourseFields>, JsonRejection>,
) -> Result<Json<Single<Course>>, ApiError> {
    let bootcamp = parent_id(&bootcamp)?;
    let Json(fields) = payload.map_err(body_error)?;
    Ok(Json(state.courses.create(bootcamp, fields).await?))
}

async fn update_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<CourseFields>, JsonRejection>,
) -> Result<Json<Single<Course>>, ApiError> {
    let id = course_id(&id)?;
    let Json(fields) = payload.map_err(body_error)?;
    Ok(Json(state.courses.update(id, fields).await?))
}

async fn delete_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Single<Course>>, ApiError> {
    let id = course_id(&id)?;
    Ok(Json(state.courses.delete(id).await?))
}
