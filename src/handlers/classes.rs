//! Class schedule handlers.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{Response, StatusCode},
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::require_admin;
use crate::context::{PageQuery, RequestContext};
use crate::error::{ApiError, ApiResult, ErrorCode};
use crate::models::{ClassModel, Discipline};
use crate::pagination::PageState;
use crate::router::AppState;

use super::{
    build_response, common_headers, json_response, parse_json, parse_uuid, redirect_to_page,
    require_field, PageEnvelope,
};

/// Payload for creating or updating a class.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassPayload {
    pub title: String,
    pub discipline: Discipline,
    #[serde(default)]
    pub description: String,
    pub instructor: String,
    pub room: String,
    pub starts_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub capacity: u32,
    #[serde(default)]
    pub image_id: Option<Uuid>,
}

impl ClassPayload {
    fn validate(&self) -> ApiResult<()> {
        require_field(&self.title, "title")?;
        require_field(&self.instructor, "instructor")?;
        require_field(&self.room, "room")?;
        if self.duration_minutes == 0 {
            return Err(ApiError::with_message(
                ErrorCode::InvalidInput,
                "Field 'durationMinutes' must be at least 1",
            ));
        }
        if self.capacity == 0 {
            return Err(ApiError::with_message(
                ErrorCode::InvalidInput,
                "Field 'capacity' must be at least 1",
            ));
        }
        Ok(())
    }
}

/// GET /api/classes - List the class schedule, soonest first.
pub async fn list_classes(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> ApiResult<Response<Body>> {
    let query = PageQuery::from_context(&ctx, &state.config);
    let offset = query.offset();
    let (classes, total) = state.store.list_classes(offset, query.per_page).await?;

    let pages = PageState::new(query.page, total, query.per_page);
    if query.needs_redirect(pages.total_pages()) {
        return redirect_to_page(&ctx, query.canonical_page(pages.total_pages()));
    }

    let envelope = PageEnvelope::new(classes, &pages, &ctx.location());
    Ok(json_response(StatusCode::OK, common_headers(&ctx), &envelope))
}

/// GET /api/classes/{id} - Get a single class.
pub async fn get_class(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: RequestContext,
) -> ApiResult<Response<Body>> {
    let id = parse_uuid(&id)?;
    let class = state.store.get_class(id).await?;

    Ok(json_response(StatusCode::OK, common_headers(&ctx), &class))
}

/// POST /api/admin/classes - Create a class.
pub async fn create_class(
    State(state): State<AppState>,
    ctx: RequestContext,
    body: Bytes,
) -> ApiResult<Response<Body>> {
    require_admin(&ctx, &state.config.session_secret)?;

    let payload: ClassPayload = parse_json(&body)?;
    payload.validate()?;

    if let Some(image_id) = payload.image_id {
        state.store.get_image(image_id).await?;
    }

    let mut class = ClassModel::new(
        payload.title.trim().to_string(),
        payload.discipline,
        payload.description.trim().to_string(),
        payload.instructor.trim().to_string(),
        payload.room.trim().to_string(),
        payload.starts_at,
        payload.duration_minutes,
        payload.capacity,
    );
    class.image_id = payload.image_id;

    state.store.create_class(class.clone()).await?;

    Ok(json_response(
        StatusCode::CREATED,
        common_headers(&ctx),
        &class,
    ))
}

/// PUT /api/admin/classes/{id} - Update a class.
pub async fn update_class(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: RequestContext,
    body: Bytes,
) -> ApiResult<Response<Body>> {
    require_admin(&ctx, &state.config.session_secret)?;

    let id = parse_uuid(&id)?;
    let payload: ClassPayload = parse_json(&body)?;
    payload.validate()?;

    if let Some(image_id) = payload.image_id {
        state.store.get_image(image_id).await?;
    }

    let mut class = state.store.get_class(id).await?;
    class.title = payload.title.trim().to_string();
    class.discipline = payload.discipline;
    class.description = payload.description.trim().to_string();
    class.instructor = payload.instructor.trim().to_string();
    class.room = payload.room.trim().to_string();
    class.starts_at = payload.starts_at;
    class.duration_minutes = payload.duration_minutes;
    class.capacity = payload.capacity;
    class.image_id = payload.image_id;
    class.touch();

    state.store.update_class(class.clone()).await?;

    Ok(json_response(StatusCode::OK, common_headers(&ctx), &class))
}

/// DELETE /api/admin/classes/{id} - Delete a class.
pub async fn delete_class(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: RequestContext,
) -> ApiResult<Response<Body>> {
    require_admin(&ctx, &state.config.session_secret)?;

    let id = parse_uuid(&id)?;
    state.store.delete_class(id).await?;

    Ok(build_response(
        StatusCode::NO_CONTENT,
        common_headers(&ctx),
        Body::empty(),
    ))
}
