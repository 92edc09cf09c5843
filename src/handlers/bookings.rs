//! Booking handlers.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{Response, StatusCode},
};
use bytes::Bytes;
use serde::Deserialize;

use crate::auth::require_admin;
use crate::context::{PageQuery, RequestContext};
use crate::error::{ApiError, ApiResult, ErrorCode};
use crate::models::{BookingModel, BookingStatus};
use crate::pagination::PageState;
use crate::router::AppState;

use super::{
    common_headers, json_response, parse_json, parse_uuid, redirect_to_page, require_field,
    validate_email, PageEnvelope,
};

/// Payload for booking spots on a class.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    pub name: String,
    pub email: String,
    #[serde(default = "default_spots")]
    pub spots: u32,
}

fn default_spots() -> u32 {
    1
}

/// POST /api/classes/{id}/bookings - Book spots on a class.
pub async fn create_booking(
    State(state): State<AppState>,
    Path(class_id): Path<String>,
    ctx: RequestContext,
    body: Bytes,
) -> ApiResult<Response<Body>> {
    let class_id = parse_uuid(&class_id)?;
    let payload: BookingPayload = parse_json(&body)?;

    require_field(&payload.name, "name")?;
    validate_email(&payload.email)?;
    if payload.spots == 0 {
        return Err(ApiError::with_message(
            ErrorCode::InvalidInput,
            "Field 'spots' must be at least 1",
        ));
    }

    let class = state.store.get_class(class_id).await?;
    if class.is_past(ctx.timestamp) {
        return Err(ApiError::new(ErrorCode::ClassInPast));
    }

    let taken = state.store.confirmed_spots(class_id).await?;
    if taken + u64::from(payload.spots) > u64::from(class.capacity) {
        return Err(ApiError::new(ErrorCode::ClassFull));
    }

    let booking = BookingModel::new(
        class_id,
        payload.name.trim().to_string(),
        payload.email.trim().to_string(),
        payload.spots,
    );
    state.store.create_booking(booking.clone()).await?;

    Ok(json_response(
        StatusCode::CREATED,
        common_headers(&ctx),
        &booking,
    ))
}

/// GET /api/admin/bookings - List bookings, newest first.
///
/// Accepts an optional `status` filter which, like every other query
/// parameter, survives page navigation verbatim.
pub async fn list_bookings(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> ApiResult<Response<Body>> {
    require_admin(&ctx, &state.config.session_secret)?;

    let status = match ctx.query_param("status") {
        None => None,
        Some(raw) => Some(BookingStatus::from_str(raw).ok_or_else(|| {
            ApiError::with_message(
                ErrorCode::InvalidQueryParameterValue,
                format!("Unknown booking status: {}", raw),
            )
        })?),
    };

    let query = PageQuery::from_context(&ctx, &state.config);
    let offset = query.offset();
    let (bookings, total) = state
        .store
        .list_bookings(status, offset, query.per_page)
        .await?;

    let pages = PageState::new(query.page, total, query.per_page);
    if query.needs_redirect(pages.total_pages()) {
        return redirect_to_page(&ctx, query.canonical_page(pages.total_pages()));
    }

    let envelope = PageEnvelope::new(bookings, &pages, &ctx.location());
    Ok(json_response(StatusCode::OK, common_headers(&ctx), &envelope))
}

/// DELETE /api/admin/bookings/{id} - Cancel a booking.
pub async fn cancel_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: RequestContext,
) -> ApiResult<Response<Body>> {
    require_admin(&ctx, &state.config.session_secret)?;

    let id = parse_uuid(&id)?;
    let mut booking = state.store.get_booking(id).await?;
    if booking.status == BookingStatus::Cancelled {
        return Err(ApiError::new(ErrorCode::BookingAlreadyCancelled));
    }

    booking.status = BookingStatus::Cancelled;
    state.store.update_booking(booking.clone()).await?;

    Ok(json_response(StatusCode::OK, common_headers(&ctx), &booking))
}
