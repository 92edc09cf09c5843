//! Enquiry form handlers.

use axum::{
    body::Body,
    extract::State,
    http::{Response, StatusCode},
};
use bytes::Bytes;
use serde::Deserialize;

use crate::auth::require_admin;
use crate::context::{PageQuery, RequestContext};
use crate::error::ApiResult;
use crate::models::EnquiryModel;
use crate::pagination::PageState;
use crate::router::AppState;

use super::{
    common_headers, json_response, parse_json, redirect_to_page, require_field, validate_email,
    PageEnvelope,
};

/// Payload for the public enquiry form.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryPayload {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// POST /api/enquiries - Submit an enquiry.
pub async fn submit_enquiry(
    State(state): State<AppState>,
    ctx: RequestContext,
    body: Bytes,
) -> ApiResult<Response<Body>> {
    let payload: EnquiryPayload = parse_json(&body)?;

    require_field(&payload.name, "name")?;
    require_field(&payload.message, "message")?;
    validate_email(&payload.email)?;

    let enquiry = EnquiryModel::new(
        payload.name.trim().to_string(),
        payload.email.trim().to_string(),
        payload.message.trim().to_string(),
    );
    state.store.create_enquiry(enquiry.clone()).await?;

    Ok(json_response(
        StatusCode::CREATED,
        common_headers(&ctx),
        &enquiry,
    ))
}

/// GET /api/admin/enquiries - List enquiries, newest first.
pub async fn list_enquiries(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> ApiResult<Response<Body>> {
    require_admin(&ctx, &state.config.session_secret)?;

    let query = PageQuery::from_context(&ctx, &state.config);
    let offset = query.offset();
    let (enquiries, total) = state.store.list_enquiries(offset, query.per_page).await?;

    let pages = PageState::new(query.page, total, query.per_page);
    if query.needs_redirect(pages.total_pages()) {
        return redirect_to_page(&ctx, query.canonical_page(pages.total_pages()));
    }

    let envelope = PageEnvelope::new(enquiries, &pages, &ctx.location());
    Ok(json_response(StatusCode::OK, common_headers(&ctx), &envelope))
}
