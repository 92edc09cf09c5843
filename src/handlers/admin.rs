//! Administrator session and invitation handlers.

use axum::{
    body::Body,
    extract::State,
    http::{Response, StatusCode},
};
use bytes::Bytes;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::{generate_access_key, issue_session_token, require_admin};
use crate::config::{INVITE_TTL_DAYS, SESSION_TTL_HOURS};
use crate::context::RequestContext;
use crate::error::{ApiError, ApiResult, ErrorCode};
use crate::models::{AdminModel, InviteModel};
use crate::router::AppState;

use super::{common_headers, json_response, parse_json, require_field, validate_email};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPayload {
    pub email: String,
    pub key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionResponse {
    token: String,
    expires_at: DateTime<Utc>,
    admin: AdminModel,
}

/// POST /api/admin/sessions - Exchange an email and access key for a
/// session token.
pub async fn create_session(
    State(state): State<AppState>,
    ctx: RequestContext,
    body: Bytes,
) -> ApiResult<Response<Body>> {
    let payload: SessionPayload = parse_json(&body)?;

    // A missing account and a wrong key are indistinguishable to the caller.
    let admin = state
        .store
        .get_admin_by_email(payload.email.trim())
        .await
        .map_err(|_| ApiError::new(ErrorCode::AuthenticationFailed))?;
    if admin.key != payload.key {
        return Err(ApiError::new(ErrorCode::AuthenticationFailed));
    }

    let expires_at = ctx.timestamp + Duration::hours(SESSION_TTL_HOURS);
    let token = issue_session_token(admin.id, expires_at, &state.config.session_secret);

    let response = SessionResponse {
        token,
        expires_at,
        admin,
    };
    Ok(json_response(
        StatusCode::CREATED,
        common_headers(&ctx),
        &response,
    ))
}

/// GET /api/admin/me - The authenticated administrator's own account.
pub async fn current_admin(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> ApiResult<Response<Body>> {
    let auth = require_admin(&ctx, &state.config.session_secret)?;
    let admin = state.store.get_admin(auth.admin_id).await?;

    Ok(json_response(StatusCode::OK, common_headers(&ctx), &admin))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitePayload {
    pub email: String,
}

/// POST /api/admin/invites - Invite an email address to become an
/// administrator.
pub async fn create_invite(
    State(state): State<AppState>,
    ctx: RequestContext,
    body: Bytes,
) -> ApiResult<Response<Body>> {
    let auth = require_admin(&ctx, &state.config.session_secret)?;

    let payload: InvitePayload = parse_json(&body)?;
    let email = require_field(&payload.email, "email")?;
    validate_email(email)?;

    if state.store.get_admin_by_email(email).await.is_ok() {
        return Err(ApiError::new(ErrorCode::AdminAlreadyExists));
    }

    let invite = InviteModel::new(email.to_string(), auth.admin_id, INVITE_TTL_DAYS);
    state.store.create_invite(invite.clone()).await?;

    Ok(json_response(
        StatusCode::CREATED,
        common_headers(&ctx),
        &invite,
    ))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptInvitePayload {
    pub token: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AcceptedInvite {
    #[serde(flatten)]
    admin: AdminModel,
    /// The generated access key, shown once at account creation.
    key: String,
}

/// POST /api/admin/invites/accept - Redeem an invitation and create the
/// administrator account.
pub async fn accept_invite(
    State(state): State<AppState>,
    ctx: RequestContext,
    body: Bytes,
) -> ApiResult<Response<Body>> {
    let payload: AcceptInvitePayload = parse_json(&body)?;
    let name = require_field(&payload.name, "name")?;

    let mut invite = state.store.get_invite(payload.token.trim()).await?;
    if invite.redeemed {
        return Err(ApiError::new(ErrorCode::InviteAlreadyRedeemed));
    }
    if invite.is_expired(ctx.timestamp) {
        return Err(ApiError::new(ErrorCode::InviteExpired));
    }

    let key = generate_access_key();
    let admin = AdminModel::new(
        invite.email.clone(),
        name.to_string(),
        key.clone(),
        Some(invite.created_by),
    );
    state.store.create_admin(admin.clone()).await?;

    invite.redeemed = true;
    state.store.update_invite(invite).await?;

    let accepted = AcceptedInvite { admin, key };
    Ok(json_response(
        StatusCode::CREATED,
        common_headers(&ctx),
        &accepted,
    ))
}
