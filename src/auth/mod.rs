//! Authentication for the admin area.

mod token;

pub use token::*;

use crate::context::RequestContext;
use crate::error::{ApiError, ApiResult, ErrorCode};

/// Verified identity of an authenticated administrator request.
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub admin_id: uuid::Uuid,
}

/// Authenticates an admin request from its bearer token.
pub fn require_admin(ctx: &RequestContext, session_secret: &str) -> ApiResult<AuthResult> {
    let token = ctx
        .bearer_token()
        .ok_or_else(|| ApiError::new(ErrorCode::AuthenticationFailed))?;

    let claims = verify_session_token(token, session_secret, ctx.timestamp)?;

    Ok(AuthResult {
        admin_id: claims.admin_id,
    })
}
