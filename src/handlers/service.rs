//! Service-level handlers.

use axum::{
    body::Body,
    extract::State,
    http::{Response, StatusCode},
};
use serde_json::json;

use crate::context::RequestContext;
use crate::error::ApiResult;
use crate::router::AppState;

use super::{common_headers, json_response};

/// GET / - Service information.
pub async fn service_info(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> ApiResult<Response<Body>> {
    let info = json!({
        "service": "studio-rs",
        "version": env!("CARGO_PKG_VERSION"),
        "imageBytes": state.images.total_size().await,
    });

    Ok(json_response(StatusCode::OK, common_headers(&ctx), &info))
}
