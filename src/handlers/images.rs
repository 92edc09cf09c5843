//! Image upload and download handlers.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{HeaderValue, Response, StatusCode},
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use bytes::Bytes;
use md5::{Digest, Md5};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::require_admin;
use crate::config::MAX_IMAGE_BYTES;
use crate::context::RequestContext;
use crate::error::{ApiError, ApiResult, ErrorCode};
use crate::models::ImageModel;
use crate::router::AppState;

use super::{build_response, common_headers, json_response, parse_uuid};

/// Accepted image subtypes.
const ACCEPTED_SUBTYPES: &[&str] = &["jpeg", "png", "webp", "gif"];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadedImage {
    #[serde(flatten)]
    image: ImageModel,
    url: String,
}

fn accepted_content_type(raw: &str) -> ApiResult<mime::Mime> {
    let parsed: mime::Mime = raw.parse().map_err(|_| {
        ApiError::with_message(
            ErrorCode::UnsupportedImageType,
            format!("Unparsable content type: {}", raw),
        )
    })?;

    if parsed.type_() != mime::IMAGE || !ACCEPTED_SUBTYPES.contains(&parsed.subtype().as_str()) {
        return Err(ApiError::with_message(
            ErrorCode::UnsupportedImageType,
            format!("Unsupported image content type: {}", parsed),
        ));
    }
    Ok(parsed)
}

/// POST /api/admin/images - Upload an image.
pub async fn upload_image(
    State(state): State<AppState>,
    ctx: RequestContext,
    body: Bytes,
) -> ApiResult<Response<Body>> {
    let auth = require_admin(&ctx, &state.config.session_secret)?;

    let content_type = ctx
        .content_type()
        .ok_or_else(|| ApiError::with_message(ErrorCode::InvalidInput, "Content-Type is required"))?;
    let parsed = accepted_content_type(content_type)?;

    if body.is_empty() {
        return Err(ApiError::with_message(
            ErrorCode::InvalidInput,
            "Image body is empty",
        ));
    }
    if body.len() as u64 > MAX_IMAGE_BYTES {
        return Err(ApiError::new(ErrorCode::RequestBodyTooLarge));
    }

    let md5 = BASE64.encode(Md5::digest(&body));
    if let Some(expected) = ctx.content_md5() {
        if expected != md5 {
            return Err(ApiError::new(ErrorCode::ChecksumMismatch));
        }
    }

    let id = Uuid::new_v4();
    state.images.write(id, body.clone()).await?;

    let image = ImageModel::new(
        id,
        parsed.essence_str().to_string(),
        body.len() as u64,
        md5,
        auth.admin_id,
    );
    state.store.create_image(image.clone()).await?;

    let uploaded = UploadedImage {
        url: format!("/api/images/{}", image.id),
        image,
    };
    Ok(json_response(
        StatusCode::CREATED,
        common_headers(&ctx),
        &uploaded,
    ))
}

/// GET /api/images/{id} - Download an image.
pub async fn download_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: RequestContext,
) -> ApiResult<Response<Body>> {
    let id = parse_uuid(&id)?;
    let image = state.store.get_image(id).await?;
    let data = state.images.read(id).await?;

    let mut headers = common_headers(&ctx);
    headers.insert(
        "Content-Type",
        HeaderValue::from_str(&image.content_type).unwrap(),
    );
    headers.insert("Content-MD5", HeaderValue::from_str(&image.md5).unwrap());

    Ok(build_response(StatusCode::OK, headers, Body::from(data)))
}

/// DELETE /api/admin/images/{id} - Delete an image.
pub async fn delete_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: RequestContext,
) -> ApiResult<Response<Body>> {
    require_admin(&ctx, &state.config.session_secret)?;

    let id = parse_uuid(&id)?;
    state.store.delete_image(id).await?;
    state.images.delete(id).await?;

    Ok(build_response(
        StatusCode::NO_CONTENT,
        common_headers(&ctx),
        Body::empty(),
    ))
}
