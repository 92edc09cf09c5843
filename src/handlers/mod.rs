//! Request handlers for the studio API.

mod admin;
mod bookings;
mod classes;
mod enquiries;
mod images;
mod service;

pub use admin::*;
pub use bookings::*;
pub use classes::*;
pub use enquiries::*;
pub use images::*;
pub use service::*;

use axum::body::Body;
use axum::http::{HeaderMap, HeaderValue, Response, StatusCode};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use uuid::Uuid;

use crate::context::RequestContext;
use crate::error::{ApiError, ApiResult, ErrorCode};
use crate::pagination::{page_link, Location, Navigator, PageState, RedirectNavigator};

/// Creates common response headers.
pub fn common_headers(ctx: &RequestContext) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        "x-request-id",
        HeaderValue::from_str(&ctx.request_id).unwrap(),
    );
    headers.insert(
        "server",
        HeaderValue::from_static(concat!("studio-rs/", env!("CARGO_PKG_VERSION"))),
    );
    headers
}

/// Builds a response with the given status, headers, and body.
pub fn build_response(status: StatusCode, headers: HeaderMap, body: Body) -> Response<Body> {
    let mut response = Response::builder().status(status).body(body).unwrap();
    *response.headers_mut() = headers;
    response
}

/// Builds a JSON response with the given status and value.
pub fn json_response<T: Serialize>(
    status: StatusCode,
    mut headers: HeaderMap,
    value: &T,
) -> Response<Body> {
    headers.insert("Content-Type", HeaderValue::from_static("application/json"));
    let body = serde_json::to_vec(value).unwrap();
    build_response(status, headers, Body::from(body))
}

/// Parses a JSON request body.
pub fn parse_json<T: serde::de::DeserializeOwned>(body: &[u8]) -> ApiResult<T> {
    serde_json::from_slice(body).map_err(|e| {
        ApiError::with_message(ErrorCode::InvalidInput, format!("Invalid JSON body: {}", e))
    })
}

/// Parses a path identifier as a UUID.
pub fn parse_uuid(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| {
        ApiError::with_message(ErrorCode::InvalidInput, format!("Invalid identifier: {}", raw))
    })
}

/// Returns the trimmed value of a required string field.
pub fn require_field<'a>(value: &'a str, name: &str) -> ApiResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::with_message(
            ErrorCode::MissingRequiredField,
            format!("Field '{}' is required", name),
        ));
    }
    Ok(trimmed)
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

/// Validates the shape of an email address.
pub fn validate_email(email: &str) -> ApiResult<()> {
    let re = EMAIL_RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());
    if re.is_match(email) {
        Ok(())
    } else {
        Err(ApiError::new(ErrorCode::InvalidEmail))
    }
}

/// Redirects a listing request to its canonical page URL, preserving every
/// other query parameter.
pub fn redirect_to_page(ctx: &RequestContext, page: u64) -> ApiResult<Response<Body>> {
    let mut nav = RedirectNavigator::new(ctx.location());
    nav.change_page(page)?;
    nav.into_response()
        .ok_or_else(|| ApiError::new(ErrorCode::NavigationFailed))
}

/// Page links for a listing response.
#[derive(Debug, Serialize)]
pub struct PageLinks {
    #[serde(rename = "self")]
    pub current: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// Envelope for paginated listing responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
    pub has_previous: bool,
    pub has_next: bool,
    /// Page numbers to render in the pagination control.
    pub window: Vec<u64>,
    pub links: PageLinks,
}

impl<T: Serialize> PageEnvelope<T> {
    /// Builds the envelope for one page, with links derived from the
    /// request's own location.
    pub fn new(items: Vec<T>, state: &PageState, location: &Location) -> Self {
        let view = state.view();
        let links = PageLinks {
            current: page_link(&location.path, &location.query, view.display_page),
            prev: view
                .has_previous
                .then(|| page_link(&location.path, &location.query, view.display_page - 1)),
            next: view
                .has_next
                .then(|| page_link(&location.path, &location.query, view.display_page + 1)),
        };

        Self {
            items,
            page: view.display_page,
            per_page: state.items_per_page(),
            total_items: state.total_items(),
            total_pages: view.total_pages,
            has_previous: view.has_previous,
            has_next: view.has_next,
            window: view.pages,
            links,
        }
    }
}
