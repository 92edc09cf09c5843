//! Request context extraction and handling.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::HeaderMap, request::Parts, Method, Uri},
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use url::form_urlencoded;
use uuid::Uuid;

use crate::config::{Config, MAX_PAGE_SIZE};
use crate::error::ApiError;
use crate::pagination::Location;

/// Extracted request context containing all relevant information.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique request ID.
    pub request_id: String,
    /// HTTP method.
    pub method: Method,
    /// Request URI.
    pub uri: Uri,
    /// Query parameters.
    pub query_params: HashMap<String, String>,
    /// Request headers.
    pub headers: HeaderMap,
    /// Request timestamp.
    pub timestamp: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context from request parts.
    pub fn new(method: Method, uri: Uri, headers: HeaderMap) -> Self {
        let query_params = uri
            .query()
            .map(|q| {
                form_urlencoded::parse(q.as_bytes())
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            request_id: Uuid::new_v4().to_string(),
            method,
            uri,
            query_params,
            headers,
            timestamp: Utc::now(),
        }
    }

    /// Returns the value of a query parameter.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params.get(name).map(|s| s.as_str())
    }

    /// Returns the value of a header.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the bearer token from the Authorization header.
    pub fn bearer_token(&self) -> Option<&str> {
        self.header("authorization")
            .and_then(|v| v.strip_prefix("Bearer "))
    }

    /// Returns the Content-MD5 header value.
    pub fn content_md5(&self) -> Option<&str> {
        self.header("content-md5")
    }

    /// Returns the Content-Type header value.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Returns the Content-Length header value.
    pub fn content_length(&self) -> Option<u64> {
        self.header("content-length").and_then(|v| v.parse().ok())
    }

    /// Returns the request's current location (path plus query).
    pub fn location(&self) -> Location {
        Location::from_uri(&self.uri)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::new(
            parts.method.clone(),
            parts.uri.clone(),
            parts.headers.clone(),
        ))
    }
}

/// Query parameters for paginated listings.
#[derive(Debug, Clone)]
pub struct PageQuery {
    /// Requested page, parsed once at the boundary; an absent or unparsable
    /// value falls back to 1. May be 0 or past the last page.
    pub page: u64,
    /// Items per page, clamped into `[1, MAX_PAGE_SIZE]`.
    pub per_page: u64,
    /// The raw `page` parameter as supplied, for canonicalization.
    raw_page: Option<String>,
}

impl PageQuery {
    pub fn from_context(ctx: &RequestContext, config: &Config) -> Self {
        let raw_page = ctx.query_param("page").map(String::from);
        let page = raw_page
            .as_deref()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1);

        let per_page = ctx
            .query_param("per_page")
            .and_then(|v| v.parse().ok())
            .unwrap_or(config.page_size)
            .clamp(1, MAX_PAGE_SIZE);

        Self {
            page,
            per_page,
            raw_page,
        }
    }

    /// Item offset of the requested page, saturating on absurd values.
    pub fn offset(&self) -> u64 {
        self.page
            .max(1)
            .saturating_sub(1)
            .saturating_mul(self.per_page)
    }

    /// The page the listing should actually serve.
    pub fn canonical_page(&self, total_pages: u64) -> u64 {
        self.page.clamp(1, total_pages)
    }

    /// Whether the supplied `page` parameter differs from its canonical form
    /// (out of range, zero, junk, leading zeros) and the request should be
    /// redirected to the canonical URL.
    pub fn needs_redirect(&self, total_pages: u64) -> bool {
        match &self.raw_page {
            None => false,
            Some(raw) => raw != &self.canonical_page(total_pages).to_string(),
        }
    }
}
