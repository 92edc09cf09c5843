//! Binding between page-change requests and the host location.

use axum::{
    body::Body,
    http::{HeaderValue, Response, Uri},
    response::{IntoResponse, Redirect},
};
use std::collections::BTreeMap;
use thiserror::Error;
use url::form_urlencoded;

use super::link::{page_link, PAGE_PARAM};

/// Failure of the host navigation mechanism. Never retried here; callers
/// receive it untouched.
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("navigation target is not a valid location: {0}")]
    InvalidTarget(String),
    #[error("navigation mechanism unavailable: {0}")]
    Unavailable(String),
}

/// A path plus query parameters describing where the host currently is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    pub path: String,
    pub query: BTreeMap<String, String>,
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: BTreeMap::new(),
        }
    }

    /// Parses a path-and-query string such as an HTTP request target.
    pub fn parse(target: &str) -> Self {
        let (path, raw_query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (target, None),
        };

        let query = raw_query
            .map(|q| {
                form_urlencoded::parse(q.as_bytes())
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            path: path.to_string(),
            query,
        }
    }

    pub fn from_uri(uri: &Uri) -> Self {
        let target = uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| uri.path());
        Self::parse(target)
    }

    /// The raw `page` parameter, if one was supplied.
    pub fn raw_page(&self) -> Option<&str> {
        self.query.get(PAGE_PARAM).map(|s| s.as_str())
    }

    /// The `page` parameter as a validated integer. String state is parsed
    /// once here; an absent or unparsable value falls back to 1.
    pub fn page(&self) -> u64 {
        self.raw_page().and_then(|v| v.parse().ok()).unwrap_or(1)
    }
}

/// Host navigation primitive: read the current location, move to a target.
///
/// Any host able to perform a redirect can implement this; the pagination
/// logic does not care which routing mechanism sits behind it. History stack
/// semantics beyond "push new location" are the host's business.
pub trait Navigator {
    fn current_location(&self) -> Location;

    /// Performs exactly one navigation to `target`. Transient failure is
    /// surfaced to the caller; there is no retry.
    fn navigate(&mut self, target: &str) -> Result<(), NavigationError>;

    /// Requests a move to `requested_page` from the current location.
    ///
    /// Values below 1 are clamped to 1 rather than navigated to. The `page`
    /// parameter of the current location is overwritten; every other
    /// parameter is preserved verbatim. When requests supersede each other
    /// the last navigation wins.
    fn change_page(&mut self, requested_page: u64) -> Result<(), NavigationError> {
        let page = requested_page.max(1);
        let location = self.current_location();
        let target = page_link(&location.path, &location.query, page);
        self.navigate(&target)
    }
}

/// Navigator bound to an HTTP request/response cycle: navigation becomes a
/// `303 See Other` redirect in the response.
#[derive(Debug)]
pub struct RedirectNavigator {
    location: Location,
    target: Option<String>,
}

impl RedirectNavigator {
    pub fn new(location: Location) -> Self {
        Self {
            location,
            target: None,
        }
    }

    pub fn from_uri(uri: &Uri) -> Self {
        Self::new(Location::from_uri(uri))
    }

    /// The redirect response for the most recent navigation, if any.
    pub fn into_response(self) -> Option<Response<Body>> {
        self.target
            .map(|target| Redirect::to(&target).into_response())
    }
}

impl Navigator for RedirectNavigator {
    fn current_location(&self) -> Location {
        self.location.clone()
    }

    fn navigate(&mut self, target: &str) -> Result<(), NavigationError> {
        if HeaderValue::from_str(target).is_err() {
            return Err(NavigationError::InvalidTarget(target.to_string()));
        }
        self.target = Some(target.to_string());
        Ok(())
    }
}
