//! Canonical page link construction.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::collections::BTreeMap;

/// The one query parameter this module owns.
pub const PAGE_PARAM: &str = "page";

/// Characters escaped in query keys and values, beyond controls.
const QUERY_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'%')
    .add(b'&')
    .add(b'=')
    .add(b'+')
    .add(b'?');

/// Builds the canonical URL for `page` at `path`.
///
/// The `page` parameter is set (or overwritten) to the decimal form of
/// `page`; every other parameter in `existing_query` is carried over
/// verbatim. Pure and deterministic: the ordered map input gives stable key
/// ordering, so identical inputs always produce the identical string.
pub fn page_link(path: &str, existing_query: &BTreeMap<String, String>, page: u64) -> String {
    let mut query = existing_query.clone();
    query.insert(PAGE_PARAM.to_string(), page.to_string());

    let serialized: Vec<String> = query
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key, QUERY_ESCAPE),
                utf8_percent_encode(value, QUERY_ESCAPE)
            )
        })
        .collect();

    format!("{}?{}", path, serialized.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn sets_page_on_bare_path() {
        assert_eq!(page_link("/api/classes", &BTreeMap::new(), 1), "/api/classes?page=1");
    }

    #[test]
    fn preserves_existing_parameters() {
        let link = page_link(
            "/admin/bookings",
            &query(&[("sort", "date"), ("filter", "active")]),
            3,
        );
        assert_eq!(link, "/admin/bookings?filter=active&page=3&sort=date");
    }

    #[test]
    fn overwrites_previous_page_value() {
        let link = page_link("/api/classes", &query(&[("page", "2")]), 3);
        assert_eq!(link, "/api/classes?page=3");
    }

    #[test]
    fn is_idempotent() {
        let existing = query(&[("sort", "date"), ("status", "confirmed")]);
        let first = page_link("/admin/bookings", &existing, 4);
        let second = page_link("/admin/bookings", &existing, 4);
        assert_eq!(first, second);
    }

    #[test]
    fn escapes_reserved_characters() {
        let link = page_link("/api/classes", &query(&[("q", "yin & restore")]), 1);
        assert_eq!(link, "/api/classes?page=1&q=yin%20%26%20restore");
    }
}
