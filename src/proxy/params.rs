//! Query parameter handling for upstream calls.
//!
//! # Responsibilities
//! - Decode inbound query strings into ordered items
//! - Drop any client-supplied credential
//! - Append the server-held credential exactly once

/// Query parameter carrying the upstream API credential.
pub const AUTH_PARAM: &str = "auth_token";

/// Decode a raw query string into `(key, value)` items, preserving order.
pub fn parse_query(raw: Option<&str>) -> Vec<(String, String)> {
    match raw {
        Some(query) => url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect(),
        None => Vec::new(),
    }
}

/// Build the upstream query from inbound items and the server token.
///
/// Items are grouped by key in first-appearance order. Keys matching
/// `auth_token` in any case are discarded, and the server token is appended
/// last.
pub fn merge_query_params<I>(items: I, token: &str) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut grouped: Vec<(String, Vec<String>)> = Vec::new();

    for (key, value) in items {
        if key.eq_ignore_ascii_case(AUTH_PARAM) {
            continue;
        }
        match grouped.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => grouped.push((key, vec![value])),
        }
    }

    let mut merged: Vec<(String, String)> = grouped
        .into_iter()
        .flat_map(|(key, values)| values.into_iter().map(move |v| (key.clone(), v)))
        .collect();
    merged.push((AUTH_PARAM.to_string(), token.to_string()));
    merged
}
