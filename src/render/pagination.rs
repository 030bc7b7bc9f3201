//! Blog index pagination.

use serde::Serialize;
use serde_json::Value;

use crate::config::BlogConfig;
use crate::render::models::ListMeta;

/// Page requested by the client, normalized against the blog config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    /// Parse `page` and `page_size` query values.
    ///
    /// Unparseable or zero pages become 1. Unparseable sizes fall back to the
    /// default; parsed sizes are clamped to `1..=max_page_size`.
    pub fn from_query(page: Option<&str>, page_size: Option<&str>, blog: &BlogConfig) -> Self {
        let page = page
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|p| *p > 0)
            .unwrap_or(1);

        let page_size = page_size
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or(blog.default_page_size)
            .clamp(1, blog.max_page_size.max(1));

        Self { page, page_size }
    }

    /// Query items sent upstream for this page.
    pub fn upstream_params(&self) -> Vec<(String, String)> {
        vec![
            ("page".to_string(), self.page.to_string()),
            ("page_size".to_string(), self.page_size.to_string()),
        ]
    }

    fn query_for(&self, page: u32) -> String {
        format!("?page={}&page_size={}", page, self.page_size)
    }
}

/// Prev/next links rendered under the post grid.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Pager {
    pub current: u32,
    pub has_prev: bool,
    pub has_next: bool,
    /// Query string for the previous link, empty when there is none.
    pub prev_query: String,
    /// Query string for the next link, empty when there is none.
    pub next_query: String,
}

impl Pager {
    pub fn new(request: &PageRequest, meta: Option<&ListMeta>) -> Self {
        let has_prev = meta.map(|m| is_truthy(&m.previous_page)).unwrap_or(false);
        let has_next = meta.map(|m| is_truthy(&m.next_page)).unwrap_or(false);

        // Never link below page 1, whatever upstream claims.
        let prev_query = match (has_prev, request.page > 1) {
            (true, true) => request.query_for(request.page - 1),
            _ => String::new(),
        };
        let next_query = if has_next {
            request.query_for(request.page.saturating_add(1))
        } else {
            String::new()
        };

        Self {
            current: request.page,
            has_prev: !prev_query.is_empty(),
            has_next,
            prev_query,
            next_query,
        }
    }
}

/// JSON truthiness: null, false, 0, "" and empty containers are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
