//! Upstream payload shapes and the view models built from them.
//!
//! Upstream fields are all optional; missing or `null` values fall back to
//! the same defaults the pages always showed.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

const UNTITLED: &str = "Sin título";
const EMPTY_BODY: &str = "<p>Sin contenido.</p>";

/// `GET posts/` payload.
#[derive(Debug, Default, Deserialize)]
pub struct PostList {
    #[serde(default)]
    pub data: Option<Vec<PostFields>>,
    #[serde(default)]
    pub meta: Option<ListMeta>,
}

/// `GET posts/{slug}/` payload.
#[derive(Debug, Default, Deserialize)]
pub struct PostEnvelope {
    #[serde(default)]
    pub data: Option<PostFields>,
}

/// Post fields read by the views; everything else is ignored.
///
/// Non-string values are rendered as their JSON text instead of failing the
/// whole payload.
#[derive(Debug, Default, Deserialize)]
pub struct PostFields {
    #[serde(default, deserialize_with = "lenient_text")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub published: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub body: Option<String>,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

/// Pagination metadata of a listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListMeta {
    #[serde(default)]
    pub next_page: Value,
    #[serde(default)]
    pub previous_page: Value,
}

/// A post card on the blog index.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PostCard {
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub published: String,
}

impl From<PostFields> for PostCard {
    fn from(post: PostFields) -> Self {
        Self {
            slug: post.slug.unwrap_or_default(),
            title: post.title.unwrap_or_else(|| UNTITLED.to_string()),
            summary: post.summary.unwrap_or_default(),
            published: date_part(post.published.as_deref()),
        }
    }
}

/// A full post page.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PostView {
    pub title: String,
    pub published: String,
    pub body: String,
}

impl From<PostFields> for PostView {
    fn from(post: PostFields) -> Self {
        Self {
            title: post.title.unwrap_or_else(|| UNTITLED.to_string()),
            published: date_part(post.published.as_deref()),
            body: post
                .body
                .filter(|b| !b.is_empty())
                .unwrap_or_else(|| EMPTY_BODY.to_string()),
        }
    }
}

/// Keep the `YYYY-MM-DD` prefix of an ISO-8601 timestamp.
pub fn date_part(published: Option<&str>) -> String {
    published.unwrap_or_default().chars().take(10).collect()
}
