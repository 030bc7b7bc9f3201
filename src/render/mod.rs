//! Server-rendered HTML views.
//!
//! # Data Flow
//! ```text
//! upstream JSON payload
//!     → models.rs (tolerant deserialization, defaults)
//!     → pagination.rs (page request, prev/next links)
//!     → Renderer (Tera templates embedded at compile time)
//!     → HTML string
//! ```
//!
//! # Design Decisions
//! - Templates are compiled into the binary; no template files at runtime
//! - Autoescaping is on; only CMS-authored HTML (summary, body) is raw
//! - Rendering is pure: no I/O, so every view is testable with a payload

pub mod handlers;
pub mod models;
pub mod pagination;

use tera::{Context, Tera};

use crate::config::BrandConfig;
use crate::error::BridgeResult;
use crate::render::models::{PostCard, PostEnvelope, PostList, PostView};
use crate::render::pagination::{PageRequest, Pager};

const TEMPLATES: [(&str, &str); 5] = [
    ("style.css", include_str!("../../templates/style.css")),
    ("base.html", include_str!("../../templates/base.html")),
    ("home.html", include_str!("../../templates/home.html")),
    ("blog_index.html", include_str!("../../templates/blog_index.html")),
    ("blog_post.html", include_str!("../../templates/blog_post.html")),
];

/// Renders the blog pages inside the branded HTML shell.
pub struct Renderer {
    tera: Tera,
    brand: BrandConfig,
}

impl Renderer {
    /// Compile the embedded templates.
    pub fn new(brand: BrandConfig) -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;
        Ok(Self { tera, brand })
    }

    fn context(&self, title: String) -> Context {
        let mut context = Context::new();
        context.insert("brand", &self.brand);
        context.insert("title", &title);
        context
    }

    fn render(&self, template: &str, context: &Context) -> BridgeResult<String> {
        Ok(self.tera.render(template, context)?)
    }

    /// Landing page.
    pub fn home(&self) -> BridgeResult<String> {
        let title = format!("{} - {}", self.brand.name, self.brand.home_title_suffix);
        self.render("home.html", &self.context(title))
    }

    /// Paginated post listing from a `posts/` payload.
    pub fn blog_index(&self, payload: &[u8], page: &PageRequest) -> BridgeResult<String> {
        let list: PostList = serde_json::from_slice(payload)?;
        let pager = Pager::new(page, list.meta.as_ref());
        let posts: Vec<PostCard> = list
            .data
            .unwrap_or_default()
            .into_iter()
            .map(PostCard::from)
            .collect();

        let title = format!("{} • {}", self.brand.name, self.brand.blog_title_suffix);
        let mut context = self.context(title);
        context.insert("posts", &posts);
        context.insert("pager", &pager);
        self.render("blog_index.html", &context)
    }

    /// Single post from a `posts/{slug}/` payload.
    pub fn blog_post(&self, payload: &[u8]) -> BridgeResult<String> {
        let envelope: PostEnvelope = serde_json::from_slice(payload)?;
        let post = PostView::from(envelope.data.unwrap_or_default());

        let title = format!("{} • {}", self.brand.name, post.title);
        let mut context = self.context(title);
        context.insert("post", &post);
        self.render("blog_post.html", &context)
    }
}
