use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use folio_core::error::CoreError;
use folio_core::slug::slugify;
use folio_core::validation::validate_batch;
use folio_db::models::post::{NewPost, POST_STATUS_DRAFT, POST_STATUS_PUBLISHED};
use folio_db::store::{DataStore, Entity};

use super::{clear_entity, key_index, resolve};
use crate::operation::{Operation, OperationConfig};

const CONFIG: OperationConfig =
    OperationConfig::new("posts", 40, "Blog posts by the admin author")
        .depends_on(&["users", "categories"]);

pub(crate) struct PostFixture {
    pub title: &'static str,
    pub category: &'static str,
    pub tags: &'static [&'static str],
    /// Days before the run the post was published; `None` leaves it a draft.
    pub published_days_ago: Option<i64>,
    pub excerpt: &'static str,
    pub body: &'static str,
}

pub(crate) const POSTS: &[PostFixture] = &[
    PostFixture {
        title: "Why We Rewrote Our Importer in Rust",
        category: "engineering",
        tags: &["rust", "postgresql", "case-study"],
        published_days_ago: Some(21),
        excerpt: "Memory use dropped by an order of magnitude.",
        body: "The old importer buffered whole files in memory. The new one streams \
               rows straight into COPY and never holds more than one batch.",
    },
    PostFixture {
        title: "Designing Accessible Forms",
        category: "design",
        tags: &["accessibility", "product"],
        published_days_ago: Some(14),
        excerpt: "Labels, focus order, and error messages that screen readers announce.",
        body: "Every input gets a visible label, errors are linked with aria-describedby, \
               and focus moves to the first invalid field on submit.",
    },
    PostFixture {
        title: "We Are Hiring Backend Engineers",
        category: "company-news",
        tags: &["hiring", "rust"],
        published_days_ago: Some(3),
        excerpt: "Two open roles on the platform team.",
        body: "We are looking for engineers comfortable with Rust, SQL, and on-call.",
    },
    PostFixture {
        title: "Roadmap Notes for Next Quarter",
        category: "company-news",
        tags: &["product"],
        published_days_ago: None,
        excerpt: "Draft notes, not yet reviewed.",
        body: "Search, scheduled publishing, and a revamped media library.",
    },
];

/// Creates blog posts, resolving the author by email and categories by slug.
pub struct SeedPosts {
    store: Arc<dyn DataStore>,
    author_email: String,
}

impl SeedPosts {
    pub fn new(store: Arc<dyn DataStore>, author_email: String) -> Self {
        Self {
            store,
            author_email,
        }
    }
}

#[async_trait]
impl Operation for SeedPosts {
    fn config(&self) -> &OperationConfig {
        &CONFIG
    }

    async fn execute(&self) -> anyhow::Result<u64> {
        let users = self.store.list_users().await.context("failed to load users")?;
        let authors = key_index(&users, |u| u.email.as_str(), |u| u.id);
        let author_id = resolve(&authors, "user", &self.author_email)?;

        let categories = self
            .store
            .list_categories()
            .await
            .context("failed to load categories")?;
        let categories = key_index(&categories, |c| c.slug.as_str(), |c| c.id);

        let now = Utc::now();
        let rows = POSTS
            .iter()
            .map(|fixture| {
                let category_id = resolve(&categories, "category", fixture.category)?;
                let (status, published_at) = match fixture.published_days_ago {
                    Some(days) => (POST_STATUS_PUBLISHED, Some(now - Duration::days(days))),
                    None => (POST_STATUS_DRAFT, None),
                };
                Ok(NewPost {
                    title: fixture.title.to_string(),
                    slug: slugify(fixture.title),
                    excerpt: Some(fixture.excerpt.to_string()),
                    body: fixture.body.to_string(),
                    status: status.to_string(),
                    author_id,
                    category_id,
                    published_at,
                })
            })
            .collect::<Result<Vec<_>, CoreError>>()?;
        validate_batch("post", &rows)?;

        let created = self
            .store
            .insert_posts(&rows)
            .await
            .context("failed to insert posts")?;
        Ok(created.len() as u64)
    }

    async fn clear(&self) -> anyhow::Result<()> {
        clear_entity(self.store.as_ref(), Entity::Post).await
    }
}
