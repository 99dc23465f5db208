//! News post repository backed by the content database

use crate::domain::tags::strip_locale_suffix;
use crate::domain::{exclusion_cutoff, Post, YearMonth};
use crate::error::Result;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use sqlx::mysql::{MySql, MySqlPool, MySqlPoolOptions};
use sqlx::QueryBuilder;
use tokio::runtime::Runtime;

/// Read access to published news posts
pub trait PostRepository {
    /// Published posts, optionally limited to a category and a month.
    ///
    /// Posts from the last 30 days (relative to the time of the call) are
    /// always excluded.
    fn get_posts(&self, category: Option<&str>, month: Option<YearMonth>) -> Result<Vec<Post>>;

    /// Tag slugs of one post with the locale suffix removed, in database order
    fn get_post_tags(&self, post_id: u64) -> Result<Vec<String>>;
}

#[derive(sqlx::FromRow)]
struct PostRow {
    #[sqlx(rename = "ID")]
    id: u64,
    post_date_gmt: NaiveDateTime,
    post_title: String,
    post_content: String,
    guid: String,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            published: row.post_date_gmt,
            title: row.post_title,
            content: row.post_content,
            permalink: row.guid,
        }
    }
}

/// Conditions of one post selection, with the values to bind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFilter {
    pub category: Option<String>,
    pub date_pattern: Option<String>,
    /// Posts must be published strictly before this date (`YYYY-MM-DD`)
    pub published_before: String,
}

impl PostFilter {
    /// Filter for a call made on `today`
    pub fn new(category: Option<&str>, month: Option<YearMonth>, today: NaiveDate) -> Self {
        PostFilter {
            category: category.map(str::to_string),
            date_pattern: month.map(|m| m.like_pattern()),
            published_before: exclusion_cutoff(today).format("%Y-%m-%d").to_string(),
        }
    }

    /// Bound values, in placeholder order
    pub fn params(&self) -> Vec<&str> {
        self.category
            .iter()
            .chain(self.date_pattern.iter())
            .chain(std::iter::once(&self.published_before))
            .map(String::as_str)
            .collect()
    }
}

/// Build the post selection query
pub fn build_posts_query(filter: &PostFilter) -> QueryBuilder<'static, MySql> {
    let mut query = QueryBuilder::new(
        "SELECT ID, post_date_gmt, post_title, post_content, guid FROM news_web WHERE ",
    );

    let mut conditions = query.separated(" AND ");
    if let Some(category) = &filter.category {
        conditions.push("ID IN (SELECT post_id FROM news_category WHERE slug = ");
        conditions.push_bind_unseparated(category.clone());
        conditions.push_unseparated(")");
    }
    if let Some(pattern) = &filter.date_pattern {
        conditions.push("post_date_gmt LIKE ");
        conditions.push_bind_unseparated(pattern.clone());
    }
    conditions.push("post_date_gmt < ");
    conditions.push_bind_unseparated(filter.published_before.clone());

    query
}

/// MySQL implementation of PostRepository.
///
/// Queries run on a private current-thread runtime, so callers stay blocking.
pub struct MySqlPostRepository {
    runtime: Runtime,
    pool: MySqlPool,
    locale_suffix: String,
}

impl MySqlPostRepository {
    /// Connect to the database at `url`
    pub fn connect(url: &str, locale_suffix: impl Into<String>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let pool = runtime.block_on(
            MySqlPoolOptions::new()
                .max_connections(1)
                .connect(url),
        )?;
        tracing::debug!("connected to content database");

        Ok(MySqlPostRepository {
            runtime,
            pool,
            locale_suffix: locale_suffix.into(),
        })
    }
}

impl PostRepository for MySqlPostRepository {
    fn get_posts(&self, category: Option<&str>, month: Option<YearMonth>) -> Result<Vec<Post>> {
        let filter = PostFilter::new(category, month, Utc::now().date_naive());
        let mut query = build_posts_query(&filter);
        tracing::debug!(sql = query.sql(), params = ?filter.params(), "fetching posts");

        let rows: Vec<PostRow> = self
            .runtime
            .block_on(query.build_query_as::<PostRow>().fetch_all(&self.pool))?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    fn get_post_tags(&self, post_id: u64) -> Result<Vec<String>> {
        let slugs: Vec<String> = self.runtime.block_on(
            sqlx::query_scalar::<_, String>("SELECT slug FROM news_tags WHERE post_id = ?")
                .bind(post_id)
                .fetch_all(&self.pool),
        )?;

        Ok(slugs
            .iter()
            .map(|slug| strip_locale_suffix(slug, &self.locale_suffix).to_string())
            .collect())
    }
}
