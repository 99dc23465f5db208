#![allow(dead_code, deprecated)]

use assert_cmd::Command;
use chrono::NaiveDate;
use meta_reports::domain::{Post, YearMonth};
use meta_reports::error::{ReportError, Result};
use meta_reports::infrastructure::{MarkupConverter, PostRepository, WikiClient};
use std::cell::RefCell;
use std::collections::HashMap;

pub fn meta_reports_cmd() -> Command {
    let mut cmd = Command::cargo_bin("meta-reports").unwrap();
    cmd.env_remove("META_REPORTS_CONFIG");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Build a post published at noon on `date` (YYYY-MM-DD)
pub fn post(id: u64, date: &str, title: &str, html: &str, url: &str) -> Post {
    Post {
        id,
        published: NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap(),
        title: title.to_string(),
        content: html.to_string(),
        permalink: url.to_string(),
    }
}

/// In-memory post table
#[derive(Default)]
pub struct FakePosts {
    pub posts: Vec<Post>,
    pub tags: HashMap<u64, Vec<String>>,
}

impl FakePosts {
    pub fn with_post(mut self, post: Post, tags: &[&str]) -> Self {
        self.tags
            .insert(post.id, tags.iter().map(|t| t.to_string()).collect());
        self.posts.push(post);
        self
    }
}

impl PostRepository for FakePosts {
    fn get_posts(&self, _category: Option<&str>, month: Option<YearMonth>) -> Result<Vec<Post>> {
        let prefix = month.map(|m| m.like_pattern().trim_end_matches('%').to_string());
        Ok(self
            .posts
            .iter()
            .filter(|p| match &prefix {
                Some(prefix) => p.iso_date().starts_with(prefix.as_str()),
                None => true,
            })
            .cloned()
            .collect())
    }

    fn get_post_tags(&self, post_id: u64) -> Result<Vec<String>> {
        Ok(self.tags.get(&post_id).cloned().unwrap_or_default())
    }
}

/// Drops paragraph tags and wraps the result in editor comments
pub struct FakeConverter;

impl MarkupConverter for FakeConverter {
    fn html_to_wikitext(&self, html: &str) -> Result<String> {
        let text = html.replace("<p>", "").replace("</p>", "\n\n\n");
        Ok(format!("<!-- wp:paragraph -->\n{}<!-- /wp:paragraph -->\n", text))
    }
}

/// In-memory wiki with a spam filter
#[derive(Default)]
pub struct FakeWiki {
    pub pages: RefCell<HashMap<String, String>>,
    pub spam_patterns: Vec<String>,
    /// Saves that fail with a non-policy error
    pub broken: bool,
    /// Pages whose saves fail with a non-policy error
    pub failing_saves: Vec<String>,
    /// Page created by someone else right after its first existence check
    pub created_concurrently: Option<String>,
    pub exists_checks: RefCell<Vec<String>>,
    pub saves: RefCell<Vec<(String, String)>>,
}

impl FakeWiki {
    pub fn with_page(self, title: &str, text: &str) -> Self {
        self.pages
            .borrow_mut()
            .insert(title.to_string(), text.to_string());
        self
    }

    pub fn text(&self, title: &str) -> Option<String> {
        self.pages.borrow().get(title).cloned()
    }

    pub fn exists_checks_for(&self, title: &str) -> usize {
        self.exists_checks
            .borrow()
            .iter()
            .filter(|t| t.as_str() == title)
            .count()
    }
}

impl WikiClient for FakeWiki {
    fn page_exists(&self, title: &str) -> Result<bool> {
        self.exists_checks.borrow_mut().push(title.to_string());
        let exists = self.pages.borrow().contains_key(title);

        if !exists && self.created_concurrently.as_deref() == Some(title) {
            self.pages
                .borrow_mut()
                .insert(title.to_string(), "written by a human".to_string());
        }

        Ok(exists)
    }

    fn page_text(&self, title: &str) -> Result<String> {
        Ok(self.text(title).unwrap_or_default())
    }

    fn save_page(&self, title: &str, text: &str, summary: &str) -> Result<()> {
        if self.broken || self.failing_saves.iter().any(|t| t == title) {
            return Err(ReportError::Wiki {
                code: "readonly".to_string(),
                info: "The wiki is in read-only mode".to_string(),
            });
        }

        if let Some(pattern) = self.spam_patterns.iter().find(|p| text.contains(p.as_str())) {
            return Err(ReportError::SpamBlacklist {
                title: title.to_string(),
                matched: pattern.clone(),
            });
        }

        self.pages
            .borrow_mut()
            .insert(title.to_string(), text.to_string());
        self.saves
            .borrow_mut()
            .push((title.to_string(), summary.to_string()));
        Ok(())
    }
}
