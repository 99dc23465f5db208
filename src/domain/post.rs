//! News post model and its report block

use chrono::NaiveDateTime;

/// A published news item read from the content database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: u64,
    /// Publication time, UTC
    pub published: NaiveDateTime,
    pub title: String,
    /// Rendered HTML content
    pub content: String,
    pub permalink: String,
}

impl Post {
    /// Month label used for report page titles and backup files ("June 2023")
    pub fn month_label(&self) -> String {
        self.published.format("%B %Y").to_string()
    }

    /// Publication date as `YYYY-MM-DD`
    pub fn iso_date(&self) -> String {
        self.published.format("%Y-%m-%d").to_string()
    }

    /// Format this post as a report block, given its converted wikitext
    pub fn to_block(&self, wikitext: &str) -> String {
        format!(
            "\n=== {}: {} ===\n{}\n\n[{} Read more...]",
            self.iso_date(),
            self.title,
            wikitext.trim(),
            self.permalink
        )
    }
}
