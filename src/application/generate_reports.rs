//! Monthly report generation use case
//!
//! Fetches closed-month posts, files them by month and primary tag, and
//! publishes every month that has no report page yet.

use crate::application::publish::{PublishOutcome, Publisher};
use crate::domain::{markup, ReportBook, TagTranslator, YearMonth};
use crate::error::Result;
use crate::infrastructure::{MarkupConverter, PostRepository, WikiClient};
use std::collections::HashMap;

/// Options for a run
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Category whose posts are reported (None = all posts)
    pub category: Option<String>,

    /// Only report posts from this month
    pub month: Option<YearMonth>,

    /// Wiki template rendered at the top of every report
    pub header_template: String,
}

/// Counts and month labels of a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub posts_filed: usize,
    /// Months skipped because their page already existed before aggregation
    pub skipped: Vec<String>,
    pub published: Vec<String>,
    /// Months whose page appeared between aggregation and publishing
    pub already_published: Vec<String>,
    pub error_logged: Vec<String>,
}

/// Service for generating and publishing monthly reports
pub struct GenerateReportsService<'a> {
    posts: &'a dyn PostRepository,
    wiki: &'a dyn WikiClient,
    converter: &'a dyn MarkupConverter,
    translator: &'a TagTranslator,
    publisher: Publisher<'a>,
}

impl<'a> GenerateReportsService<'a> {
    pub fn new(
        posts: &'a dyn PostRepository,
        wiki: &'a dyn WikiClient,
        converter: &'a dyn MarkupConverter,
        translator: &'a TagTranslator,
        publisher: Publisher<'a>,
    ) -> Self {
        GenerateReportsService {
            posts,
            wiki,
            converter,
            translator,
            publisher,
        }
    }

    /// Execute the run
    ///
    /// # Errors
    ///
    /// Database, conversion and wiki failures abort the run. A spam-filter
    /// rejection of a report page is recovered by the publisher.
    pub fn execute(&self, options: &GenerateOptions) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        let book = self.collect(options, &mut summary)?;
        summary.posts_filed = book.post_count();

        let other = self.translator.translate_other();
        for month in book.months() {
            let text = month.render(&options.header_template, &other);
            match self.publisher.publish(&month.label, &text)? {
                PublishOutcome::Published => summary.published.push(month.label.clone()),
                PublishOutcome::AlreadyPublished => {
                    summary.already_published.push(month.label.clone())
                }
                PublishOutcome::ErrorLogged => summary.error_logged.push(month.label.clone()),
            }
        }

        Ok(summary)
    }

    /// File every post of an unpublished month into a report book
    pub fn collect(&self, options: &GenerateOptions, summary: &mut RunSummary) -> Result<ReportBook> {
        let posts = self
            .posts
            .get_posts(options.category.as_deref(), options.month)?;
        tracing::info!(count = posts.len(), "fetched posts");

        let mut book = ReportBook::new();
        let mut month_published: HashMap<String, bool> = HashMap::new();

        for post in posts {
            let label = post.month_label();

            let published = match month_published.get(&label) {
                Some(published) => *published,
                None => {
                    let title = self.publisher.page_title(&label);
                    let exists = self.wiki.page_exists(&title)?;
                    if exists {
                        println!("Skipping {}", title);
                        summary.skipped.push(label.clone());
                    }
                    month_published.insert(label.clone(), exists);
                    exists
                }
            };
            if published {
                continue;
            }

            // Posts with several tags are filed under the first one only
            let tags = self.posts.get_post_tags(post.id)?;
            let tag = match tags.first() {
                Some(first) => self.translator.translate(first),
                None => self.translator.translate_other(),
            };

            let wikitext = markup::normalize(&self.converter.html_to_wikitext(&post.content)?);
            tracing::debug!(post = post.id, month = %label, %tag, "filed post");

            book.push(&label, &tag, post.to_block(&wikitext));
        }

        Ok(book)
    }
}
