//! Publishing one month's report to the wiki

use crate::error::{ReportError, Result};
use crate::infrastructure::config::WikiSettings;
use crate::infrastructure::{BackupStore, WikiClient};

/// Page titles and edit summaries used when publishing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishSettings {
    pub report_prefix: String,
    pub error_page: String,
    pub report_summary: String,
    pub error_summary: String,
}

impl From<&WikiSettings> for PublishSettings {
    fn from(settings: &WikiSettings) -> Self {
        PublishSettings {
            report_prefix: settings.report_prefix.clone(),
            error_page: settings.error_page.clone(),
            report_summary: settings.report_summary.clone(),
            error_summary: settings.error_summary.clone(),
        }
    }
}

impl Default for PublishSettings {
    fn default() -> Self {
        PublishSettings::from(&WikiSettings::default())
    }
}

/// What happened to a month's report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The report page was saved
    Published,
    /// A page for the month already existed; nothing was written
    AlreadyPublished,
    /// The spam filter rejected the page; an entry was added to the error page
    ErrorLogged,
}

/// Writes report backups and pages
pub struct Publisher<'a> {
    wiki: &'a dyn WikiClient,
    backup: &'a BackupStore,
    settings: PublishSettings,
}

impl<'a> Publisher<'a> {
    pub fn new(wiki: &'a dyn WikiClient, backup: &'a BackupStore, settings: PublishSettings) -> Self {
        Publisher {
            wiki,
            backup,
            settings,
        }
    }

    /// Title of the report page for a month
    pub fn page_title(&self, month_label: &str) -> String {
        format!("{}/{}", self.settings.report_prefix, month_label)
    }

    /// Back up and publish a month's report unless its page already exists
    pub fn publish(&self, month_label: &str, text: &str) -> Result<PublishOutcome> {
        let title = self.page_title(month_label);
        if self.wiki.page_exists(&title)? {
            tracing::info!(page = %title, "page appeared during run, not overwriting");
            return Ok(PublishOutcome::AlreadyPublished);
        }

        self.backup.write(month_label, text)?;

        match self
            .wiki
            .save_page(&title, text, &self.settings.report_summary)
        {
            Ok(()) => {
                tracing::info!(page = %title, "published report");
                Ok(PublishOutcome::Published)
            }
            Err(ReportError::SpamBlacklist { matched, .. }) => {
                println!("ERROR: SpamblacklistError, reporting to meta");
                tracing::warn!(page = %title, %matched, "spam blacklist hit");
                self.log_error(month_label)?;
                Ok(PublishOutcome::ErrorLogged)
            }
            Err(e) => Err(e),
        }
    }

    /// Append a spam-blacklist notice for a month to the error page
    fn log_error(&self, month_label: &str) -> Result<()> {
        let backup_url = self.backup.public_url_for(month_label)?;
        let mut text = self.wiki.page_text(&self.settings.error_page)?;
        text.push_str(&format!(
            "\n* [[{}|{}]]: spam blacklist hit ([{} content available])",
            self.page_title(month_label),
            month_label,
            backup_url
        ));

        self.wiki
            .save_page(&self.settings.error_page, &text, &self.settings.error_summary)
    }
}
