//! Tag slug cleanup and translation to display labels

use crate::error::Result;
use std::collections::HashMap;

/// Source of the slug → display-name table
pub trait TagSource {
    /// Fetch the whole table. Called once per run.
    fn fetch_table(&self) -> Result<HashMap<String, String>>;
}

impl TagSource for HashMap<String, String> {
    fn fetch_table(&self) -> Result<HashMap<String, String>> {
        Ok(self.clone())
    }
}

/// How tags are cleaned and rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagStyle {
    /// Wiki template wrapping the display name
    pub display_template: String,
    /// Locale marker removed from the end of slugs
    pub locale_suffix: String,
    /// Slug used for posts without any tag
    pub other_tag: String,
}

impl Default for TagStyle {
    fn default() -> Self {
        TagStyle {
            display_template: "User:Wikimedia Czech Republic's bot/program-en".to_string(),
            locale_suffix: "-en".to_string(),
            other_tag: "other".to_string(),
        }
    }
}

/// Remove a trailing locale marker from a slug
pub fn strip_locale_suffix<'a>(slug: &'a str, suffix: &str) -> &'a str {
    if suffix.is_empty() {
        return slug;
    }
    slug.strip_suffix(suffix).unwrap_or(slug)
}

/// Maps tag slugs to their wiki display form
#[derive(Debug, Clone)]
pub struct TagTranslator {
    table: HashMap<String, String>,
    style: TagStyle,
}

impl TagTranslator {
    pub fn new(table: HashMap<String, String>, style: TagStyle) -> Self {
        TagTranslator { table, style }
    }

    /// Build a translator from a table fetched once from `source`
    pub fn from_source(source: &dyn TagSource, style: TagStyle) -> Result<Self> {
        let table = source.fetch_table()?;
        tracing::debug!(entries = table.len(), "loaded tag lookup table");
        Ok(Self::new(table, style))
    }

    /// Display form of a raw slug. Unknown slugs are shown unchanged;
    /// a slug that is empty once the locale suffix is removed counts as
    /// the fallback tag.
    pub fn translate(&self, raw_slug: &str) -> String {
        let slug = match strip_locale_suffix(raw_slug, &self.style.locale_suffix) {
            "" => self.style.other_tag.as_str(),
            slug => slug,
        };
        let name = self.table.get(slug).map(String::as_str).unwrap_or(slug);
        format!("{{{{{}|{}}}}}", self.style.display_template, name)
    }

    /// Display form of the fallback tag
    pub fn translate_other(&self) -> String {
        self.translate(&self.style.other_tag)
    }

    pub fn other_tag(&self) -> &str {
        &self.style.other_tag
    }
}
