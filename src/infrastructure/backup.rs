//! Local backup copies of generated reports

use crate::error::{ReportError, Result};
use std::fs;
use std::path::PathBuf;
use url::Url;

/// Directory of `<Month Year>.txt` files, also served publicly
#[derive(Debug, Clone)]
pub struct BackupStore {
    dir: PathBuf,
    public_url: Url,
}

impl BackupStore {
    pub fn new(dir: impl Into<PathBuf>, public_url: &str) -> Result<Self> {
        let public_url = Url::parse(public_url)?;
        if public_url.cannot_be_a_base() {
            return Err(ReportError::Config(format!(
                "backup public_url cannot be used as a base: {}",
                public_url
            )));
        }

        Ok(BackupStore {
            dir: dir.into(),
            public_url,
        })
    }

    fn file_name(month_label: &str) -> String {
        format!("{}.txt", month_label)
    }

    /// Path of the backup file for a month
    pub fn path_for(&self, month_label: &str) -> PathBuf {
        self.dir.join(Self::file_name(month_label))
    }

    /// Write (or overwrite) the backup for a month
    pub fn write(&self, month_label: &str, text: &str) -> Result<PathBuf> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }

        let path = self.path_for(month_label);
        fs::write(&path, text)?;
        tracing::debug!(path = %path.display(), "wrote report backup");
        Ok(path)
    }

    /// Public URL of the backup for a month, with the file name percent-encoded
    pub fn public_url_for(&self, month_label: &str) -> Result<Url> {
        let mut url = self.public_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ReportError::Config(format!("invalid backup public_url: {}", self.public_url))
            })?
            .pop_if_empty()
            .push(&Self::file_name(month_label));
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_dir() {
        let temp = TempDir::new().unwrap();
        let store = BackupStore::new(temp.path().join("reports"), "https://example.org/r/").unwrap();

        let path = store.write("June 2023", "report text").unwrap();

        assert_eq!(path, temp.path().join("reports").join("June 2023.txt"));
        assert_eq!(fs::read_to_string(path).unwrap(), "report text");
    }

    #[test]
    fn test_write_overwrites() {
        let temp = TempDir::new().unwrap();
        let store = BackupStore::new(temp.path(), "https://example.org/r/").unwrap();

        store.write("June 2023", "first").unwrap();
        store.write("June 2023", "second").unwrap();

        assert_eq!(
            fs::read_to_string(store.path_for("June 2023")).unwrap(),
            "second"
        );
    }

    #[test]
    fn test_public_url_is_encoded() {
        let store = BackupStore::new("/tmp", "https://wmcz.toolforge.org/.wmcz_meta_reports/").unwrap();
        assert_eq!(
            store.public_url_for("June 2023").unwrap().as_str(),
            "https://wmcz.toolforge.org/.wmcz_meta_reports/June%202023.txt"
        );
    }

    #[test]
    fn test_public_url_without_trailing_slash() {
        let store = BackupStore::new("/tmp", "https://example.org/reports").unwrap();
        assert_eq!(
            store.public_url_for("May 2024").unwrap().as_str(),
            "https://example.org/reports/May%202024.txt"
        );
    }

    #[test]
    fn test_rejects_non_base_url() {
        assert!(BackupStore::new("/tmp", "mailto:someone@example.org").is_err());
    }
}
