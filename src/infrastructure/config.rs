//! Configuration management

use crate::domain::TagStyle;
use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable pointing at the config file
pub const CONFIG_ENV: &str = "META_REPORTS_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "meta-reports.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseSettings,
    pub wiki: WikiSettings,
    pub tags: TagSettings,
    pub conversion: ConversionSettings,
    pub backup: BackupSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: String,
    /// Category whose posts are reported
    pub category: Option<String>,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            url: "mysql://localhost/s53887__wmcz_website_p".to_string(),
            category: Some("nezarazene-en".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WikiSettings {
    pub api_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub report_prefix: String,
    pub error_page: String,
    pub header_template: String,
    pub report_summary: String,
    pub error_summary: String,
    pub timeout_secs: u64,
}

impl Default for WikiSettings {
    fn default() -> Self {
        WikiSettings {
            api_url: "https://meta.wikimedia.org/w/api.php".to_string(),
            username: None,
            password: None,
            report_prefix: "Wikimedia Czech Republic/Reports".to_string(),
            error_page: "User:Wikimedia Czech Republic's bot/Reports/Errors".to_string(),
            header_template: "User:Wikimedia Czech Republic's bot/Reports/Header".to_string(),
            report_summary: "Bot: Prepare WMCZ's monthly report".to_string(),
            error_summary: "Bot: Report an error".to_string(),
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagSettings {
    pub lookup_url: String,
    pub display_template: String,
    pub other_tag: String,
    pub locale_suffix: String,
}

impl Default for TagSettings {
    fn default() -> Self {
        let style = TagStyle::default();
        TagSettings {
            lookup_url: "https://meta.wikimedia.org/wiki/User:Wikimedia_Czech_Republic%27s_bot/programs.json?action=raw&ctype=application/json".to_string(),
            display_template: style.display_template,
            other_tag: style.other_tag,
            locale_suffix: style.locale_suffix,
        }
    }
}

impl TagSettings {
    pub fn style(&self) -> TagStyle {
        TagStyle {
            display_template: self.display_template.clone(),
            locale_suffix: self.locale_suffix.clone(),
            other_tag: self.other_tag.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionSettings {
    pub endpoint: String,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        ConversionSettings {
            endpoint: "https://meta.wikimedia.org/api/rest_v1/transform/html/to/wikitext"
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupSettings {
    pub dir: PathBuf,
    /// Public URL of `dir`, ending with a slash
    pub public_url: String,
}

impl Default for BackupSettings {
    fn default() -> Self {
        BackupSettings {
            dir: PathBuf::from("/data/project/wmcz/public_html/.wmcz_meta_reports"),
            public_url: "https://wmcz.toolforge.org/.wmcz_meta_reports/".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load config from the file named by META_REPORTS_CONFIG (or the default
    /// file in the working directory), then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from_file(&Self::path())?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Config file location: META_REPORTS_CONFIG, else meta-reports.toml
    pub fn path() -> PathBuf {
        std::env::var(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Load config from a TOML file. A missing file yields the defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(ReportError::Io(e)),
        };

        Self::parse(&contents).map_err(|e| match e {
            ReportError::TomlDeserialize(err) => ReportError::Config(format!(
                "Failed to parse {}: {}",
                path.display(),
                err
            )),
            other => other,
        })
    }

    /// Parse config from TOML text
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Override secrets from the environment
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("META_REPORTS_DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(username) = lookup("META_REPORTS_WIKI_USERNAME") {
            self.wiki.username = Some(username);
        }
        if let Some(password) = lookup("META_REPORTS_WIKI_PASSWORD") {
            self.wiki.password = Some(password);
        }
    }
}
