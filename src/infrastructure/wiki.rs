//! Wiki page access through the MediaWiki action API

use crate::error::{ReportError, Result};
use crate::infrastructure::config::WikiSettings;
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;

/// Read/write access to wiki pages
pub trait WikiClient {
    /// Check whether a page exists
    fn page_exists(&self, title: &str) -> Result<bool>;

    /// Current page text (empty if the page does not exist)
    fn page_text(&self, title: &str) -> Result<String>;

    /// Replace the page text.
    ///
    /// A spam-filter rejection is reported as `ReportError::SpamBlacklist`.
    fn save_page(&self, title: &str, text: &str, summary: &str) -> Result<()>;
}

/// Bot session against a MediaWiki `api.php` endpoint
pub struct MediaWikiClient {
    client: Client,
    api_url: String,
}

impl MediaWikiClient {
    /// Create a client, logging in when credentials are configured
    pub fn connect(settings: &WikiSettings) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(concat!("meta-reports/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let wiki = MediaWikiClient {
            client,
            api_url: settings.api_url.clone(),
        };

        match (&settings.username, &settings.password) {
            (Some(username), Some(password)) => wiki.login(username, password)?,
            _ => tracing::warn!("no wiki credentials configured, editing anonymously"),
        }

        Ok(wiki)
    }

    fn get(&self, params: &[(&str, &str)]) -> Result<Value> {
        let value: Value = self
            .client
            .get(&self.api_url)
            .query(&[("format", "json"), ("formatversion", "2")])
            .query(params)
            .send()?
            .error_for_status()?
            .json()?;
        check_api_error(&value)?;
        Ok(value)
    }

    fn post(&self, params: &[(&str, &str)]) -> Result<Value> {
        let mut form: Vec<(&str, &str)> = vec![("format", "json"), ("formatversion", "2")];
        form.extend_from_slice(params);

        let value: Value = self
            .client
            .post(&self.api_url)
            .form(&form)
            .send()?
            .error_for_status()?
            .json()?;
        Ok(value)
    }

    fn token(&self, kind: &str) -> Result<String> {
        let value = self.get(&[("action", "query"), ("meta", "tokens"), ("type", kind)])?;
        let key = format!("{}token", kind);
        value["query"]["tokens"][key.as_str()]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ReportError::UnexpectedResponse(format!("missing {} token", kind)))
    }

    fn login(&self, username: &str, password: &str) -> Result<()> {
        let login_token = self.token("login")?;
        let value = self.post(&[
            ("action", "login"),
            ("lgname", username),
            ("lgpassword", password),
            ("lgtoken", &login_token),
        ])?;
        check_api_error(&value)?;

        match value["login"]["result"].as_str() {
            Some("Success") => {
                tracing::info!(user = username, "logged in to wiki");
                Ok(())
            }
            other => Err(ReportError::Wiki {
                code: "login-failed".to_string(),
                info: value["login"]["reason"]
                    .as_str()
                    .or(other)
                    .unwrap_or("no result")
                    .to_string(),
            }),
        }
    }
}

impl WikiClient for MediaWikiClient {
    fn page_exists(&self, title: &str) -> Result<bool> {
        let value = self.get(&[("action", "query"), ("titles", title)])?;
        parse_page_exists(&value)
    }

    fn page_text(&self, title: &str) -> Result<String> {
        let value = self.get(&[
            ("action", "query"),
            ("prop", "revisions"),
            ("rvprop", "content"),
            ("rvslots", "main"),
            ("titles", title),
        ])?;
        parse_page_text(&value)
    }

    fn save_page(&self, title: &str, text: &str, summary: &str) -> Result<()> {
        let csrf_token = self.token("csrf")?;
        tracing::debug!(title, bytes = text.len(), "saving page");
        let value = self.post(&[
            ("action", "edit"),
            ("title", title),
            ("text", text),
            ("summary", summary),
            ("bot", "1"),
            ("token", &csrf_token),
        ])?;
        parse_edit_response(title, &value)
    }
}

fn first_page(value: &Value) -> Result<&Value> {
    value["query"]["pages"]
        .get(0)
        .ok_or_else(|| ReportError::UnexpectedResponse("query returned no pages".to_string()))
}

fn check_api_error(value: &Value) -> Result<()> {
    match value.get("error") {
        Some(error) => Err(ReportError::Wiki {
            code: error["code"].as_str().unwrap_or("unknown").to_string(),
            info: error["info"].as_str().unwrap_or_default().to_string(),
        }),
        None => Ok(()),
    }
}

fn spam_matches(details: &Value) -> String {
    match details {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        other => other["matches"]
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default(),
    }
}

/// Interpret an `action=query&titles=...` response
pub fn parse_page_exists(value: &Value) -> Result<bool> {
    let page = first_page(value)?;
    let missing = page["missing"].as_bool().unwrap_or(false);
    let invalid = page["invalid"].as_bool().unwrap_or(false);
    Ok(!missing && !invalid)
}

/// Interpret an `action=query&prop=revisions` response
pub fn parse_page_text(value: &Value) -> Result<String> {
    let page = first_page(value)?;
    if page["missing"].as_bool().unwrap_or(false) {
        return Ok(String::new());
    }
    page["revisions"][0]["slots"]["main"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ReportError::UnexpectedResponse("revision has no content".to_string()))
}

/// Interpret an `action=edit` response
pub fn parse_edit_response(title: &str, value: &Value) -> Result<()> {
    if let Some(error) = value.get("error") {
        if error["code"].as_str() == Some("spamblacklist") {
            return Err(ReportError::SpamBlacklist {
                title: title.to_string(),
                matched: spam_matches(&error["spamblacklist"]),
            });
        }
        return check_api_error(value);
    }

    let edit = &value["edit"];
    if let Some(details) = edit.get("spamblacklist") {
        return Err(ReportError::SpamBlacklist {
            title: title.to_string(),
            matched: spam_matches(details),
        });
    }

    match edit["result"].as_str() {
        Some("Success") => Ok(()),
        other => Err(ReportError::Wiki {
            code: "edit-failed".to_string(),
            info: format!("edit of '{}' returned {}", title, other.unwrap_or("nothing")),
        }),
    }
}
