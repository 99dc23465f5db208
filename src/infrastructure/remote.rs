//! HTTP collaborators: tag lookup table and HTML → wikitext conversion

use crate::domain::TagSource;
use crate::error::Result;
use reqwest::blocking::Client;
use serde::Serialize;
use std::collections::HashMap;

/// Converts rendered post HTML into wikitext
pub trait MarkupConverter {
    fn html_to_wikitext(&self, html: &str) -> Result<String>;
}

/// Tag table published as a raw JSON page
pub struct HttpTagSource {
    client: Client,
    url: String,
}

impl HttpTagSource {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        HttpTagSource {
            client,
            url: url.into(),
        }
    }
}

impl TagSource for HttpTagSource {
    fn fetch_table(&self) -> Result<HashMap<String, String>> {
        tracing::debug!(url = %self.url, "fetching tag lookup table");
        let table = self
            .client
            .get(&self.url)
            .send()?
            .error_for_status()?
            .json::<HashMap<String, String>>()?;
        Ok(table)
    }
}

#[derive(Debug, Serialize)]
struct TransformRequest<'a> {
    html: &'a str,
    scrub_wikitext: bool,
}

/// Parsoid REST transform endpoint
pub struct ParsoidConverter {
    client: Client,
    endpoint: String,
}

impl ParsoidConverter {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        ParsoidConverter {
            client,
            endpoint: endpoint.into(),
        }
    }
}

impl MarkupConverter for ParsoidConverter {
    fn html_to_wikitext(&self, html: &str) -> Result<String> {
        let body = TransformRequest {
            html,
            scrub_wikitext: true,
        };

        let text = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()?
            .error_for_status()?
            .text()?;
        Ok(text)
    }
}
