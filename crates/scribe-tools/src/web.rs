//! Web page metadata tool

use std::sync::OnceLock;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use scribe_core::tools::{Tool, ToolCall, ToolError, ToolParameter, ToolResult, ToolSchema};
use tracing::debug;
use url::Url;

static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

fn get_client() -> &'static reqwest::Client {
    CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(20))
            .user_agent("Scribe-WebMetadata/1.0")
            .build()
            .unwrap_or_default()
    })
}

/// Validate that a URL is fetchable over http(s)
fn validate_url(raw: &str) -> Result<Url, ToolError> {
    let url = Url::parse(raw)
        .map_err(|e| ToolError::InvalidArguments(format!("Invalid URL '{raw}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ToolError::InvalidArguments(format!(
            "Unsupported URL scheme '{other}', only http and https are allowed"
        ))),
    }
}

/// Extract the text between the first `<tag>` and `</tag>` pair
fn extract_tag_text(html: &str, tag: &str) -> Option<String> {
    let lower = html.to_ascii_lowercase();
    let open = format!("<{tag}");
    let close = format!("</{tag}>");
    let open_at = lower.find(&open)?;
    let content_at = open_at + lower[open_at..].find('>')? + 1;
    let close_at = content_at + lower[content_at..].find(&close)?;
    let text = html[content_at..close_at].trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Extract the content attribute of `<meta name="description" ...>`
fn extract_meta_description(html: &str) -> Option<String> {
    let lower = html.to_ascii_lowercase();
    let mut search_from = 0;
    while let Some(at) = lower[search_from..].find("<meta") {
        let start = search_from + at;
        let end = start + lower[start..].find('>')?;
        let tag = &html[start..end];
        if tag.to_ascii_lowercase().contains("name=\"description\"") {
            let tag_lower = tag.to_ascii_lowercase();
            let content_at = tag_lower.find("content=\"")?;
            let value_start = content_at + "content=\"".len();
            let value_end = value_start + tag[value_start..].find('"')?;
            let value = tag[value_start..value_end].trim();
            return if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            };
        }
        search_from = end;
    }
    None
}

/// Tool fetching a web page and reporting its metadata
#[derive(Debug, Clone, Default)]
pub struct WebMetadataTool;

impl WebMetadataTool {
    /// Create a new web metadata tool
    pub fn new() -> Self {
        Self
    }

    async fn fetch_metadata(&self, url: &Url) -> anyhow::Result<String> {
        debug!(%url, "fetching page metadata");

        let response = get_client()
            .get(url.clone())
            .send()
            .await
            .context("Failed to fetch URL")?;

        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string();

        let mut lines = vec![
            format!("URL: {url}"),
            format!("Status: {status}"),
            format!("Content-Type: {content_type}"),
        ];

        if content_type.contains("text/html") {
            let body = response.text().await.context("Failed to read body")?;
            if let Some(title) = extract_tag_text(&body, "title") {
                lines.push(format!("Title: {title}"));
            }
            if let Some(description) = extract_meta_description(&body) {
                lines.push(format!("Description: {description}"));
            }
        }

        Ok(lines.join("\n"))
    }
}

#[async_trait]
impl Tool for WebMetadataTool {
    fn name(&self) -> &str {
        "web_metadata"
    }

    fn description(&self) -> &str {
        "Fetch a web page and report its status, content type, title, and description. Use to inspect a link before quoting it."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            self.name(),
            self.description(),
            vec![ToolParameter::string("url", "The http(s) URL to inspect")],
        )
    }

    fn validate(&self, call: &ToolCall) -> Result<(), ToolError> {
        let raw = call
            .get_string("url")
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'url' parameter".to_string()))?;
        validate_url(&raw).map(|_| ())
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let raw = call
            .get_string("url")
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'url' parameter".to_string()))?;
        let url = validate_url(&raw)?;

        match self.fetch_metadata(&url).await {
            Ok(report) => Ok(ToolResult::success(&call.id, self.name(), report)
                .with_metadata("url", raw.as_str())),
            Err(err) => Ok(ToolResult::error(
                &call.id,
                self.name(),
                format!("Failed to inspect {raw}: {err:#}"),
            )),
        }
    }
}
