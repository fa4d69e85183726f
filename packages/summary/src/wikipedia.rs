//! Wikipedia REST page summary client.
//!
//! See <https://en.wikipedia.org/api/rest_v1/#/Page%20content/get_page_summary__title_>

use async_trait::async_trait;

use crate::{SummaryError, SummaryPage, SummaryResponse, SummarySource};

/// Fetches page summaries from a Wikipedia REST endpoint.
pub struct WikipediaSource {
    client: reqwest::Client,
    base_url: String,
}

impl WikipediaSource {
    /// Creates a client for the summary endpoint at `base_url`.
    ///
    /// Network timeouts are left at the client defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, SummaryError> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Builds the summary URL for a title, percent-encoding it as a single
    /// path segment.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::Parse`] if the base URL is invalid.
    pub fn summary_url(&self, title: &str) -> Result<reqwest::Url, SummaryError> {
        let mut url = reqwest::Url::parse(&self.base_url).map_err(|e| SummaryError::Parse {
            message: format!("Invalid base URL '{}': {e}", self.base_url),
        })?;

        url.path_segments_mut()
            .map_err(|()| SummaryError::Parse {
                message: format!("Base URL '{}' cannot take a path", self.base_url),
            })?
            .push(title);

        Ok(url)
    }
}

#[async_trait]
impl SummarySource for WikipediaSource {
    fn id(&self) -> &str {
        "wikipedia"
    }

    async fn fetch(&self, query: &str) -> Result<SummaryResponse, SummaryError> {
        let url = self.summary_url(query)?;
        let resp = self.client.get(url).send().await?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(SummaryResponse::NotFound);
        }
        if !status.is_success() {
            return Err(SummaryError::Status {
                status: status.as_u16(),
            });
        }

        let body: serde_json::Value = resp.json().await?;
        Ok(SummaryResponse::Found(parse_response(&body)))
    }
}

/// Parses a page summary JSON body.
fn parse_response(body: &serde_json::Value) -> SummaryPage {
    SummaryPage {
        title: body["title"].as_str().map(String::from),
        extract: body["extract"].as_str().map(String::from),
        url: body["content_urls"]["desktop"]["page"]
            .as_str()
            .map(String::from),
    }
}
