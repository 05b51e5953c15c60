use anyhow::Context as _;

use crate::formats::CommentThreadPage;

pub const MAX_RESULTS: u32 = 100;
pub const TEXT_FORMAT: &str = "plainText";
pub const PART: &str = "snippet,replies";

/// Source of comment thread pages. The fetch loop only talks to this, so the
/// HTTP client can be swapped for a scripted source in tests.
pub trait CommentPageSource {
    fn fetch_page(&mut self, page_token: Option<&str>) -> anyhow::Result<CommentThreadPage>;
}

pub struct CommentThreadsClient {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
    video_id: String,
}

impl CommentThreadsClient {
    pub fn new(endpoint: &str, api_key: &str, video_id: &str) -> anyhow::Result<Self> {
        url::Url::parse(endpoint).with_context(|| format!("parse comments API url: {endpoint}"))?;
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build HTTP client")?;
        Ok(Self {
            client,
            endpoint: endpoint.to_owned(),
            api_key: api_key.to_owned(),
            video_id: video_id.to_owned(),
        })
    }

    fn query(&self, page_token: Option<&str>) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("key", self.api_key.clone()),
            ("textFormat", TEXT_FORMAT.to_owned()),
            ("part", PART.to_owned()),
            ("maxResults", MAX_RESULTS.to_string()),
            ("videoId", self.video_id.clone()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token.to_owned()));
        }
        query
    }
}

impl CommentPageSource for CommentThreadsClient {
    fn fetch_page(&mut self, page_token: Option<&str>) -> anyhow::Result<CommentThreadPage> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&self.query(page_token))
            .send()
            // The query carries the API key; keep it out of error messages.
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("GET {}", self.endpoint))?;

        let status = response.status();
        let raw = response
            .text()
            .map_err(reqwest::Error::without_url)
            .context("read comments API response body")?;
        if status != reqwest::StatusCode::OK {
            match parse_error_message(&raw) {
                Some(message) => anyhow::bail!("comments API error ({status}): {message}\n{raw}"),
                None => anyhow::bail!("comments API error ({status}): {raw}"),
            }
        }

        serde_json::from_str(&raw).context("parse comments API response")
    }
}

fn parse_error_message(raw_json: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(raw_json).ok()?;
    let message = value.get("error")?.get("message")?.as_str()?.to_owned();
    Some(message)
}
