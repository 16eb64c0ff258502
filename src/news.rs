//! News API proxy and article normalization.
//!
//! One GET per search, fixed query parameters, page size capped at 10 by the
//! request itself. Raw articles come back with any field missing; rendering
//! only ever sees [`Article`] values produced by [`normalize`], where every
//! gap is filled with a display default and the timestamp is reformatted.
use chrono::NaiveDateTime;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::config::Config;

const PAGE_SIZE: &str = "10";
const DATE_INPUT: &str = "%Y-%m-%dT%H:%M:%SZ";
const DATE_OUTPUT: &str = "%B %d, %Y";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("news request failed")]
    Network(#[from] reqwest::Error),

    #[error("news service returned {status}: {message}")]
    Upstream { status: StatusCode, message: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArticleRaw {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "urlToImage")]
    pub url_to_image: Option<String>,
    pub source: Option<SourceRaw>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceRaw {
    pub name: Option<String>,
}

/// An [`ArticleRaw`] with every display field filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub description: String,
    pub url: String,
    pub url_to_image: Option<String>,
    pub source: Source,
    pub published_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub name: String,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    articles: Vec<ArticleRaw>,
}

#[derive(Deserialize)]
struct UpstreamBody {
    message: Option<String>,
}

pub struct NewsClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl NewsClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: config.news_url.trim_end_matches('/').to_string(),
            api_key: config.news_api_key.clone(),
        }
    }

    /// One outbound search. Callers skip the call entirely for an empty
    /// keyword; this is never invoked with one.
    pub async fn search(&self, keyword: &str) -> Result<Vec<ArticleRaw>, FetchError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", keyword),
                ("language", "en"),
                ("sortBy", "publishedAt"),
                ("pageSize", PAGE_SIZE),
                ("apiKey", &self.api_key),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<UpstreamBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_default();

            return Err(FetchError::Upstream { status, message });
        }

        let body = response.json::<SearchResponse>().await?;

        #[cfg(feature = "verbose")]
        println!("News response: {} articles", body.articles.len());

        Ok(body.articles)
    }
}

/// Total over any input: same length out as in, order preserved, every
/// missing field replaced by its display default.
pub fn normalize(articles: Vec<ArticleRaw>) -> Vec<Article> {
    articles.into_iter().map(normalize_article).collect()
}

fn normalize_article(raw: ArticleRaw) -> Article {
    Article {
        title: raw.title.unwrap_or_else(|| "No title available".to_string()),
        description: raw
            .description
            .unwrap_or_else(|| "No description available".to_string()),
        url: raw.url.unwrap_or_else(|| "#".to_string()),
        url_to_image: raw.url_to_image,
        source: Source {
            name: raw
                .source
                .and_then(|source| source.name)
                .unwrap_or_else(|| "Unknown Source".to_string()),
        },
        published_at: format_published(raw.published_at.as_deref()),
    }
}

fn format_published(raw: Option<&str>) -> String {
    raw.and_then(parse_timestamp)
        .map(|parsed| parsed.format(DATE_OUTPUT).to_string())
        .unwrap_or_else(|| "Date unknown".to_string())
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, DATE_INPUT).ok()
}

/// Display filter for date strings already sitting in rendered content.
/// Unlike the pipeline default above, an unparseable input comes back
/// unchanged rather than as "Date unknown". Intentionally not unified.
pub fn display_date(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|parsed| parsed.format(DATE_OUTPUT).to_string())
        .unwrap_or_else(|| raw.to_string())
}
