//! SerpAPI-backed auxiliary signals: headline sentiment from web search
//! results and search-trend interest from the Google Trends engine.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::error::DomainError;
use crate::domain::ports::signals::{SentimentSource, TrendsSource};
use crate::infrastructure::signals::lexicon;

/// Search results scored per query.
const RESULT_LIMIT: usize = 3;

pub struct SerpApiSignals {
    api_key: String,
    client: reqwest::Client,
}

impl SerpApiSignals {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }

    /// Strip Yahoo decorations so "EURUSD=X" searches as "EURUSD".
    fn search_term(symbol: &str) -> String {
        symbol.trim_end_matches("=X").replace(['^', '='], "")
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TrendsResponse {
    #[serde(default)]
    interest_over_time: Option<InterestOverTime>,
}

#[derive(Debug, Deserialize)]
struct InterestOverTime {
    #[serde(default)]
    timeline_data: Vec<TimelinePoint>,
}

#[derive(Debug, Deserialize)]
struct TimelinePoint {
    #[serde(default)]
    values: Vec<TimelineValue>,
}

#[derive(Debug, Deserialize)]
struct TimelineValue {
    #[serde(default)]
    extracted_value: Option<f64>,
}

#[async_trait]
impl SentimentSource for SerpApiSignals {
    fn name(&self) -> &str {
        "serpapi"
    }

    async fn score(&self, symbol: &str) -> Result<f64, DomainError> {
        let query = format!("{} forex sentiment", Self::search_term(symbol));
        let resp = self
            .client
            .get("https://serpapi.com/search.json")
            .query(&[("q", query.as_str()), ("api_key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| DomainError::Feed(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(DomainError::Feed(format!(
                "SerpAPI returned {}",
                resp.status()
            )));
        }

        let body: SearchResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(e.to_string()))?;

        let scores: Vec<f64> = body
            .organic_results
            .iter()
            .take(RESULT_LIMIT)
            .map(|r| {
                let text = match &r.snippet {
                    Some(snippet) => format!("{} {snippet}", r.title),
                    None => r.title.clone(),
                };
                lexicon::score_text(&text)
            })
            .collect();

        if scores.is_empty() {
            return Ok(0.0);
        }
        Ok(scores.iter().sum::<f64>() / scores.len() as f64)
    }
}

#[async_trait]
impl TrendsSource for SerpApiSignals {
    async fn interest(&self, term: &str) -> Result<Option<f64>, DomainError> {
        let term = Self::search_term(term);
        let resp = self
            .client
            .get("https://serpapi.com/search.json")
            .query(&[
                ("engine", "google_trends"),
                ("q", term.as_str()),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| DomainError::Feed(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(DomainError::Feed(format!(
                "SerpAPI trends returned {}",
                resp.status()
            )));
        }

        let body: TrendsResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(e.to_string()))?;

        let latest = body
            .interest_over_time
            .and_then(|iot| iot.timeline_data.into_iter().last())
            .and_then(|point| point.values.into_iter().next())
            .and_then(|v| v.extracted_value);

        Ok(latest)
    }
}
