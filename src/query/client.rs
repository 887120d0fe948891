//! HTTP client for the query backend
//!
//! One endpoint: `POST {base}/api/query` with body `{"question": ...}`.
//! A non-2xx status and a 2xx body carrying an `error` field are treated
//! identically as backend failures.

use crate::config::AppConfig;
use crate::error::{Result, SamarthError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fallback shown when the backend fails without a usable message
pub const GENERIC_BACKEND_ERROR: &str = "Failed to fetch data from the intelligent system.";

/// A cited data source attached to an answer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub name: String,
    pub url: String,
}

/// A successful backend answer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Answer {
    /// Answer text, possibly carrying light markup
    pub answer: String,
    /// Cited sources, possibly empty
    pub sources: Vec<Source>,
}

/// Raw response body; the backend multiplexes success and error shapes
#[derive(Debug, Deserialize)]
struct QueryResponse {
    answer: Option<String>,
    #[serde(default)]
    sources: Vec<Source>,
    error: Option<String>,
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    question: &'a str,
}

/// Client for the Samarth query endpoint
pub struct QueryClient {
    http: reqwest::Client,
    query_url: String,
}

impl QueryClient {
    /// Create a client for the configured backend
    ///
    /// No request timeout is applied; long analytical queries are expected.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            query_url: config.query_url(),
        }
    }

    /// Submit a question and wait for the answer
    pub async fn ask(&self, question: &str) -> Result<Answer> {
        debug!("[QUERY] POST {} ({} chars)", self.query_url, question.len());

        let response = self
            .http
            .post(&self.query_url)
            .json(&QueryRequest { question })
            .send()
            .await
            .map_err(|e| SamarthError::Network(e.to_string()))?;

        let status = response.status();
        let body: QueryResponse = response
            .json()
            .await
            .map_err(|_| SamarthError::Backend(GENERIC_BACKEND_ERROR.to_string()))?;

        if let Some(message) = body.error {
            return Err(SamarthError::Backend(message));
        }
        if !status.is_success() {
            return Err(SamarthError::Backend(GENERIC_BACKEND_ERROR.to_string()));
        }

        let answer = body
            .answer
            .ok_or_else(|| SamarthError::Backend(GENERIC_BACKEND_ERROR.to_string()))?;

        Ok(Answer {
            answer,
            sources: body.sources,
        })
    }
}
