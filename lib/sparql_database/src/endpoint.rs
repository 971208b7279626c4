use super::{parse_json_text, SparqlQueryError, SparqlQueryable};
use async_trait::async_trait;
use log::debug;
use reqwest::header::ACCEPT;
use sparesults::{QueryResultsSyntaxError, QuerySolution};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_USER_AGENT: &str = "ontofed";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum SparqlEndpointQueryExecutionError {
    #[error("HTTP request failed: {0}")]
    RequestError(reqwest::Error),
    #[error("Request timed out")]
    Timeout,
    #[error("Endpoint answered with status `{0}`")]
    BadStatusCode(String),
    #[error("Response is not a SPARQL JSON results document: {0}")]
    ResultsParseError(QueryResultsSyntaxError),
    #[error("Malformed solution in SPARQL JSON results: {0}")]
    SolutionParseError(QueryResultsSyntaxError),
    #[error("Expected solutions of a SELECT query, got a boolean result")]
    WrongResultType,
}

impl From<reqwest::Error> for SparqlEndpointQueryExecutionError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            SparqlEndpointQueryExecutionError::Timeout
        } else {
            SparqlEndpointQueryExecutionError::RequestError(error)
        }
    }
}

/// Settings for the HTTP client shared by all endpoint calls of a run.
#[derive(Debug, Clone)]
pub struct SparqlClientConfig {
    /// Per-call timeout, `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Skip TLS certificate verification. Only meant for partner instances with self-signed certificates.
    pub accept_invalid_certs: bool,
    pub user_agent: String,
}

impl Default for SparqlClientConfig {
    fn default() -> Self {
        SparqlClientConfig {
            timeout: Some(DEFAULT_TIMEOUT),
            accept_invalid_certs: false,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl SparqlClientConfig {
    pub fn build_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .user_agent(self.user_agent.clone())
            .danger_accept_invalid_certs(self.accept_invalid_certs);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}

pub struct SparqlEndpoint {
    pub endpoint: String,
    pub token: Option<String>,
    client: reqwest::Client,
}

impl SparqlEndpoint {
    pub fn new(endpoint: impl Into<String>, token: Option<String>, client: reqwest::Client) -> Self {
        SparqlEndpoint {
            endpoint: endpoint.into(),
            token,
            client,
        }
    }
}

#[async_trait]
impl SparqlQueryable for SparqlEndpoint {
    async fn execute(&self, query: &str) -> Result<Vec<QuerySolution>, SparqlQueryError> {
        debug!("Sending query to {}", self.endpoint);
        let mut request = self
            .client
            .get(&self.endpoint)
            .header(ACCEPT, "application/sparql-results+json,application/json,text/javascript,application/javascript")
            .query(&[("query", query)])
            .query(&[("format", "json"), ("output", "json"), ("results", "json")]);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .map_err(SparqlEndpointQueryExecutionError::from)?;
        if !response.status().is_success() {
            return Err(
                SparqlEndpointQueryExecutionError::BadStatusCode(response.status().to_string())
                    .into(),
            );
        }
        let text = response
            .text()
            .await
            .map_err(SparqlEndpointQueryExecutionError::from)?;
        parse_json_text(&text)
    }
}
