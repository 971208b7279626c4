use polars::prelude::PolarsError;
use sparql_database::SparqlQueryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Partner `{partner}` has no address configured")]
    MissingAddress { partner: String },
    #[error("Partner `{partner}` has no token configured")]
    MissingToken { partner: String },
    #[error("Partner `{partner}` has invalid address `{address}`: {source}")]
    InvalidAddress {
        partner: String,
        address: String,
        source: url::ParseError,
    },
    #[error("Error reading partner config from JSON file `{path}`: {source}")]
    ReadConfigFileError {
        path: String,
        source: std::io::Error,
    },
    #[error("Error deserializing partner config from JSON: {0}")]
    DeserializeError(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Endpoint listing request to `{url}` for partner `{partner}` failed: {source}")]
    RequestError {
        partner: String,
        url: String,
        source: reqwest::Error,
    },
    #[error("Endpoint listing at `{url}` for partner `{partner}` returned bad status code `{status}`")]
    BadStatusCode {
        partner: String,
        url: String,
        status: String,
    },
    #[error("Endpoint listing at `{url}` for partner `{partner}` is not a list of strings: {source}")]
    ParseError {
        partner: String,
        url: String,
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("Result row {row} has {found} values but {expected} columns were given")]
    ColumnCountMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error(transparent)]
    PolarsError(#[from] PolarsError),
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Query against endpoint `{endpoint}` failed: {source}")]
    ExecutionError {
        endpoint: String,
        source: SparqlQueryError,
    },
    #[error("Could not build result table for endpoint `{endpoint}`: {source}")]
    TableError { endpoint: String, source: TableError },
}

impl QueryError {
    pub fn endpoint(&self) -> &str {
        match self {
            QueryError::ExecutionError { endpoint, .. } => endpoint,
            QueryError::TableError { endpoint, .. } => endpoint,
        }
    }
}

#[derive(Debug, Error)]
pub enum FederationError {
    #[error("Error creating HTTP client: {0}")]
    CreateClientError(reqwest::Error),
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    #[error(transparent)]
    DiscoveryError(#[from] DiscoveryError),
}
