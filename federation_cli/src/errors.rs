use federation::errors::{ConfigError, FederationError};
use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Unknown catalog query `{0}`, known queries are: {1}")]
    UnknownCatalogQuery(String, String),
    #[error("Error reading query from `{path}`: {source}")]
    ReadQueryError {
        path: String,
        source: std::io::Error,
    },
    #[error("Error deserializing query definition from `{path}`: {source}")]
    DeserializeQueryError {
        path: String,
        source: serde_json::Error,
    },
    #[error("No query given")]
    MissingQuery,
    #[error("A query read from a file needs --columns")]
    MissingColumns,
    #[error("Error writing `{path}`: {source}")]
    WriteOutputError {
        path: String,
        source: std::io::Error,
    },
    #[error("Error writing csv `{path}`: {source}")]
    WriteCsvError { path: String, source: PolarsError },
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    #[error(transparent)]
    FederationError(#[from] FederationError),
}
