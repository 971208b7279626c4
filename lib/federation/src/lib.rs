pub mod config;
pub mod discovery;
pub mod engine;
pub mod errors;
pub mod filter;
pub mod naming;
pub mod results;
pub mod sparql_result_to_polars;

pub use query_catalog::SparqlQuery;
