pub mod endpoint;

use async_trait::async_trait;
use endpoint::SparqlEndpointQueryExecutionError;
use sparesults::{
    QueryResultsFormat, QueryResultsParser, QuerySolution, SliceQueryResultsParserOutput,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SparqlQueryError {
    #[error(transparent)]
    SparqlEndpointQueryExecutionError(#[from] SparqlEndpointQueryExecutionError),
}

/// Anything that can answer a SPARQL SELECT query with a list of solutions.
///
/// Queries are passed on as text, parsing and evaluation is left to the queried store.
#[async_trait]
pub trait SparqlQueryable: Send + Sync {
    async fn execute(&self, query: &str) -> Result<Vec<QuerySolution>, SparqlQueryError>;
}

/// Reads a `application/sparql-results+json` document into its solutions, in binding order.
pub fn parse_json_text(text: &str) -> Result<Vec<QuerySolution>, SparqlQueryError> {
    let output = QueryResultsParser::from_format(QueryResultsFormat::Json)
        .for_slice(text.as_bytes())
        .map_err(SparqlEndpointQueryExecutionError::ResultsParseError)?;
    let SliceQueryResultsParserOutput::Solutions(solutions) = output else {
        return Err(SparqlEndpointQueryExecutionError::WrongResultType.into());
    };
    let solutions = solutions
        .collect::<Result<Vec<_>, _>>()
        .map_err(SparqlEndpointQueryExecutionError::SolutionParseError)?;
    Ok(solutions)
}
