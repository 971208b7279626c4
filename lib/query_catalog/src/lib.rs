pub mod catalog;

use serde::{Deserialize, Serialize};

/// A SPARQL query together with the column headers of the table its results are put in.
///
/// The headers must line up with the variables bound in the result rows, this is not checked
/// until the results are turned into a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparqlQuery {
    pub query: String,
    pub columns: Vec<String>,
}

impl SparqlQuery {
    pub fn new<S: Into<String>>(query: impl Into<String>, columns: Vec<S>) -> SparqlQuery {
        SparqlQuery {
            query: query.into(),
            columns: columns.into_iter().map(|c| c.into()).collect(),
        }
    }
}
