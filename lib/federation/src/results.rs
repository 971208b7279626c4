use crate::errors::{FederationError, QueryError};
use polars::prelude::DataFrame;
use std::collections::BTreeMap;
use std::io::Write;

/// Outcome of querying one dataset endpoint.
#[derive(Debug)]
pub struct DatasetResult {
    pub endpoint: String,
    pub query: String,
    pub result: Result<DataFrame, QueryError>,
}

/// Results of one partner keyed by dataset name.
///
/// `error` is set when the partner could not be queried at all, because its configuration is
/// incomplete or its endpoints could not be listed. `datasets` is then empty.
#[derive(Debug, Default)]
pub struct PartnerResult {
    pub datasets: BTreeMap<String, DatasetResult>,
    pub error: Option<FederationError>,
}

impl PartnerResult {
    pub fn failed(error: FederationError) -> PartnerResult {
        PartnerResult {
            datasets: BTreeMap::new(),
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none() && self.datasets.values().all(|d| d.result.is_ok())
    }

    pub fn query_errors(&self) -> impl Iterator<Item = &QueryError> {
        self.datasets.values().filter_map(|d| d.result.as_ref().err())
    }
}

/// Results of a federated query keyed by partner.
#[derive(Debug, Default)]
pub struct FederatedResult {
    pub partners: BTreeMap<String, PartnerResult>,
}

impl FederatedResult {
    pub fn is_ok(&self) -> bool {
        self.partners.values().all(|p| p.is_ok())
    }

    pub fn get(&self, partner: &str, dataset: &str) -> Option<&DatasetResult> {
        self.partners
            .get(partner)
            .and_then(|p| p.datasets.get(dataset))
    }

    /// Successful tables as (partner, dataset, table).
    pub fn tables(&self) -> impl Iterator<Item = (&str, &str, &DataFrame)> {
        self.partners.iter().flat_map(|(partner, partner_result)| {
            partner_result
                .datasets
                .iter()
                .filter_map(move |(dataset, dataset_result)| {
                    dataset_result
                        .result
                        .as_ref()
                        .ok()
                        .map(|df| (partner.as_str(), dataset.as_str(), df))
                })
        })
    }
}

pub fn write_trace<W: Write>(writer: &mut W, endpoint: &str, df: &DataFrame) -> std::io::Result<()> {
    writeln!(writer, "Sending query to \"{}\". Result:", endpoint)?;
    writeln!(writer, "{}", df)?;
    writeln!(writer)
}
