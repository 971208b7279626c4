use crate::config::{Partner, PartnersConfig};
use crate::discovery::discover_endpoints;
use crate::errors::{FederationError, QueryError};
use crate::filter::{dataset_name, filter_endpoints, DatasetFilter};
use crate::results::{write_trace, DatasetResult, FederatedResult, PartnerResult};
use crate::sparql_result_to_polars::solutions_to_dataframe;
use futures::stream::{self, StreamExt};
use log::{debug, info, warn};
use polars::prelude::DataFrame;
use query_catalog::SparqlQuery;
use sparql_database::endpoint::{SparqlClientConfig, SparqlEndpoint};
use sparql_database::SparqlQueryable;

pub struct EngineConfig {
    pub client: SparqlClientConfig,
    /// Upper bound on endpoints of a partner queried at the same time.
    pub max_concurrent_queries: usize,
    /// Print each queried endpoint and its result table to stdout.
    pub print_to_screen: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            client: SparqlClientConfig::default(),
            max_concurrent_queries: 1,
            print_to_screen: true,
        }
    }
}

pub struct Engine {
    client: reqwest::Client,
    max_concurrent_queries: usize,
    print_to_screen: bool,
}

impl Engine {
    pub fn new(client: reqwest::Client, max_concurrent_queries: usize, print_to_screen: bool) -> Engine {
        Engine {
            client,
            max_concurrent_queries: max_concurrent_queries.max(1),
            print_to_screen,
        }
    }

    pub fn from_config(engine_config: EngineConfig) -> Result<Engine, FederationError> {
        let EngineConfig {
            client,
            max_concurrent_queries,
            print_to_screen,
        } = engine_config;
        let client = client
            .build_client()
            .map_err(FederationError::CreateClientError)?;
        Ok(Engine::new(client, max_concurrent_queries, print_to_screen))
    }

    /// Runs `query` against every dataset endpoint of every partner that matches `filter`.
    ///
    /// Every partner of `partners` gets an entry in the result. Partners whose config is
    /// incomplete or whose endpoints cannot be listed carry the error instead of datasets,
    /// endpoints that fail carry the error in their dataset entry. Neither stops the others.
    pub async fn federated_query(
        &self,
        partners: &PartnersConfig,
        filter: &DatasetFilter,
        query: &SparqlQuery,
    ) -> FederatedResult {
        let mut federated_result = FederatedResult::default();
        for (key, partner_config) in &partners.partners {
            let partner_result = match partner_config.to_partner(key) {
                Ok(partner) => self.query_instance(&partner, filter, query).await,
                Err(e) => {
                    warn!("Skipping partner {}: {}", key, e);
                    PartnerResult::failed(e.into())
                }
            };
            federated_result
                .partners
                .insert(key.clone(), partner_result);
        }
        federated_result
    }

    pub async fn query_instance(
        &self,
        partner: &Partner,
        filter: &DatasetFilter,
        query: &SparqlQuery,
    ) -> PartnerResult {
        let endpoints = match discover_endpoints(&self.client, partner).await {
            Ok(endpoints) => endpoints,
            Err(e) => {
                warn!("{}", e);
                return PartnerResult::failed(e.into());
            }
        };
        info!(
            "Partner {} lists {} endpoints",
            partner.name,
            endpoints.len()
        );

        let selected: Vec<(String, String)> = filter_endpoints(&endpoints, filter)
            .into_iter()
            .filter_map(|endpoint| match dataset_name(&endpoint) {
                Some(dataset) => Some((dataset.to_string(), endpoint)),
                None => {
                    warn!(
                        "Skipping endpoint {} of partner {}, no dataset name in URL",
                        endpoint, partner.name
                    );
                    None
                }
            })
            .collect();
        debug!(
            "Querying {} endpoints of partner {}",
            selected.len(),
            partner.name
        );

        // Buffered keeps discovery order so results do not depend on the concurrency.
        // Traces are printed as each query returns.
        let executed: Vec<(String, String, Result<DataFrame, QueryError>)> =
            stream::iter(selected.into_iter().map(|(dataset, endpoint)| async move {
                let result = self.send_query(&endpoint, &partner.token, query).await;
                match &result {
                    Ok(df) => {
                        if self.print_to_screen {
                            let mut stdout = std::io::stdout().lock();
                            if let Err(e) = write_trace(&mut stdout, &endpoint, df) {
                                warn!("Could not print result of {}: {}", endpoint, e);
                            }
                        }
                    }
                    Err(e) => warn!("Partner {}: {}", partner.name, e),
                }
                (dataset, endpoint, result)
            }))
            .buffered(self.max_concurrent_queries)
            .collect()
            .await;

        let mut partner_result = PartnerResult::default();
        for (dataset, endpoint, result) in executed {
            if let Some(previous) = partner_result.datasets.get(&dataset) {
                warn!(
                    "Endpoints {} and {} of partner {} share dataset name {}, keeping {}",
                    previous.endpoint, endpoint, partner.name, dataset, endpoint
                );
            }
            partner_result.datasets.insert(
                dataset,
                DatasetResult {
                    endpoint,
                    query: query.query.clone(),
                    result,
                },
            );
        }
        partner_result
    }

    pub async fn send_query(
        &self,
        endpoint: &str,
        token: &str,
        query: &SparqlQuery,
    ) -> Result<DataFrame, QueryError> {
        let sparql_endpoint =
            SparqlEndpoint::new(endpoint, Some(token.to_string()), self.client.clone());
        let solutions = sparql_endpoint
            .execute(&query.query)
            .await
            .map_err(|source| QueryError::ExecutionError {
                endpoint: endpoint.to_string(),
                source,
            })?;
        debug!("Got {} solutions from {}", solutions.len(), endpoint);
        solutions_to_dataframe(&solutions, &query.columns).map_err(|source| {
            QueryError::TableError {
                endpoint: endpoint.to_string(),
                source,
            }
        })
    }
}
