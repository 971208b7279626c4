mod errors;
mod output;

use crate::errors::CliError;
use clap::{ArgGroup, Parser};
use federation::config::PartnersConfig;
use federation::engine::{Engine, EngineConfig};
use federation::filter::DatasetFilter;
use federation::SparqlQuery;
use log::{error, info};
use query_catalog::catalog::{self, QUERY_NAMES};
use sparql_database::endpoint::{SparqlClientConfig, DEFAULT_USER_AGENT};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

/// Runs one SPARQL query against the dataset endpoints of all configured partner instances.
#[derive(Parser, Debug)]
#[command(name = "ontofed", version)]
#[command(group(
    ArgGroup::new("query_source")
        .required(true)
        .args(["catalog", "query_file", "query_json"])
))]
struct Args {
    /// JSON file mapping partner names to their `ontodocker` connection info
    #[arg(long, short)]
    config: PathBuf,
    /// Name of a query from the built-in catalog
    #[arg(long)]
    catalog: Option<String>,
    /// Process URI to restrict the primary_data, secondary_data and metadata catalog queries to
    #[arg(long, conflicts_with_all = ["query_file", "query_json"])]
    uri: Option<String>,
    /// File holding the SPARQL query text, needs --columns
    #[arg(long)]
    query_file: Option<PathBuf>,
    /// Column headers of the result tables, comma separated
    #[arg(long, value_delimiter = ',', conflicts_with_all = ["catalog", "query_json"])]
    columns: Vec<String>,
    /// JSON file holding a query definition, `{"query": "...", "columns": [...]}`
    #[arg(long)]
    query_json: Option<PathBuf>,
    /// Only query endpoints whose URL contains this substring, can be repeated
    #[arg(long = "dataset", short)]
    datasets: Vec<String>,
    /// Directory to write one csv file per partner and dataset to
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// Do not print the queried endpoints and result tables
    #[arg(long, short)]
    quiet: bool,
    /// Timeout per HTTP request in seconds, 0 disables it
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,
    /// Number of endpoints of a partner queried at the same time
    #[arg(long, default_value_t = 1)]
    max_concurrent: usize,
    /// Accept invalid TLS certificates of partner instances
    #[arg(long)]
    insecure: bool,
}

impl Args {
    fn sparql_query(&self) -> Result<SparqlQuery, CliError> {
        if let Some(name) = &self.catalog {
            return catalog::by_name(name, self.uri.as_deref())
                .ok_or_else(|| CliError::UnknownCatalogQuery(name.clone(), QUERY_NAMES.join(", ")));
        }
        if let Some(path) = &self.query_json {
            let json = read_file(path)?;
            return serde_json::from_str(&json).map_err(|source| CliError::DeserializeQueryError {
                path: path.display().to_string(),
                source,
            });
        }
        let Some(path) = &self.query_file else {
            return Err(CliError::MissingQuery);
        };
        if self.columns.is_empty() {
            return Err(CliError::MissingColumns);
        }
        Ok(SparqlQuery::new(read_file(path)?, self.columns.clone()))
    }

    fn dataset_filter(&self) -> DatasetFilter {
        if self.datasets.is_empty() {
            DatasetFilter::all()
        } else {
            DatasetFilter::new(self.datasets.clone())
        }
    }

    fn engine_config(&self) -> EngineConfig {
        let timeout = if self.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_secs))
        };
        EngineConfig {
            client: SparqlClientConfig {
                timeout,
                accept_invalid_certs: self.insecure,
                user_agent: format!("{}/{}", DEFAULT_USER_AGENT, env!("CARGO_PKG_VERSION")),
            },
            max_concurrent_queries: self.max_concurrent,
            print_to_screen: !self.quiet,
        }
    }
}

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::ReadQueryError {
        path: path.display().to_string(),
        source,
    })
}

async fn run(args: Args) -> Result<bool, CliError> {
    let partners = PartnersConfig::from_json_file(&args.config)?;
    let query = args.sparql_query()?;
    let engine = Engine::from_config(args.engine_config())?;
    info!(
        "Querying {} partners from {}",
        partners.partners.len(),
        args.config.display()
    );

    let result = engine
        .federated_query(&partners, &args.dataset_filter(), &query)
        .await;

    for (partner, partner_result) in &result.partners {
        if let Some(e) = &partner_result.error {
            error!("Partner {}: {}", partner, e);
        }
        for e in partner_result.query_errors() {
            error!("Partner {}: {}", partner, e);
        }
    }
    if let Some(out_dir) = &args.out_dir {
        let written = output::write_csv_files(&result, out_dir)?;
        info!("Wrote {} csv files to {}", written.len(), out_dir.display());
    }
    Ok(result.is_ok())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
