use crate::errors::CliError;
use federation::naming::canonify_string;
use federation::results::FederatedResult;
use polars::prelude::{CsvWriter, SerWriter};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub fn csv_file_name(partner: &str, dataset: &str) -> String {
    format!(
        "{}__{}.csv",
        canonify_string(partner),
        canonify_string(dataset)
    )
}

/// Writes each successfully queried table to `<out_dir>/<partner>__<dataset>.csv`.
pub fn write_csv_files(result: &FederatedResult, out_dir: &Path) -> Result<Vec<PathBuf>, CliError> {
    fs::create_dir_all(out_dir).map_err(|source| CliError::WriteOutputError {
        path: out_dir.display().to_string(),
        source,
    })?;
    let mut written = vec![];
    for (partner, dataset, df) in result.tables() {
        let path = out_dir.join(csv_file_name(partner, dataset));
        let mut file = File::create(&path).map_err(|source| CliError::WriteOutputError {
            path: path.display().to_string(),
            source,
        })?;
        let mut df = df.clone();
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)
            .map_err(|source| CliError::WriteCsvError {
                path: path.display().to_string(),
                source,
            })?;
        written.push(path);
    }
    Ok(written)
}
