mod error;
mod paths;
mod render;

use std::fs::{self, File};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use datatable_lib::config::{ColumnConfig, TableConfig};
use datatable_lib::model::load_records;
use datatable_lib::settings::{ConfigProvider, DirectoryProvider};
use datatable_lib::{DataTable, Record};
use log::{debug, info};
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::error::CliError;

/// Sort, filter and page through a JSON array of records.
#[derive(Parser)]
#[command(name = "datatable", version)]
struct Cli {
    /// JSON file holding an array of row objects
    #[arg(short, long)]
    rows: PathBuf,

    /// Table configuration file (TOML)
    #[arg(short, long, conflicts_with = "table")]
    config: Option<PathBuf>,

    /// Table id, read from <config dir>/<id>.toml
    #[arg(short, long)]
    table: Option<String>,

    /// Search text, matched against every column
    #[arg(short, long)]
    query: Option<String>,

    /// Click a column header; repeat to cycle asc, desc, unsorted
    #[arg(short, long)]
    sort: Vec<String>,

    /// Page to show, clamped into range
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    page: isize,

    /// Toggle the selection of a row key
    #[arg(long)]
    select: Vec<String>,

    /// Click the header checkbox of the shown page
    #[arg(long)]
    toggle_all: bool,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    init_logging(cli.verbose)?;

    let records = load_records(&cli.rows)?;
    info!("loaded {} rows from {}", records.len(), cli.rows.display());

    let mut config = resolve_config(cli)?;
    if config.columns.is_empty() {
        config.columns = infer_columns(&records);
        debug!("inferred {} columns", config.columns.len());
    }

    let mut table: DataTable<Record> = DataTable::from_config(&config);
    table.set_rows(records);

    if let Some(query) = &cli.query {
        table.set_query(query.as_str());
    }
    for key in &cli.sort {
        if !table.toggle_sort(key).is_handled() {
            return Err(CliError::NotSortable(key.clone()));
        }
    }
    table.go_to_page(cli.page);
    if cli.toggle_all {
        table.toggle_all();
    }
    for key in &cli.select {
        table.toggle_key(key);
    }

    print!("{}", render::render(&table));
    Ok(())
}

/// Write logs to the cache directory. Skipped when it cannot be determined.
fn init_logging(verbose: bool) -> Result<(), CliError> {
    let Some(path) = paths::log_file() else {
        return Ok(());
    };
    paths::rotate_logs();

    let to_error = |source| CliError::LogFile {
        path: path.clone(),
        source,
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(to_error)?;
    }
    let log_file = File::create(&path).map_err(to_error)?;

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    WriteLogger::init(level, Config::default(), log_file)?;
    Ok(())
}

/// `--config` wins, then `--table`, then the default configuration.
fn resolve_config(cli: &Cli) -> Result<TableConfig, CliError> {
    if let Some(path) = &cli.config {
        return Ok(TableConfig::load(path)?);
    }
    if let Some(id) = &cli.table {
        let dir = paths::config_dir().ok_or(CliError::NoConfigDir)?;
        return Ok(DirectoryProvider::new(dir).require(id)?);
    }
    Ok(TableConfig::default())
}

/// One sortable column per field, in order of first appearance.
fn infer_columns(records: &[Record]) -> Vec<ColumnConfig> {
    let mut keys: Vec<&str> = Vec::new();
    for record in records {
        for key in record.fields().keys() {
            if !keys.contains(&key.as_str()) {
                keys.push(key);
            }
        }
    }
    keys.into_iter()
        .map(|key| ColumnConfig {
            key: key.to_string(),
            label: None,
            sortable: true,
            align: Default::default(),
            format: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_columns_in_first_seen_order() {
        let records = vec![
            Record::new().set("name", "a").set("id", 1i64),
            Record::new().set("plan", "pro").set("id", 2i64),
        ];
        let keys: Vec<String> = infer_columns(&records).into_iter().map(|c| c.key).collect();
        assert_eq!(keys, ["id", "name", "plan"]);
    }

    #[test]
    fn test_cli_parses_repeated_flags() {
        let cli = Cli::try_parse_from([
            "datatable", "--rows", "rows.json", "-s", "name", "-s", "name", "--page", "-2",
            "--select", "7", "--select", "9",
        ])
        .unwrap();
        assert_eq!(cli.sort, ["name", "name"]);
        assert_eq!(cli.page, -2);
        assert_eq!(cli.select, ["7", "9"]);
        assert!(!cli.toggle_all);
    }

    #[test]
    fn test_config_and_table_conflict() {
        let result = Cli::try_parse_from([
            "datatable", "--rows", "r.json", "--config", "c.toml", "--table", "links",
        ]);
        assert!(result.is_err());
    }
}
