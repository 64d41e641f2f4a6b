//! tabula: page through a fetched record set from the terminal.
//!
//! Reads a JSON array of records, the way a list page receives them from
//! the backend, and shows one sorted, filtered page of it.
//!
//! ```bash
//! tabula payments.json --columns name,amount:right,date --sort amount --desc --page 2
//! tabula members.json --filter smith --fuzzy --activate 1
//! ```

mod columns;
mod error;
mod paths;
mod settings;

use std::fs;
use std::fs::File;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{debug, info};
use simplelog::{Config, LevelFilter, WriteLogger};
use tabula_lib::model::{Record, records_from_json};
use tabula_lib::view::{Direction, Filter, FilterMode, SortState, TableView, find_column};

use crate::columns::{columns_from_records, parse_columns};
use crate::error::CliError;
use crate::settings::Settings;

#[derive(Parser)]
#[command(name = "tabula")]
#[command(about = "Sort, filter and page through a JSON record set", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON file holding an array of records
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Columns as field[:left|right|center][:width], comma separated
    #[arg(short, long)]
    columns: Option<String>,

    /// Column to sort by
    #[arg(short, long)]
    sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    desc: bool,

    /// Page to show (1-based)
    #[arg(short, long, default_value_t = 1)]
    page: usize,

    /// Rows per page
    #[arg(long)]
    page_size: Option<NonZeroUsize>,

    /// Only show rows containing this text
    #[arg(short, long)]
    filter: Option<String>,

    /// Match the filter fuzzily
    #[arg(long, requires = "filter")]
    fuzzy: bool,

    /// Field holding each record's identity
    #[arg(long)]
    key: Option<String>,

    /// Print the N-th row of the shown page (1-based) as JSON
    #[arg(long, value_name = "N")]
    activate: Option<usize>,

    /// Settings file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file (defaults to the platform cache directory)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbosity: u8,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = match cli.config.clone().or_else(paths::config_file) {
        Some(path) => Settings::load(&path)?,
        None => Settings::default(),
    };
    init_logger(&cli, &settings)?;

    let key_field = cli.key.as_deref().unwrap_or(&settings.key_field);
    let text = fs::read_to_string(&cli.file).map_err(|source| CliError::Io {
        path: cli.file.clone(),
        source,
    })?;
    let records = records_from_json(&text, key_field)?;
    info!("Loaded {} records from {}", records.len(), cli.file.display());

    let columns = match &cli.columns {
        Some(spec) => parse_columns(spec)?,
        None => columns_from_records(&records),
    };

    let mut view = TableView::with_config(columns, &settings.view).on_row_click(print_record);
    if let Some(page_size) = cli.page_size {
        view.set_page_size(page_size);
    }
    view.set_records(records);

    if let Some(by) = &cli.sort {
        if find_column(view.columns(), by).is_none() {
            return Err(CliError::UnknownColumn(by.clone()));
        }
        let direction = if cli.desc {
            Direction::Descending
        } else {
            Direction::Ascending
        };
        view.set_sort(Some(SortState::new(by.clone(), direction)));
    }

    if let Some(query) = &cli.filter {
        let mode = if cli.fuzzy {
            FilterMode::Fuzzy
        } else {
            settings.view.filter_mode
        };
        view.set_filter(Some(Filter::new(query.clone(), mode)));
    }

    let shown = view.set_page(cli.page.saturating_sub(1));
    debug!("Showing page {} of {} visible records", shown + 1, view.visible_len());

    print!("{}", view.render().to_text());

    if let Some(n) = cli.activate {
        let activated = n
            .checked_sub(1)
            .is_some_and(|position| view.activate_row(position));
        if !activated {
            return Err(CliError::NoSuchRow(n));
        }
    }
    Ok(())
}

fn print_record(record: &Record) {
    match serde_json::to_string_pretty(record) {
        Ok(json) => println!("\n{}", json),
        Err(e) => log::error!("Cannot serialise record: {}", e),
    }
}

fn init_logger(cli: &Cli, settings: &Settings) -> Result<(), CliError> {
    let level = match cli.verbosity {
        0 => settings.level(),
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let Some(path) = cli.log_file.clone().or_else(paths::log_file) else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|source| CliError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    paths::rotate_logs(&path);
    let file = File::create(&path).map_err(|source| CliError::Io {
        path: path.clone(),
        source,
    })?;
    WriteLogger::init(level, Config::default(), file).map_err(|e| CliError::Logger(e.to_string()))
}
