use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use anyhow::{Context as _, Result};
use clap::Args;
use phonesift_config::RunOverrides;
use phonesift_core::CanonicalPhone;
use phonesift_scan::CorpusAggregator;
use phonesift_sheet::{CsvSink, ResultSink, WorkbookReader};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::debug;

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Directory with order spreadsheets
    #[arg(long)]
    pub path: Option<PathBuf>,
    /// City to keep, matched exactly
    #[arg(long)]
    pub city: Option<String>,
    /// First order year to keep
    #[arg(long)]
    pub from: Option<i32>,
    /// Last order year to keep
    #[arg(long)]
    pub to: Option<i32>,
    /// Sheet to read in every workbook
    #[arg(long)]
    pub sheet: Option<String>,
    /// Output file for the unique phones
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Print the number of matched phones and write nothing
    #[arg(long)]
    pub count_only: bool,
}

impl ExtractArgs {
    fn overrides(&self) -> RunOverrides {
        RunOverrides {
            source_dir: self.path.clone(),
            city: self.city.clone(),
            year_from: self.from,
            year_to: self.to,
            sheet: self.sheet.clone(),
            output: self.out.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ExtractReport {
    source: String,
    files: usize,
    rows: usize,
    matched: usize,
    unique: usize,
    output: Option<String>,
    phones: Vec<CanonicalPhone>,
}

pub fn extract(ctx: &Context<'_>, args: ExtractArgs) -> Result<()> {
    let config = ctx
        .config
        .clone()
        .with_overrides(args.overrides())
        .with_context(|| "resolve run settings")?;
    if config.source_dir.is_file() {
        return Err(invalid_input(format!(
            "{} is a file, expected a directory of spreadsheets",
            config.source_dir.display()
        )));
    }
    let show_progress = !ctx.json && !args.count_only;

    if show_progress {
        println!(
            "Scanning {} for {} orders from {} to {}",
            config.source_dir.display(),
            config.city,
            config.year_from,
            config.year_to
        );
    }

    let runtime = Runtime::new().with_context(|| "start runtime")?;
    let reader = WorkbookReader::new(config.sheet.clone());
    debug!(sheet = reader.sheet(), "reading workbooks");
    let reader = Arc::new(reader);
    let aggregation = runtime
        .block_on(CorpusAggregator::new(reader, config.row_filter()).aggregate(&config.source_dir))
        .with_context(|| format!("scan {}", config.source_dir.display()))?;

    if args.count_only {
        if ctx.json {
            return print_json(&ExtractReport {
                source: config.source_dir.display().to_string(),
                files: aggregation.files,
                rows: aggregation.rows,
                matched: aggregation.matched(),
                unique: aggregation.unique().len(),
                output: None,
                phones: Vec::new(),
            });
        }
        println!("{}", aggregation.matched());
        return Ok(());
    }

    let unique = aggregation.unique();
    if show_progress {
        println!(
            "Matched {} phones in {} files, {} unique",
            aggregation.matched(),
            aggregation.files,
            unique.len()
        );
    }

    let sink = CsvSink::new(config.output.clone());
    sink.write_phones(&unique)
        .with_context(|| format!("write output {}", sink.path().display()))?;
    debug!(path = %sink.path().display(), count = unique.len(), "output written");

    if ctx.json {
        return print_json(&ExtractReport {
            source: config.source_dir.display().to_string(),
            files: aggregation.files,
            rows: aggregation.rows,
            matched: aggregation.matched(),
            unique: unique.len(),
            output: Some(sink.path().display().to_string()),
            phones: unique,
        });
    }

    println!("Saved {} phones to {}", unique.len(), sink.path().display());
    Ok(())
}
