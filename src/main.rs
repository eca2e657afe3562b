//! # Legal Analyzer Main Driver
//!
//! ## Purpose
//! Command-line entry point for the legal document analyzer. Reads a
//! plain-text document, runs the analysis pipeline, and prints the
//! executive summary and full report.
//!
//! ## Input/Output Specification
//! - **Input**: Text file path, configuration file, CLI flags
//! - **Output**: Plain-text reports on stdout, optional saved analysis
//!
//! ## Architecture Flow
//! 1. Parse command line arguments and load configuration
//! 2. Initialize logging and tracing
//! 3. Construct collaborator handles once (explicit dependency injection)
//! 4. Run the pipeline and print reports
//! 5. Optionally persist the analysis to the local store

use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Arg, ArgAction, Command};
use tracing::info;
use tracing_subscriber::{
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
    EnvFilter,
};

use legal_clause_analyzer::{
    config::Config,
    pipeline::DocumentAnalyzer,
    report::ReportBuilder,
    storage::{generate_analysis_name, AnalysisStore, SledAnalysisStore},
    HeuristicAnalyzer,
};

fn main() -> anyhow::Result<()> {
    let matches = Command::new("legal-analyzer")
        .version("0.1.0")
        .author("Legal Analysis Team")
        .about("Analyzes legal documents: clause segmentation, classification, and extraction")
        .arg(
            Arg::new("input")
                .value_name("FILE")
                .help("Plain-text document to analyze")
                .index(1),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("config.toml"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Output format")
                .value_parser(["summary", "full", "json"])
                .default_value("full"),
        )
        .arg(
            Arg::new("save")
                .long("save")
                .value_name("OWNER")
                .help("Save the analysis to the local store under this owner"),
        )
        .arg(
            Arg::new("list")
                .long("list")
                .value_name("OWNER")
                .help("List saved analyses for this owner and exit"),
        )
        .arg(
            Arg::new("no-linguistic")
                .long("no-linguistic")
                .help("Disable the linguistic analyzer (regex-only degraded mode)")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let config_path = matches.get_one::<String>("config").unwrap();
    let config = Config::from_file(config_path)
        .with_context(|| format!("failed to load configuration from {}", config_path))?;

    init_logging(&config);

    if let Some(owner) = matches.get_one::<String>("list") {
        return list_saved(&config, owner);
    }

    let Some(input) = matches.get_one::<String>("input") else {
        bail!("an input file is required unless --list is used");
    };
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read document {}", input))?;

    // Collaborator handles are built once here and injected; the
    // pipeline itself holds no global state.
    let mut analyzer = DocumentAnalyzer::new(&config)?;
    if !matches.get_flag("no-linguistic") {
        analyzer = analyzer.with_linguistic_analyzer(Arc::new(HeuristicAnalyzer::new()?));
    }

    info!("Analyzing document: {}", input);
    let analysis = analyzer.analyze(&text);

    let reports = ReportBuilder::new();
    match matches.get_one::<String>("format").unwrap().as_str() {
        "summary" => println!("{}", reports.executive_summary(&analysis)),
        "json" => println!("{}", serde_json::to_string_pretty(&analysis)?),
        _ => {
            println!("{}", reports.executive_summary(&analysis));
            println!();
            println!("{}", reports.full_report(&analysis));
        }
    }

    if let Some(owner) = matches.get_one::<String>("save") {
        let store = SledAnalysisStore::new(&config.storage)?;
        let name = generate_analysis_name(&analysis);
        store.save(owner, &name, &analysis)?;
        info!("Saved analysis as '{}'", name);
        eprintln!("Saved analysis as '{}'", name);
    }

    Ok(())
}

/// Initialize logging and tracing from configuration
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if config.logging.json_format {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().json().with_filter(filter))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_filter(filter))
            .init();
    }
}

/// Print one owner's saved analyses
fn list_saved(config: &Config, owner: &str) -> anyhow::Result<()> {
    let store = SledAnalysisStore::new(&config.storage)?;
    let records = store.list(owner)?;

    if records.is_empty() {
        println!("No saved analyses for '{}'", owner);
        return Ok(());
    }

    for record in records {
        println!(
            "{}  (saved {}, {} clauses, {} dates)",
            record.name,
            record.saved_at.format("%Y-%m-%d %H:%M:%S"),
            record.analysis.clauses.len(),
            record.analysis.dates.len()
        );
    }
    Ok(())
}
