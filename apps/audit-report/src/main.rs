//! Audit report generator
//!
//! Reads an exported audit bundle (header, question rows, response rows),
//! validates it, and writes either the dashboard scores or the full report data
//! as JSON. Logs go to stderr so stdout carries only JSON.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use compliance_scoring::format::report_filename;
use compliance_scoring::{ScoringConfig, ScoringEngine};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod bundle;

use bundle::AuditBundle;

#[derive(Parser, Debug)]
#[command(name = "audit-report")]
#[command(version, about = "Score a landlord compliance audit and emit report data")]
struct Args {
    /// Audit bundle JSON file
    input: PathBuf,

    /// Scoring thresholds JSON file (defaults to the calibrated thresholds)
    #[arg(long, env = "AUDIT_REPORT_CONFIG")]
    config: Option<PathBuf>,

    /// Write output here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Keep questions from every tier instead of the audit's tier only
    #[arg(long)]
    all_tiers: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Category scores, overall score and recommended actions
    Scores,
    /// Full report data for the PDF renderers
    Report,
}

fn load_config(path: Option<&Path>) -> Result<ScoringConfig> {
    let Some(path) = path else {
        return Ok(ScoringConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = ScoringConfig::from_json(&json)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    info!("Loaded scoring config from {}", path.display());
    Ok(config)
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn run(args: &Args) -> Result<String> {
    let config = load_config(args.config.as_deref())?;
    let engine = ScoringEngine::with_config(config)?;

    let json = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read bundle {}", args.input.display()))?;
    let bundle = AuditBundle::from_json(&json, args.all_tiers, chrono::Utc::now())?;
    info!(
        "Scoring {} responses against {} questions ({})",
        bundle.responses.len(),
        bundle.catalog.len(),
        bundle.header.risk_tier
    );

    match args.command {
        Command::Scores => {
            let scores = engine.score_audit(&bundle.catalog, &bundle.responses)?;
            info!(
                "Overall score {} ({})",
                scores.overall_score.score, scores.overall_score.risk_level
            );
            to_json(&scores, args.pretty)
        }
        Command::Report => {
            let filename =
                report_filename(&bundle.header.property_address, &bundle.header.audit_end_date);
            let report = engine.build_report(bundle.header, &bundle.catalog, &bundle.responses)?;
            info!("Report data ready for {}", filename);
            to_json(&report, args.pretty)
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("audit_report=info".parse()?)
                .add_directive("compliance_scoring=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let json = run(&args)?;

    match &args.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
