//! Draft Projector CLI Module
//!
//! Command-line interface for interactive and one-shot projections.

pub mod interactive;
pub mod tables;

use clap::{Args, Parser, Subcommand};
use colored::*;
use polars::prelude::DataFrame;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use crate::data::{DatasetSummary, DraftDataLoader, DEFAULT_DATA_PATH, DEFAULT_MAX_YEAR};
use crate::projection::PlayerQuery;
use crate::training::{ProjectionModel, TrainingConfig};
use interactive::Session;
use tables::{
    importance_table, nationality_counts_table, nationality_options_table, position_options_table,
    stat_line_table,
};

/// Features listed by `info`
const TOP_FEATURES: usize = 10;

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString   { s.truecolor(100, 100, 100) }
fn accent(s: &str) -> ColoredString { s.truecolor(120, 170, 255) }
fn muted(s: &str) -> ColoredString  { s.truecolor(140, 140, 140) }
fn ok(s: &str) -> ColoredString     { s.truecolor(100, 210, 120) }

// Progress goes to stderr so stdout carries only tables and JSON
fn step_run(msg: &str) {
    eprint!("  {} {}... ", accent("›"), msg);
    let _ = std::io::stderr().flush();
}

fn step_done(detail: &str) {
    eprintln!("{} {}", ok("done"), dim(detail));
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "draft-projector")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Project NHL draft picks' career statistics from historical drafts")]
#[command(long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub model: ModelArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Where the training data lives and how the forest is built
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// Historical draft data (CSV)
    #[arg(short, long, global = true, default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Latest draft year used for training
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_YEAR)]
    pub max_year: i64,

    /// Number of trees in the forest
    #[arg(long, global = true, default_value_t = 100)]
    pub trees: usize,

    /// Random seed
    #[arg(long, global = true, default_value_t = 42)]
    pub seed: u64,
}

impl ModelArgs {
    pub fn training_config(&self) -> TrainingConfig {
        TrainingConfig::new()
            .with_n_estimators(self.trees)
            .with_random_state(self.seed)
    }

    pub fn loader(&self) -> DraftDataLoader {
        DraftDataLoader::new().with_max_year(self.max_year)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Project a single player and exit
    Project {
        /// Overall draft pick number
        #[arg(short, long)]
        pick: i64,

        /// Player age at the draft
        #[arg(short, long)]
        age: f64,

        /// Position code (C, LW, RW, D, G)
        #[arg(long)]
        position: String,

        /// Nationality code (e.g. CAN, USA, SWE)
        #[arg(short, long)]
        nationality: String,

        /// Print the full projection as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a summary of the training data
    Info,

    /// Show the position and nationality options
    Options,
}

// ─── Data & training ───────────────────────────────────────────────────────────

fn load_data(args: &ModelArgs) -> anyhow::Result<DataFrame> {
    step_run("Loading draft data");
    let start = Instant::now();
    let df = args.loader().load(&args.data)?;
    step_done(&format!("{} drafts ≤ {} in {:?}", df.height(), args.max_year, start.elapsed()));
    Ok(df)
}

/// Load the data and fit a projection model
pub fn train(args: &ModelArgs) -> anyhow::Result<ProjectionModel> {
    let df = load_data(args)?;
    fit_model(args, &df)
}

fn fit_model(args: &ModelArgs, df: &DataFrame) -> anyhow::Result<ProjectionModel> {
    step_run(&format!("Training {} trees", args.trees));
    let mut model = ProjectionModel::new(args.training_config());
    let summary = model.fit(df)?;
    step_done(&format!("{} features in {:.2}s", summary.n_features, summary.training_time_secs));

    Ok(model)
}

// ─── Commands ──────────────────────────────────────────────────────────────────

pub fn cmd_interactive(args: &ModelArgs) -> anyhow::Result<()> {
    let model = train(args)?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock());
    session.show_options()?;
    session.run(&model)?;

    Ok(())
}

pub fn cmd_project(args: &ModelArgs, query: PlayerQuery, json: bool) -> anyhow::Result<()> {
    let model = train(args)?;
    let projection = model.project(&query)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&projection)?);
    } else {
        println!("{}", stat_line_table(&projection.stat_line(&query.position)));
    }

    Ok(())
}

pub fn cmd_info(args: &ModelArgs) -> anyhow::Result<()> {
    let df = load_data(args)?;
    let summary = DatasetSummary::from_frame(&df)?;
    let model = fit_model(args, &df)?;

    section("Draft Data");

    let years = match (summary.first_year, summary.last_year) {
        (Some(first), Some(last)) => format!("{}–{}", first, last),
        _ => "none".to_string(),
    };

    println!("  {:<14} {}", muted("File"), args.data.display());
    println!("  {:<14} {}", muted("Drafts"), summary.n_rows);
    println!("  {:<14} {}", muted("Years"), years);
    println!("  {:<14} {}", muted("Nationalities"), summary.nationality_counts.len());

    section("Positions");

    for (position, count) in &summary.position_counts {
        println!("  {:<14} {}", position.white(), count);
    }

    section("Nationalities");
    println!("{}", nationality_counts_table(&summary.nationality_counts));

    if let Some(ranked) = model.feature_importances() {
        section("Feature Importance");
        println!("{}", importance_table(&ranked, TOP_FEATURES));
    }

    println!();
    Ok(())
}

pub fn cmd_options() -> anyhow::Result<()> {
    println!("{}", nationality_options_table());
    println!("{}", position_options_table());
    Ok(())
}
