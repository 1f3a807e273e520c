//! Command-line interface parsing for recipebox
//!
//! This module handles parsing of CLI arguments using clap and resolves them
//! into a `StartupConfig`, validating the log level and quick-filter labels.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::Level;

use crate::data::{
    find_explore, find_filter, Filter, DEFAULT_EXPLORE, EXPLORE_PRESETS, FILTER_PRESETS,
};

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified filter label is not one of the presets
    #[error("Invalid filter: '{0}'. Valid filters: {}", filter_labels())]
    InvalidFilter(String),

    /// The specified explore chip is not a known category or cuisine
    #[error("Invalid explore pick: '{0}'. Valid picks: {}", explore_labels())]
    InvalidExplore(String),

    /// The specified log level is not recognized
    #[error("Invalid log level: '{0}'. Valid levels: error, warn, info, debug, trace")]
    InvalidLogLevel(String),
}

fn labels(presets: &[Filter]) -> String {
    presets
        .iter()
        .map(|f| f.label.to_lowercase())
        .collect::<Vec<_>>()
        .join(", ")
}

fn filter_labels() -> String {
    labels(&FILTER_PRESETS)
}

fn explore_labels() -> String {
    labels(&EXPLORE_PRESETS)
}

/// recipebox - Search, filter and view recipes from TheMealDB
#[derive(Parser, Debug)]
#[command(name = "recipebox")]
#[command(about = "Search, filter and view recipes from TheMealDB")]
#[command(version)]
pub struct Cli {
    /// API base URL
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Directory for the persistent cache (defaults to the XDG cache dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// What to look up
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Search recipes by name
    Search { term: String },
    /// List recipes from a cuisine area (e.g. Italian)
    Area { name: String },
    /// List recipes in a category (e.g. Seafood)
    Category { name: String },
    /// Show one recipe in detail
    Show { id: String },
    /// Indian recipes gathered from the area filter and dish-name searches
    Indian,
    /// The unfiltered recipe listing
    Popular,
    /// Answer free text the way the home screen does
    Browse { query: Option<String> },
    /// Apply a quick filter (breakfast, lunch, dinner, indian, italian, spanish, arabian)
    Filter { label: String },
    /// Browse by category or cuisine (defaults to Seafood)
    Explore { pick: Option<String> },
}

/// A validated query ready to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Search(String),
    Area(String),
    Category(String),
    Show(String),
    Indian,
    Popular,
    Browse(String),
    Filter(Filter),
    Explore(Filter),
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// API base URL override
    pub base_url: Option<String>,
    /// Persistent cache directory override
    pub cache_dir: Option<PathBuf>,
    /// Log level for the subscriber
    pub log_level: Level,
    /// Print JSON instead of text
    pub json: bool,
    /// The query to run
    pub query: Query,
}

/// Parses a quick-filter label into one of the presets
pub fn parse_filter_arg(s: &str) -> Result<Filter, CliError> {
    find_filter(s).ok_or_else(|| CliError::InvalidFilter(s.to_string()))
}

/// Parses an explore chip label, falling back to the default when absent
pub fn parse_explore_arg(s: Option<&str>) -> Result<Filter, CliError> {
    match s {
        None => Ok(DEFAULT_EXPLORE),
        Some(label) => {
            find_explore(label).ok_or_else(|| CliError::InvalidExplore(label.to_string()))
        }
    }
}

/// Parses a log level name
pub fn parse_log_level(s: &str) -> Result<Level, CliError> {
    Level::from_str(s.trim()).map_err(|_| CliError::InvalidLogLevel(s.to_string()))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with the resolved query
    /// * `Err(CliError)` if the log level or filter label is invalid
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let query = match &cli.command {
            Command::Search { term } => Query::Search(term.clone()),
            Command::Area { name } => Query::Area(name.clone()),
            Command::Category { name } => Query::Category(name.clone()),
            Command::Show { id } => Query::Show(id.clone()),
            Command::Indian => Query::Indian,
            Command::Popular => Query::Popular,
            Command::Browse { query } => Query::Browse(query.clone().unwrap_or_default()),
            Command::Filter { label } => Query::Filter(parse_filter_arg(label)?),
            Command::Explore { pick } => Query::Explore(parse_explore_arg(pick.as_deref())?),
        };

        Ok(StartupConfig {
            base_url: cli.base_url.clone(),
            cache_dir: cli.cache_dir.clone(),
            log_level: parse_log_level(&cli.log_level)?,
            json: cli.json,
            query,
        })
    }
}
