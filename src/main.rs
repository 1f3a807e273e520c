//! recipebox - Search, filter and view recipes from TheMealDB
//!
//! Every lookup goes through a two-tier cache (memory + files under the XDG
//! cache directory) so repeated queries within 30 minutes stay offline.

use std::error::Error;
use std::sync::Arc;

use clap::Parser;

use recipebox::cache::{CacheStore, FileStore};
use recipebox::cli::{Cli, Query, StartupConfig};
use recipebox::data::MealClient;
use recipebox::logging::{init_logger, LoggerConfig};
use recipebox::output::{render_json, render_meal_detail, render_meal_list};

/// Builds the client from the startup flags
fn build_client(config: &StartupConfig) -> MealClient {
    let client = match &config.cache_dir {
        Some(dir) => {
            let durable = Arc::new(FileStore::with_dir(dir.clone()));
            MealClient::with_cache(Arc::new(CacheStore::new(durable)))
        }
        None => MealClient::new(),
    };

    match &config.base_url {
        Some(base_url) => client.with_base_url(base_url.as_str()),
        None => client,
    }
}

/// Runs the query and renders its result
async fn run(client: &MealClient, config: &StartupConfig) -> Result<String, Box<dyn Error>> {
    let meals = match &config.query {
        Query::Show(id) => {
            let meal = client.get_meal_details(id).await?;
            return Ok(match (meal, config.json) {
                (Some(meal), true) => render_json(&meal)? + "\n",
                (Some(meal), false) => render_meal_detail(&meal),
                (None, true) => "null\n".to_string(),
                (None, false) => format!("No recipe with id {}\n", id),
            });
        }
        Query::Search(term) => client.search_meals(term).await?,
        Query::Area(name) => client.filter_by_area(name).await?,
        Query::Category(name) => client.filter_by_category(name).await?,
        Query::Indian => client.fetch_indian_meals().await,
        Query::Popular => client.fetch_popular_meals().await?,
        Query::Browse(text) => client.browse(text).await?,
        Query::Filter(filter) | Query::Explore(filter) => client.apply_filter(filter).await?,
    };

    if config.json {
        Ok(render_json(&meals)? + "\n")
    } else {
        Ok(render_meal_list(&meals))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // Errors are reported through their Display text, not the enum Debug form
    let config = StartupConfig::from_cli(&cli).map_err(|e| e.to_string())?;

    if let Err(e) = init_logger(LoggerConfig {
        level: config.log_level,
        ..LoggerConfig::default()
    }) {
        eprintln!("warning: {}", e);
    }

    let client = build_client(&config);
    let text = run(&client, &config).await.map_err(|e| e.to_string())?;
    print!("{}", text);

    Ok(())
}
