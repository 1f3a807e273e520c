//! TheMealDB API client
//!
//! Every query goes through the shared [`CacheStore`]: a fresh cache entry is
//! returned without touching the network, otherwise a single GET is issued
//! and the parsed result is written back to the cache.

use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::Meal;
use crate::cache::{CacheStore, DurableStore, FileStore, MemoryStore};

/// Base URL for TheMealDB's free API
pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Search term used for the default home listing
const DEFAULT_LISTING_TERM: &str = "chicken";

/// Errors that can occur when fetching recipes
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API returned {status} for {url}")]
    RemoteStatus { status: StatusCode, url: String },

    /// Failed to parse JSON response
    #[error("Failed to parse API response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Response envelope shared by every TheMealDB endpoint
///
/// `meals` is `null` (or missing) when nothing matched.
#[derive(Debug, Deserialize)]
struct MealsResponse {
    #[serde(default)]
    meals: Option<Vec<Meal>>,
}

/// An API endpoint and its single query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Endpoint<'a> {
    /// Search by name substring
    Search(&'a str),
    /// Filter by cuisine area
    Area(&'a str),
    /// Filter by category
    Category(&'a str),
    /// Lookup by id
    Lookup(&'a str),
}

impl<'a> Endpoint<'a> {
    fn path(&self) -> &'static str {
        match self {
            Endpoint::Search(_) => "search.php",
            Endpoint::Area(_) | Endpoint::Category(_) => "filter.php",
            Endpoint::Lookup(_) => "lookup.php",
        }
    }

    fn query(&self) -> (&'static str, &'a str) {
        match *self {
            Endpoint::Search(term) => ("s", term),
            Endpoint::Area(area) => ("a", area),
            Endpoint::Category(category) => ("c", category),
            Endpoint::Lookup(id) => ("i", id),
        }
    }
}

/// Client for fetching recipes from TheMealDB through the two-tier cache
#[derive(Debug, Clone)]
pub struct MealClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Shared response cache
    cache: Arc<CacheStore>,
    /// Base URL for the API (allows override for testing)
    base_url: String,
}

impl Default for MealClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MealClient {
    /// Creates a client backed by the XDG cache directory
    ///
    /// Falls back to an in-memory durable tier when no cache directory can be
    /// determined.
    pub fn new() -> Self {
        let durable: Arc<dyn DurableStore> = match FileStore::new() {
            Some(store) => Arc::new(store),
            None => {
                warn!("no cache directory available, cached recipes will not persist");
                Arc::new(MemoryStore::new())
            }
        };
        Self::with_cache(Arc::new(CacheStore::new(durable)))
    }

    /// Creates a client with a custom cache store
    pub fn with_cache(cache: Arc<CacheStore>) -> Self {
        Self {
            http_client: Client::new(),
            cache,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Overrides the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// The cache this client reads from and writes to
    pub fn cache(&self) -> &Arc<CacheStore> {
        &self.cache
    }

    /// Searches recipes whose name contains `term`
    pub async fn search_meals(&self, term: &str) -> Result<Vec<Meal>, FetchError> {
        self.fetch_with_cache(Endpoint::Search(term), format!("search:{}", term))
            .await
    }

    /// Lists recipes from a cuisine area, e.g. "Italian"
    pub async fn filter_by_area(&self, area: &str) -> Result<Vec<Meal>, FetchError> {
        self.fetch_with_cache(Endpoint::Area(area), format!("area:{}", area))
            .await
    }

    /// Lists recipes in a category, e.g. "Seafood"
    pub async fn filter_by_category(&self, category: &str) -> Result<Vec<Meal>, FetchError> {
        self.fetch_with_cache(Endpoint::Category(category), format!("category:{}", category))
            .await
    }

    /// Fetches the unfiltered listing (a search with an empty term)
    pub async fn fetch_popular_meals(&self) -> Result<Vec<Meal>, FetchError> {
        self.fetch_with_cache(Endpoint::Search(""), "popular".to_string())
            .await
    }

    /// Default home listing shown before the user types anything
    pub async fn fetch_default_listing(&self) -> Result<Vec<Meal>, FetchError> {
        self.search_meals(DEFAULT_LISTING_TERM).await
    }

    /// Looks up a single recipe by id
    ///
    /// Returns `Ok(None)` when the API has no recipe with that id. Misses are
    /// not cached.
    pub async fn get_meal_details(&self, id: &str) -> Result<Option<Meal>, FetchError> {
        let cache_key = format!("meal:{}", id);

        if let Some(meal) = self.cache.read::<Meal>(&cache_key).await {
            return Ok(Some(meal));
        }

        let meal = self.fetch_from_api(Endpoint::Lookup(id)).await?.into_iter().next();

        if let Some(ref meal) = meal {
            self.store(&cache_key, meal).await;
        }
        Ok(meal)
    }

    /// Cache-or-fetch policy shared by every list query
    pub(crate) async fn fetch_with_cache(
        &self,
        endpoint: Endpoint<'_>,
        cache_key: String,
    ) -> Result<Vec<Meal>, FetchError> {
        if let Some(meals) = self.cache.read::<Vec<Meal>>(&cache_key).await {
            return Ok(meals);
        }

        let meals = self.fetch_from_api(endpoint).await?;
        self.store(&cache_key, &meals).await;
        Ok(meals)
    }

    /// Writes to the cache, downgrading failures to a warning
    pub(crate) async fn store<T: serde::Serialize + ?Sized>(&self, cache_key: &str, data: &T) {
        if let Err(e) = self.cache.write(cache_key, data).await {
            warn!(key = cache_key, error = %e, "failed to persist cache entry");
        }
    }

    /// Issues one GET and parses the `meals` envelope
    async fn fetch_from_api(&self, endpoint: Endpoint<'_>) -> Result<Vec<Meal>, FetchError> {
        let url = format!("{}/{}", self.base_url, endpoint.path());
        debug!(url = %url, query = ?endpoint.query(), "fetching from API");

        let response = self
            .http_client
            .get(&url)
            .query(&[endpoint.query()])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::RemoteStatus {
                status,
                url: response.url().to_string(),
            });
        }

        let text = response.text().await?;
        let api_response: MealsResponse = serde_json::from_str(&text)?;

        Ok(api_response.meals.unwrap_or_default())
    }
}
