//! Aggregated Indian cuisine view
//!
//! TheMealDB tags only a handful of recipes with the "Indian" area, so this
//! view widens the net: it combines the area filter with name searches for
//! common Indian dishes, each cached under its own key, and caches the
//! deduplicated union under `indian:all`.

use std::collections::HashSet;

use futures::future::{join, join_all};
use tracing::{debug, error};

use super::meals::{Endpoint, FetchError, MealClient};
use super::Meal;

/// Name searches merged into the Indian view, in merge order
pub const INDIAN_KEYWORDS: [&str; 9] = [
    "chicken", "curry", "masala", "paneer", "dal", "biryani", "tikka", "kofta", "sabzi",
];

/// Area filter value for the base result set
const INDIAN_AREA: &str = "Indian";

/// Cache key for the merged result
const INDIAN_ALL_KEY: &str = "indian:all";

/// Cache key for the area sub-fetch
const INDIAN_AREA_KEY: &str = "indian:area";

/// Merges result batches, keeping the first record seen for each id
///
/// Batch order is preserved, so earlier batches win ties against later ones.
pub fn merge_unique<I>(batches: I) -> Vec<Meal>
where
    I: IntoIterator<Item = Vec<Meal>>,
{
    let mut seen = HashSet::new();
    batches
        .into_iter()
        .flatten()
        .filter(|meal| seen.insert(meal.id.clone()))
        .collect()
}

impl MealClient {
    /// Fetches the aggregated Indian view, degrading to an empty list on failure
    ///
    /// The failure is logged. Callers that need to tell "couldn't load" from
    /// "no matches" should use [`MealClient::try_fetch_indian_meals`].
    pub async fn fetch_indian_meals(&self) -> Vec<Meal> {
        match self.try_fetch_indian_meals().await {
            Ok(meals) => meals,
            Err(e) => {
                error!(error = %e, "Indian meals fetch failed");
                Vec::new()
            }
        }
    }

    /// Fetches the aggregated Indian view
    ///
    /// A fresh `indian:all` entry short-circuits every sub-fetch. Otherwise
    /// the area filter and all keyword searches run concurrently and every one
    /// runs to completion; if any failed, the first error (area first, then
    /// keyword order) is returned and nothing is cached under `indian:all`.
    pub async fn try_fetch_indian_meals(&self) -> Result<Vec<Meal>, FetchError> {
        if let Some(meals) = self.cache().read::<Vec<Meal>>(INDIAN_ALL_KEY).await {
            return Ok(meals);
        }

        let area = self.fetch_with_cache(Endpoint::Area(INDIAN_AREA), INDIAN_AREA_KEY.to_string());
        let keywords = join_all(INDIAN_KEYWORDS.iter().map(|keyword| {
            self.fetch_with_cache(Endpoint::Search(keyword), format!("indian:kw:{}", keyword))
        }));

        let (area_result, keyword_results) = join(area, keywords).await;

        let batches = std::iter::once(area_result)
            .chain(keyword_results)
            .collect::<Result<Vec<_>, _>>()?;

        let merged = merge_unique(batches);
        debug!(count = merged.len(), "merged Indian meals");

        self.store(INDIAN_ALL_KEY, &merged).await;
        Ok(merged)
    }
}
