//! Recipe data and the cache-backed TheMealDB client
//!
//! This module contains the recipe record type plus the client that maps each
//! query kind (search, area, category, lookup, aggregated Indian view) onto a
//! cache key and an API endpoint.

pub mod filters;
pub mod indian;
pub mod meals;

pub use filters::{
    find_explore, find_filter, Filter, FilterKind, DEFAULT_EXPLORE, EXPLORE_PRESETS,
    FILTER_PRESETS,
};
pub use indian::{merge_unique, INDIAN_KEYWORDS};
pub use meals::{FetchError, MealClient, DEFAULT_BASE_URL};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Highest ingredient slot TheMealDB fills (`strIngredient1`..`strIngredient20`)
const MAX_INGREDIENTS: usize = 20;

/// A recipe as returned by TheMealDB
///
/// Only `idMeal` is required. Every other upstream field is kept verbatim in
/// `fields` (including explicit `null`s), so a record written to the cache
/// reads back exactly as the API sent it. Accessors treat `null`, missing and
/// blank values alike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    /// Unique identifier
    #[serde(rename = "idMeal")]
    pub id: String,
    /// All other upstream fields (`strMeal`, `strMealThumb`, `strArea`, ...)
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

/// One ingredient line of a recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub name: String,
    pub measure: Option<String>,
}

impl Meal {
    /// Recipe name, empty if the record has none
    pub fn name(&self) -> &str {
        self.text("strMeal").unwrap_or_default()
    }

    /// Full-size image URL
    pub fn thumbnail_url(&self) -> Option<&str> {
        self.text("strMealThumb")
    }

    /// Cuisine area, e.g. "Indian"
    pub fn area(&self) -> Option<&str> {
        self.text("strArea")
    }

    /// Category, e.g. "Seafood"
    pub fn category(&self) -> Option<&str> {
        self.text("strCategory")
    }

    pub fn instructions(&self) -> Option<&str> {
        self.text("strInstructions")
    }

    /// Raw comma-separated tags
    pub fn tags(&self) -> Option<&str> {
        self.text("strTags")
    }

    /// Tags split on commas, trimmed, with empty entries dropped
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags()
            .map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Ingredients paired with their measures, in upstream slot order
    pub fn ingredients(&self) -> Vec<Ingredient> {
        (1..=MAX_INGREDIENTS)
            .filter_map(|slot| {
                let name = self.text(&format!("strIngredient{}", slot))?;
                let measure = self.text(&format!("strMeasure{}", slot)).map(str::to_string);
                Some(Ingredient {
                    name: name.to_string(),
                    measure,
                })
            })
            .collect()
    }

    /// "Area • Category", whichever half is known, or "Recipe"
    pub fn subtitle(&self) -> String {
        match (self.area(), self.category()) {
            (Some(area), Some(category)) => format!("{} • {}", area, category),
            (Some(one), None) | (None, Some(one)) => one.to_string(),
            (None, None) => "Recipe".to_string(),
        }
    }

    /// A non-blank string value, trimmed
    fn text(&self, field: &str) -> Option<&str> {
        match self.fields.get(field) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim()),
            _ => None,
        }
    }
}
