//! Quick filters and free-text routing for the home listing

use super::meals::{FetchError, MealClient};
use super::Meal;

/// Substrings that send a free-text query to the aggregated Indian view
const INDIAN_QUERY_HINTS: [&str; 6] = ["ind", "paneer", "dal", "biryani", "curry", "masala"];

/// Which query kind a filter runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Category,
    Area,
    Search,
}

/// A named quick filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Filter {
    pub label: &'static str,
    pub kind: FilterKind,
    pub value: &'static str,
}

impl Filter {
    const fn new(label: &'static str, kind: FilterKind, value: &'static str) -> Self {
        Self { label, kind, value }
    }
}

/// Quick filters offered on the home listing
pub const FILTER_PRESETS: [Filter; 7] = [
    Filter::new("Breakfast", FilterKind::Category, "Breakfast"),
    Filter::new("Lunch", FilterKind::Search, "Chicken"),
    Filter::new("Dinner", FilterKind::Search, "Beef"),
    Filter::new("Indian", FilterKind::Area, "Indian"),
    Filter::new("Italian", FilterKind::Area, "Italian"),
    Filter::new("Spanish", FilterKind::Area, "Spanish"),
    Filter::new("Arabian", FilterKind::Area, "Arabian"),
];

/// Category and cuisine chips offered on the explore listing
pub const EXPLORE_PRESETS: [Filter; 12] = [
    Filter::new("Breakfast", FilterKind::Category, "Breakfast"),
    Filter::new("Seafood", FilterKind::Category, "Seafood"),
    Filter::new("Dessert", FilterKind::Category, "Dessert"),
    Filter::new("Vegetarian", FilterKind::Category, "Vegetarian"),
    Filter::new("Beef", FilterKind::Category, "Beef"),
    Filter::new("Chicken", FilterKind::Category, "Chicken"),
    Filter::new("Italian", FilterKind::Area, "Italian"),
    Filter::new("Mexican", FilterKind::Area, "Mexican"),
    Filter::new("Chinese", FilterKind::Area, "Chinese"),
    Filter::new("Indian", FilterKind::Area, "Indian"),
    Filter::new("Japanese", FilterKind::Area, "Japanese"),
    Filter::new("Thai", FilterKind::Area, "Thai"),
];

/// Selected when the explore listing first opens
pub const DEFAULT_EXPLORE: Filter = EXPLORE_PRESETS[1];

fn find_in(presets: &[Filter], label: &str) -> Option<Filter> {
    presets
        .iter()
        .copied()
        .find(|f| f.label.eq_ignore_ascii_case(label.trim()))
}

/// Looks up a preset by label, ignoring case
pub fn find_filter(label: &str) -> Option<Filter> {
    find_in(&FILTER_PRESETS, label)
}

/// Looks up an explore chip by label, ignoring case
pub fn find_explore(label: &str) -> Option<Filter> {
    find_in(&EXPLORE_PRESETS, label)
}

/// Whether free text should be answered by the aggregated Indian view
pub fn is_indian_query(text: &str) -> bool {
    let text = text.to_lowercase();
    INDIAN_QUERY_HINTS.iter().any(|hint| text.contains(hint))
}

impl MealClient {
    /// Runs a quick filter through the matching query kind
    pub async fn apply_filter(&self, filter: &Filter) -> Result<Vec<Meal>, FetchError> {
        match filter.kind {
            FilterKind::Category => self.filter_by_category(filter.value).await,
            FilterKind::Area => self.filter_by_area(filter.value).await,
            FilterKind::Search => self.search_meals(filter.value).await,
        }
    }

    /// Opening state of the explore listing (the Seafood category)
    pub async fn fetch_explore_default(&self) -> Result<Vec<Meal>, FetchError> {
        self.apply_filter(&DEFAULT_EXPLORE).await
    }

    /// Answers what the user typed into the search box
    ///
    /// Blank text shows the default listing, Indian-sounding text goes to the
    /// aggregated view (which never fails), anything else is a name search.
    pub async fn browse(&self, text: &str) -> Result<Vec<Meal>, FetchError> {
        let text = text.trim();
        if text.is_empty() {
            self.fetch_default_listing().await
        } else if is_indian_query(text) {
            Ok(self.fetch_indian_meals().await)
        } else {
            self.search_meals(text).await
        }
    }
}
