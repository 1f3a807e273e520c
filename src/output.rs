//! Plain-text and JSON rendering of query results

use serde::Serialize;

use crate::data::Meal;

/// Shown when a listing has nothing in it
pub const NO_RESULTS: &str = "No recipes found. Try a different search!";

/// Renders a numbered card list, one recipe per line
pub fn render_meal_list(meals: &[Meal]) -> String {
    if meals.is_empty() {
        return format!("{}\n", NO_RESULTS);
    }

    meals
        .iter()
        .enumerate()
        .map(|(index, meal)| {
            format!(
                "{:>3}. {}  ({})  [id {}]\n",
                index + 1,
                meal.name(),
                meal.subtitle(),
                meal.id
            )
        })
        .collect()
}

/// Renders the full detail view of one recipe
pub fn render_meal_detail(meal: &Meal) -> String {
    let name = meal.name();
    let mut out = format!(
        "{}\n{}\n{}  [id {}]\n",
        name,
        "=".repeat(name.chars().count()),
        meal.subtitle(),
        meal.id
    );
    if let Some(url) = meal.thumbnail_url() {
        out.push_str(&format!("Image: {}\n", url));
    }

    let tags = meal.tag_list();
    if !tags.is_empty() {
        out.push_str(&format!("Tags: {}\n", tags.join(", ")));
    }

    let ingredients = meal.ingredients();
    if !ingredients.is_empty() {
        out.push_str("\nIngredients\n");
        for ingredient in &ingredients {
            let line = match &ingredient.measure {
                Some(measure) => format!("  - {} {}\n", measure, ingredient.name),
                None => format!("  - {}\n", ingredient.name),
            };
            out.push_str(&line);
        }
    }

    if let Some(instructions) = meal.instructions() {
        out.push_str(&format!("\nInstructions\n{}\n", instructions));
    }
    out
}

/// Pretty-printed JSON using the upstream field names
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}
