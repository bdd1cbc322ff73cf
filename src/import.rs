use crate::error::AppError;
use dinnerplan_mealplan::{Catalog, Category, Dish};
use serde::Deserialize;
use std::path::Path;

/// One catalog row. Both the spreadsheet headers and lowercase names are accepted.
#[derive(Debug, Deserialize)]
struct DishRow {
    #[serde(rename = "name", alias = "Dish Name", default)]
    name: Option<String>,
    #[serde(rename = "category", alias = "Category", default)]
    category: Option<String>,
    #[serde(rename = "ingredients", alias = "Ingredients", default)]
    ingredients: Option<String>,
}

/// Load a dish catalog from a UTF-8 CSV file (a leading BOM is accepted)
///
/// Rows without a name or category, and rows with an unknown category label,
/// are skipped with a warning.
pub fn load_catalog(path: &Path) -> Result<Catalog, AppError> {
    let data = std::fs::read_to_string(path)?;
    let dishes = parse_dishes(&data)?;

    tracing::info!(path = %path.display(), dishes = dishes.len(), "Loaded dish catalog");

    Ok(Catalog::new(dishes))
}

pub fn parse_dishes(data: &str) -> Result<Vec<Dish>, AppError> {
    let data = data.strip_prefix('\u{feff}').unwrap_or(data);
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(data.as_bytes());

    let mut dishes = Vec::new();

    for (index, result) in reader.deserialize::<DishRow>().enumerate() {
        let row = result?;
        // header is line 1
        let line = index + 2;

        let (Some(name), Some(label)) = (non_empty(row.name), non_empty(row.category)) else {
            tracing::warn!(line, "Skipping row without a dish name or category");
            continue;
        };

        let category = match Category::parse(&label) {
            Ok(category) => category,
            Err(e) => {
                tracing::warn!(line, dish = %name, "Skipping row: {e}");
                continue;
            }
        };

        let ingredients = row
            .ingredients
            .as_deref()
            .map(Dish::parse_ingredients)
            .unwrap_or_default();

        dishes.push(Dish::new(name, category, ingredients));
    }

    Ok(dishes)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
