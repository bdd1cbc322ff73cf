use crate::config::Config;
use crate::error::AppError;
use crate::import::load_catalog;
use dinnerplan_mealplan::Catalog;
use std::path::PathBuf;

/// Per-category counts and deficiencies, one line each.
pub fn catalog_summary(catalog: &Catalog) -> Vec<String> {
    let mut lines = vec![format!("{} dishes", catalog.len())];

    lines.extend(
        catalog
            .count_by_category()
            .into_iter()
            .map(|(category, count)| format!("  {:<13}{count}", category.to_string())),
    );

    for category in catalog.deficiencies() {
        lines.push(format!("warning: no {category} dishes, those slots will stay empty"));
    }

    lines
}

#[tracing::instrument(skip(config))]
pub fn check(config: Config, input: Option<PathBuf>) -> anyhow::Result<()> {
    let path = input.unwrap_or(config.planner.input);
    let catalog = load_catalog(&path)?;

    for line in catalog_summary(&catalog) {
        println!("{line}");
    }

    if catalog.is_empty() {
        return Err(AppError::EmptyCatalog(path).into());
    }

    Ok(())
}
