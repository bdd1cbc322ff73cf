use crate::error::AppError;
use askama::Template;
use dinnerplan_mealplan::{Category, DayRecord, MealPlan};
use dinnerplan_shopping::ShoppingList;
use std::path::Path;

pub struct SideView {
    pub name: String,
    /// CSS class suffix, e.g. `Protein`
    pub category: String,
}

pub struct DayView {
    pub date: String,
    pub weekday: String,
    pub is_serving_day: bool,
    pub is_egg_day: bool,
    pub staple: String,
    pub staple_kind: String,
    pub sides: Vec<SideView>,
}

impl From<&DayRecord> for DayView {
    fn from(day: &DayRecord) -> Self {
        DayView {
            date: day.date.format("%m-%d").to_string(),
            weekday: day.weekday.clone(),
            is_serving_day: day.is_serving_day,
            is_egg_day: day.is_egg_day,
            staple: day.staple.label().to_string(),
            staple_kind: day
                .staple
                .staple()
                .map(|s| s.to_string())
                .unwrap_or_default(),
            sides: day
                .sides
                .iter()
                .map(|d| SideView {
                    name: d.name.clone(),
                    category: d.category.to_string(),
                })
                .collect(),
        }
    }
}

pub struct WeekView {
    pub label: String,
    pub days: Vec<DayView>,
}

pub struct ItemView {
    pub name: String,
    pub count: u32,
}

pub struct ShopView {
    pub label: String,
    pub items: Vec<ItemView>,
}

#[derive(Template)]
#[template(path = "report.html")]
pub struct ReportTemplate {
    pub start_date: String,
    pub end_date: String,
    pub seed: u64,
    pub serving_days: usize,
    pub weeks: Vec<WeekView>,
    pub shopping: Vec<ShopView>,
    pub legend: Vec<String>,
}

impl ReportTemplate {
    pub fn new(plan: &MealPlan, lists: &[ShoppingList]) -> Self {
        let weeks = plan
            .weeks()
            .into_iter()
            .map(|(week, days)| WeekView {
                label: week.to_string(),
                days: days.into_iter().map(DayView::from).collect(),
            })
            .collect();

        let shopping = lists
            .iter()
            .map(|list| ShopView {
                label: list.week.to_string(),
                items: list
                    .rows()
                    .map(|(name, count)| ItemView {
                        name: name.to_string(),
                        count,
                    })
                    .collect(),
            })
            .collect();

        ReportTemplate {
            start_date: plan.start_date.to_string(),
            end_date: plan
                .days
                .last()
                .map(|d| d.date.to_string())
                .unwrap_or_default(),
            seed: plan.seed,
            serving_days: plan.serving_days().count(),
            weeks,
            shopping,
            legend: Category::sides().map(|c| c.to_string()).collect(),
        }
    }
}

/// Render the plan and shopping lists as one self-contained HTML page.
pub fn render_report(plan: &MealPlan, lists: &[ShoppingList]) -> Result<String, AppError> {
    Ok(ReportTemplate::new(plan, lists).render()?)
}

pub fn write_report(plan: &MealPlan, lists: &[ShoppingList], path: &Path) -> Result<(), AppError> {
    let html = render_report(plan, lists)?;
    std::fs::write(path, html)?;

    tracing::info!(path = %path.display(), "Wrote HTML report");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dinnerplan_mealplan::{Catalog, Dish, GenerationRequest, generate_plan};
    use dinnerplan_shopping::IngredientAggregationService;

    #[test]
    fn test_report_lists_days_and_ingredients() {
        let catalog = Catalog::new(vec![
            Dish::new("Garlic Broccoli", Category::Vegetable, ["broccoli"]),
            Dish::new("Mapo Tofu", Category::Protein, ["tofu"]),
            Dish::new("Tomato & Egg", Category::Egg, ["tomato", "egg"]),
        ]);
        let start = NaiveDate::from_ymd_opt(2025, 10, 27).unwrap();
        let plan = generate_plan(&catalog, &GenerationRequest::new(start, 7, 1)).unwrap();
        let lists = IngredientAggregationService::aggregate_by_week(&plan);

        let html = render_report(&plan, &lists).unwrap();

        assert!(html.contains("2025-W44"));
        assert!(html.contains("Garlic Broccoli"));
        assert!(html.contains("broccoli"));
        assert!(html.contains("Weekend"));
        // names are HTML-escaped
        assert!(html.contains("Tomato &amp; Egg") || html.contains("Tomato &#38; Egg"));
        assert!(!html.contains("Tomato & Egg"));
    }
}
