use crate::error::AppError;
use dinnerplan_mealplan::composer::FULL_DINNER_SIDES;
use dinnerplan_mealplan::{DayRecord, MealPlan};
use dinnerplan_shopping::ShoppingList;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// CSV writer that prefixes a BOM so spreadsheet tools detect UTF-8 dish names.
fn csv_writer(path: &Path) -> Result<csv::Writer<BufWriter<File>>, AppError> {
    let mut file = BufWriter::new(File::create(path)?);
    file.write_all(UTF8_BOM)?;
    Ok(csv::Writer::from_writer(file))
}

fn plan_row(day: &DayRecord) -> Vec<String> {
    let mut row = vec![
        day.date.format("%Y-%m-%d").to_string(),
        day.weekday.clone(),
        if day.is_serving_day { "Yes" } else { "No" }.to_string(),
        day.staple.label().to_string(),
    ];

    let mut dishes: Vec<String> = day.sides.iter().map(|d| d.name.clone()).collect();
    dishes.resize(FULL_DINNER_SIDES.max(dishes.len()), String::new());
    row.extend(dishes.into_iter().take(FULL_DINNER_SIDES));

    row
}

/// Write one row per date: `Date, Weekday, Serving, Staple, Dish 1..4`.
pub fn write_plan_csv(plan: &MealPlan, path: &Path) -> Result<(), AppError> {
    let mut writer = csv_writer(path)?;

    let mut header = vec![
        "Date".to_string(),
        "Weekday".to_string(),
        "Serving".to_string(),
        "Staple".to_string(),
    ];
    header.extend((1..=FULL_DINNER_SIDES).map(|i| format!("Dish {i}")));
    writer.write_record(&header)?;

    for day in &plan.days {
        writer.write_record(plan_row(day))?;
    }

    writer.flush()?;
    tracing::info!(path = %path.display(), rows = plan.days.len(), "Wrote meal plan");

    Ok(())
}

/// Write `Year, Week, Ingredient, Count` rows, weeks in calendar order.
pub fn write_shopping_csv(lists: &[ShoppingList], path: &Path) -> Result<(), AppError> {
    let mut writer = csv_writer(path)?;
    writer.write_record(["Year", "Week", "Ingredient", "Count"])?;

    let mut rows = 0;
    for list in lists {
        for (ingredient, count) in list.rows() {
            writer.write_record([
                list.week.year.to_string(),
                list.week.week.to_string(),
                ingredient.to_string(),
                count.to_string(),
            ])?;
            rows += 1;
        }
    }

    writer.flush()?;
    tracing::info!(path = %path.display(), rows, "Wrote shopping list");

    Ok(())
}

pub fn write_plan_json(plan: &MealPlan, path: &Path) -> Result<(), AppError> {
    let mut file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut file, plan)?;
    file.flush()?;

    tracing::info!(path = %path.display(), "Wrote meal plan JSON");

    Ok(())
}
