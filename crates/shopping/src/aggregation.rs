use std::collections::BTreeMap;

use dinnerplan_mealplan::{IsoWeek, MealPlan};
use serde::Serialize;

/// Ingredient counts for one ISO week
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShoppingList {
    pub week: IsoWeek,
    /// Normalized ingredient name to the number of served dishes that use it.
    pub items: BTreeMap<String, u32>,
}

impl ShoppingList {
    pub fn new(week: IsoWeek) -> Self {
        ShoppingList {
            week,
            items: BTreeMap::new(),
        }
    }

    /// Rows sorted by ingredient name.
    pub fn rows(&self) -> impl Iterator<Item = (&str, u32)> {
        self.items.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn add(&mut self, ingredient: &str) {
        let name = IngredientAggregationService::normalize_name(ingredient);
        if name.is_empty() {
            return;
        }
        *self.items.entry(name).or_insert(0) += 1;
    }
}

/// Ingredient Aggregation Service
///
/// Stateless domain service that folds a generated plan into one shopping list
/// per ISO week. Each dish served, staple included, contributes one count to
/// every ingredient it lists; non-serving days contribute nothing.
///
/// - "Pork" + " pork " = "pork" x2
/// - a dish served twice in a week counts twice
pub struct IngredientAggregationService;

impl IngredientAggregationService {
    /// Aggregate the plan's ingredients by ISO week
    ///
    /// # Returns
    /// One list per week that has at least one serving day, in calendar order.
    pub fn aggregate_by_week(plan: &MealPlan) -> Vec<ShoppingList> {
        let mut weeks: BTreeMap<IsoWeek, ShoppingList> = BTreeMap::new();

        for day in plan.serving_days() {
            let week = day.iso_week();
            let list = weeks
                .entry(week)
                .or_insert_with(|| ShoppingList::new(week));

            let dishes = day.staple.dish().into_iter().chain(&day.sides);
            for ingredient in dishes.flat_map(|dish| &dish.ingredients) {
                list.add(ingredient);
            }
        }

        let lists: Vec<ShoppingList> = weeks.into_values().collect();

        tracing::debug!(
            weeks = lists.len(),
            ingredients = lists.iter().map(|l| l.items.len()).sum::<usize>(),
            "Aggregated shopping lists"
        );

        lists
    }

    /// Normalize ingredient name (lowercase, trim whitespace)
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase()
    }
}
