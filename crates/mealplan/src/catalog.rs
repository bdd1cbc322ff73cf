use crate::error::MealPlanError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Dish category: the four side categories plus the staple formats.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Category {
    Protein,
    Egg,
    Vegetable,
    Other,
    Rice,
    Noodle,
    #[strum(to_string = "Combo-Rice", serialize = "ComboRice", serialize = "Combo Rice")]
    ComboRice,
    #[strum(
        to_string = "Combo-Noodle",
        serialize = "ComboNoodle",
        serialize = "Combo Noodle"
    )]
    ComboNoodle,
}

impl Category {
    pub fn parse(label: &str) -> Result<Self, MealPlanError> {
        Category::from_str(label.trim())
            .map_err(|_| MealPlanError::UnknownCategory(label.trim().to_string()))
    }

    /// Categories that fill side-dish slots.
    pub fn is_side(&self) -> bool {
        matches!(
            self,
            Category::Protein | Category::Egg | Category::Vegetable | Category::Other
        )
    }

    pub fn is_staple(&self) -> bool {
        !self.is_side()
    }

    pub fn sides() -> impl Iterator<Item = Category> {
        Category::iter().filter(Category::is_side)
    }
}

/// A catalog entry. Equality is by name only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dish {
    pub name: String,
    pub category: Category,
    pub ingredients: Vec<String>,
}

impl Dish {
    pub fn new<I, S>(name: impl Into<String>, category: Category, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Dish {
            name: name.into().trim().to_string(),
            category,
            ingredients: ingredients
                .into_iter()
                .map(|i| i.as_ref().trim().to_string())
                .filter(|i| !i.is_empty())
                .collect(),
        }
    }

    /// Split a raw ingredient cell ("pork, ginger，scallion") into trimmed names.
    pub fn parse_ingredients(raw: &str) -> Vec<String> {
        raw.split([',', '，', '、', ';'])
            .map(str::trim)
            .filter(|i| !i.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl PartialEq for Dish {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Dish {}

/// Read-only registry of dishes grouped by category.
///
/// Built once before generation. Side categories without any dish are reported
/// as deficiencies: generation still runs and simply leaves those slots empty.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    by_category: BTreeMap<Category, Vec<Dish>>,
    len: usize,
}

impl Catalog {
    pub fn new(dishes: impl IntoIterator<Item = Dish>) -> Self {
        let mut by_category: BTreeMap<Category, Vec<Dish>> = BTreeMap::new();
        let mut len = 0;

        for dish in dishes {
            len += 1;
            by_category.entry(dish.category).or_default().push(dish);
        }

        let catalog = Catalog { by_category, len };

        for category in catalog.deficiencies() {
            tracing::warn!(%category, "No dishes found for category");
        }

        catalog
    }

    pub fn dishes(&self, category: Category) -> &[Dish] {
        self.by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Side categories with zero dishes.
    pub fn deficiencies(&self) -> Vec<Category> {
        Category::sides()
            .filter(|c| self.dishes(*c).is_empty())
            .collect()
    }

    pub fn count_by_category(&self) -> Vec<(Category, usize)> {
        Category::iter()
            .map(|c| (c, self.dishes(c).len()))
            .collect()
    }
}
