pub mod aggregation;

pub use aggregation::{IngredientAggregationService, ShoppingList};
