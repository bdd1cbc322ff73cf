pub mod calendar;
pub mod catalog;
pub mod composer;
pub mod constraints;
pub mod egg;
pub mod error;
pub mod meat;
pub mod planner;
pub mod rotation;
pub mod staple;

pub use calendar::{IsoWeek, day_of_week_to_string, is_weekend};
pub use catalog::{Catalog, Category, Dish};
pub use composer::{Dinner, Slot, compose_dinner};
pub use constraints::{Constraint, Pass, SlotContext};
pub use egg::{EGG_DAYS_PER_WEEK, EggSchedule, schedule_week};
pub use error::MealPlanError;
pub use meat::{MeatType, classify};
pub use planner::{
    DayRecord, Diagnostics, GenerationRequest, MAX_HORIZON_DAYS, MealPlan, StapleMarker,
    generate_plan,
};
pub use rotation::{RollingTrackers, WeeklyState};
pub use staple::{StapleKind, pick_staple_dish, select_staple};
