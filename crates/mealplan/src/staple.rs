use crate::catalog::{Catalog, Category, Dish};
use crate::rotation::RollingTrackers;
use chrono::NaiveDate;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Staple format of a dinner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
pub enum StapleKind {
    Rice,
    Noodle,
    #[strum(to_string = "Combo-Rice")]
    ComboRice,
    #[strum(to_string = "Combo-Noodle")]
    ComboNoodle,
}

impl StapleKind {
    pub const ALL: [StapleKind; 4] = [
        StapleKind::Rice,
        StapleKind::Noodle,
        StapleKind::ComboRice,
        StapleKind::ComboNoodle,
    ];

    /// Combo staples carry fewer sides and never a protein.
    pub fn is_combo(&self) -> bool {
        matches!(self, StapleKind::ComboRice | StapleKind::ComboNoodle)
    }

    pub fn has_noodle(&self) -> bool {
        matches!(self, StapleKind::Noodle | StapleKind::ComboNoodle)
    }

    /// Label printed when the catalog has no dish of this staple.
    pub fn label(&self) -> &'static str {
        match self {
            StapleKind::Rice => "Rice",
            StapleKind::Noodle => "Noodle",
            StapleKind::ComboRice => "Combo-Rice",
            StapleKind::ComboNoodle => "Combo-Noodle",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            StapleKind::Rice => Category::Rice,
            StapleKind::Noodle => Category::Noodle,
            StapleKind::ComboRice => Category::ComboRice,
            StapleKind::ComboNoodle => Category::ComboNoodle,
        }
    }
}

/// Choose the staple for `date`
///
/// Candidates are filtered in order:
/// 1. Non-egg days drop every combo (a non-egg dinner needs four sides).
/// 2. A combo within the dispersion window drops every combo.
/// 3. A noodle within the cooldown window drops every noodle variant.
///
/// The survivor is drawn uniformly; Rice is never filtered, so the empty case
/// only falls back to Rice for completeness. The trackers are updated with the
/// chosen staple before returning.
pub fn select_staple<R: Rng + ?Sized>(
    date: NaiveDate,
    is_egg_day: bool,
    trackers: &mut RollingTrackers,
    rng: &mut R,
) -> StapleKind {
    let candidates: Vec<StapleKind> = StapleKind::ALL
        .into_iter()
        .filter(|s| is_egg_day || !s.is_combo())
        .filter(|s| !(s.is_combo() && trackers.combo_too_recent(date)))
        .filter(|s| !(s.has_noodle() && trackers.noodle_cooling_down(date)))
        .collect();

    let staple = candidates.choose(rng).copied().unwrap_or(StapleKind::Rice);
    trackers.record_staple(date, staple);

    staple
}

/// Pick a concrete catalog dish for the staple, if its category has any.
pub fn pick_staple_dish<R: Rng + ?Sized>(
    catalog: &Catalog,
    staple: StapleKind,
    rng: &mut R,
) -> Option<Dish> {
    catalog.dishes(staple.category()).choose(rng).cloned()
}
