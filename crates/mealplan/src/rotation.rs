use crate::calendar::IsoWeek;
use crate::catalog::Dish;
use crate::meat::{MeatType, classify};
use crate::staple::StapleKind;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Fish-classified dishes allowed per ISO week.
pub const WEEKLY_FISH_CAP: u32 = 2;

/// A noodle staple blocks noodles for this many days, counting the day itself.
pub const NOODLE_COOLDOWN_DAYS: i64 = 14;

/// A combo staple blocks combos up to this many days after it.
pub const COMBO_DISPERSION_DAYS: i64 = 2;

/// WeeklyState tracks what has been served in the current ISO week
///
/// Created empty when the walk enters a new week and replaced wholesale when
/// the week changes. Only finalized dinners are recorded, so the current day's
/// sides never show up here while the day is being composed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyState {
    pub week: IsoWeek,
    pub used_dish_names: HashSet<String>,
    pub fish_count: u32,
}

impl WeeklyState {
    pub fn new(week: IsoWeek) -> Self {
        WeeklyState {
            week,
            used_dish_names: HashSet::new(),
            fish_count: 0,
        }
    }

    pub fn is_dish_used(&self, name: &str) -> bool {
        self.used_dish_names.contains(name)
    }

    pub fn fish_cap_reached(&self) -> bool {
        self.fish_count >= WEEKLY_FISH_CAP
    }

    /// Record a finalized dinner: every name becomes used for the rest of the
    /// week, and each fish dish counts once toward the cap.
    pub fn record_dinner(&mut self, sides: &[Dish]) {
        for dish in sides {
            if classify(&dish.name) == Some(MeatType::Fish) {
                self.fish_count = self.fish_count.saturating_add(1);
            }
            self.used_dish_names.insert(dish.name.clone());
        }
    }
}

/// Cross-week staple history for one generation run.
///
/// Unlike [`WeeklyState`] this survives week boundaries, since both cooldown
/// windows can straddle a weekend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollingTrackers {
    pub last_noodle_date: Option<NaiveDate>,
    pub last_combo_date: Option<NaiveDate>,
}

impl RollingTrackers {
    pub fn noodle_cooling_down(&self, date: NaiveDate) -> bool {
        self.last_noodle_date
            .is_some_and(|last| date.signed_duration_since(last).num_days() < NOODLE_COOLDOWN_DAYS)
    }

    pub fn combo_too_recent(&self, date: NaiveDate) -> bool {
        self.last_combo_date
            .is_some_and(|last| date.signed_duration_since(last).num_days() <= COMBO_DISPERSION_DAYS)
    }

    pub fn record_staple(&mut self, date: NaiveDate, staple: StapleKind) {
        if staple.has_noodle() {
            self.last_noodle_date = Some(date);
        }
        if staple.is_combo() {
            self.last_combo_date = Some(date);
        }
    }
}
