use crate::calendar::{IsoWeek, day_of_week_to_string, is_weekend};
use crate::catalog::{Catalog, Category, Dish};
use crate::composer::{compose_dinner, target_sides};
use crate::egg::EggSchedule;
use crate::error::MealPlanError;
use crate::rotation::{RollingTrackers, WeeklyState};
use crate::staple::{StapleKind, pick_staple_dish, select_staple};
use chrono::{Datelike, Days, NaiveDate};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Longest horizon a single run accepts, about a century of dinners.
pub const MAX_HORIZON_DAYS: u32 = 36_525;

/// Horizon and seed for one generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub start_date: NaiveDate,
    pub total_days: u32,
    pub holidays: BTreeSet<NaiveDate>,
    pub seed: u64,
}

impl GenerationRequest {
    pub fn new(start_date: NaiveDate, total_days: u32, seed: u64) -> Self {
        GenerationRequest {
            start_date,
            total_days,
            holidays: BTreeSet::new(),
            seed,
        }
    }

    pub fn with_holidays(mut self, holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.holidays.extend(holidays);
        self
    }

    /// Last date of the horizon (inclusive).
    pub fn last_date(&self) -> Result<NaiveDate, MealPlanError> {
        if self.total_days == 0 {
            return Err(MealPlanError::InvalidRange(
                "total_days must be at least 1".to_string(),
            ));
        }

        if self.total_days > MAX_HORIZON_DAYS {
            return Err(MealPlanError::InvalidRange(format!(
                "total_days must be at most {MAX_HORIZON_DAYS}, got {}",
                self.total_days
            )));
        }

        self.start_date
            .checked_add_days(Days::new(u64::from(self.total_days) - 1))
            .ok_or_else(|| {
                MealPlanError::InvalidRange(format!(
                    "{} days from {} overflows the calendar",
                    self.total_days, self.start_date
                ))
            })
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    /// Weekdays of `week` that fall inside the horizon and are not holidays.
    fn serving_weekdays(&self, week: IsoWeek, last_date: NaiveDate) -> Vec<NaiveDate> {
        week.weekdays()
            .into_iter()
            .filter(|d| *d >= self.start_date && *d <= last_date && !self.is_holiday(*d))
            .collect()
    }
}

/// What sits in the staple column of a day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StapleMarker {
    Served {
        staple: StapleKind,
        /// `None` when the catalog has no dish of that staple.
        dish: Option<Dish>,
    },
    Weekend,
    Holiday,
}

impl StapleMarker {
    pub fn label(&self) -> &str {
        match self {
            StapleMarker::Served {
                dish: Some(dish), ..
            } => &dish.name,
            StapleMarker::Served { staple, dish: None } => staple.label(),
            StapleMarker::Weekend => "Weekend",
            StapleMarker::Holiday => "Holiday",
        }
    }

    /// The concrete staple dish served, if any.
    pub fn dish(&self) -> Option<&Dish> {
        match self {
            StapleMarker::Served { dish, .. } => dish.as_ref(),
            _ => None,
        }
    }

    pub fn staple(&self) -> Option<StapleKind> {
        match self {
            StapleMarker::Served { staple, .. } => Some(*staple),
            _ => None,
        }
    }
}

/// One date of the plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub weekday: String,
    pub is_serving_day: bool,
    pub is_egg_day: bool,
    pub staple: StapleMarker,
    pub sides: Vec<Dish>,
}

impl DayRecord {
    fn off_day(date: NaiveDate, staple: StapleMarker) -> Self {
        DayRecord {
            date,
            weekday: day_of_week_to_string(date.weekday()).to_string(),
            is_serving_day: false,
            is_egg_day: false,
            staple,
            sides: Vec::new(),
        }
    }

    pub fn iso_week(&self) -> IsoWeek {
        IsoWeek::of(self.date)
    }

    pub fn side(&self, category: Category) -> Option<&Dish> {
        self.sides.iter().find(|d| d.category == category)
    }
}

/// Counters for the graceful degradations of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub relaxed_slots: u32,
    pub skipped_slots: u32,
    /// Serving days that ended below their side target.
    pub short_days: u32,
}

/// The generated plan, in date order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MealPlan {
    pub start_date: NaiveDate,
    pub total_days: u32,
    pub seed: u64,
    pub days: Vec<DayRecord>,
    #[serde(skip)]
    pub egg_schedule: EggSchedule,
    pub diagnostics: Diagnostics,
}

impl MealPlan {
    pub fn serving_days(&self) -> impl Iterator<Item = &DayRecord> {
        self.days.iter().filter(|d| d.is_serving_day)
    }

    /// Days grouped by ISO week, weeks in calendar order.
    pub fn weeks(&self) -> BTreeMap<IsoWeek, Vec<&DayRecord>> {
        let mut weeks: BTreeMap<IsoWeek, Vec<&DayRecord>> = BTreeMap::new();
        for day in &self.days {
            weeks.entry(day.iso_week()).or_default().push(day);
        }
        weeks
    }
}

/// Generate a dinner plan over the requested horizon
///
/// Walks the dates in order. Entering a new ISO week resets the weekly state
/// and schedules that week's egg days from its serving weekdays inside the
/// horizon. Weekends and holidays become non-serving records; every other day
/// gets a staple and a composed dinner.
///
/// # Errors
/// Only [`MealPlanError::InvalidRange`], raised before any date is walked. An
/// over-constrained day degrades to fewer sides instead of failing.
pub fn generate_plan(
    catalog: &Catalog,
    request: &GenerationRequest,
) -> Result<MealPlan, MealPlanError> {
    let last_date = request.last_date()?;
    let mut rng = StdRng::seed_from_u64(request.seed);

    let mut trackers = RollingTrackers::default();
    let mut egg_schedule = EggSchedule::default();
    let mut weekly = WeeklyState::new(IsoWeek::of(request.start_date));
    let mut diagnostics = Diagnostics::default();
    let mut days = Vec::new();

    for date in request.start_date.iter_days().take(request.total_days as usize) {
        let week = IsoWeek::of(date);
        if week != weekly.week {
            weekly = WeeklyState::new(week);
        }

        let is_egg_day = egg_schedule
            .ensure_week(week, || request.serving_weekdays(week, last_date), &mut rng)
            .contains(&date);

        if is_weekend(date) {
            days.push(DayRecord::off_day(date, StapleMarker::Weekend));
            continue;
        }

        if request.is_holiday(date) {
            days.push(DayRecord::off_day(date, StapleMarker::Holiday));
            continue;
        }

        let staple = select_staple(date, is_egg_day, &mut trackers, &mut rng);
        let staple_dish = pick_staple_dish(catalog, staple, &mut rng);
        let dinner = compose_dinner(catalog, staple, is_egg_day, &mut weekly, &mut rng);

        diagnostics.relaxed_slots += dinner.relaxed_slots.len() as u32;
        diagnostics.skipped_slots += dinner.skipped_slots.len() as u32;
        if dinner.sides.len() < target_sides(staple) {
            diagnostics.short_days += 1;
        }

        tracing::debug!(
            %date,
            %staple,
            egg_day = is_egg_day,
            sides = dinner.sides.len(),
            "Planned dinner"
        );

        days.push(DayRecord {
            date,
            weekday: day_of_week_to_string(date.weekday()).to_string(),
            is_serving_day: true,
            is_egg_day,
            staple: StapleMarker::Served {
                staple,
                dish: staple_dish,
            },
            sides: dinner.sides,
        });
    }

    let plan = MealPlan {
        start_date: request.start_date,
        total_days: request.total_days,
        seed: request.seed,
        days,
        egg_schedule,
        diagnostics,
    };

    tracing::info!(
        start = %plan.start_date,
        days = plan.total_days,
        serving = plan.serving_days().count(),
        seed = plan.seed,
        relaxed = diagnostics.relaxed_slots,
        skipped = diagnostics.skipped_slots,
        short_days = diagnostics.short_days,
        "Meal plan generated"
    );

    Ok(plan)
}
