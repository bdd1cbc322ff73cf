use crate::calendar::IsoWeek;
use chrono::NaiveDate;
use rand::Rng;
use rand::seq::index;
use std::collections::{BTreeMap, BTreeSet};

/// Egg days in a full five-weekday week.
pub const EGG_DAYS_PER_WEEK: usize = 3;

/// Pick the egg days of one week.
///
/// The quota is `min(3, weekdays.len())`, drawn as a uniform subset without
/// replacement. No spacing between egg days is guaranteed.
pub fn schedule_week<R: Rng + ?Sized>(weekdays: &[NaiveDate], rng: &mut R) -> BTreeSet<NaiveDate> {
    let quota = EGG_DAYS_PER_WEEK.min(weekdays.len());

    index::sample(rng, weekdays.len(), quota)
        .into_iter()
        .map(|i| weekdays[i])
        .collect()
}

/// Egg days per ISO week, filled in the first time the walk enters a week.
///
/// A week is scheduled at most once: re-rolling it mid-week would redraw days
/// that were already served and break the weekly quota.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EggSchedule {
    weeks: BTreeMap<IsoWeek, BTreeSet<NaiveDate>>,
}

impl EggSchedule {
    pub fn ensure_week<R, F>(&mut self, week: IsoWeek, weekdays: F, rng: &mut R) -> &BTreeSet<NaiveDate>
    where
        R: Rng + ?Sized,
        F: FnOnce() -> Vec<NaiveDate>,
    {
        self.weeks.entry(week).or_insert_with(|| {
            let days = schedule_week(&weekdays(), rng);
            tracing::debug!(%week, egg_days = days.len(), "Scheduled egg days");
            days
        })
    }

    pub fn week(&self, week: IsoWeek) -> Option<&BTreeSet<NaiveDate>> {
        self.weeks.get(&week)
    }

    pub fn is_egg_day(&self, date: NaiveDate) -> bool {
        self.weeks
            .get(&IsoWeek::of(date))
            .is_some_and(|days| days.contains(&date))
    }
}
