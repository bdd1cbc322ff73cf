use crate::catalog::Dish;
use crate::meat::{MeatType, classify};
use crate::rotation::WeeklyState;

/// Which set of exclusion rules a candidate pool is built with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// Every rule applies.
    Strict,
    /// Rules marked relaxable are lifted; used only for mandatory slots whose
    /// strict pool is empty.
    Relaxed,
}

/// What a constraint can see while a slot is being filled
pub struct SlotContext<'a> {
    pub weekly: &'a WeeklyState,
    /// Dishes already chosen for this day, in slot order.
    pub chosen: &'a [Dish],
}

impl SlotContext<'_> {
    pub fn chosen_meats(&self) -> impl Iterator<Item = MeatType> + '_ {
        self.chosen.iter().filter_map(|d| classify(&d.name))
    }
}

/// Constraint trait for excluding a candidate from a side-dish pool
pub trait Constraint {
    fn allows(&self, dish: &Dish, ctx: &SlotContext<'_>) -> bool;

    /// Whether the relaxed pass lifts this rule.
    fn relaxable(&self) -> bool {
        false
    }

    fn applies_in(&self, pass: Pass) -> bool {
        pass == Pass::Strict || !self.relaxable()
    }
}

/// No dish twice on the same day.
pub struct SameDayRepeatConstraint;

impl Constraint for SameDayRepeatConstraint {
    fn allows(&self, dish: &Dish, ctx: &SlotContext<'_>) -> bool {
        !ctx.chosen.iter().any(|d| d.name == dish.name)
    }
}

/// No dish served earlier in the same ISO week.
pub struct WeeklyRepeatConstraint;

impl Constraint for WeeklyRepeatConstraint {
    fn allows(&self, dish: &Dish, ctx: &SlotContext<'_>) -> bool {
        !ctx.weekly.is_dish_used(&dish.name)
    }

    fn relaxable(&self) -> bool {
        true
    }
}

/// Fish is excluded once the week's fish cap is reached.
pub struct FishCapConstraint;

impl Constraint for FishCapConstraint {
    fn allows(&self, dish: &Dish, ctx: &SlotContext<'_>) -> bool {
        !(ctx.weekly.fish_cap_reached() && classify(&dish.name) == Some(MeatType::Fish))
    }
}

/// No two dishes of the same meat type on one day.
pub struct DistinctMeatConstraint;

impl Constraint for DistinctMeatConstraint {
    fn allows(&self, dish: &Dish, ctx: &SlotContext<'_>) -> bool {
        match classify(&dish.name) {
            Some(meat) => !ctx.chosen_meats().any(|m| m == meat),
            None => true,
        }
    }
}

/// Every exclusion rule applied to side-dish candidates.
pub const SIDE_CONSTRAINTS: &[&dyn Constraint] = &[
    &SameDayRepeatConstraint,
    &WeeklyRepeatConstraint,
    &FishCapConstraint,
    &DistinctMeatConstraint,
];

/// Whether `dish` survives every constraint active in `pass`.
pub fn is_allowed(dish: &Dish, ctx: &SlotContext<'_>, pass: Pass) -> bool {
    SIDE_CONSTRAINTS
        .iter()
        .filter(|c| c.applies_in(pass))
        .all(|c| c.allows(dish, ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::IsoWeek;
    use crate::catalog::Category;
    use chrono::NaiveDate;

    fn weekly() -> WeeklyState {
        WeeklyState::new(IsoWeek::of(NaiveDate::from_ymd_opt(2025, 10, 27).unwrap()))
    }

    #[test]
    fn test_weekly_repeat_is_lifted_only_when_relaxed() {
        let mut state = weekly();
        let dish = Dish::new("Garlic Broccoli", Category::Vegetable, ["broccoli"]);
        state.record_dinner(std::slice::from_ref(&dish));

        let ctx = SlotContext {
            weekly: &state,
            chosen: &[],
        };
        assert!(!is_allowed(&dish, &ctx, Pass::Strict));
        assert!(is_allowed(&dish, &ctx, Pass::Relaxed));
    }

    #[test]
    fn test_same_day_repeat_holds_in_relaxed_pass() {
        let state = weekly();
        let dish = Dish::new("Garlic Broccoli", Category::Vegetable, ["broccoli"]);
        let chosen = vec![dish.clone()];
        let ctx = SlotContext {
            weekly: &state,
            chosen: &chosen,
        };

        assert!(!is_allowed(&dish, &ctx, Pass::Relaxed));
    }

    #[test]
    fn test_fish_cap_excludes_fish_only() {
        let mut state = weekly();
        state.fish_count = 2;
        let ctx = SlotContext {
            weekly: &state,
            chosen: &[],
        };

        let fish = Dish::new("Steamed Fish", Category::Protein, ["fish"]);
        let beef = Dish::new("Braised Beef", Category::Protein, ["beef"]);
        assert!(!is_allowed(&fish, &ctx, Pass::Strict));
        assert!(!is_allowed(&fish, &ctx, Pass::Relaxed));
        assert!(is_allowed(&beef, &ctx, Pass::Strict));
    }

    #[test]
    fn test_distinct_meat_within_day() {
        let state = weekly();
        let chosen = vec![Dish::new("Kung Pao Chicken", Category::Protein, ["chicken"])];
        let ctx = SlotContext {
            weekly: &state,
            chosen: &chosen,
        };

        let chicken_soup = Dish::new("Chicken Soup", Category::Other, ["chicken"]);
        let tofu = Dish::new("Cold Tofu", Category::Other, ["tofu"]);
        assert!(!is_allowed(&chicken_soup, &ctx, Pass::Relaxed));
        assert!(is_allowed(&tofu, &ctx, Pass::Strict));
    }
}
