use crate::catalog::{Catalog, Category, Dish};
use crate::constraints::{Pass, SlotContext, is_allowed};
use crate::rotation::WeeklyState;
use crate::staple::StapleKind;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// Sides served with a rice or noodle staple.
pub const FULL_DINNER_SIDES: usize = 4;

/// Sides served with a combo staple: vegetable and egg.
pub const COMBO_DINNER_SIDES: usize = 2;

/// A side-dish slot of one dinner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    Vegetable,
    Protein,
    Egg,
    Other,
    /// Tops a non-combo egg-day dinner up to its target from the Other and Protein pools.
    Filler,
}

impl Slot {
    pub fn categories(&self) -> &'static [Category] {
        match self {
            Slot::Vegetable => &[Category::Vegetable],
            Slot::Protein => &[Category::Protein],
            Slot::Egg => &[Category::Egg],
            Slot::Other => &[Category::Other],
            Slot::Filler => &[Category::Other, Category::Protein],
        }
    }

    /// Mandatory slots get a relaxed second pass before they are skipped.
    pub fn is_mandatory(&self) -> bool {
        matches!(self, Slot::Vegetable | Slot::Protein | Slot::Egg)
    }
}

/// Number of sides a dinner with this staple aims for.
pub fn target_sides(staple: StapleKind) -> usize {
    if staple.is_combo() {
        COMBO_DINNER_SIDES
    } else {
        FULL_DINNER_SIDES
    }
}

/// Slots filled in order before any filler is drawn.
///
/// Vegetable every day, protein unless combo, egg on egg days, then one other
/// on egg days or two on non-egg days (combo dinners take no other).
pub fn slot_plan(staple: StapleKind, is_egg_day: bool) -> Vec<Slot> {
    let mut slots = vec![Slot::Vegetable];

    if !staple.is_combo() {
        slots.push(Slot::Protein);
    }

    if is_egg_day {
        slots.push(Slot::Egg);
    }

    if !staple.is_combo() {
        let others = if is_egg_day { 1 } else { 2 };
        slots.extend(std::iter::repeat_n(Slot::Other, others));
    }

    slots
}

/// One composed dinner plus how much it had to degrade
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dinner {
    pub sides: Vec<Dish>,
    /// Mandatory slots filled only after lifting the weekly repeat rule.
    pub relaxed_slots: Vec<Slot>,
    /// Slots left empty because every candidate was excluded.
    pub skipped_slots: Vec<Slot>,
}

impl Dinner {
    pub fn side(&self, category: Category) -> Option<&Dish> {
        self.sides.iter().find(|d| d.category == category)
    }
}

/// Fill the side dishes of one serving day
///
/// Every pool is filtered by the side constraints before a uniform draw. An
/// empty mandatory pool is retried with the weekly repeat rule lifted; any other
/// empty pool skips its slot. The composer never fails: an over-constrained day
/// ends up with fewer sides.
///
/// Only a non-combo egg day draws fillers for its skipped slots. A non-egg day
/// short of Other dishes stays short rather than taking a second protein.
///
/// The finalized sides are recorded into `weekly` before returning.
pub fn compose_dinner<R: Rng + ?Sized>(
    catalog: &Catalog,
    staple: StapleKind,
    is_egg_day: bool,
    weekly: &mut WeeklyState,
    rng: &mut R,
) -> Dinner {
    let mut dinner = Dinner::default();

    for slot in slot_plan(staple, is_egg_day) {
        match fill_slot(catalog, slot, weekly, &dinner.sides, rng) {
            Some((dish, pass)) => {
                if pass == Pass::Relaxed {
                    tracing::debug!(?slot, dish = %dish.name, "Filled slot with weekly repeat");
                    dinner.relaxed_slots.push(slot);
                }
                dinner.sides.push(dish);
            }
            None => {
                tracing::debug!(?slot, "No candidate left, skipping slot");
                dinner.skipped_slots.push(slot);
            }
        }
    }

    if is_egg_day && !staple.is_combo() {
        while dinner.sides.len() < FULL_DINNER_SIDES {
            let Some((dish, _)) = fill_slot(catalog, Slot::Filler, weekly, &dinner.sides, rng)
            else {
                break;
            };
            dinner.sides.push(dish);
        }
    }

    weekly.record_dinner(&dinner.sides);

    dinner
}

fn candidates<'a>(
    catalog: &'a Catalog,
    slot: Slot,
    ctx: &SlotContext<'_>,
    pass: Pass,
) -> Vec<&'a Dish> {
    slot.categories()
        .iter()
        .flat_map(|c| catalog.dishes(*c))
        .filter(|dish| is_allowed(dish, ctx, pass))
        .collect()
}

fn fill_slot<R: Rng + ?Sized>(
    catalog: &Catalog,
    slot: Slot,
    weekly: &WeeklyState,
    chosen: &[Dish],
    rng: &mut R,
) -> Option<(Dish, Pass)> {
    let ctx = SlotContext { weekly, chosen };

    let passes: &[Pass] = if slot.is_mandatory() {
        &[Pass::Strict, Pass::Relaxed]
    } else {
        &[Pass::Strict]
    };

    passes.iter().find_map(|pass| {
        candidates(catalog, slot, &ctx, *pass)
            .choose(rng)
            .map(|dish| ((*dish).clone(), *pass))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::IsoWeek;
    use crate::meat::{MeatType, classify};
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn weekly() -> WeeklyState {
        WeeklyState::new(IsoWeek::of(NaiveDate::from_ymd_opt(2025, 10, 27).unwrap()))
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Dish::new("Steamed Fish", Category::Protein, ["fish", "ginger"]),
            Dish::new("Braised Beef", Category::Protein, ["beef"]),
            Dish::new("Kung Pao Chicken", Category::Protein, ["chicken", "peanut"]),
            Dish::new("Mapo Tofu", Category::Protein, ["tofu"]),
            Dish::new("Garlic Broccoli", Category::Vegetable, ["broccoli", "garlic"]),
            Dish::new("Stir-fried Bok Choy", Category::Vegetable, ["bok choy"]),
            Dish::new("Tomato Scrambled Egg", Category::Egg, ["egg", "tomato"]),
            Dish::new("Steamed Egg Custard", Category::Egg, ["egg"]),
            Dish::new("Cucumber Salad", Category::Other, ["cucumber"]),
            Dish::new("Seaweed Soup", Category::Other, ["seaweed"]),
            Dish::new("Pickled Radish", Category::Other, ["radish"]),
            Dish::new("Chicken Broth", Category::Other, ["chicken"]),
        ])
    }

    #[test]
    fn test_slot_plan_by_staple_and_egg_day() {
        use Slot::*;
        assert_eq!(
            slot_plan(StapleKind::Rice, false),
            vec![Vegetable, Protein, Other, Other]
        );
        assert_eq!(
            slot_plan(StapleKind::Noodle, true),
            vec![Vegetable, Protein, Egg, Other]
        );
        assert_eq!(slot_plan(StapleKind::ComboRice, true), vec![Vegetable, Egg]);
        assert_eq!(target_sides(StapleKind::ComboNoodle), COMBO_DINNER_SIDES);
    }

    #[test]
    fn test_combo_dinner_has_vegetable_and_egg_only() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(4);
        let mut state = weekly();

        let dinner = compose_dinner(&catalog, StapleKind::ComboRice, true, &mut state, &mut rng);

        assert_eq!(dinner.sides.len(), 2);
        assert!(dinner.side(Category::Vegetable).is_some());
        assert!(dinner.side(Category::Egg).is_some());
        assert!(dinner.side(Category::Protein).is_none());
    }

    #[test]
    fn test_non_egg_dinner_has_four_sides() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(8);
        let mut state = weekly();

        let dinner = compose_dinner(&catalog, StapleKind::Rice, false, &mut state, &mut rng);

        assert_eq!(dinner.sides.len(), 4);
        assert!(dinner.side(Category::Vegetable).is_some());
        assert!(dinner.side(Category::Protein).is_some());
        assert!(dinner.side(Category::Egg).is_none());
        assert_eq!(
            dinner
                .sides
                .iter()
                .filter(|d| d.category == Category::Other)
                .count(),
            2
        );
        assert!(dinner.relaxed_slots.is_empty());
        assert!(dinner.skipped_slots.is_empty());
    }

    #[test]
    fn test_dinner_is_recorded_into_weekly_state() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(15);
        let mut state = weekly();

        let dinner = compose_dinner(&catalog, StapleKind::Rice, true, &mut state, &mut rng);

        for dish in &dinner.sides {
            assert!(state.is_dish_used(&dish.name));
        }
        let fish = dinner
            .sides
            .iter()
            .filter(|d| classify(&d.name) == Some(MeatType::Fish))
            .count() as u32;
        assert_eq!(state.fish_count, fish);
    }

    #[test]
    fn test_meat_types_never_repeat_within_a_day() {
        let catalog = catalog();

        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut state = weekly();
            let dinner = compose_dinner(&catalog, StapleKind::Rice, false, &mut state, &mut rng);

            let meats: Vec<MeatType> = dinner.sides.iter().filter_map(|d| classify(&d.name)).collect();
            let mut unique = meats.clone();
            unique.sort_by_key(|m| m.to_string());
            unique.dedup();
            assert_eq!(meats.len(), unique.len(), "seed {seed}");
        }
    }

    #[test]
    fn test_fish_cap_blocks_fish_protein() {
        let catalog = catalog();

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut state = weekly();
            state.fish_count = 2;
            let dinner = compose_dinner(&catalog, StapleKind::Rice, true, &mut state, &mut rng);

            assert!(dinner.sides.iter().all(|d| d.name != "Steamed Fish"));
            assert_eq!(state.fish_count, 2);
        }
    }

    #[test]
    fn test_mandatory_slot_relaxes_weekly_repeat() {
        let catalog = Catalog::new(vec![
            Dish::new("Garlic Broccoli", Category::Vegetable, ["broccoli"]),
            Dish::new("Mapo Tofu", Category::Protein, ["tofu"]),
        ]);
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = weekly();

        let first = compose_dinner(&catalog, StapleKind::Rice, false, &mut state, &mut rng);
        assert!(first.relaxed_slots.is_empty());
        assert_eq!(first.skipped_slots, vec![Slot::Other, Slot::Other]);

        let second = compose_dinner(&catalog, StapleKind::Rice, false, &mut state, &mut rng);
        assert_eq!(second.relaxed_slots, vec![Slot::Vegetable, Slot::Protein]);
        assert_eq!(second.sides.len(), 2);
    }

    #[test]
    fn test_optional_slot_never_relaxes() {
        let catalog = Catalog::new(vec![
            Dish::new("Garlic Broccoli", Category::Vegetable, ["broccoli"]),
            Dish::new("Cucumber Salad", Category::Other, ["cucumber"]),
        ]);
        let mut rng = StdRng::seed_from_u64(2);
        let mut state = weekly();
        state.record_dinner(&[Dish::new("Cucumber Salad", Category::Other, ["cucumber"])]);

        let dinner = compose_dinner(&catalog, StapleKind::Rice, false, &mut state, &mut rng);

        assert_eq!(dinner.sides.len(), 1);
        assert!(dinner.side(Category::Other).is_none());
        assert_eq!(
            dinner.skipped_slots,
            vec![Slot::Protein, Slot::Other, Slot::Other]
        );
    }

    #[test]
    fn test_filler_tops_up_from_protein_pool() {
        let catalog = Catalog::new(vec![
            Dish::new("Garlic Broccoli", Category::Vegetable, ["broccoli"]),
            Dish::new("Braised Beef", Category::Protein, ["beef"]),
            Dish::new("Mapo Tofu", Category::Protein, ["tofu"]),
            Dish::new("Tomato Scrambled Egg", Category::Egg, ["egg"]),
        ]);
        let mut rng = StdRng::seed_from_u64(6);
        let mut state = weekly();

        let dinner = compose_dinner(&catalog, StapleKind::Rice, true, &mut state, &mut rng);

        assert_eq!(dinner.sides.len(), 4);
        assert_eq!(dinner.skipped_slots, vec![Slot::Other]);
        assert_eq!(
            dinner
                .sides
                .iter()
                .filter(|d| d.category == Category::Protein)
                .count(),
            2
        );
    }

    #[test]
    fn test_non_egg_day_draws_no_filler() {
        let catalog = Catalog::new(vec![
            Dish::new("Garlic Broccoli", Category::Vegetable, ["broccoli"]),
            Dish::new("Braised Beef", Category::Protein, ["beef"]),
            Dish::new("Mapo Tofu", Category::Protein, ["tofu"]),
        ]);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut state = weekly();

            let dinner = compose_dinner(&catalog, StapleKind::Rice, false, &mut state, &mut rng);

            assert_eq!(dinner.sides.len(), 2, "seed {seed}");
            assert_eq!(dinner.skipped_slots, vec![Slot::Other, Slot::Other]);
            assert_eq!(
                dinner
                    .sides
                    .iter()
                    .filter(|d| d.category == Category::Protein)
                    .count(),
                1
            );
        }
    }
}
