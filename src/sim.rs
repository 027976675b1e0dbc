use crate::model::{Difficulty, PlantState, PlantType, Rules, StatKey};

/// Everything the presentation layer can ask the core to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Intent {
    IncrementStat(StatKey, i32),
    SetName(String),
    SetDifficulty(Difficulty),
    SetPlantType(PlantType),
    Reset,
}

/// Raise one stat by `amount`, capped at the stat maximum. Non-positive
/// amounts leave the plant untouched.
pub(crate) fn apply_stat_delta(
    state: &PlantState,
    key: StatKey,
    amount: i32,
    rules: &Rules,
) -> PlantState {
    if amount <= 0 {
        log::debug!("ignoring non-positive {amount} for {key:?}");
        return state.clone();
    }
    let current = state.stat(key) as i64;
    let stats = state.stats().with(key, current + amount as i64);
    state.with_stats(stats, rules)
}

/// One decay tick: every stat drops by `rules.decay_step`, floored at zero.
pub(crate) fn decay(state: &PlantState, rules: &Rules) -> PlantState {
    let step = rules.decay_step as i64;
    let mut stats = state.stats();
    for key in StatKey::ALL {
        stats = stats.with(key, stats.get(key) as i64 - step);
    }
    state.with_stats(stats, rules)
}

pub(crate) fn set_name(state: &PlantState, name: String) -> PlantState {
    state.with_name(name)
}

pub(crate) fn set_plant_type(state: &PlantState, plant_type: PlantType) -> PlantState {
    state.with_plant_type(plant_type)
}

pub(crate) fn reset(rules: &Rules) -> PlantState {
    PlantState::new_default(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GrowthStage, Mood, Stats};

    fn plant(h: i64, s: i64, n: i64) -> PlantState {
        let rules = Rules::default();
        PlantState::new_default(&rules).with_stats(Stats::new(h, s, n), &rules)
    }

    #[test]
    fn increment_caps_at_max() {
        let rules = Rules::default();
        let p = apply_stat_delta(&plant(90, 50, 50), StatKey::Hydration, 20, &rules);
        assert_eq!(p.stat(StatKey::Hydration), 100);
        let p = apply_stat_delta(&p, StatKey::Hydration, 20, &rules);
        assert_eq!(p.stat(StatKey::Hydration), 100);
    }

    #[test]
    fn increment_touches_only_its_stat() {
        let rules = Rules::default();
        let before = plant(40, 20, 60);
        let after = apply_stat_delta(&before, StatKey::Sunlight, 20, &rules);
        assert_eq!(after.stat(StatKey::Hydration), 40);
        assert_eq!(after.stat(StatKey::Sunlight), 40);
        assert_eq!(after.stat(StatKey::Nutrients), 60);
        assert_eq!(before.mood(), Mood::NeedsSun);
        assert_eq!(after.mood(), Mood::Happy);
    }

    #[test]
    fn non_positive_amounts_are_no_ops() {
        let rules = Rules::default();
        let before = plant(40, 40, 40);
        assert_eq!(apply_stat_delta(&before, StatKey::Nutrients, 0, &rules), before);
        assert_eq!(apply_stat_delta(&before, StatKey::Nutrients, -30, &rules), before);
    }

    #[test]
    fn decay_floors_at_zero() {
        let rules = Rules::default();
        let p = decay(&plant(5, 0, 15), &rules);
        assert_eq!(p.stats(), Stats::new(0, 0, 5));
        let p = decay(&p, &rules);
        assert_eq!(p.stats(), Stats::new(0, 0, 0));
        assert_eq!(p.mood(), Mood::Thirsty);
        assert_eq!(p.growth_stage(), GrowthStage::Seedling);
    }

    #[test]
    fn increment_then_decay_reflects_final_vector() {
        let rules = Rules::default();
        let start = plant(25, 60, 60);
        let watered = apply_stat_delta(&start, StatKey::Hydration, 20, &rules);
        let aged = decay(&watered, &rules);
        assert_eq!(aged.stat(StatKey::Hydration), 25 + 20 - 10);
        assert_eq!(aged.stat(StatKey::Sunlight), 50);
        assert_eq!(aged, PlantState::new_default(&rules).with_stats(Stats::new(35, 50, 50), &rules));
        assert_eq!(aged.mood(), Mood::Happy);
        assert_eq!(aged.growth_stage(), GrowthStage::Seedling);
    }

    #[test]
    fn stage_can_regress() {
        let rules = Rules::default();
        let mut p = plant(80, 80, 80);
        assert_eq!(p.growth_stage(), GrowthStage::Bloom);
        p = decay(&p, &rules);
        assert_eq!(p.growth_stage(), GrowthStage::Sprout);
    }

    #[test]
    fn reset_is_idempotent() {
        let rules = Rules::default();
        let first = reset(&rules);
        let second = reset(&rules);
        assert_eq!(first, second);
        assert_eq!(first, PlantState::new_default(&rules));
    }

    #[test]
    fn name_is_stored_verbatim() {
        let p = set_name(&plant(10, 10, 10), "  Sir Leafalot ".into());
        assert_eq!(p.name(), "  Sir Leafalot ");
        assert_eq!(p.mood(), Mood::Thirsty);
        let p = set_plant_type(&p, PlantType::Sunflower);
        assert_eq!(p.plant_type(), PlantType::Sunflower);
    }
}
