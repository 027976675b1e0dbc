use crate::model::{GrowthStage, Mood, Rules, StatKey, Stats};

/// Mood and growth stage for one stat snapshot. This is the only way the
/// rest of the crate derives either value, so the two never disagree.
pub(crate) fn derive(stats: &Stats, rules: &Rules) -> (Mood, GrowthStage) {
    (derive_mood(stats, rules), derive_growth_stage(stats, rules))
}

// Checked in order: hydration, sunlight, nutrients. First hit wins.
fn derive_mood(stats: &Stats, rules: &Rules) -> Mood {
    if stats.get(StatKey::Hydration) < rules.thirsty_below {
        return Mood::Thirsty;
    }
    if stats.get(StatKey::Sunlight) < rules.needs_sun_below {
        return Mood::NeedsSun;
    }
    if stats.get(StatKey::Nutrients) < rules.hungry_below {
        return Mood::Hungry;
    }
    Mood::Happy
}

fn derive_growth_stage(stats: &Stats, rules: &Rules) -> GrowthStage {
    // average >= t  <=>  sum >= 3t, without the float rounding
    let sum = stats.sum();
    if sum >= 3 * rules.bloom_at as u16 {
        GrowthStage::Bloom
    } else if sum >= 3 * rules.sprout_at as u16 {
        GrowthStage::Sprout
    } else {
        GrowthStage::Seedling
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(h: i64, s: i64, n: i64) -> Stats {
        Stats::new(h, s, n)
    }

    #[test]
    fn hydration_is_checked_first() {
        let rules = Rules::default();
        assert_eq!(derive_mood(&stats(10, 10, 10), &rules), Mood::Thirsty);
        assert_eq!(derive_mood(&stats(30, 10, 10), &rules), Mood::NeedsSun);
        assert_eq!(derive_mood(&stats(30, 30, 10), &rules), Mood::Hungry);
        assert_eq!(derive_mood(&stats(30, 30, 30), &rules), Mood::Happy);
    }

    #[test]
    fn mood_thresholds_are_strict() {
        let rules = Rules::default();
        assert_eq!(derive_mood(&stats(29, 100, 100), &rules), Mood::Thirsty);
        assert_eq!(derive_mood(&stats(100, 29, 100), &rules), Mood::NeedsSun);
        assert_eq!(derive_mood(&stats(100, 100, 29), &rules), Mood::Hungry);
    }

    #[test]
    fn growth_boundaries() {
        let rules = Rules::default();
        // average exactly 80
        assert_eq!(derive_growth_stage(&stats(80, 80, 80), &rules), GrowthStage::Bloom);
        assert_eq!(derive_growth_stage(&stats(100, 70, 70), &rules), GrowthStage::Bloom);
        // average 79.67
        assert_eq!(derive_growth_stage(&stats(80, 80, 79), &rules), GrowthStage::Sprout);
        // average exactly 50
        assert_eq!(derive_growth_stage(&stats(50, 50, 50), &rules), GrowthStage::Sprout);
        // average 49
        assert_eq!(derive_growth_stage(&stats(49, 49, 49), &rules), GrowthStage::Seedling);
        assert_eq!(derive_growth_stage(&stats(0, 0, 0), &rules), GrowthStage::Seedling);
        assert_eq!(derive_growth_stage(&stats(100, 100, 100), &rules), GrowthStage::Bloom);
    }

    #[test]
    fn derivation_is_deterministic() {
        let rules = Rules::default();
        for h in (0..=100).step_by(7) {
            for s in (0..=100).step_by(11) {
                for n in (0..=100).step_by(13) {
                    let st = stats(h, s, n);
                    assert_eq!(derive(&st, &rules), derive(&st, &rules));
                }
            }
        }
    }

    #[test]
    fn thresholds_come_from_rules() {
        let rules = Rules {
            thirsty_below: 60,
            bloom_at: 40,
            ..Rules::default()
        };
        assert_eq!(derive(&stats(50, 50, 50), &rules), (Mood::Thirsty, GrowthStage::Bloom));
    }
}
