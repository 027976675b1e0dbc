use crate::derivation;
use serde::{Deserialize, Deserializer, Serialize};

pub(crate) const STAT_MIN: u8 = 0;
pub(crate) const STAT_MAX: u8 = 100;

pub(crate) const DEFAULT_NAME: &str = "Leafy";
const DEFAULT_STAT: u8 = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StatKey {
    Hydration,
    Sunlight,
    Nutrients,
}

impl StatKey {
    pub(crate) const ALL: [StatKey; 3] = [StatKey::Hydration, StatKey::Sunlight, StatKey::Nutrients];

    pub(crate) fn label(self) -> &'static str {
        match self {
            StatKey::Hydration => "Hydration",
            StatKey::Sunlight => "Sunlight",
            StatKey::Nutrients => "Nutrients",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum Mood {
    Happy,
    Thirsty,
    NeedsSun,
    Hungry,
}

impl Mood {
    pub(crate) fn caption(self) -> &'static str {
        match self {
            Mood::Happy => "I am happy",
            Mood::Thirsty => "I am thirsty",
            Mood::NeedsSun => "I need sun",
            Mood::Hungry => "I am hungry",
        }
    }
}

/// Display maturity. Ordered by health, not by age: a plant can drop back
/// a stage when its stats fall.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub(crate) enum GrowthStage {
    Seedling,
    Sprout,
    Bloom,
}

impl GrowthStage {
    pub(crate) fn label(self) -> &'static str {
        match self {
            GrowthStage::Seedling => "Seedling",
            GrowthStage::Sprout => "Sprout",
            GrowthStage::Bloom => "Bloom",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum PlantType {
    #[default]
    Fern,
    Cactus,
    Sunflower,
}

impl PlantType {
    pub(crate) fn next(self) -> Self {
        match self {
            PlantType::Fern => PlantType::Cactus,
            PlantType::Cactus => PlantType::Sunflower,
            PlantType::Sunflower => PlantType::Fern,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            PlantType::Fern => "Fern",
            PlantType::Cactus => "Cactus",
            PlantType::Sunflower => "Sunflower",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Difficulty {
    Relaxed,
    #[default]
    Normal,
    Difficult,
}

impl Difficulty {
    /// Unknown names fall back to `Normal`.
    pub(crate) fn parse_lossy(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "relaxed" => Difficulty::Relaxed,
            "normal" => Difficulty::Normal,
            "difficult" => Difficulty::Difficult,
            other => {
                log::warn!("unknown difficulty {other:?}, using normal");
                Difficulty::Normal
            }
        }
    }

    pub(crate) fn next(self) -> Self {
        match self {
            Difficulty::Relaxed => Difficulty::Normal,
            Difficulty::Normal => Difficulty::Difficult,
            Difficulty::Difficult => Difficulty::Relaxed,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Difficulty::Relaxed => "Relaxed",
            Difficulty::Normal => "Normal",
            Difficulty::Difficult => "Difficult",
        }
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Difficulty::parse_lossy(&s))
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct DecayPeriods {
    pub(crate) relaxed_secs: u64,
    pub(crate) normal_secs: u64,
    pub(crate) difficult_secs: u64,
}

impl Default for DecayPeriods {
    fn default() -> Self {
        Self {
            relaxed_secs: 60,
            normal_secs: 30,
            difficult_secs: 10,
        }
    }
}

/// Thresholds and step sizes for derivation, decay and care actions.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct Rules {
    pub(crate) thirsty_below: u8,
    pub(crate) needs_sun_below: u8,
    pub(crate) hungry_below: u8,
    pub(crate) bloom_at: u8,
    pub(crate) sprout_at: u8,
    pub(crate) decay_step: u8,
    pub(crate) care_amount: u8,
    pub(crate) periods: DecayPeriods,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            thirsty_below: 30,
            needs_sun_below: 30,
            hungry_below: 30,
            bloom_at: 80,
            sprout_at: 50,
            decay_step: 10,
            care_amount: 20,
            periods: DecayPeriods::default(),
        }
    }
}

/// The three resource stats, always within `STAT_MIN..=STAT_MAX`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Stats {
    hydration: u8,
    sunlight: u8,
    nutrients: u8,
}

impl Stats {
    pub(crate) fn new(hydration: i64, sunlight: i64, nutrients: i64) -> Self {
        Self {
            hydration: clamp_stat(hydration),
            sunlight: clamp_stat(sunlight),
            nutrients: clamp_stat(nutrients),
        }
    }

    pub(crate) fn get(&self, key: StatKey) -> u8 {
        match key {
            StatKey::Hydration => self.hydration,
            StatKey::Sunlight => self.sunlight,
            StatKey::Nutrients => self.nutrients,
        }
    }

    pub(crate) fn with(mut self, key: StatKey, value: i64) -> Self {
        let v = clamp_stat(value);
        match key {
            StatKey::Hydration => self.hydration = v,
            StatKey::Sunlight => self.sunlight = v,
            StatKey::Nutrients => self.nutrients = v,
        }
        self
    }

    pub(crate) fn sum(&self) -> u16 {
        self.hydration as u16 + self.sunlight as u16 + self.nutrients as u16
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            hydration: DEFAULT_STAT,
            sunlight: DEFAULT_STAT,
            nutrients: DEFAULT_STAT,
        }
    }
}

fn clamp_stat(v: i64) -> u8 {
    v.clamp(STAT_MIN as i64, STAT_MAX as i64) as u8
}

/// The whole application state. Mood and growth stage are private and are
/// recomputed from the stats on every construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PlantState {
    stats: Stats,
    mood: Mood,
    growth_stage: GrowthStage,
    name: String,
    plant_type: PlantType,
}

impl PlantState {
    pub(crate) fn new(stats: Stats, name: String, plant_type: PlantType, rules: &Rules) -> Self {
        let (mood, growth_stage) = derivation::derive(&stats, rules);
        Self {
            stats,
            mood,
            growth_stage,
            name,
            plant_type,
        }
    }

    pub(crate) fn new_default(rules: &Rules) -> Self {
        Self::new(
            Stats::default(),
            DEFAULT_NAME.to_string(),
            PlantType::default(),
            rules,
        )
    }

    pub(crate) fn with_stats(&self, stats: Stats, rules: &Rules) -> Self {
        Self::new(stats, self.name.clone(), self.plant_type, rules)
    }

    pub(crate) fn with_name(&self, name: String) -> Self {
        Self {
            name,
            ..self.clone()
        }
    }

    pub(crate) fn with_plant_type(&self, plant_type: PlantType) -> Self {
        Self {
            plant_type,
            ..self.clone()
        }
    }

    pub(crate) fn stats(&self) -> Stats {
        self.stats
    }

    pub(crate) fn stat(&self, key: StatKey) -> u8 {
        self.stats.get(key)
    }

    pub(crate) fn mood(&self) -> Mood {
        self.mood
    }

    pub(crate) fn growth_stage(&self) -> GrowthStage {
        self.growth_stage
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn plant_type(&self) -> PlantType {
        self.plant_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_clamp_on_both_ends() {
        let s = Stats::new(-5, 250, 42);
        assert_eq!(s.get(StatKey::Hydration), 0);
        assert_eq!(s.get(StatKey::Sunlight), 100);
        assert_eq!(s.get(StatKey::Nutrients), 42);

        let s = s.with(StatKey::Nutrients, 1_000);
        assert_eq!(s.get(StatKey::Nutrients), 100);
        assert_eq!(s.sum(), 200);
    }

    #[test]
    fn default_record_is_a_happy_sprout() {
        let plant = PlantState::new_default(&Rules::default());
        assert_eq!(plant.name(), "Leafy");
        assert_eq!(plant.plant_type(), PlantType::Fern);
        assert_eq!(plant.mood(), Mood::Happy);
        assert_eq!(plant.growth_stage(), GrowthStage::Sprout);
        for key in StatKey::ALL {
            assert_eq!(plant.stat(key), 50);
        }
    }

    #[test]
    fn with_stats_rederives() {
        let rules = Rules::default();
        let plant = PlantState::new_default(&rules);
        let dry = plant.with_stats(Stats::new(5, 90, 90), &rules);
        assert_eq!(dry.mood(), Mood::Thirsty);
        assert_eq!(dry.growth_stage(), GrowthStage::Sprout);
        assert_eq!(dry.name(), plant.name());
    }

    #[test]
    fn name_and_type_leave_derived_fields_alone() {
        let rules = Rules::default();
        let plant = PlantState::new_default(&rules);
        let renamed = plant.with_name("Fernando".into()).with_plant_type(PlantType::Cactus);
        assert_eq!(renamed.mood(), plant.mood());
        assert_eq!(renamed.growth_stage(), plant.growth_stage());
        assert_eq!(renamed.stats(), plant.stats());
        assert_eq!(renamed.plant_type(), PlantType::Cactus);
    }

    #[test]
    fn stages_order_by_health() {
        assert!(GrowthStage::Seedling < GrowthStage::Sprout);
        assert!(GrowthStage::Sprout < GrowthStage::Bloom);
        assert_eq!(GrowthStage::Seedling.label(), "Seedling");
        assert_eq!(GrowthStage::Bloom.label(), "Bloom");
    }

    #[test]
    fn difficulty_parses_lossily() {
        assert_eq!(Difficulty::parse_lossy("Relaxed"), Difficulty::Relaxed);
        assert_eq!(Difficulty::parse_lossy(" difficult "), Difficulty::Difficult);
        assert_eq!(Difficulty::parse_lossy("nightmare"), Difficulty::Normal);

        let d: Difficulty = serde_json::from_str("\"impossible\"").unwrap();
        assert_eq!(d, Difficulty::Normal);
        assert_eq!(serde_json::to_string(&Difficulty::Relaxed).unwrap(), "\"relaxed\"");
    }

    #[test]
    fn rules_fill_missing_fields_with_defaults() {
        let rules: Rules = serde_json::from_str(r#"{"decay_step": 5}"#).unwrap();
        assert_eq!(rules.decay_step, 5);
        assert_eq!(rules.thirsty_below, 30);
        assert_eq!(rules.periods, DecayPeriods::default());
    }
}
