use crate::config::atomic_rename;
use crate::error::PlantError;
use crate::model::{GrowthStage, Mood, PlantState, PlantType, Rules, StatKey, Stats};
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// On-disk shape of the plant. Stored mood and stage are informational;
/// they are re-derived from the stats on load.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlantRecord {
    hydration: i64,
    sunlight: i64,
    nutrients: i64,
    #[serde(default)]
    mood: Option<Mood>,
    #[serde(default)]
    growth_stage: Option<GrowthStage>,
    name: String,
    #[serde(rename = "type", default)]
    plant_type: PlantType,
}

impl PlantRecord {
    fn from_state(state: &PlantState) -> Self {
        Self {
            hydration: state.stat(StatKey::Hydration) as i64,
            sunlight: state.stat(StatKey::Sunlight) as i64,
            nutrients: state.stat(StatKey::Nutrients) as i64,
            mood: Some(state.mood()),
            growth_stage: Some(state.growth_stage()),
            name: state.name().to_string(),
            plant_type: state.plant_type(),
        }
    }

    fn into_state(self, rules: &Rules) -> PlantState {
        let stats = Stats::new(self.hydration, self.sunlight, self.nutrients);
        PlantState::new(stats, self.name, self.plant_type, rules)
    }
}

pub(crate) fn to_json(state: &PlantState) -> Result<Vec<u8>, PlantError> {
    Ok(serde_json::to_vec_pretty(&PlantRecord::from_state(state))?)
}

pub(crate) fn from_json(data: &str, rules: &Rules) -> Result<PlantState, PlantError> {
    let record: PlantRecord = serde_json::from_str(data)?;
    Ok(record.into_state(rules))
}

/// The single durable slot holding the plant.
#[derive(Clone, Debug)]
pub(crate) struct PlantSlot {
    path: PathBuf,
}

impl PlantSlot {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn read(&self, rules: &Rules) -> Result<Option<PlantState>, PlantError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        from_json(&data, rules).map(Some)
    }

    /// Restore the saved plant, or the default record if there is none or
    /// it cannot be read.
    pub(crate) fn load_or_default(&self, rules: &Rules) -> PlantState {
        match self.read(rules) {
            Ok(Some(state)) => {
                log::info!("restored {:?} from {}", state.name(), self.path().display());
                state
            }
            Ok(None) => {
                log::info!("no saved plant at {}, starting fresh", self.path().display());
                PlantState::new_default(rules)
            }
            Err(e) => {
                log::warn!("ignoring saved plant at {}: {e}", self.path().display());
                PlantState::new_default(rules)
            }
        }
    }

    pub(crate) fn write(&self, state: &PlantState) -> Result<(), PlantError> {
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, to_json(state)?)?;
        atomic_rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Fire-and-forget write; failures are logged and dropped.
    pub(crate) fn store(&self, state: &PlantState) {
        if let Err(e) = self.write(state) {
            log::warn!("could not save plant to {}: {e}", self.path().display());
        }
    }
}
