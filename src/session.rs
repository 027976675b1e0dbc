use crate::model::{Difficulty, PlantState, Rules};
use crate::scheduler::DecayScheduler;
use crate::sim::{self, Intent};
use crate::storage::PlantSlot;
use std::time::{Duration, Instant};

/// Sole owner of the plant. Every change goes through `dispatch` or
/// `advance`, which re-derive, then publish to the slot.
pub(crate) struct Session {
    plant: PlantState,
    rules: Rules,
    difficulty: Difficulty,
    scheduler: DecayScheduler,
    slot: PlantSlot,
}

impl Session {
    pub(crate) fn start(rules: Rules, difficulty: Difficulty, slot: PlantSlot, now: Instant) -> Self {
        let plant = slot.load_or_default(&rules);
        let mut scheduler = DecayScheduler::default();
        scheduler.reconfigure(difficulty, &rules, now);
        Self {
            plant,
            rules,
            difficulty,
            scheduler,
            slot,
        }
    }

    pub(crate) fn plant(&self) -> &PlantState {
        &self.plant
    }

    pub(crate) fn rules(&self) -> &Rules {
        &self.rules
    }

    pub(crate) fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub(crate) fn decay_period(&self) -> Option<Duration> {
        self.scheduler.period()
    }

    /// Apply one intent. Returns whether the plant changed.
    pub(crate) fn dispatch(&mut self, intent: Intent, now: Instant) -> bool {
        log::debug!("intent {intent:?}");
        let next = match intent {
            Intent::IncrementStat(key, amount) => {
                sim::apply_stat_delta(&self.plant, key, amount, &self.rules)
            }
            Intent::SetName(name) => sim::set_name(&self.plant, name),
            Intent::SetPlantType(plant_type) => sim::set_plant_type(&self.plant, plant_type),
            Intent::Reset => {
                log::info!("resetting {:?}", self.plant.name());
                sim::reset(&self.rules)
            }
            Intent::SetDifficulty(difficulty) => {
                self.difficulty = difficulty;
                self.scheduler.reconfigure(difficulty, &self.rules, now);
                return false;
            }
        };
        self.publish(next)
    }

    /// Run every decay tick that has come due. Returns how many fired.
    pub(crate) fn advance(&mut self, now: Instant) -> u32 {
        let ticks = self.scheduler.due_ticks(now);
        if ticks == 0 {
            return 0;
        }
        let mut next = self.plant.clone();
        for _ in 0..ticks {
            next = sim::decay(&next, &self.rules);
        }
        log::debug!("{ticks} decay tick(s), now {:?}", next.stats());
        self.publish(next);
        ticks
    }

    /// Stop the timer and write a final snapshot. Later calls do nothing.
    pub(crate) fn shutdown(&mut self) {
        if self.scheduler.period().is_none() {
            return;
        }
        self.scheduler.cancel();
        self.slot.store(&self.plant);
    }

    fn publish(&mut self, next: PlantState) -> bool {
        if next == self.plant {
            return false;
        }
        self.plant = next;
        self.slot.store(&self.plant);
        true
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.shutdown();
    }
}
