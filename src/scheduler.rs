use crate::model::{Difficulty, Rules};
use std::time::{Duration, Instant};

pub(crate) fn period_for(difficulty: Difficulty, rules: &Rules) -> Duration {
    let secs = match difficulty {
        Difficulty::Relaxed => rules.periods.relaxed_secs,
        Difficulty::Normal => rules.periods.normal_secs,
        Difficulty::Difficult => rules.periods.difficult_secs,
    };
    Duration::from_secs(secs.max(1))
}

#[derive(Clone, Copy, Debug)]
struct DecayTimer {
    period: Duration,
    next_due: Instant,
}

/// Holds at most one repeating decay timer. Changing the period always
/// drops the old timer before the new one is armed.
#[derive(Debug, Default)]
pub(crate) struct DecayScheduler {
    active: Option<DecayTimer>,
}

impl DecayScheduler {
    pub(crate) fn start(&mut self, period: Duration, now: Instant) {
        self.cancel();
        let period = period.max(Duration::from_millis(1));
        self.active = Some(DecayTimer {
            period,
            next_due: now + period,
        });
    }

    pub(crate) fn reconfigure(&mut self, difficulty: Difficulty, rules: &Rules, now: Instant) {
        let period = period_for(difficulty, rules);
        log::info!("decay timer now every {}s ({})", period.as_secs(), difficulty.label());
        self.start(period, now);
    }

    pub(crate) fn cancel(&mut self) {
        self.active = None;
    }

    pub(crate) fn period(&self) -> Option<Duration> {
        self.active.map(|t| t.period)
    }

    /// Number of firings between the previous poll and `now`. The deadline
    /// moves forward by whole periods so a late poll catches up.
    pub(crate) fn due_ticks(&mut self, now: Instant) -> u32 {
        let Some(timer) = self.active.as_mut() else {
            return 0;
        };
        if now < timer.next_due {
            return 0;
        }
        let late = now.duration_since(timer.next_due).as_nanos();
        let fired = 1 + late / timer.period.as_nanos();
        let fired = u32::try_from(fired).unwrap_or(u32::MAX);
        timer.next_due += timer.period * fired;
        fired
    }
}
