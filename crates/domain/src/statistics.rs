use std::fmt;

use crate::{ProgramState, ProgressEntry, RIR, SetEntry};

/// Completed versus targeted working sets of a day.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DayProgress {
    pub done: u32,
    pub total: u32,
}

impl DayProgress {
    #[must_use]
    pub fn percent(&self) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let percent = self.done as f32 / self.total.max(1) as f32 * 100.;
        percent
    }
}

impl fmt::Display for DayProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.done, self.total)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DayStats {
    pub progress: DayProgress,
    pub volume: u32,
    pub avg_rir: Option<f32>,
}

#[must_use]
pub fn volume<'a>(sets: impl IntoIterator<Item = &'a SetEntry>) -> u32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let volume = sets.into_iter().map(SetEntry::volume).sum::<f32>().round() as u32;
    volume
}

#[must_use]
pub fn avg_rir<'a>(sets: impl IntoIterator<Item = &'a SetEntry>) -> Option<f32> {
    RIR::avg(&sets.into_iter().filter_map(|s| s.rir).collect::<Vec<_>>())
}

/// Statistics of the currently selected day.
#[must_use]
pub fn day_stats(state: &ProgramState) -> DayStats {
    let Some(day) = state.current_day() else {
        return DayStats::default();
    };
    stats((0..day.exercises.len()).map(|idx| (state.work_sets(idx), state.entry(idx))))
}

/// Statistics over exercises given as (working sets, set log).
#[must_use]
pub fn stats<'a>(exercises: impl IntoIterator<Item = (u32, Option<&'a ProgressEntry>)>) -> DayStats {
    let mut progress = DayProgress::default();
    let mut sets = vec![];
    for (work_sets, entry) in exercises {
        progress.total += work_sets;
        if let Some(entry) = entry {
            progress.done += entry.done_sets();
            sets.extend(entry.sets.iter());
        }
    }
    DayStats {
        progress,
        volume: volume(sets.iter().copied()),
        avg_rir: avg_rir(sets.iter().copied()),
    }
}
