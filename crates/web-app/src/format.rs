use r7_domain::{DayStats, RIR};

#[must_use]
pub fn avg_rir(value: Option<f32>) -> String {
    value.map_or_else(|| String::from("-"), |v| format!("{v:.1}"))
}

/// Label of a RIR choice.
#[must_use]
pub fn rir(value: Option<RIR>) -> String {
    value.map_or_else(String::new, |r| r.to_string())
}

/// Summary line of a day, e.g. `5/9 sets · 700 kg · RIR 2.0`.
#[must_use]
pub fn day_summary(stats: &DayStats) -> String {
    format!(
        "{} sets · {} kg · RIR {}",
        stats.progress,
        stats.volume,
        avg_rir(stats.avg_rir)
    )
}
