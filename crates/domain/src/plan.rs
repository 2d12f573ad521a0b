use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct PlanDay {
    pub day: u32,
    pub date: Option<NaiveDate>,
    pub title: String,
    pub focus: String,
    pub duration: String,
    pub prep: String,
    pub done: bool,
    pub note: String,
}

struct Template {
    title: &'static str,
    focus: &'static str,
    duration: &'static str,
    prep: &'static str,
}

const TEMPLATE: [Template; 7] = [
    Template {
        title: "Training A (lower body/glutes)",
        focus: "Lower",
        duration: "35–50",
        prep: "5–8 min warm-up/mobility",
    },
    Template {
        title: "Rest / mobility",
        focus: "Recovery",
        duration: "15–25",
        prep: "Walk, stretching",
    },
    Template {
        title: "Training B (upper body/back+chest)",
        focus: "Upper",
        duration: "35–50",
        prep: "5–8 min warm-up/mobility",
    },
    Template {
        title: "Rest",
        focus: "Recovery",
        duration: "-",
        prep: "Sleep 7–9 h",
    },
    Template {
        title: "Training C (mixed/core)",
        focus: "Mixed",
        duration: "35–45",
        prep: "Mobility + warm-up",
    },
    Template {
        title: "Zone 2 / walk",
        focus: "Cardio",
        duration: "20–30",
        prep: "Heart rate zone 2",
    },
    Template {
        title: "Rest",
        focus: "Recovery",
        duration: "-",
        prep: "Sleep 7–9 h",
    },
];

impl PlanDay {
    /// Day `day` (1-based) of a plan generated from the weekly template.
    #[must_use]
    pub fn from_template(day: u32) -> Self {
        let t = &TEMPLATE[(day.saturating_sub(1) as usize) % TEMPLATE.len()];
        Self {
            day,
            date: None,
            title: t.title.to_string(),
            focus: t.focus.to_string(),
            duration: t.duration.to_string(),
            prep: t.prep.to_string(),
            done: false,
            note: String::new(),
        }
    }
}

#[must_use]
pub fn make_plan(days: u32) -> Vec<PlanDay> {
    (1..=days).map(PlanDay::from_template).collect()
}

/// Resizes a plan, keeping days that still fit and generating new ones.
#[must_use]
pub fn resize_plan(mut plan: Vec<PlanDay>, days: u32) -> Vec<PlanDay> {
    plan.truncate(days as usize);
    #[allow(clippy::cast_possible_truncation)]
    let len = plan.len() as u32;
    plan.extend((len + 1..=days).map(PlanDay::from_template));
    plan
}

/// Share of completed plan days in percent.
#[must_use]
pub fn adherence(plan: &[PlanDay]) -> u32 {
    if plan.is_empty() {
        return 0;
    }
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    let percent =
        (plan.iter().filter(|d| d.done).count() as f32 / plan.len() as f32 * 100.).round() as u32;
    percent
}

/// Completion of the first seven plan days.
#[must_use]
pub fn streak(plan: &[PlanDay]) -> Vec<bool> {
    plan.iter().take(7).map(|d| d.done).collect()
}
