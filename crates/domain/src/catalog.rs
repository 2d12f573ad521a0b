use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, EnumString,
)]
pub enum Level {
    #[default]
    #[strum(serialize = "S")]
    Start,
    #[strum(serialize = "M")]
    Medium,
    #[strum(serialize = "P")]
    Pro,
}

impl Level {
    #[must_use]
    pub fn program(self) -> &'static Program {
        match self {
            Level::Start => &START,
            Level::Medium => &MEDIUM,
            Level::Pro => &PRO,
        }
    }

    /// Whether the program has at least one week. Other levels are announced as coming soon.
    #[must_use]
    pub fn is_available(self) -> bool {
        !self.program().weeks.is_empty()
    }
}

#[derive(Debug, PartialEq)]
pub struct Program {
    pub name: &'static str,
    pub weeks: &'static [Week],
}

impl Program {
    #[must_use]
    pub fn week(&self, week: usize) -> Option<&'static Week> {
        self.weeks.get(week)
    }

    #[must_use]
    pub fn day(&self, week: usize, day: usize) -> Option<&'static Day> {
        self.week(week)?.days.get(day)
    }
}

#[derive(Debug, PartialEq)]
pub struct Week {
    pub name: &'static str,
    pub days: &'static [Day],
}

#[derive(Debug, PartialEq)]
pub struct Day {
    pub title: &'static str,
    pub place: &'static str,
    pub exercises: &'static [Exercise],
}

#[derive(Debug, PartialEq)]
pub struct Exercise {
    pub muscle: &'static str,
    pub name: &'static str,
    pub warmup: bool,
    pub work_sets: u32,
    pub reps: &'static str,
    pub rest: &'static str,
    pub equipment: &'static [&'static str],
    pub intensity: &'static str,
    pub notes: &'static str,
    pub videos: &'static [Video],
}

impl Exercise {
    #[must_use]
    pub fn video_href(&self) -> Option<&'static str> {
        self.videos
            .first()
            .map(|v| v.href)
            .filter(|href| !href.is_empty())
    }
}

#[derive(Debug, PartialEq)]
pub struct Video {
    pub label: &'static str,
    pub href: &'static str,
}

const NEAR_FAILURE: &str = "Near failure (1–2 reps)";
const TO_BURN: &str = "To the burn";
const REPS: &str = "12–15";
const REPS_CORE: &str = "15–30";
const REST: &str = "60–120 s";
const HOME: &str = "Home";

const CRUNCH_VIDEOS: &[Video] = &[Video {
    label: "Crunches: technique",
    href: "https://vkvideo.ru/video-226154718_456239154",
}];

const START_DAYS: &[Day] = &[
    Day {
        title: "Day 1: Legs",
        place: HOME,
        exercises: &[
            Exercise {
                muscle: "Glutes",
                name: "Plie squat",
                warmup: true,
                work_sets: 3,
                reps: REPS,
                rest: REST,
                equipment: &["Flat band", "Mini band"],
                intensity: NEAR_FAILURE,
                notes: "Back straight, feet wider than shoulders, toes slightly out. Smooth, no jerks.",
                videos: &[],
            },
            Exercise {
                muscle: "Quadriceps",
                name: "Leg extension",
                warmup: true,
                work_sets: 3,
                reps: REPS,
                rest: REST,
                equipment: &["Flat band"],
                intensity: NEAR_FAILURE,
                notes: "Lying on the back, band around the feet. Hold 1–2 s at the top, slow negative.",
                videos: &[],
            },
            Exercise {
                muscle: "Hamstrings",
                name: "Lying leg curl",
                warmup: true,
                work_sets: 3,
                reps: REPS,
                rest: REST,
                equipment: &["Flat band"],
                intensity: NEAR_FAILURE,
                notes: "Lying on the stomach, curl the legs towards the glutes, hold 1–2 s.",
                videos: &[],
            },
            Exercise {
                muscle: "Glutes",
                name: "Seated hip abduction",
                warmup: false,
                work_sets: 3,
                reps: REPS,
                rest: REST,
                equipment: &["Flat band", "Mini band"],
                intensity: NEAR_FAILURE,
                notes: "Band above the knees, back straight, peak contraction 1–2 s.",
                videos: &[],
            },
            Exercise {
                muscle: "Abs",
                name: "Crunches",
                warmup: false,
                work_sets: 2,
                reps: REPS_CORE,
                rest: REST,
                equipment: &["Body weight"],
                intensity: TO_BURN,
                notes: "No jerks, stretch at the bottom, work to the burn.",
                videos: CRUNCH_VIDEOS,
            },
        ],
    },
    Day {
        title: "Day 2: Upper body",
        place: HOME,
        exercises: &[
            Exercise {
                muscle: "Back",
                name: "Single-arm vertical pull",
                warmup: true,
                work_sets: 3,
                reps: REPS,
                rest: REST,
                equipment: &["Flat band"],
                intensity: NEAR_FAILURE,
                notes: "Band anchored above the head, pull to the upper chest, hold 1–2 s.",
                videos: &[],
            },
            Exercise {
                muscle: "Chest",
                name: "Floor press",
                warmup: true,
                work_sets: 3,
                reps: REPS,
                rest: REST,
                equipment: &["Flat band", "Dumbbells (optional)"],
                intensity: NEAR_FAILURE,
                notes: "Elbows about 45° to the torso, no full lockout, 1–2 s at the top.",
                videos: &[],
            },
            Exercise {
                muscle: "Back",
                name: "Horizontal row",
                warmup: false,
                work_sets: 3,
                reps: REPS,
                rest: REST,
                equipment: &["Long loop", "Flat band"],
                intensity: NEAR_FAILURE,
                notes: "Pull to the torso, squeeze the shoulder blades, hold 1–2 s.",
                videos: &[],
            },
            Exercise {
                muscle: "Chest",
                name: "Lying chest fly",
                warmup: false,
                work_sets: 3,
                reps: REPS,
                rest: REST,
                equipment: &["Flat band", "Dumbbells"],
                intensity: NEAR_FAILURE,
                notes: "Slightly bent elbows, peak contraction 1–2 s.",
                videos: &[],
            },
            Exercise {
                muscle: "Abs",
                name: "Crunches",
                warmup: false,
                work_sets: 3,
                reps: REPS_CORE,
                rest: REST,
                equipment: &["Body weight"],
                intensity: TO_BURN,
                notes: "No jerks, to the burn.",
                videos: CRUNCH_VIDEOS,
            },
        ],
    },
    Day {
        title: "Day 3: Legs/Glutes",
        place: HOME,
        exercises: &[
            Exercise {
                muscle: "Glutes",
                name: "Glute bridge",
                warmup: true,
                work_sets: 3,
                reps: REPS,
                rest: REST,
                equipment: &["Flat band", "Dumbbell on the hips", "Mini band"],
                intensity: NEAR_FAILURE,
                notes: "Knees at about 90°, hold 1–2 s at the top, controlled negative.",
                videos: &[],
            },
            Exercise {
                muscle: "Hamstrings",
                name: "Standing leg curl",
                warmup: true,
                work_sets: 3,
                reps: REPS,
                rest: REST,
                equipment: &["Flat band", "Mini band"],
                intensity: NEAR_FAILURE,
                notes: "Hand on a support, curl towards the glute, hold 1–2 s.",
                videos: &[],
            },
            Exercise {
                muscle: "Glutes",
                name: "Quadruped hip abduction",
                warmup: true,
                work_sets: 3,
                reps: REPS,
                rest: REST,
                equipment: &["Flat band", "Mini band"],
                intensity: NEAR_FAILURE,
                notes: "Band above the knees, stable torso, hold 1–2 s.",
                videos: &[],
            },
            Exercise {
                muscle: "Glutes",
                name: "Quadruped kickback",
                warmup: false,
                work_sets: 3,
                reps: REPS,
                rest: REST,
                equipment: &["Flat band", "Mini band"],
                intensity: NEAR_FAILURE,
                notes: "Extend back and up, hold 1–2 s.",
                videos: &[],
            },
            Exercise {
                muscle: "Abs",
                name: "Crunches",
                warmup: false,
                work_sets: 1,
                reps: REPS_CORE,
                rest: REST,
                equipment: &["Body weight"],
                intensity: TO_BURN,
                notes: "To the burn, no jerks.",
                videos: CRUNCH_VIDEOS,
            },
        ],
    },
];

static START: Program = Program {
    name: "Start",
    weeks: &[
        Week {
            name: "Week 1",
            days: START_DAYS,
        },
        Week {
            name: "Week 2",
            days: START_DAYS,
        },
        Week {
            name: "Week 3",
            days: START_DAYS,
        },
        Week {
            name: "Week 4",
            days: START_DAYS,
        },
    ],
};

static MEDIUM: Program = Program {
    name: "Medium",
    weeks: &[],
};

static PRO: Program = Program {
    name: "Pro",
    weeks: &[],
};
