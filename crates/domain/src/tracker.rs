use chrono::NaiveDate;

use crate::{
    Delta, MAX_DAYS, MeasurementField, MeasurementRecord, PlanDay, Profile, QuerySeed,
    measurement, plan,
};

/// Everything shown outside the program viewer: plan, measurements and profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Tracker {
    pub plan: Vec<PlanDay>,
    pub measures: Vec<MeasurementRecord>,
    pub profile: Profile,
    pub applied_from_query: bool,
}

impl Tracker {
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        let profile = Profile::new(today);
        Self {
            plan: plan::make_plan(profile.days),
            measures: vec![MeasurementRecord::blank(today)],
            profile,
            applied_from_query: false,
        }
    }

    /// Applies the profile values of a personal link. Only the first call has an effect.
    pub fn apply_query(&mut self, seed: &QuerySeed) -> bool {
        if self.applied_from_query {
            return false;
        }
        if let Some(name) = &seed.name {
            self.profile.name.clone_from(name);
        }
        if let Some(mode) = seed.mode {
            self.profile.mode = Some(mode);
        }
        if let Some(level) = seed.level {
            self.profile.level = level;
        }
        if let Some(start) = seed.start {
            self.profile.start = Some(start);
        }
        self.profile.days = seed.days;
        if self.plan.len() != seed.days as usize {
            self.plan = plan::make_plan(seed.days);
        }
        self.applied_from_query = true;
        true
    }

    pub fn set_plan_date(&mut self, idx: usize, date: Option<NaiveDate>) {
        if let Some(day) = self.plan.get_mut(idx) {
            day.date = date;
        }
    }

    pub fn set_plan_note(&mut self, idx: usize, note: String) {
        if let Some(day) = self.plan.get_mut(idx) {
            day.note = note;
        }
    }

    pub fn toggle_plan_day(&mut self, idx: usize) {
        if let Some(day) = self.plan.get_mut(idx) {
            day.done = !day.done;
        }
    }

    #[must_use]
    pub fn adherence(&self) -> u32 {
        plan::adherence(&self.plan)
    }

    #[must_use]
    pub fn streak(&self) -> Vec<bool> {
        plan::streak(&self.plan)
    }

    pub fn add_measurement(&mut self, today: NaiveDate) {
        self.measures.push(MeasurementRecord::blank(today));
    }

    pub fn update_measurement(&mut self, idx: usize, record: MeasurementRecord) {
        if let Some(r) = self.measures.get_mut(idx) {
            *r = record;
        }
    }

    /// Removes a row. The log never becomes empty.
    pub fn delete_measurement(&mut self, idx: usize, today: NaiveDate) {
        if idx < self.measures.len() {
            self.measures.remove(idx);
        }
        if self.measures.is_empty() {
            self.measures.push(MeasurementRecord::blank(today));
        }
    }

    #[must_use]
    pub fn latest_delta(&self, field: MeasurementField) -> Delta {
        measurement::latest_delta(&self.measures, field)
    }

    #[must_use]
    pub fn delta(&self, idx: usize, field: MeasurementField) -> Delta {
        measurement::delta(&self.measures, idx, field)
    }

    /// Replaces the profile. The duration is clamped to `1..=MAX_DAYS` and the plan resized to it.
    pub fn update_profile(&mut self, mut profile: Profile) {
        profile.days = profile.days.clamp(1, MAX_DAYS);
        self.profile = profile;
        self.fit_plan();
    }

    /// Restores the invariants of a loaded or imported tracker: a plan matching the duration
    /// and at least one measurement row.
    pub fn repair(&mut self, today: NaiveDate) {
        self.profile.days = self.profile.days.clamp(1, MAX_DAYS);
        self.fit_plan();
        if self.measures.is_empty() {
            self.measures.push(MeasurementRecord::blank(today));
        }
    }

    fn fit_plan(&mut self) {
        if self.profile.days as usize != self.plan.len() {
            self.plan = plan::resize_plan(std::mem::take(&mut self.plan), self.profile.days);
        }
    }
}
