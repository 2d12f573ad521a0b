use std::{cell::RefCell, rc::Rc};

use chrono::{DateTime, Duration, Utc};
use gloo_timers::callback::Interval;

/// Rest durations offered in seconds.
pub const REST_PRESETS: [i64; 3] = [60, 90, 120];

pub const TICK_INTERVAL_MS: u32 = 300;

/// Countdown between sets, identified by its end.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RestTimer {
    end: Option<DateTime<Utc>>,
}

impl RestTimer {
    #[must_use]
    pub fn new(end: Option<DateTime<Utc>>) -> Self {
        Self { end }
    }

    #[must_use]
    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.end.is_some()
    }

    pub fn start(&mut self, now: DateTime<Utc>, seconds: i64) {
        self.end = Some(now + Duration::seconds(seconds));
    }

    pub fn stop(&mut self) {
        self.end = None;
    }

    #[must_use]
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.end.map(|end| (end - now).max(Duration::zero()))
    }

    /// Stops the timer once its end is reached. Returns true if it expired with this call.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        match self.end {
            Some(end) if now >= end => {
                self.end = None;
                true
            }
            _ => false,
        }
    }
}

/// `mm:ss`, or `Rest` if no countdown is running.
#[must_use]
pub fn format_countdown(remaining: Option<Duration>) -> String {
    match remaining {
        Some(remaining) => {
            let seconds = remaining.num_seconds();
            format!("{:02}:{:02}", seconds / 60, seconds % 60)
        }
        None => String::from("Rest"),
    }
}

/// `mm:ss`, `hh:mm:ss` past one hour, or `-` if the workout has not started.
#[must_use]
pub fn format_elapsed(elapsed: Option<Duration>) -> String {
    match elapsed {
        Some(elapsed) => {
            let seconds = elapsed.num_seconds().max(0);
            let (h, m, s) = (seconds / 3600, seconds / 60 % 60, seconds % 60);
            if h > 0 {
                format!("{h:02}:{m:02}:{s:02}")
            } else {
                format!("{m:02}:{s:02}")
            }
        }
        None => String::from("-"),
    }
}

/// Periodic callback driving the displayed timers.
#[derive(Clone, Default)]
pub struct Ticker {
    interval: Rc<RefCell<Option<Interval>>>,
}

impl Ticker {
    /// Calls `tick` every [`TICK_INTERVAL_MS`] until it returns false or [`Ticker::stop`] is called.
    pub fn start(&self, mut tick: impl FnMut() -> bool + 'static) {
        let handle = Rc::downgrade(&self.interval);
        let interval = Interval::new(TICK_INTERVAL_MS, move || {
            if !tick() {
                if let Some(interval) = handle.upgrade() {
                    // The callback must outlive its own invocation.
                    let finished = interval.borrow_mut().take();
                    wasm_bindgen_futures::spawn_local(async move { drop(finished) });
                }
            }
        });
        if let Some(previous) = self.interval.borrow_mut().replace(interval) {
            previous.cancel();
        }
    }

    pub fn stop(&self) {
        if let Some(interval) = self.interval.borrow_mut().take() {
            interval.cancel();
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.interval.borrow().is_some()
    }
}
