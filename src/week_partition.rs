use std::collections::BTreeMap;

use chrono::{Datelike, Local, NaiveDate, NaiveTime, Timelike, Weekday};

use crate::session_extractor::Session;

pub const SLOT_MINUTES: u32 = 30;
// The rendered day never starts later than 08:00 or ends before 21:00.
pub const DAY_START_MINUTES: u32 = 8 * 60;
pub const DAY_END_MINUTES: u32 = 21 * 60;

/// Monday of the week `date` falls in.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date.week(Weekday::Mon).first_day()
}

/// Buckets sessions by their Monday-aligned week, keyed and ordered
/// chronologically. With no sessions at all, the current week is kept as a
/// single empty bucket so the renderer never has to special-case an empty
/// document.
pub fn group_by_week(sessions: &[Session]) -> BTreeMap<NaiveDate, Vec<&Session>> {
    let mut weeks: BTreeMap<NaiveDate, Vec<&Session>> = BTreeMap::new();
    for session in sessions {
        weeks
            .entry(week_start(session.start.date()))
            .or_default()
            .push(session);
    }
    if weeks.is_empty() {
        weeks.insert(week_start(Local::now().date_naive()), Vec::new());
    }
    weeks
}

/// The shared vertical axis every week's table uses, in minutes from
/// midnight. One axis per render pass keeps the row structure identical
/// across weeks.
#[derive(Debug, Clone, Copy)]
pub struct TimeAxis {
    pub min_time: u32,
    pub max_time: u32,
}

impl TimeAxis {
    pub fn from_sessions(sessions: &[Session]) -> Self {
        let mut min_time = DAY_START_MINUTES;
        let mut max_time = DAY_END_MINUTES;
        for session in sessions {
            min_time = min_time.min(minutes_of_day(session.start.time()));
            max_time = max_time.max(round_up_to_slot(minutes_of_day(session.end.time())));
        }
        // Keep the top row on a half-hour boundary so the whole axis stays
        // slot-aligned.
        min_time -= min_time % SLOT_MINUTES;
        Self { min_time, max_time }
    }

    pub fn slot_count(&self) -> usize {
        ((self.max_time - self.min_time) / SLOT_MINUTES) as usize
    }
}

pub fn minutes_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

pub fn round_up_to_slot(minutes: u32) -> u32 {
    minutes.next_multiple_of(SLOT_MINUTES)
}
