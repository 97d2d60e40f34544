//! Calendar-relative due labels and the date-time input literal.

use chrono::{
    DateTime, FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc,
};
use chrono_tz::Tz;

use crate::error::ControllerError;

/// Literal accepted and produced for date-time input controls.
pub const EDITABLE_FORMAT: &str = "%Y-%m-%dT%H:%M";
const EDITABLE_FORMAT_WITH_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";

/// Zone in which calendar days and wall-clock times are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayZone {
    /// The system's local zone.
    #[default]
    Local,
    Named(Tz),
}

impl DisplayZone {
    fn wall_clock<T: TimeZone>(self, instant: &DateTime<T>) -> NaiveDateTime {
        match self {
            DisplayZone::Local => instant.with_timezone(&Local).naive_local(),
            DisplayZone::Named(tz) => instant.with_timezone(&tz).naive_local(),
        }
    }

    fn resolve(self, wall: &NaiveDateTime) -> LocalResult<DateTime<FixedOffset>> {
        match self {
            DisplayZone::Local => Local.from_local_datetime(wall).map(|dt| dt.fixed_offset()),
            DisplayZone::Named(tz) => tz.from_local_datetime(wall).map(|dt| dt.fixed_offset()),
        }
    }
}

impl From<Option<Tz>> for DisplayZone {
    fn from(tz: Option<Tz>) -> Self {
        tz.map_or(DisplayZone::Local, DisplayZone::Named)
    }
}

/// Which calendar-relative phrasing a due date gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueBucket {
    SameDay,
    NextDay,
    NextWeek,
    LastDay,
    LastWeek,
    SameElse,
}

impl DueBucket {
    /// Classify by whole calendar days from today.
    pub fn from_day_offset(days: i64) -> Self {
        match days {
            0 => DueBucket::SameDay,
            1 => DueBucket::NextDay,
            2..=6 => DueBucket::NextWeek,
            -1 => DueBucket::LastDay,
            -6..=-2 => DueBucket::LastWeek,
            _ => DueBucket::SameElse,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DateFormatter {
    zone: DisplayZone,
}

impl DateFormatter {
    pub fn new(zone: DisplayZone) -> Self {
        Self { zone }
    }

    pub fn local() -> Self {
        Self::new(DisplayZone::Local)
    }

    pub fn zone(&self) -> DisplayZone {
        self.zone
    }

    fn date_of<T: TimeZone>(&self, instant: &DateTime<T>) -> NaiveDate {
        self.zone.wall_clock(instant).date()
    }

    pub fn bucket(&self, due: &DateTime<FixedOffset>, now: DateTime<Utc>) -> DueBucket {
        let days = self
            .date_of(due)
            .signed_duration_since(self.date_of(&now))
            .num_days();
        DueBucket::from_day_offset(days)
    }

    /// Human label such as "Tomorrow at 9:05" or "Last Friday at 17:30".
    pub fn relative_label(&self, due: &DateTime<FixedOffset>, now: DateTime<Utc>) -> String {
        let wall = self.zone.wall_clock(due);
        let time = wall.format("%-H:%M");
        match self.bucket(due, now) {
            DueBucket::SameDay => format!("Today at {}", time),
            DueBucket::NextDay => format!("Tomorrow at {}", time),
            DueBucket::NextWeek => format!("{} at {}", wall.format("%A"), time),
            DueBucket::LastDay => format!("Yesterday at {}", time),
            DueBucket::LastWeek => format!("Last {} at {}", wall.format("%A"), time),
            DueBucket::SameElse => format!("{} at {}", wall.format("%a %-d %b %y"), time),
        }
    }

    /// `YYYY-MM-DDTHH:mm` wall-clock literal, no offset.
    pub fn editable_literal(&self, due: &DateTime<FixedOffset>) -> String {
        self.zone.wall_clock(due).format(EDITABLE_FORMAT).to_string()
    }

    /// Inverse of [`editable_literal`](Self::editable_literal).
    ///
    /// A wall-clock time that occurs twice (DST fall-back) resolves to the
    /// earlier instant; one that never occurs is rejected.
    pub fn parse_editable_literal(
        &self,
        literal: &str,
    ) -> Result<DateTime<FixedOffset>, ControllerError> {
        let trimmed = literal.trim();
        let wall = NaiveDateTime::parse_from_str(trimmed, EDITABLE_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(trimmed, EDITABLE_FORMAT_WITH_SECONDS))
            .map_err(|_| ControllerError::InvalidDue(literal.to_string()))?;

        self.zone
            .resolve(&wall)
            .earliest()
            .ok_or_else(|| ControllerError::NonexistentLocalTime(literal.to_string()))
    }
}
