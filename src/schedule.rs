use crate::{
    field::{Field, FieldKind},
    Error, Result,
};
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use std::{fmt::Display, str::FromStr};

/// Step limit of the upcoming-time search.
///
/// The rarest satisfiable schedule, a particular leap day bound to a
/// particular weekday, is reached within the 28-year leap cycle at roughly
/// 40 coarse steps per scanned year; this limit leaves an order of magnitude
/// of margin on top of that. A schedule that exhausts it has no occurrence.
const MAX_STEPS: usize = 10_000;

/// Represents a five-field cron schedule with its methods.
///
/// For schedule format clarification and usage examples, please refer to the
/// [crate documentation](crate).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
#[cfg_attr(feature = "serde", serde(into = "String"))]
pub struct Schedule {
    minute: Field,
    hour: Field,
    dom: Field,
    month: Field,
    dow: Field,
    expression: String,
}

impl Schedule {
    /// Parses and validates provided five-field `expression` and constructs [`Schedule`] instance.
    ///
    /// Well-known `@` aliases (`@yearly`/`@annually`, `@monthly`, `@weekly`,
    /// `@daily`, `@hourly`) are accepted in place of the five fields.
    ///
    /// Alternative way to construct [`Schedule`] is to use one of `try_from` or `from_str` methods.
    ///
    /// Returns [`Error`] in a case provided expression is unparsable or has format errors.
    pub fn new(expression: impl Into<String>) -> Result<Self> {
        let expression = expression.into();
        let mut elements: Vec<&str> = expression.split_whitespace().collect();

        if elements.len() == 1 {
            match elements[0] {
                "@yearly" | "@annually" => elements = vec!["0", "0", "1", "1", "*"],
                "@monthly" => elements = vec!["0", "0", "1", "*", "*"],
                "@weekly" => elements = vec!["0", "0", "*", "*", "0"],
                "@daily" => elements = vec!["0", "0", "*", "*", "*"],
                "@hourly" => elements = vec!["0", "*", "*", "*", "*"],
                _ => return Err(Error::InvalidSchedule(expression)),
            }
        } else if elements.len() != 5 {
            return Err(Error::InvalidSchedule(expression));
        }

        Ok(Self {
            minute: Field::parse(FieldKind::Minute, elements[0])?,
            hour: Field::parse(FieldKind::Hour, elements[1])?,
            dom: Field::parse(FieldKind::DayOfMonth, elements[2])?,
            month: Field::parse(FieldKind::Month, elements[3])?,
            dow: Field::parse(FieldKind::DayOfWeek, elements[4])?,
            expression: elements.join(" "),
        })
    }

    /// Returns `true` if the provided `time` satisfies every field of the schedule.
    ///
    /// All five fields are combined with logical AND, including day of month
    /// and day of week: the traditional cron rule of OR-ing those two when
    /// both are restricted is deliberately not implemented, so `0 0 13 * 5`
    /// means Friday the 13th. Seconds are ignored.
    pub fn matches(&self, time: &NaiveDateTime) -> bool {
        self.minute.contains(time.minute())
            && self.hour.contains(time.hour())
            && self.dom.contains(time.day())
            && self.month.contains(time.month())
            && self.dow.contains(time.weekday().num_days_from_sunday())
    }

    /// Returns time of the next schedule's event strictly after the provided `after` value.
    ///
    /// The reference itself is never returned, even if it satisfies the
    /// schedule. Occurrences are whole minutes: the reference's seconds are
    /// truncated before the search starts.
    ///
    /// Returns `None` if there is no upcoming event's time, i.e. the field
    /// combination is unsatisfiable (like day 30 of February).
    pub fn upcoming(&self, after: &NaiveDateTime) -> Option<NaiveDateTime> {
        let mut current = step_minute(after.with_second(0)?.with_nanosecond(0)?)?;

        // Greedy advance, coarsest failing field first: every coarser field,
        // once satisfied, stays satisfied under all finer steps.
        for _ in 0..MAX_STEPS {
            if !self.month.contains(current.month()) {
                current = step_month(current)?;
            } else if !self.dom.contains(current.day())
                || !self.dow.contains(current.weekday().num_days_from_sunday())
            {
                current = step_day(current)?;
            } else if !self.hour.contains(current.hour()) {
                current = step_hour(current)?;
            } else if !self.minute.contains(current.minute()) {
                current = step_minute(current)?;
            } else {
                return Some(current);
            }
        }

        None
    }

    /// Same as [`upcoming`](Schedule::upcoming), with the current local time as the reference.
    pub fn upcoming_from_now(&self) -> Option<NaiveDateTime> {
        self.upcoming(&Local::now().naive_local())
    }

    /// Returns iterator of events strictly after `after`.
    ///
    /// The iterator is infinite for any satisfiable schedule and holds the
    /// last produced occurrence as its only state; to restart it, call this
    /// method again with a fresh reference.
    #[inline]
    pub fn iter(&self, after: &NaiveDateTime) -> impl Iterator<Item = NaiveDateTime> {
        ScheduleIterator {
            schedule: self.clone(),
            next: self.upcoming(after),
        }
    }

    /// Consumes [`Schedule`] and returns iterator of events strictly after `after`.
    #[inline]
    pub fn into_iter(self, after: &NaiveDateTime) -> impl Iterator<Item = NaiveDateTime> {
        let next = self.upcoming(after);
        ScheduleIterator { schedule: self, next }
    }
}

/// Contains iterator state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ScheduleIterator {
    schedule: Schedule,
    next: Option<NaiveDateTime>,
}

impl Iterator for ScheduleIterator {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = self.schedule.upcoming(&current);
        Some(current)
    }
}

impl From<Schedule> for String {
    fn from(value: Schedule) -> Self {
        value.to_string()
    }
}

impl From<&Schedule> for String {
    fn from(value: &Schedule) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Schedule {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&String> for Schedule {
    type Error = Error;

    fn try_from(value: &String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Schedule {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl FromStr for Schedule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.expression)
    }
}

/// Steps to midnight of the first day of the next month, wrapping the year
/// on December.
fn step_month(time: NaiveDateTime) -> Option<NaiveDateTime> {
    let (year, month) = if time.month() == 12 {
        (time.year() + 1, 1)
    } else {
        (time.year(), time.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)
}

/// Steps to midnight of the next day; month and year boundaries roll over
/// via calendar arithmetic.
fn step_day(time: NaiveDateTime) -> Option<NaiveDateTime> {
    time.date().succ_opt()?.and_hms_opt(0, 0, 0)
}

/// Steps to the beginning of the next hour.
fn step_hour(time: NaiveDateTime) -> Option<NaiveDateTime> {
    time.with_minute(0)?.checked_add_signed(TimeDelta::hours(1))
}

/// Steps to the next minute.
fn step_minute(time: NaiveDateTime) -> Option<NaiveDateTime> {
    time.checked_add_signed(TimeDelta::minutes(1))
}
