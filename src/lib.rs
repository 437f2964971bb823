//! Crontab line parser and next-run time calculator.
#![deny(unsafe_code, warnings, missing_docs)]

//! This is a tiny crate, intended to:
//! - parse classic five-field crontab lines, command included;
//! - compute when each entry is due to run next.
//!
//! It has a single external runtime dependency - [chrono](https://crates.io/crates/chrono)
//! (plus [thiserror](https://crates.io/crates/thiserror) and [tracing](https://crates.io/crates/tracing)
//! for errors and diagnostics).
//!
//! _This is not a cron jobs scheduler or runner._ It never executes the
//! command string; it only answers "when does this line fire next?".
//!
//! ## Crontab line format
//!
//! A line consists of five whitespace-separated schedule fields followed by
//! the command, which occupies the whole remainder of the line and may contain
//! any characters, whitespace included:
//!
//! ```text
//! 30 6 * * 1-5 /usr/bin/backup --all
//! ```
//!
//! The table below describes valid values and patterns of each field:
//!
//! | Field        | Allowed values  | Allowed special characters |
//! |--------------|-----------------|----------------------------|
//! | Minutes      | 0-59            | * , - /                    |
//! | Hours        | 0-23            | * , - /                    |
//! | Day of Month | 1-31            | * , - /                    |
//! | Month        | 1-12 or JAN-DEC | * , - /                    |
//! | Day of Week  | 0-7 or SUN-SAT  | * , - /                    |
//!
//! Patterns meanings:
//! - `*` - each possible value, i.e. `0,1,2,...,59` for minutes;
//! - `,` - list of values or patterns, i.e. `1,7,12`, `SUN,FRI`;
//! - `-` - range of values, i.e. `0-15`, `JAN-MAR`;
//! - `/` - repeating values, i.e. `*/12`, `10-30/5`; the left side must be `*` or a range.
//!
//! Month and weekday names are case-insensitive three-letter abbreviations;
//! for days of week both `0` and `7` mean Sunday.
//!
//! Also, short aliases for well-known schedules are allowed in place of the
//! five fields:
//!
//! | Alias                      | Expression  |
//! |----------------------------|-------------|
//! | `@yearly` (or `@annually`) | `0 0 1 1 *` |
//! | `@monthly`                 | `0 0 1 * *` |
//! | `@weekly`                  | `0 0 * * 0` |
//! | `@daily`                   | `0 0 * * *` |
//! | `@hourly`                  | `0 * * * *` |
//!
//! All five fields are combined with logical AND, including day of month and
//! day of week: the traditional cron rule of OR-ing those two fields when both
//! are restricted is deliberately not implemented, so `0 0 13 * 5` fires on
//! Friday the 13th only.
//!
//! All calculations are done on naive local calendar values
//! ([`NaiveDateTime`](chrono::NaiveDateTime)), without any time zone
//! conversions, and occurrences have whole-minute precision.
//!
//! ## How to use
//!
//! [`Entry`] represents a single crontab line, [`Crontab`] a whole file worth
//! of lines; [`Schedule`] is the five-field part alone.
//!
//! ### Example with a single entry
//! ```rust
//! use chrono::NaiveDate;
//! use crontab_next::{Entry, Result};
//!
//! fn next_run() -> Result<()> {
//!     let entry = Entry::new("*/10 * * * * /usr/bin/backup --all")?;
//!     let now = NaiveDate::from_ymd_opt(2012, 10, 19).unwrap().and_hms_opt(8, 5, 0).unwrap();
//!
//!     // Get the next run time strictly after now
//!     let next = entry.upcoming(&now);
//!     assert_eq!(next, NaiveDate::from_ymd_opt(2012, 10, 19).unwrap().and_hms_opt(8, 10, 0));
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Example with a whole crontab
//! ```rust
//! use crontab_next::Crontab;
//!
//! // Comments, blank lines and environment assignments are skipped
//! let crontab = Crontab::parse(
//!     "# backups
//!     MAILTO=ops@example.com
//!     0 3 * * * /usr/bin/backup --all
//!     @hourly /usr/bin/health-check",
//! );
//!
//! assert_eq!(crontab.entries().len(), 2);
//! ```
//!
//! # Feature flags
//! * `serde`: adds [`Serialize`](https://docs.rs/serde/latest/serde/trait.Serialize.html) and [`Deserialize`](https://docs.rs/serde/latest/serde/trait.Deserialize.html) trait implementation for [`Schedule`] and [`Entry`].

/// Crontab entries and whole-file handling.
pub mod crontab;
/// Crate specific Error implementation.
pub mod error;
mod field;
/// Cron schedule parser and upcoming run time generator.
pub mod schedule;
mod utils;

// Re-export of public entities.
pub use crontab::{Crontab, Entry, UpcomingRun};
pub use error::Error;
pub use field::FieldKind;
pub use schedule::Schedule;

/// Convenient alias for `Result`.
pub type Result<T, E = Error> = std::result::Result<T, E>;
