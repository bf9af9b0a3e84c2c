//! Inclusive date ranges used to filter the fetched transactions.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use crate::{EngineError, ResultEngine};

/// Closed interval `[start, end]` in UTC.
///
/// Invariant: `start <= end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> ResultEngine<Self> {
        if start > end {
            return Err(EngineError::InvalidRange(format!(
                "start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// The whole of `day` in `tz`: `[00:00:00.000, 23:59:59.999]`.
    #[must_use]
    pub fn single_day(day: NaiveDate, tz: Tz) -> Self {
        Self {
            start: day_start(day, tz),
            end: day_end(day, tz),
        }
    }

    /// From the start of `first` to the end of `last`, both in `tz`.
    pub fn days(first: NaiveDate, last: NaiveDate, tz: Tz) -> ResultEngine<Self> {
        if first > last {
            return Err(EngineError::InvalidRange(format!(
                "{first} is after {last}"
            )));
        }
        Self::new(day_start(first, tz), day_end(last, tz))
    }

    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Both ends are inclusive.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Human label in `tz`, e.g. `2024-11-05` or `2024-11-05 → 2024-11-07`.
    #[must_use]
    pub fn label(&self, tz: Tz) -> String {
        let first = self.start.with_timezone(&tz).date_naive();
        let last = self.end.with_timezone(&tz).date_naive();
        if first == last {
            first.format("%Y-%m-%d").to_string()
        } else {
            format!("{} → {}", first.format("%Y-%m-%d"), last.format("%Y-%m-%d"))
        }
    }
}

fn end_of_day() -> NaiveTime {
    NaiveTime::MIN
        .overflowing_sub_signed(TimeDelta::milliseconds(1))
        .0
}

fn day_start(day: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let naive = day.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&naive)
        .earliest()
        // Midnight can fall into a DST gap; the day then starts an hour later.
        .or_else(|| {
            tz.from_local_datetime(&(naive + TimeDelta::hours(1)))
                .earliest()
        })
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| fallback_utc(naive))
}

fn day_end(day: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let naive = day.and_time(end_of_day());
    tz.from_local_datetime(&naive)
        .latest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| fallback_utc(naive))
}

fn fallback_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    tracing::debug!(%naive, "local time does not exist, reading it as UTC");
    naive.and_utc()
}
