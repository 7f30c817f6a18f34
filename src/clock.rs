//! Clinic-local time handling
//!
//! The clinic operates on Korea Standard Time (fixed UTC+9, no daylight
//! saving). All stored instants are UTC; all user-facing dates are KST civil
//! dates. `ClinicClock` converts between the two without ever consulting the
//! host machine's timezone, so the same input always resolves to the same
//! instant on any machine.

use std::str::FromStr;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::error::{ChairsideError, ChairsideResult};

/// The clinic's fixed offset from UTC, in seconds (KST, UTC+9)
pub const CLINIC_OFFSET_SECS: i32 = 9 * 3600;

/// Converts clinic-local civil dates to anchored UTC instants and back
///
/// The offset is fixed at construction; the clock is pure date arithmetic
/// with no ambient state.
#[derive(Debug, Clone, Copy)]
pub struct ClinicClock {
    offset_secs: i32,
}

impl Default for ClinicClock {
    fn default() -> Self {
        Self::kst()
    }
}

impl ClinicClock {
    /// The production clock: KST, UTC+9
    pub fn kst() -> Self {
        Self {
            offset_secs: CLINIC_OFFSET_SECS,
        }
    }

    /// A clock with an arbitrary fixed offset (used by tests)
    pub fn with_offset_secs(offset_secs: i32) -> Self {
        Self { offset_secs }
    }

    /// Anchor a clinic-local wall-clock time to UTC by subtracting the offset
    fn anchor(&self, local: NaiveDateTime) -> DateTime<Utc> {
        DateTime::<Utc>::from_naive_utc_and_offset(local, Utc)
            - Duration::seconds(i64::from(self.offset_secs))
    }

    /// UTC instant of clinic-local midnight on `day`
    pub fn day_start(&self, day: NaiveDate) -> DateTime<Utc> {
        self.anchor(day.and_time(NaiveTime::MIN))
    }

    /// UTC instant of clinic-local 23:59:59.999 on `day`
    pub fn day_end(&self, day: NaiveDate) -> DateTime<Utc> {
        let end = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
            .expect("23:59:59.999 is a valid wall-clock time");
        self.anchor(day.and_time(end))
    }

    /// Inclusive UTC window covering the whole clinic month containing
    /// `first_day` (which must be the first of the month)
    ///
    /// The last calendar day is the day before the first of the next month.
    pub fn month_window(&self, first_day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        let last_day = next_month_first(first_day)
            .pred_opt()
            .expect("the day before the first of a month always exists");
        (self.day_start(first_day), self.day_end(last_day))
    }

    /// The clinic civil date an instant falls on
    pub fn civil_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        let offset = FixedOffset::east_opt(self.offset_secs)
            .expect("clinic offset is within +/-24h");
        instant.with_timezone(&offset).date_naive()
    }

    /// Inclusive UTC window of the clinic civil day containing `instant`
    pub fn day_window(&self, instant: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        let day = self.civil_date(instant);
        (self.day_start(day), self.day_end(day))
    }
}

fn next_month_first(first_day: NaiveDate) -> NaiveDate {
    use chrono::Datelike;
    let (year, month) = (first_day.year(), first_day.month());
    let (ny, nm) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(ny, nm, 1).expect("the first of a month always exists")
}

/// A user-supplied date at day or month granularity
///
/// Accepts `YYYY-MM-DD` and `YYYY-MM`. Month inputs carry the first calendar
/// day; the range end is resolved through [`ClinicClock::month_window`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateInput {
    Day(NaiveDate),
    /// First calendar day of the month
    Month(NaiveDate),
}

impl DateInput {
    /// UTC instant where this input's range begins
    pub fn range_start(&self, clock: &ClinicClock) -> DateTime<Utc> {
        match self {
            Self::Day(day) => clock.day_start(*day),
            Self::Month(first) => clock.month_window(*first).0,
        }
    }

    /// UTC instant where this input's range ends (inclusive)
    pub fn range_end(&self, clock: &ClinicClock) -> DateTime<Utc> {
        match self {
            Self::Day(day) => clock.day_end(*day),
            Self::Month(first) => clock.month_window(*first).1,
        }
    }
}

impl FromStr for DateInput {
    type Err = ChairsideError;

    fn from_str(s: &str) -> ChairsideResult<Self> {
        let s = s.trim();
        if let Ok(day) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self::Day(day));
        }
        if let Some((year, month)) = s.split_once('-') {
            if let (Ok(year), Ok(month)) = (year.parse::<i32>(), month.parse::<u32>()) {
                if let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) {
                    return Ok(Self::Month(first));
                }
            }
        }
        Err(ChairsideError::Validation(format!(
            "Invalid date: '{}'. Use YYYY-MM-DD or YYYY-MM",
            s
        )))
    }
}
