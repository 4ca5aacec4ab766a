use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

// Futures venues run a night session (21:00-02:30) on top of the day
// sessions, roughly 9.5 trading hours per day; cash markets cover about 4.5.
const MAX_HOURS_EXTENDED: f64 = 9.5;
const MAX_HOURS_STANDARD: f64 = 4.5;

// Lower-bound hours used only for the backward offset estimate; applied
// regardless of session profile.
const MIN_HOURS_PER_DAY: f64 = 4.0;

/// Calendar window a caller wants bars for. `end` is clamped to "now" during
/// estimation; future bars cannot exist.
#[derive(Clone, Debug)]
pub struct TimeRange<Tz: TimeZone> {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl<Tz: TimeZone> TimeRange<Tz> {
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Self {
        Self { start, end }
    }
}

/// Time-bucket size of one bar record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    #[serde(rename = "1m")]
    Minute,
    #[serde(rename = "5m")]
    Minute5,
    #[serde(rename = "15m")]
    Minute15,
    #[serde(rename = "30m")]
    Minute30,
    #[serde(rename = "1h")]
    Hour,
    #[serde(rename = "d")]
    Daily,
    #[serde(rename = "w")]
    Weekly,
}

impl Granularity {
    /// Resolve a config-file spelling such as `"5m"` or `"d"`.
    pub fn parse(label: &str) -> Result<Self> {
        match label {
            "1m" => Ok(Granularity::Minute),
            "5m" => Ok(Granularity::Minute5),
            "15m" => Ok(Granularity::Minute15),
            "30m" => Ok(Granularity::Minute30),
            "1h" => Ok(Granularity::Hour),
            "d" => Ok(Granularity::Daily),
            "w" => Ok(Granularity::Weekly),
            other => Err(AppError::InvalidGranularity(other.to_string())),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Granularity::Minute => "1m",
            Granularity::Minute5 => "5m",
            Granularity::Minute15 => "15m",
            Granularity::Minute30 => "30m",
            Granularity::Hour => "1h",
            Granularity::Daily => "d",
            Granularity::Weekly => "w",
        }
    }

    /// Records per trading hour; weekly buckets span multiple days so the
    /// value drops below one.
    fn units_per_hour(self) -> f64 {
        match self {
            Granularity::Minute => 60.0,
            Granularity::Minute5 => 12.0,
            Granularity::Minute15 => 4.0,
            Granularity::Minute30 => 2.0,
            Granularity::Hour => 1.0,
            Granularity::Daily => 1.0,
            Granularity::Weekly => 0.2,
        }
    }

    /// Daily and weekly bars are one record per trading day regardless of how
    /// many session hours the venue runs.
    fn intraday(self) -> bool {
        !matches!(self, Granularity::Daily | Granularity::Weekly)
    }

    fn max_hours_per_day(self, profile: SessionProfile) -> f64 {
        if self.intraday() {
            profile.max_hours_per_day()
        } else {
            1.0
        }
    }

    fn min_hours_per_day(self) -> f64 {
        if self.intraday() {
            MIN_HOURS_PER_DAY
        } else {
            1.0
        }
    }
}

/// Trading-hours pattern of an asset class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionProfile {
    /// Near-24h venues with night sessions (futures).
    Extended,
    /// Regular cash-market hours.
    Standard,
}

impl SessionProfile {
    pub fn parse(label: &str) -> Result<Self> {
        match label {
            "extended" => Ok(SessionProfile::Extended),
            "standard" => Ok(SessionProfile::Standard),
            other => Err(AppError::InvalidProfile(other.to_string())),
        }
    }

    fn max_hours_per_day(self) -> f64 {
        match self {
            SessionProfile::Extended => MAX_HOURS_EXTENDED,
            SessionProfile::Standard => MAX_HOURS_STANDARD,
        }
    }
}

/// Source-native request window: skip `offset` most-recent records, then take
/// `count`. Both are heuristics; the source indexes backward from "now" and no
/// trading calendar is consulted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestWindow {
    pub offset: u64,
    pub count: u64,
}

/// Estimate how many records cover `range` at `granularity`, and how many
/// most-recent records to skip so the window ends at `range.end`.
pub fn estimate<Tz: TimeZone>(
    range: &TimeRange<Tz>,
    granularity: Granularity,
    profile: SessionProfile,
) -> RequestWindow {
    let now = Utc::now().with_timezone(&range.end.timezone());
    estimate_at(range, &now, granularity, profile)
}

/// Deterministic form of [`estimate`] with the evaluation instant pinned.
pub fn estimate_at<Tz: TimeZone>(
    range: &TimeRange<Tz>,
    now: &DateTime<Tz>,
    granularity: Granularity,
    profile: SessionProfile,
) -> RequestWindow {
    let end = if range.end > *now {
        now.clone()
    } else {
        range.end.clone()
    };

    let stale_days = now.clone().signed_duration_since(&end).num_days().max(0);
    let span_days = end.signed_duration_since(&range.start).num_days().max(0);

    let units = granularity.units_per_hour();
    let count = trading_day_equivalent(span_days) * granularity.max_hours_per_day(profile) * units;
    let offset = trading_day_equivalent(stale_days) * granularity.min_hours_per_day() * units;

    RequestWindow {
        offset: offset as u64,
        count: count as u64,
    }
}

/// Scale a calendar-day count toward actual trading days: spans under a week
/// pass through, longer spans are scaled by 5/7. No holiday awareness.
fn trading_day_equivalent(days: i64) -> f64 {
    if days < 7 {
        days as f64
    } else {
        days as f64 * 5.0 / 7.0
    }
}
