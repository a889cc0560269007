use chrono::{Datelike, Duration, Months, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Controls what granularity the timeline displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeScale {
    Day,
    Week,
    /// Fixed 14-day period anchored to week boundaries.
    Sprint,
    Month,
    Quarter,
}

impl TimeScale {
    pub const ALL: [TimeScale; 5] = [
        TimeScale::Day,
        TimeScale::Week,
        TimeScale::Sprint,
        TimeScale::Month,
        TimeScale::Quarter,
    ];

    /// Default column width in pixels for this scale.
    pub fn column_width(self) -> f32 {
        match self {
            TimeScale::Day => 40.0,
            TimeScale::Week => 80.0,
            TimeScale::Sprint => 120.0,
            TimeScale::Month => 100.0,
            TimeScale::Quarter => 150.0,
        }
    }

    /// Header label for the period starting at `period_start`.
    pub fn label(self, period_start: NaiveDateTime) -> String {
        match self {
            TimeScale::Day => period_start.format("%b %-d").to_string(),
            TimeScale::Week => period_start.format("W%V").to_string(),
            TimeScale::Sprint => {
                let last_day = period_start + Duration::days(13);
                format!(
                    "{} - {}",
                    period_start.format("%b %-d"),
                    last_day.format("%b %-d")
                )
            }
            TimeScale::Month => period_start.format("%b %Y").to_string(),
            TimeScale::Quarter => {
                let quarter = period_start.month0() / 3 + 1;
                format!("Q{} {}", quarter, period_start.year())
            }
        }
    }
}

fn midnight(dt: NaiveDateTime) -> NaiveDateTime {
    dt.date().and_time(NaiveTime::MIN)
}

/// Monday 00:00 of the ISO week containing `dt`.
fn start_of_week(dt: NaiveDateTime) -> NaiveDateTime {
    let back = dt.date().weekday().num_days_from_monday() as i64;
    midnight(dt) - Duration::days(back)
}

/// Start of the 14-day sprint containing `dt`.
///
/// Sprints begin on the Monday of odd-numbered ISO weeks; for a date in an
/// even week the sprint started one week earlier. This anchoring is stable
/// across the calendar year but deliberately not month-aligned.
fn start_of_sprint(dt: NaiveDateTime) -> NaiveDateTime {
    let week_start = start_of_week(dt);
    if week_start.date().iso_week().week() % 2 == 1 {
        week_start
    } else {
        week_start - Duration::days(7)
    }
}

/// Truncate `dt` to the start of its containing period.
pub fn start_of_period(dt: NaiveDateTime, scale: TimeScale) -> NaiveDateTime {
    match scale {
        TimeScale::Day => midnight(dt),
        TimeScale::Week => start_of_week(dt),
        TimeScale::Sprint => start_of_sprint(dt),
        TimeScale::Month => first_of_month(dt, dt.month()),
        TimeScale::Quarter => {
            let quarter_month = (dt.month0() / 3) * 3 + 1;
            first_of_month(dt, quarter_month)
        }
    }
}

fn first_of_month(dt: NaiveDateTime, month: u32) -> NaiveDateTime {
    chrono::NaiveDate::from_ymd_opt(dt.year(), month, 1)
        .map(|d| d.and_time(NaiveTime::MIN))
        .unwrap_or(dt)
}

/// Last representable instant of the period containing `dt`: the start of the
/// next period minus one millisecond, so adjacent periods neither gap nor
/// overlap.
pub fn end_of_period(dt: NaiveDateTime, scale: TimeScale) -> NaiveDateTime {
    let next = add_periods(start_of_period(dt, scale), 1, scale);
    next - Duration::milliseconds(1)
}

/// Move `dt` by `count` periods (negative counts move backwards).
///
/// Day/week/sprint use exact day arithmetic; month/quarter use calendar-field
/// arithmetic, so day-of-month overflow clamps (Jan 31 + 1 month = Feb 28/29,
/// never Mar 3).
pub fn add_periods(dt: NaiveDateTime, count: i64, scale: TimeScale) -> NaiveDateTime {
    match scale {
        TimeScale::Day => dt + Duration::days(count),
        TimeScale::Week => dt + Duration::days(count * 7),
        TimeScale::Sprint => dt + Duration::days(count * 14),
        TimeScale::Month => add_months(dt, count),
        TimeScale::Quarter => add_months(dt, count * 3),
    }
}

fn add_months(dt: NaiveDateTime, count: i64) -> NaiveDateTime {
    let result = if count >= 0 {
        dt.checked_add_months(Months::new(count as u32))
    } else {
        dt.checked_sub_months(Months::new((-count) as u32))
    };
    result.unwrap_or(dt)
}

/// Number of whole periods between `from` and `to` (negative when `to` is
/// before `from`). Day-count division for day/week/sprint, calendar-field
/// subtraction for month/quarter; floor division in both cases so the answer
/// is consistent on either side of `from`.
pub fn periods_between(from: NaiveDateTime, to: NaiveDateTime, scale: TimeScale) -> i64 {
    let days = (to.date() - from.date()).num_days();
    match scale {
        TimeScale::Day => days,
        TimeScale::Week => days.div_euclid(7),
        TimeScale::Sprint => days.div_euclid(14),
        TimeScale::Month => months_between(from, to),
        TimeScale::Quarter => months_between(from, to).div_euclid(3),
    }
}

fn months_between(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    let from_index = from.year() as i64 * 12 + from.month0() as i64;
    let to_index = to.year() as i64 * 12 + to.month0() as i64;
    to_index - from_index
}
