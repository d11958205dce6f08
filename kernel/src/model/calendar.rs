use crate::model::schedule::Schedule;
use chrono::{Datelike, Days, NaiveDate, NaiveTime, Weekday};
use shared::error::{AppError, AppResult};

use crate::model::id::ScheduleId;

/// One bookable occurrence of a schedule on a concrete calendar date.
#[derive(Debug, Clone)]
pub struct Slot {
    pub schedule_id: ScheduleId,
    pub date: NaiveDate,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
    pub max_capacity: i32,
    pub lane_count: i32,
}

/// A calendar month, parsed from the `YYYY-MM` form used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthYear {
    year: i32,
    month: u32,
}

impl MonthYear {
    pub fn new(year: i32, month: u32) -> AppResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(AppError::InvalidMonth(format!(
                "{year}-{month} is not a calendar month"
            )));
        }
        Ok(Self { year, month })
    }

    pub fn parse(s: &str) -> AppResult<Self> {
        let bad = || AppError::InvalidMonth(format!("expected YYYY-MM, got {s:?}"));
        let (year, month) = s.split_once('-').ok_or_else(bad)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(bad());
        }
        let year: i32 = year.parse().map_err(|_| bad())?;
        let month: u32 = month.parse().map_err(|_| bad())?;
        Self::new(year, month)
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn first_day(self) -> NaiveDate {
        // month is validated on construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("validated month")
    }

    pub fn last_day(self) -> NaiveDate {
        self.next()
            .first_day()
            .pred_opt()
            .expect("month start has a predecessor")
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        Self::of(date) == self
    }

    /// Signed distance in months, positive when `self` is later.
    pub fn months_from(self, other: Self) -> i32 {
        (self.year - other.year) * 12 + self.month as i32 - other.month as i32
    }

    pub fn ensure_in_range(self, today: NaiveDate, month_range: u32) -> AppResult<()> {
        if self.months_from(Self::of(today)).unsigned_abs() > month_range {
            return Err(AppError::InvalidMonth(format!(
                "{self} is outside the supported range"
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for MonthYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl std::str::FromStr for MonthYear {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Maps a schedule onto a concrete date, rejecting inactive schedules and
/// dates that fall on the wrong weekday.
pub fn resolve_slot_for_date(schedule: &Schedule, date: NaiveDate) -> AppResult<Slot> {
    if !schedule.is_active {
        return Err(AppError::InvalidScheduleState(format!(
            "schedule {} is inactive",
            schedule.id
        )));
    }
    if date.weekday() != schedule.weekday {
        return Err(AppError::InvalidScheduleState(format!(
            "{date} does not fall on {}",
            schedule.weekday
        )));
    }
    Ok(Slot {
        schedule_id: schedule.id,
        date,
        starts_at: schedule.starts_at,
        ends_at: schedule.ends_at,
        max_capacity: schedule.max_capacity,
        lane_count: schedule.lane_count,
    })
}

/// Lazy, restartable enumeration of the dates in `month` that fall on the
/// schedule's weekday. Clone the iterator to restart it.
pub fn dates_in_month(schedule: &Schedule, month: MonthYear) -> MonthDates {
    let first = month.first_day();
    let offset = (schedule.weekday.num_days_from_sunday() as i64
        - first.weekday().num_days_from_sunday() as i64)
        .rem_euclid(7) as u64;
    let last = month.last_day();
    let start = first.checked_add_days(Days::new(offset)).filter(|d| *d <= last);
    MonthDates { next: start, last }
}

#[derive(Debug, Clone)]
pub struct MonthDates {
    next: Option<NaiveDate>,
    last: NaiveDate,
}

impl Iterator for MonthDates {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        self.next = current
            .checked_add_days(Days::new(7))
            .filter(|d| *d <= self.last);
        Some(current)
    }
}

/// Whether reservations targeting `target` may be created on `today`.
/// The current month is always open; the next month opens during the final
/// `window_open_days` days of the current one; anything further is closed.
pub fn booking_window_open(target: MonthYear, today: NaiveDate, window_open_days: u32) -> bool {
    let current = MonthYear::of(today);
    if target == current {
        return true;
    }
    if target == current.next() {
        let remaining = (current.last_day() - today).num_days();
        return remaining < i64::from(window_open_days);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn monday_schedule(active: bool) -> Schedule {
        Schedule {
            id: ScheduleId::new(),
            weekday: Weekday::Mon,
            starts_at: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            ends_at: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            max_capacity: 3,
            lane_count: 2,
            is_active: active,
        }
    }

    #[rstest]
    #[case("2026-02", 2026, 2)]
    #[case("1999-12", 1999, 12)]
    fn parses_well_formed_months(#[case] input: &str, #[case] year: i32, #[case] month: u32) {
        let parsed = MonthYear::parse(input).unwrap();
        assert_eq!(parsed, MonthYear::new(year, month).unwrap());
        assert_eq!(parsed.to_string(), input);
    }

    #[rstest]
    #[case("2026-13")]
    #[case("2026-00")]
    #[case("202602")]
    #[case("2026-2")]
    #[case("feb-2026")]
    fn rejects_malformed_months(#[case] input: &str) {
        assert!(matches!(
            MonthYear::parse(input),
            Err(AppError::InvalidMonth(_))
        ));
    }

    #[test]
    fn month_range_is_enforced() {
        let today = day(2026, 2, 15);
        MonthYear::parse("2026-04").unwrap().ensure_in_range(today, 2).unwrap();
        MonthYear::parse("2025-12").unwrap().ensure_in_range(today, 2).unwrap();
        assert!(matches!(
            MonthYear::parse("2026-05").unwrap().ensure_in_range(today, 2),
            Err(AppError::InvalidMonth(_))
        ));
        assert!(matches!(
            MonthYear::parse("2025-11").unwrap().ensure_in_range(today, 2),
            Err(AppError::InvalidMonth(_))
        ));
    }

    #[test]
    fn enumerates_mondays_of_february_2026() {
        let schedule = monday_schedule(true);
        let month = MonthYear::new(2026, 2).unwrap();
        let dates: Vec<_> = dates_in_month(&schedule, month).collect();
        assert_eq!(
            dates,
            vec![day(2026, 2, 2), day(2026, 2, 9), day(2026, 2, 16), day(2026, 2, 23)]
        );
    }

    #[test]
    fn enumeration_is_restartable() {
        let schedule = monday_schedule(true);
        let iter = dates_in_month(&schedule, MonthYear::new(2026, 2).unwrap());
        let first: Vec<_> = iter.clone().collect();
        let second: Vec<_> = iter.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn resolve_rejects_inactive_schedule() {
        let schedule = monday_schedule(false);
        let err = resolve_slot_for_date(&schedule, day(2026, 2, 2)).unwrap_err();
        assert!(matches!(err, AppError::InvalidScheduleState(_)));
    }

    #[test]
    fn resolve_rejects_weekday_mismatch() {
        let schedule = monday_schedule(true);
        // 2026-02-03 is a Tuesday.
        let err = resolve_slot_for_date(&schedule, day(2026, 2, 3)).unwrap_err();
        assert!(matches!(err, AppError::InvalidScheduleState(_)));

        let slot = resolve_slot_for_date(&schedule, day(2026, 2, 2)).unwrap();
        assert_eq!(slot.max_capacity, 3);
    }

    #[rstest]
    // Current month is always open.
    #[case(day(2026, 3, 1), 2026, 3, true)]
    // 21 days left in March: next month still closed.
    #[case(day(2026, 3, 10), 2026, 4, false)]
    // Exactly 7 days left (Mar 24): still closed with a 7-day window.
    #[case(day(2026, 3, 24), 2026, 4, false)]
    // 6 days left: open.
    #[case(day(2026, 3, 25), 2026, 4, true)]
    // Last day of the month: open.
    #[case(day(2026, 3, 31), 2026, 4, true)]
    // Two months out is never bookable.
    #[case(day(2026, 3, 31), 2026, 5, false)]
    fn booking_window_boundaries(
        #[case] today: NaiveDate,
        #[case] target_year: i32,
        #[case] target_month: u32,
        #[case] open: bool,
    ) {
        let target = MonthYear::new(target_year, target_month).unwrap();
        assert_eq!(booking_window_open(target, today, 7), open);
    }
}
