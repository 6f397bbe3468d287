//! Source of "today" and "now".
//!
//! Rotation works at calendar-day granularity in the market's local time; the
//! application timeline works on wall-clock milliseconds.

use crate::domain::TimeMs;
use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use std::fmt;
use std::sync::Mutex;

pub trait Clock: Send + Sync + fmt::Debug {
    /// Current calendar day in the market's local time.
    fn today(&self) -> NaiveDate;

    /// Current wall-clock instant.
    fn now(&self) -> TimeMs;
}

/// Wall clock normalized to a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Build from an offset in minutes east of UTC. Out-of-range offsets fall back to UTC.
    pub fn from_offset_minutes(minutes: i32) -> Self {
        let offset = FixedOffset::east_opt(minutes.saturating_mul(60)).unwrap_or_else(|| Utc.fix());
        Self { offset }
    }

    fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        self.local_date(Utc::now())
    }

    fn now(&self) -> TimeMs {
        TimeMs::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    inner: Mutex<(NaiveDate, TimeMs)>,
}

impl ManualClock {
    pub fn new(today: NaiveDate, now: TimeMs) -> Self {
        Self {
            inner: Mutex::new((today, now)),
        }
    }

    pub fn set_today(&self, today: NaiveDate) {
        if let Ok(mut guard) = self.inner.lock() {
            guard.0 = today;
        }
    }

    pub fn set_now(&self, now: TimeMs) {
        if let Ok(mut guard) = self.inner.lock() {
            guard.1 = now;
        }
    }

    pub fn advance_ms(&self, delta_ms: i64) {
        if let Ok(mut guard) = self.inner.lock() {
            guard.1 = guard.1.plus_ms(delta_ms);
        }
    }
}

impl Clock for ManualClock {
    fn today(&self) -> NaiveDate {
        match self.inner.lock() {
            Ok(guard) => guard.0,
            Err(poisoned) => poisoned.into_inner().0,
        }
    }

    fn now(&self) -> TimeMs {
        match self.inner.lock() {
            Ok(guard) => guard.1,
            Err(poisoned) => poisoned.into_inner().1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_offset_moves_the_calendar_day() {
        let ist = SystemClock::from_offset_minutes(330);
        let utc = SystemClock::from_offset_minutes(0);
        let instant = Utc.with_ymd_and_hms(2024, 6, 4, 20, 0, 0).unwrap();
        assert_eq!(
            ist.local_date(instant),
            NaiveDate::from_ymd_opt(2024, 6, 5).unwrap()
        );
        assert_eq!(
            utc.local_date(instant),
            NaiveDate::from_ymd_opt(2024, 6, 4).unwrap()
        );
    }

    #[test]
    fn test_out_of_range_offset_falls_back_to_utc() {
        let clock = SystemClock::from_offset_minutes(100_000);
        let instant = Utc.with_ymd_and_hms(2024, 6, 4, 23, 59, 0).unwrap();
        assert_eq!(
            clock.local_date(instant),
            NaiveDate::from_ymd_opt(2024, 6, 4).unwrap()
        );
    }

    #[test]
    fn test_manual_clock_moves_on_demand() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let clock = ManualClock::new(day, TimeMs::new(1_000));
        clock.advance_ms(500);
        assert_eq!(clock.now(), TimeMs::new(1_500));
        let next = day.succ_opt().unwrap();
        clock.set_today(next);
        assert_eq!(clock.today(), next);
    }
}
