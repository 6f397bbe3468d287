//! Fresh date windows for seeded, recycled and synthetic offerings.

use crate::domain::ipo::SUBSCRIPTION_DAYS;
use crate::domain::IpoWindow;
use chrono::{Days, NaiveDate};
use rand::Rng;

/// Largest random day offset drawn for an upcoming open date (before the +1 that keeps it in the future).
pub const MAX_UPCOMING_OFFSET_DAYS: u64 = 6;

/// Window whose subscription period contains `today`.
///
/// The open date is back-dated by 0..=3 days so `open <= today <= close` holds.
pub fn open_window<R: Rng + ?Sized>(today: NaiveDate, rng: &mut R) -> IpoWindow {
    let back = rng.gen_range(0..=SUBSCRIPTION_DAYS);
    IpoWindow::starting(today - Days::new(back))
}

/// Window that opens strictly after `today`, between 1 and 7 days out.
pub fn upcoming_window<R: Rng + ?Sized>(today: NaiveDate, rng: &mut R) -> IpoWindow {
    let ahead = 1 + rng.gen_range(0..=MAX_UPCOMING_OFFSET_DAYS);
    IpoWindow::starting(today + Days::new(ahead))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IpoStatus;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_open_window_contains_today() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let window = open_window(today, &mut rng);
            assert_eq!(window.status_on(today), IpoStatus::Open);
        }
    }

    #[test]
    fn test_upcoming_window_is_in_the_future() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let window = upcoming_window(today, &mut rng);
            assert_eq!(window.status_on(today), IpoStatus::Upcoming);
            assert!(window.open_date <= today + Days::new(7));
        }
    }
}
