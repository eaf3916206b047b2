use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::Window;

/// Percent of the window elapsed, in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progress(f64);

impl Progress {
    pub fn compute(now: DateTime<Utc>, window: &Window) -> Self {
        if now <= window.opens_at() {
            return Self(0.0);
        }
        if now >= window.closes_at() {
            return Self(100.0);
        }

        let total = nanos(window.length());
        let elapsed = nanos(now - window.opens_at());

        Self((elapsed / total * 100.0).clamp(0.0, 100.0))
    }

    pub fn percent(&self) -> f64 {
        self.0
    }

    pub fn rounded(&self) -> u8 {
        self.0.round() as u8
    }

    pub fn label(&self) -> String {
        format!("{}% of window elapsed", self.rounded())
    }
}

/// Nanoseconds as `f64`, falling back to milliseconds past the ~292 year
/// range of `num_nanoseconds`.
fn nanos(duration: Duration) -> f64 {
    match duration.num_nanoseconds() {
        Some(ns) => ns as f64,
        None => duration.num_milliseconds() as f64 * 1e6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn window() -> Window {
        Window::new(
            Utc.with_ymd_and_hms(2025, 9, 23, 16, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 9, 30, 16, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_two_days_into_week() {
        let now = Utc.with_ymd_and_hms(2025, 9, 25, 16, 0, 0).unwrap();
        let progress = Progress::compute(now, &window());
        assert!((progress.percent() - 200.0 / 7.0).abs() < 1e-9);
        assert_eq!(progress.rounded(), 29);
        assert_eq!(progress.label(), "29% of window elapsed");
    }

    #[test]
    fn test_bounds() {
        let w = window();
        assert_eq!(Progress::compute(w.opens_at(), &w).percent(), 0.0);
        assert_eq!(Progress::compute(w.closes_at(), &w).percent(), 100.0);
    }

    #[test]
    fn test_clamped_outside_window() {
        let w = window();
        let before = w.opens_at() - Duration::days(1);
        let after = w.closes_at() + Duration::days(1);
        assert_eq!(Progress::compute(before, &w).percent(), 0.0);
        assert_eq!(Progress::compute(after, &w).percent(), 100.0);
        assert_eq!(Progress::compute(after, &w).label(), "100% of window elapsed");
    }

    #[test]
    fn test_half_rounds_up() {
        let w = Window::new(
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 8).unwrap(),
        )
        .unwrap();
        let now = w.opens_at() + Duration::seconds(1);
        assert_eq!(Progress::compute(now, &w).percent(), 12.5);
        assert_eq!(Progress::compute(now, &w).rounded(), 13);
    }

    #[test]
    fn test_sub_millisecond_window() {
        let opens_at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let w = Window::new(opens_at, opens_at + Duration::microseconds(500)).unwrap();

        assert_eq!(Progress::compute(w.opens_at(), &w).percent(), 0.0);
        assert_eq!(Progress::compute(w.closes_at(), &w).percent(), 100.0);

        let halfway = Progress::compute(opens_at + Duration::microseconds(250), &w);
        assert!((halfway.percent() - 50.0).abs() < 1e-9);
        assert_eq!(halfway.label(), "50% of window elapsed");
    }

    #[test]
    fn test_centuries_long_window() {
        let opens_at = Utc.with_ymd_and_hms(1700, 1, 1, 0, 0, 0).unwrap();
        let closes_at = Utc.with_ymd_and_hms(2300, 1, 1, 0, 0, 0).unwrap();
        let w = Window::new(opens_at, closes_at).unwrap();

        let now = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        let progress = Progress::compute(now, &w);
        assert!(progress.percent().is_finite());
        assert_eq!(progress.rounded(), 50);
    }

    proptest! {
        #[test]
        fn prop_monotonic_within_window(a in 0i64..604_800_000i64, b in 0i64..604_800_000i64) {
            let w = window();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let p_lo = Progress::compute(w.opens_at() + Duration::milliseconds(lo), &w);
            let p_hi = Progress::compute(w.opens_at() + Duration::milliseconds(hi), &w);
            prop_assert!(p_lo <= p_hi);
            prop_assert!((0.0..=100.0).contains(&p_hi.percent()));
        }
    }
}
