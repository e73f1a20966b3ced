//! Dashboard clock: the "<site> on <date>" caption and the timer that
//! re-renders it.
//!
//! The timer reschedules itself only after a render has finished, so two
//! renders never overlap.

use chrono::{DateTime, TimeDelta, Utc};
use std::time::Duration;
use tokio::time::sleep;

pub const CLOCK_REFRESH: Duration = Duration::from_millis(1000);

/// Published readings trail real time by this many days.
pub const DEFAULT_LAG_DAYS: u32 = 120;

pub fn clock_label(site_name: &str, now: DateTime<Utc>, lag_days: u32) -> String {
    let shown = now
        .checked_sub_signed(TimeDelta::days(i64::from(lag_days)))
        .unwrap_or(now);
    format!(
        "{site_name} on {}",
        shown.format("%a, %d %b %Y %H:%M:%S GMT")
    )
}

#[derive(Debug)]
pub struct Clock {
    lag_days: u32,
    period: Duration,
    remaining: Option<u64>,
}

impl Clock {
    /// `renders` bounds the number of renders; `None` keeps ticking for the
    /// lifetime of the process.
    pub const fn new(lag_days: u32, renders: Option<u64>) -> Self {
        Self {
            lag_days,
            period: CLOCK_REFRESH,
            remaining: renders,
        }
    }

    #[must_use]
    pub const fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub fn label(&self, site_name: &str, now: DateTime<Utc>) -> String {
        clock_label(site_name, now, self.lag_days)
    }

    /// Called once a render is done. Waits one period and returns `true` when
    /// another render is due, or returns `false` at once when the budget is
    /// spent.
    pub async fn reschedule(&mut self) -> bool {
        if let Some(left) = self.remaining.as_mut() {
            *left = left.saturating_sub(1);
            if *left == 0 {
                return false;
            }
        }
        sleep(self.period).await;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn label_lags_behind_now() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 5, 3).unwrap();
        assert_eq!(
            clock_label("Deenish Island", now, 120),
            "Deenish Island on Sat, 20 Jun 2026 09:05:03 GMT"
        );
        assert_eq!(
            clock_label("Galway Bay", now, 0),
            "Galway Bay on Sun, 18 Oct 2026 09:05:03 GMT"
        );
    }

    #[tokio::test]
    async fn bounded_clock_stops_after_budget() {
        let mut clock = Clock::new(0, Some(3)).with_period(Duration::from_millis(1));
        let mut renders = 1;
        while clock.reschedule().await {
            renders += 1;
        }
        assert_eq!(renders, 3);
    }

    #[tokio::test]
    async fn zero_budget_still_allows_first_render() {
        let mut clock = Clock::new(0, Some(0)).with_period(Duration::from_millis(1));
        assert!(!clock.reschedule().await);
    }
}
