//! Time source abstraction
//!
//! Loan dates and fines depend on "today". Services take the time source as
//! an explicit dependency so date-dependent logic stays deterministic in
//! tests.

use chrono::{DateTime, NaiveDate, Utc};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock time source used in production
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
pub(crate) struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn today_is_derived_from_now() {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 3, 15, 23, 59, 59).unwrap());
        assert_eq!(
            clock.today(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
    }
}
