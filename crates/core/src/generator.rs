//! Synthetic employee generation.
//!
//! The generator owns its random source and clock so callers can pin both
//! (`StdRng::seed_from_u64`, [`FixedClock`](crate::FixedClock)) and get a
//! reproducible dataset.

use crate::clock::{Clock, SystemClock};
use crate::employee::{avatar_url, email_for, Employee};
use crate::error::{CoreError, CoreResult};
use crate::vocab::{CATCH_PHRASES, FIRST_NAMES, JOB_TITLES, LAST_NAMES};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use tracing::debug;

/// Number of records generated when no count is configured.
pub const DEFAULT_COUNT: i64 = 10_000;

/// Inclusive salary bounds.
pub const SALARY_RANGE: RangeInclusive<u32> = 30_000..=150_000;

/// Earliest possible start date.
#[must_use]
pub fn start_date_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2015, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Parse a textual record count.
///
/// Rejects anything that is not a non-negative integer, including fractional
/// values such as `"2.5"`.
pub fn parse_count(text: &str) -> CoreResult<i64> {
    let trimmed = text.trim();
    let count: i64 = trimmed.parse().map_err(|_| {
        CoreError::invalid_argument(format!("employee count must be an integer, got '{trimmed}'"))
    })?;
    if count < 0 {
        return Err(CoreError::invalid_argument(format!(
            "employee count must be non-negative, got {count}"
        )));
    }
    Ok(count)
}

/// Produces employee records from the fixed vocabularies.
#[derive(Debug, Clone)]
pub struct Generator<R, C> {
    rng: R,
    clock: C,
}

impl Generator<StdRng, SystemClock> {
    /// Generator seeded from OS entropy, reading the system clock.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy(), SystemClock)
    }
}

impl<C: Clock> Generator<StdRng, C> {
    /// Generator with a seeded random source.
    #[must_use]
    pub fn seeded(seed: u64, clock: C) -> Self {
        Self::new(StdRng::seed_from_u64(seed), clock)
    }
}

impl<R: Rng, C: Clock> Generator<R, C> {
    #[must_use]
    pub fn new(rng: R, clock: C) -> Self {
        Self { rng, clock }
    }

    /// The clock used for start-date bounds.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Generate `count` employees in order.
    ///
    /// A negative count is rejected before any record is produced.
    pub fn generate(&mut self, count: i64) -> CoreResult<Vec<Employee>> {
        let count = usize::try_from(count).map_err(|_| {
            CoreError::invalid_argument(format!("employee count must be non-negative, got {count}"))
        })?;

        let now = self.clock.now();
        let employees: Vec<Employee> = (0..count).map(|i| self.employee(i, now)).collect();

        debug!(count, now = %now, "generated employee records");
        Ok(employees)
    }

    fn employee(&mut self, index: usize, now: DateTime<Utc>) -> Employee {
        let first_name = pick(&mut self.rng, FIRST_NAMES);
        let last_name = pick(&mut self.rng, LAST_NAMES);

        Employee {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email_for(first_name, last_name),
            job_title: pick(&mut self.rng, JOB_TITLES).to_string(),
            salary: self.rng.gen_range(SALARY_RANGE),
            start_date: self.start_date(now),
            signature_catch_phrase: pick(&mut self.rng, CATCH_PHRASES).to_string(),
            avatar: avatar_url(index + 1),
        }
    }

    /// Uniform instant in `[epoch, now]`, truncated to its calendar day.
    fn start_date(&mut self, now: DateTime<Utc>) -> NaiveDate {
        let epoch = start_date_epoch().and_time(chrono::NaiveTime::MIN).and_utc();
        // A clock set before the epoch collapses the range onto the epoch.
        let span = (now - epoch).num_milliseconds().max(0);
        let offset = self.rng.gen_range(0..=span);
        (epoch + Duration::milliseconds(offset)).date_naive()
    }
}

fn pick<R: Rng>(rng: &mut R, items: &[&'static str]) -> &'static str {
    items[rng.gen_range(0..items.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    fn clock() -> FixedClock {
        FixedClock::at_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("10000"), Ok(10_000));
        assert_eq!(parse_count(" 0 "), Ok(0));
        assert!(matches!(parse_count("-1"), Err(CoreError::InvalidArgument(_))));
        assert!(matches!(parse_count("2.5"), Err(CoreError::InvalidArgument(_))));
        assert!(matches!(parse_count("ten"), Err(CoreError::InvalidArgument(_))));
    }

    #[test]
    fn test_same_seed_same_records() {
        let a = Generator::seeded(7, clock()).generate(25).unwrap();
        let b = Generator::seeded(7, clock()).generate(25).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_clock_before_epoch_pins_start_date() {
        let early = FixedClock::at_date(NaiveDate::from_ymd_opt(2010, 3, 3).unwrap());
        let employees = Generator::seeded(1, early).generate(10).unwrap();
        assert!(employees.iter().all(|e| e.start_date == start_date_epoch()));
    }

    #[test]
    fn test_avatar_follows_generation_order() {
        let employees = Generator::seeded(3, clock()).generate(3).unwrap();
        let avatars: Vec<&str> = employees.iter().map(|e| e.avatar.as_str()).collect();
        assert_eq!(
            avatars,
            vec![
                "https://i.pravatar.cc/150?img=1",
                "https://i.pravatar.cc/150?img=2",
                "https://i.pravatar.cc/150?img=3",
            ]
        );
    }
}
