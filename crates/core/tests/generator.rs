use chrono::{Duration, NaiveDate, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use roster_core::vocab::{CATCH_PHRASES, FIRST_NAMES, JOB_TITLES, LAST_NAMES};
use roster_core::{
    email_for, start_date_epoch, CoreError, Employee, FixedClock, Generator, Snapshot,
    SystemClock, SALARY_RANGE,
};
use std::collections::HashSet;
use validator::ValidateEmail;

fn fixed_clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2024, 6, 1, 15, 30, 0).unwrap())
}

fn generate(seed: u64, count: i64) -> Vec<Employee> {
    Generator::seeded(seed, fixed_clock()).generate(count).unwrap()
}

#[test]
fn test_generates_requested_count() {
    for count in [0, 1, 17, 1_000] {
        assert_eq!(generate(1, count).len(), count as usize);
    }
}

#[test]
fn test_zero_count_is_empty() {
    assert!(generate(5, 0).is_empty());
}

#[test]
fn test_negative_count_is_invalid_argument() {
    let result = Generator::seeded(1, fixed_clock()).generate(-1);
    assert!(matches!(result, Err(CoreError::InvalidArgument(_))));
}

#[test]
fn test_email_derived_from_names() {
    for employee in generate(2, 500) {
        assert_eq!(
            employee.email,
            format!(
                "{}.{}@company.com",
                employee.first_name.to_lowercase(),
                employee.last_name.to_lowercase()
            )
        );
        assert_eq!(employee.email, email_for(&employee.first_name, &employee.last_name));
        assert!(employee.email.validate_email());
    }
}

#[test]
fn test_salary_within_bounds() {
    for employee in generate(3, 2_000) {
        assert!(SALARY_RANGE.contains(&employee.salary), "{}", employee.salary);
    }
}

#[test]
fn test_start_date_within_epoch_and_today() {
    let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    for employee in generate(4, 2_000) {
        assert!(employee.start_date >= start_date_epoch());
        assert!(employee.start_date <= today);

        let parsed = NaiveDate::parse_from_str(&employee.start_date_iso(), "%Y-%m-%d").unwrap();
        assert_eq!(parsed, employee.start_date);
    }
}

#[test]
fn test_start_dates_spread_across_range() {
    let years: HashSet<i32> = generate(8, 2_000)
        .iter()
        .map(|e| chrono::Datelike::year(&e.start_date))
        .collect();
    assert!(years.contains(&2015));
    assert!(years.contains(&2023));
}

#[test]
fn test_values_come_from_vocabularies() {
    for employee in generate(5, 500) {
        assert!(FIRST_NAMES.contains(&employee.first_name.as_str()));
        assert!(LAST_NAMES.contains(&employee.last_name.as_str()));
        assert!(JOB_TITLES.contains(&employee.job_title.as_str()));
        assert!(CATCH_PHRASES.contains(&employee.signature_catch_phrase.as_str()));
    }
}

#[test]
fn test_avatar_index_is_one_based() {
    let employees = generate(6, 50);
    for (i, employee) in employees.iter().enumerate() {
        assert_eq!(employee.avatar, format!("https://i.pravatar.cc/150?img={}", i + 1));
    }
}

#[test]
fn test_duplicates_are_allowed() {
    let employees = generate(9, 2_000);
    let emails: HashSet<&str> = employees.iter().map(|e| e.email.as_str()).collect();
    // only 900 distinct name pairs exist
    assert!(emails.len() < employees.len());
}

#[test]
fn test_injected_rng_is_reproducible() {
    let a = Generator::new(StdRng::seed_from_u64(99), fixed_clock())
        .generate(100)
        .unwrap();
    let b = Generator::new(StdRng::seed_from_u64(99), fixed_clock())
        .generate(100)
        .unwrap();
    let c = Generator::new(StdRng::seed_from_u64(100), fixed_clock())
        .generate(100)
        .unwrap();

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_system_clock_bounds() {
    let mut generator = Generator::new(StdRng::seed_from_u64(1), SystemClock);
    let snapshot = Snapshot::generate(&mut generator, 200).unwrap();
    let tomorrow = (snapshot.generated_at() + Duration::days(1)).date_naive();

    assert_eq!(snapshot.len(), 200);
    assert!(snapshot.iter().all(|e| e.start_date < tomorrow));
}
