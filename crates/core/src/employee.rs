use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Domain every generated email address lives under.
pub const EMAIL_DOMAIN: &str = "company.com";

/// A single synthetic employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub job_title: String,
    pub salary: u32,
    pub start_date: NaiveDate,
    pub signature_catch_phrase: String,
    pub avatar: String,
}

impl Employee {
    /// First and last name joined by a single space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Start date in `YYYY-MM-DD` form.
    #[must_use]
    pub fn start_date_iso(&self) -> String {
        self.start_date.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.full_name(), self.email)
    }
}

/// Derive the company email address for a name pair.
#[must_use]
pub fn email_for(first_name: &str, last_name: &str) -> String {
    format!(
        "{}.{}@{EMAIL_DOMAIN}",
        first_name.to_lowercase(),
        last_name.to_lowercase()
    )
}

/// Avatar URL for the record at `position` (1-based).
#[must_use]
pub fn avatar_url(position: usize) -> String {
    format!("https://i.pravatar.cc/150?img={position}")
}

#[cfg(test)]
pub(crate) fn sample(first: &str, last: &str, salary: u32, start: &str) -> Employee {
    Employee {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email_for(first, last),
        job_title: "Data Analyst".to_string(),
        salary,
        start_date: NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap(),
        signature_catch_phrase: "Deep dive".to_string(),
        avatar: avatar_url(1),
    }
}
