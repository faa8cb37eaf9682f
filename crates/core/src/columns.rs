//! Declarative column descriptors.
//!
//! A column says where its value comes from ([`Extraction`]), how it is
//! filtered and sorted, and how it should be displayed. Descriptor sets are
//! plain data: they can be validated and serialized without a renderer.

use crate::employee::Employee;
use crate::error::{CoreError, CoreResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

/// A stored employee field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    FirstName,
    LastName,
    Email,
    JobTitle,
    Salary,
    StartDate,
    SignatureCatchPhrase,
    Avatar,
}

impl FieldKey {
    /// Read the field from a record.
    #[must_use]
    pub fn value(self, employee: &Employee) -> ColumnValue {
        match self {
            FieldKey::FirstName => ColumnValue::Text(employee.first_name.clone()),
            FieldKey::LastName => ColumnValue::Text(employee.last_name.clone()),
            FieldKey::Email => ColumnValue::Text(employee.email.clone()),
            FieldKey::JobTitle => ColumnValue::Text(employee.job_title.clone()),
            FieldKey::Salary => ColumnValue::Integer(i64::from(employee.salary)),
            FieldKey::StartDate => ColumnValue::Date(employee.start_date),
            FieldKey::SignatureCatchPhrase => {
                ColumnValue::Text(employee.signature_catch_phrase.clone())
            }
            FieldKey::Avatar => ColumnValue::Text(employee.avatar.clone()),
        }
    }

    fn value_type(self) -> ValueType {
        match self {
            FieldKey::Salary => ValueType::Integer,
            FieldKey::StartDate => ValueType::Date,
            _ => ValueType::Text,
        }
    }
}

/// A value computed from several fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Computation {
    /// `firstName + " " + lastName`
    FullName,
}

impl Computation {
    #[must_use]
    pub fn apply(self, employee: &Employee) -> ColumnValue {
        match self {
            Computation::FullName => ColumnValue::Text(employee.full_name()),
        }
    }

    fn value_type(self) -> ValueType {
        match self {
            Computation::FullName => ValueType::Text,
        }
    }
}

/// Where a column's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "source", rename_all = "camelCase")]
pub enum Extraction {
    Field(FieldKey),
    Computed(Computation),
}

impl Extraction {
    #[must_use]
    pub fn extract(self, employee: &Employee) -> ColumnValue {
        match self {
            Extraction::Field(field) => field.value(employee),
            Extraction::Computed(computation) => computation.apply(employee),
        }
    }

    fn value_type(self) -> ValueType {
        match self {
            Extraction::Field(field) => field.value_type(),
            Extraction::Computed(computation) => computation.value_type(),
        }
    }
}

/// Display formatting hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormatHint {
    /// Whole US dollars, e.g. `$60,000`.
    Currency,
    /// `MM/DD/YYYY`.
    Date,
}

/// How a column is filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterKind {
    Text,
    Autocomplete,
    RangeSlider,
    MultiSelect,
    DateRange,
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterKind::Text => "text",
            FilterKind::Autocomplete => "autocomplete",
            FilterKind::RangeSlider => "range-slider",
            FilterKind::MultiSelect => "multi-select",
            FilterKind::DateRange => "date-range",
        };
        f.write_str(name)
    }
}

/// How a column is sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKind {
    Alphanumeric,
    Numeric,
    Datetime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueType {
    Text,
    Integer,
    Date,
}

/// A value extracted from a record for one column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnValue {
    Text(String),
    Integer(i64),
    Date(NaiveDate),
}

impl ColumnValue {
    /// Format according to an optional display hint.
    #[must_use]
    pub fn formatted(&self, hint: Option<FormatHint>) -> String {
        match (self, hint) {
            (ColumnValue::Integer(n), Some(FormatHint::Currency)) => format_currency(*n),
            (ColumnValue::Date(d), Some(FormatHint::Date)) => d.format("%m/%d/%Y").to_string(),
            _ => self.to_string(),
        }
    }

    /// Ordering used by the table view.
    #[must_use]
    pub fn compare(&self, other: &ColumnValue) -> Ordering {
        match (self, other) {
            (ColumnValue::Integer(a), ColumnValue::Integer(b)) => a.cmp(b),
            (ColumnValue::Date(a), ColumnValue::Date(b)) => a.cmp(b),
            (ColumnValue::Text(a), ColumnValue::Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            _ => self.to_string().cmp(&other.to_string()),
        }
    }
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnValue::Text(s) => write!(f, "{s}"),
            ColumnValue::Integer(n) => write!(f, "{n}"),
            ColumnValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

/// Format whole dollars with thousands separators.
#[must_use]
pub fn format_currency(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Salary colour band used when rendering the salary column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalaryBand {
    /// Below 50,000.
    Low,
    /// 50,000 up to (excluding) 75,000.
    Mid,
    High,
}

impl SalaryBand {
    #[must_use]
    pub fn of(salary: u32) -> Self {
        match salary {
            s if s < 50_000 => SalaryBand::Low,
            s if s < 75_000 => SalaryBand::Mid,
            _ => SalaryBand::High,
        }
    }
}

/// One table column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    pub key: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub extraction: Extraction,
    pub width: u16,
    pub filter: FilterKind,
    pub sort: SortKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<FormatHint>,
}

impl ColumnDescriptor {
    /// Column reading a stored field. Filter and sort kinds follow the field type.
    #[must_use]
    pub fn field(key: &str, label: &str, field: FieldKey) -> Self {
        Self::with_extraction(key, label, Extraction::Field(field))
    }

    /// Column computed from several fields.
    #[must_use]
    pub fn computed(key: &str, label: &str, computation: Computation) -> Self {
        Self::with_extraction(key, label, Extraction::Computed(computation))
    }

    fn with_extraction(key: &str, label: &str, extraction: Extraction) -> Self {
        let (filter, sort) = match extraction.value_type() {
            ValueType::Text => (FilterKind::Text, SortKind::Alphanumeric),
            ValueType::Integer => (FilterKind::RangeSlider, SortKind::Numeric),
            ValueType::Date => (FilterKind::DateRange, SortKind::Datetime),
        };
        ColumnDescriptor {
            key: key.to_string(),
            label: label.to_string(),
            group: None,
            extraction,
            width: 150,
            filter,
            sort,
            format: None,
        }
    }

    #[must_use]
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: FilterKind) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: SortKind) -> Self {
        self.sort = sort;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: FormatHint) -> Self {
        self.format = Some(format);
        self
    }

    #[must_use]
    pub fn in_group(mut self, group: &str) -> Self {
        self.group = Some(group.to_string());
        self
    }

    #[must_use]
    pub fn value(&self, employee: &Employee) -> ColumnValue {
        self.extraction.extract(employee)
    }

    /// Value rendered with the column's format hint.
    #[must_use]
    pub fn display(&self, employee: &Employee) -> String {
        self.value(employee).formatted(self.format)
    }

    fn validate(&self) -> CoreResult<()> {
        if self.key.trim().is_empty() {
            return Err(CoreError::InvalidColumnSet("column key is empty".into()));
        }
        if self.label.trim().is_empty() {
            return Err(CoreError::InvalidColumnSet(format!(
                "column '{}' has an empty label",
                self.key
            )));
        }
        if self.width == 0 {
            return Err(CoreError::InvalidColumnSet(format!(
                "column '{}' has zero width",
                self.key
            )));
        }

        let value_type = self.extraction.value_type();
        let filter_ok = match self.filter {
            FilterKind::Text | FilterKind::Autocomplete | FilterKind::MultiSelect => {
                value_type == ValueType::Text
            }
            FilterKind::RangeSlider => value_type == ValueType::Integer,
            FilterKind::DateRange => value_type == ValueType::Date,
        };
        if !filter_ok {
            return Err(CoreError::InvalidColumnSet(format!(
                "column '{}' cannot use a {} filter",
                self.key, self.filter
            )));
        }

        let sort_ok = matches!(
            (self.sort, value_type),
            (SortKind::Alphanumeric, ValueType::Text)
                | (SortKind::Numeric, ValueType::Integer)
                | (SortKind::Datetime, ValueType::Date)
        );
        if !sort_ok {
            return Err(CoreError::InvalidColumnSet(format!(
                "column '{}' has a sort kind that does not match its values",
                self.key
            )));
        }

        let format_ok = match self.format {
            None => true,
            Some(FormatHint::Currency) => value_type == ValueType::Integer,
            Some(FormatHint::Date) => value_type == ValueType::Date,
        };
        if !format_ok {
            return Err(CoreError::InvalidColumnSet(format!(
                "column '{}' has a format hint that does not match its values",
                self.key
            )));
        }

        Ok(())
    }
}

/// An ordered, validated set of columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ColumnDescriptor>", into = "Vec<ColumnDescriptor>")]
pub struct ColumnSet {
    columns: Vec<ColumnDescriptor>,
}

impl ColumnSet {
    /// Build a column set, rejecting duplicate keys and inconsistent descriptors.
    pub fn new(columns: Vec<ColumnDescriptor>) -> CoreResult<Self> {
        if columns.is_empty() {
            return Err(CoreError::InvalidColumnSet("no columns".into()));
        }

        let mut keys = HashSet::new();
        for column in &columns {
            column.validate()?;
            if !keys.insert(column.key.as_str()) {
                return Err(CoreError::InvalidColumnSet(format!(
                    "duplicate column key '{}'",
                    column.key
                )));
            }
        }

        Ok(Self { columns })
    }

    /// Columns of the employee table.
    #[must_use]
    pub fn employee_table() -> Self {
        Self {
            columns: vec![
                ColumnDescriptor::computed("name", "Name", Computation::FullName)
                    .in_group("Employee")
                    .with_width(250)
                    .with_filter(FilterKind::Autocomplete),
                ColumnDescriptor::field("email", "Email", FieldKey::Email)
                    .in_group("Employee")
                    .with_width(300),
                ColumnDescriptor::field("salary", "Salary", FieldKey::Salary)
                    .in_group("Job Info")
                    .with_width(200)
                    .with_format(FormatHint::Currency),
                ColumnDescriptor::field("jobTitle", "Job Title", FieldKey::JobTitle)
                    .in_group("Job Info")
                    .with_width(350)
                    .with_filter(FilterKind::MultiSelect),
                ColumnDescriptor::field("startDate", "Start Date", FieldKey::StartDate)
                    .in_group("Job Info")
                    .with_width(250)
                    .with_format(FormatHint::Date),
            ],
        }
    }

    /// Columns of the tab-separated clipboard payload.
    #[must_use]
    pub fn clipboard_export() -> Self {
        Self {
            columns: vec![
                ColumnDescriptor::computed("name", "Name", Computation::FullName),
                ColumnDescriptor::field("email", "Email", FieldKey::Email),
                ColumnDescriptor::field("salary", "Salary", FieldKey::Salary),
                ColumnDescriptor::field("jobTitle", "Job Title", FieldKey::JobTitle),
                ColumnDescriptor::field("startDate", "Start Date", FieldKey::StartDate),
            ],
        }
    }

    /// Columns of the spreadsheet export, widths in character units.
    #[must_use]
    pub fn spreadsheet_export() -> Self {
        Self {
            columns: vec![
                ColumnDescriptor::computed("name", "Name", Computation::FullName).with_width(20),
                ColumnDescriptor::field("email", "Email", FieldKey::Email).with_width(30),
                ColumnDescriptor::field("salary", "Salary", FieldKey::Salary).with_width(12),
                ColumnDescriptor::field("jobTitle", "Job Title", FieldKey::JobTitle).with_width(25),
                ColumnDescriptor::field("startDate", "Start Date", FieldKey::StartDate)
                    .with_width(15),
                ColumnDescriptor::field(
                    "signatureCatchPhrase",
                    "Signature Catch Phrase",
                    FieldKey::SignatureCatchPhrase,
                )
                .with_width(40),
            ],
        }
    }

    /// Look a column up by key.
    pub fn get(&self, key: &str) -> CoreResult<&ColumnDescriptor> {
        self.columns
            .iter()
            .find(|c| c.key == key)
            .ok_or_else(|| CoreError::UnknownColumn(key.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column labels in order.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }

    /// Column groups in first-seen order with their member keys.
    #[must_use]
    pub fn groups(&self) -> Vec<(&str, Vec<&str>)> {
        let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
        for column in &self.columns {
            let Some(group) = column.group.as_deref() else {
                continue;
            };
            match groups.iter_mut().find(|(name, _)| *name == group) {
                Some((_, keys)) => keys.push(column.key.as_str()),
                None => groups.push((group, vec![column.key.as_str()])),
            }
        }
        groups
    }
}

impl<'a> IntoIterator for &'a ColumnSet {
    type Item = &'a ColumnDescriptor;
    type IntoIter = std::slice::Iter<'a, ColumnDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

impl TryFrom<Vec<ColumnDescriptor>> for ColumnSet {
    type Error = CoreError;

    fn try_from(columns: Vec<ColumnDescriptor>) -> CoreResult<Self> {
        ColumnSet::new(columns)
    }
}

impl From<ColumnSet> for Vec<ColumnDescriptor> {
    fn from(set: ColumnSet) -> Self {
        set.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::sample;

    #[test]
    fn test_employee_table_is_valid() {
        let columns = ColumnSet::employee_table();
        let rebuilt = ColumnSet::new(columns.iter().cloned().collect()).unwrap();
        assert_eq!(rebuilt, columns);
        assert_eq!(
            columns.labels(),
            vec!["Name", "Email", "Salary", "Job Title", "Start Date"]
        );
    }

    #[test]
    fn test_export_sets_are_valid() {
        for set in [ColumnSet::clipboard_export(), ColumnSet::spreadsheet_export()] {
            assert!(ColumnSet::new(set.iter().cloned().collect()).is_ok());
        }
        let widths: Vec<u16> = ColumnSet::spreadsheet_export().iter().map(|c| c.width).collect();
        assert_eq!(widths, vec![20, 30, 12, 25, 15, 40]);
    }

    #[test]
    fn test_extraction_rules() {
        let employee = sample("Jane", "Doe", 60_000, "2020-05-01");
        let columns = ColumnSet::employee_table();

        assert_eq!(
            columns.get("name").unwrap().value(&employee),
            ColumnValue::Text("Jane Doe".into())
        );
        assert_eq!(columns.get("salary").unwrap().display(&employee), "$60,000");
        assert_eq!(columns.get("startDate").unwrap().display(&employee), "05/01/2020");
        assert_eq!(
            columns.get("email").unwrap().display(&employee),
            "jane.doe@company.com"
        );
    }

    #[test]
    fn test_unknown_column() {
        let columns = ColumnSet::employee_table();
        assert_eq!(
            columns.get("avatar"),
            Err(CoreError::UnknownColumn("avatar".into()))
        );
    }

    #[test]
    fn test_rejects_duplicate_keys() {
        let result = ColumnSet::new(vec![
            ColumnDescriptor::field("email", "Email", FieldKey::Email),
            ColumnDescriptor::field("email", "Work Email", FieldKey::Email),
        ]);
        assert!(matches!(result, Err(CoreError::InvalidColumnSet(_))));
    }

    #[test]
    fn test_rejects_mismatched_hints() {
        let currency_on_text = ColumnDescriptor::field("email", "Email", FieldKey::Email)
            .with_format(FormatHint::Currency);
        assert!(ColumnSet::new(vec![currency_on_text]).is_err());

        let range_on_date = ColumnDescriptor::field("start", "Start", FieldKey::StartDate)
            .with_filter(FilterKind::RangeSlider);
        assert!(ColumnSet::new(vec![range_on_date]).is_err());

        let text_sort_on_salary = ColumnDescriptor::field("salary", "Salary", FieldKey::Salary)
            .with_sort(SortKind::Alphanumeric);
        assert!(ColumnSet::new(vec![text_sort_on_salary]).is_err());
    }

    #[test]
    fn test_serde_round_trip_validates() {
        let columns = ColumnSet::employee_table();
        let json = serde_json::to_string(&columns).unwrap();
        assert!(json.contains(r#""extraction":{"kind":"computed","source":"fullName"}"#));
        assert!(json.contains(r#""filter":"range-slider""#));

        let parsed: ColumnSet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, columns);

        let broken = json.replace(r#""key":"email""#, r#""key":"name""#);
        assert!(serde_json::from_str::<ColumnSet>(&broken).is_err());
    }

    #[test]
    fn test_groups() {
        let columns = ColumnSet::employee_table();
        assert_eq!(
            columns.groups(),
            vec![
                ("Employee", vec!["name", "email"]),
                ("Job Info", vec!["salary", "jobTitle", "startDate"]),
            ]
        );
    }

    #[test]
    fn test_currency_and_bands() {
        assert_eq!(format_currency(0), "$0");
        assert_eq!(format_currency(999), "$999");
        assert_eq!(format_currency(30_000), "$30,000");
        assert_eq!(format_currency(1_234_567), "$1,234,567");
        assert_eq!(format_currency(-4_500), "-$4,500");

        assert_eq!(SalaryBand::of(49_999), SalaryBand::Low);
        assert_eq!(SalaryBand::of(50_000), SalaryBand::Mid);
        assert_eq!(SalaryBand::of(74_999), SalaryBand::Mid);
        assert_eq!(SalaryBand::of(75_000), SalaryBand::High);
    }
}
