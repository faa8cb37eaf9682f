//! Filtered, sorted and paginated views over the snapshot.

use crate::columns::{ColumnDescriptor, ColumnSet, ColumnValue, FilterKind};
use crate::employee::Employee;
use crate::error::{CoreError, CoreResult};
use crate::snapshot::select_rows;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::ops::Range;
use tracing::debug;

/// A filter bound to one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnFilter {
    /// Case-insensitive substring match.
    Contains(String),
    /// Inclusive numeric bounds; a missing bound is open.
    Range { min: Option<i64>, max: Option<i64> },
    /// Exact match against any of the values.
    OneOf(Vec<String>),
    /// Inclusive date bounds; a missing bound is open.
    DateBetween {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
}

impl ColumnFilter {
    fn name(&self) -> &'static str {
        match self {
            ColumnFilter::Contains(_) => "contains",
            ColumnFilter::Range { .. } => "range",
            ColumnFilter::OneOf(_) => "one-of",
            ColumnFilter::DateBetween { .. } => "date-between",
        }
    }

    fn accepts(&self, kind: FilterKind) -> bool {
        match self {
            ColumnFilter::Contains(_) => matches!(
                kind,
                FilterKind::Text | FilterKind::Autocomplete | FilterKind::MultiSelect
            ),
            ColumnFilter::Range { .. } => kind == FilterKind::RangeSlider,
            ColumnFilter::OneOf(_) => kind == FilterKind::MultiSelect,
            ColumnFilter::DateBetween { .. } => kind == FilterKind::DateRange,
        }
    }

    fn matches(&self, value: &ColumnValue) -> bool {
        match (self, value) {
            (ColumnFilter::Contains(needle), value) => value
                .to_string()
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            (ColumnFilter::Range { min, max }, ColumnValue::Integer(n)) => {
                min.map_or(true, |min| *n >= min) && max.map_or(true, |max| *n <= max)
            }
            (ColumnFilter::OneOf(values), value) => {
                let text = value.to_string();
                values.iter().any(|v| *v == text)
            }
            (ColumnFilter::DateBetween { from, to }, ColumnValue::Date(d)) => {
                from.map_or(true, |from| *d >= from) && to.map_or(true, |to| *d <= to)
            }
            _ => false,
        }
    }
}

/// Sort by one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub key: String,
    pub descending: bool,
}

impl Sort {
    #[must_use]
    pub fn ascending(key: &str) -> Self {
        Self {
            key: key.to_string(),
            descending: false,
        }
    }

    #[must_use]
    pub fn descending(key: &str) -> Self {
        Self {
            key: key.to_string(),
            descending: true,
        }
    }
}

/// A 0-based page of fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub index: usize,
    pub size: usize,
}

/// Filter, sort and page criteria applied to the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub global_filter: Option<String>,
    pub filters: Vec<(String, ColumnFilter)>,
    pub sort: Option<Sort>,
    pub page: Option<Page>,
}

impl ViewQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_global_filter(mut self, text: &str) -> Self {
        self.global_filter = Some(text.to_string());
        self
    }

    #[must_use]
    pub fn with_filter(mut self, key: &str, filter: ColumnFilter) -> Self {
        self.filters.push((key.to_string(), filter));
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    #[must_use]
    pub fn with_page(mut self, index: usize, size: usize) -> Self {
        self.page = Some(Page { index, size });
        self
    }

    /// Apply the query to `rows`.
    ///
    /// Every filter must name a column of `columns` and fit its filter kind.
    /// Sorting is stable, so rows with equal keys keep snapshot order.
    pub fn apply<'a>(&self, columns: &ColumnSet, rows: &'a [Employee]) -> CoreResult<View<'a>> {
        let filters = self
            .filters
            .iter()
            .map(|(key, filter)| {
                let column = columns.get(key)?;
                if filter.accepts(column.filter) {
                    Ok((column, filter))
                } else {
                    Err(CoreError::filter_mismatch(
                        key,
                        filter.name(),
                        column.filter.to_string(),
                    ))
                }
            })
            .collect::<CoreResult<Vec<(&ColumnDescriptor, &ColumnFilter)>>>()?;

        if let Some(page) = self.page {
            if page.size == 0 {
                return Err(CoreError::InvalidPage("page size must be positive".into()));
            }
        }

        let needle = self
            .global_filter
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut visible: Vec<&'a Employee> = rows
            .iter()
            .filter(|employee| {
                filters
                    .iter()
                    .all(|(column, filter)| filter.matches(&column.value(employee)))
            })
            .filter(|employee| match &needle {
                Some(needle) => columns.iter().any(|column| {
                    let value = column.value(employee);
                    value.to_string().to_lowercase().contains(needle)
                        || value.formatted(column.format).to_lowercase().contains(needle)
                }),
                None => true,
            })
            .collect();

        if let Some(sort) = &self.sort {
            let column = columns.get(&sort.key)?;
            visible.sort_by(|a, b| {
                let ordering = column.value(a).compare(&column.value(b));
                if sort.descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }

        debug!(total = rows.len(), visible = visible.len(), "applied view query");

        Ok(View {
            rows: visible,
            page: self.page,
        })
    }
}

/// The rows matching a [`ViewQuery`], in display order.
#[derive(Debug, Clone)]
pub struct View<'a> {
    rows: Vec<&'a Employee>,
    page: Option<Page>,
}

impl<'a> View<'a> {
    /// All filtered and sorted rows, ignoring pagination.
    #[must_use]
    pub fn rows(&self) -> &[&'a Employee] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows of the requested page, or every row without one.
    #[must_use]
    pub fn page_rows(&self) -> &[&'a Employee] {
        &self.rows[self.page_bounds()]
    }

    /// View positions covered by the requested page.
    #[must_use]
    pub fn page_bounds(&self) -> Range<usize> {
        match self.page {
            Some(Page { index, size }) => {
                let start = index.saturating_mul(size).min(self.rows.len());
                let end = start.saturating_add(size).min(self.rows.len());
                start..end
            }
            None => 0..self.rows.len(),
        }
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        match self.page {
            Some(Page { size, .. }) => self.rows.len().div_ceil(size),
            None => usize::from(!self.rows.is_empty()),
        }
    }

    /// Resolve selected positions within the filtered rows.
    pub fn select(&self, positions: &[usize]) -> CoreResult<Vec<&'a Employee>> {
        select_rows(&self.rows, positions)
    }

    /// Distinct display values of a column among the filtered rows, in
    /// column order (salaries numerically, dates chronologically).
    pub fn facets(&self, columns: &ColumnSet, key: &str) -> CoreResult<Vec<String>> {
        let column = columns.get(key)?;
        let mut values: Vec<ColumnValue> = self
            .rows
            .iter()
            .map(|employee| column.value(employee))
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        values.sort_by(ColumnValue::compare);
        Ok(values
            .iter()
            .map(|value| value.formatted(column.format))
            .collect())
    }

    /// Group the filtered rows by the display value of a column.
    ///
    /// Groups appear in the order their first row appears in the view, and
    /// rows keep view order within a group.
    pub fn group_by(&self, columns: &ColumnSet, key: &str) -> CoreResult<Vec<RowGroup<'a>>> {
        let column = columns.get(key)?;
        let mut groups: Vec<RowGroup<'a>> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for (position, employee) in self.rows.iter().enumerate() {
            let value = column.display(employee);
            let slot = *index.entry(value.clone()).or_insert_with(|| {
                groups.push(RowGroup {
                    value,
                    positions: Vec::new(),
                    rows: Vec::new(),
                });
                groups.len() - 1
            });
            groups[slot].positions.push(position);
            groups[slot].rows.push(employee);
        }

        debug!(column = key, groups = groups.len(), "grouped view rows");
        Ok(groups)
    }
}

/// Rows of a view sharing one value of the grouping column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowGroup<'a> {
    /// Display value shared by the group.
    pub value: String,
    /// Positions of the rows in the view.
    pub positions: Vec<usize>,
    pub rows: Vec<&'a Employee>,
}

impl RowGroup<'_> {
    #[must_use]
    pub fn count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::sample;

    fn rows() -> Vec<Employee> {
        let mut analyst = sample("Jane", "Doe", 60_000, "2020-05-01");
        analyst.job_title = "Data Analyst".into();
        let mut engineer = sample("John", "Smith", 45_000, "2016-02-10");
        engineer.job_title = "Software Engineer".into();
        let mut manager = sample("Emily", "Brown", 120_000, "2022-11-30");
        manager.job_title = "HR Manager".into();
        let mut second_analyst = sample("adam", "Zed", 75_000, "2020-05-01");
        second_analyst.job_title = "Data Analyst".into();
        vec![analyst, engineer, manager, second_analyst]
    }

    fn names(rows: &[&Employee]) -> Vec<String> {
        rows.iter().map(|e| e.full_name()).collect()
    }

    #[test]
    fn test_empty_query_keeps_order() {
        let data = rows();
        let view = ViewQuery::new()
            .apply(&ColumnSet::employee_table(), &data)
            .unwrap();
        assert_eq!(view.len(), 4);
        assert_eq!(names(view.rows())[0], "Jane Doe");
        assert_eq!(view.page_count(), 1);
    }

    #[test]
    fn test_salary_range_is_inclusive() {
        let data = rows();
        let view = ViewQuery::new()
            .with_filter(
                "salary",
                ColumnFilter::Range {
                    min: Some(45_000),
                    max: Some(75_000),
                },
            )
            .apply(&ColumnSet::employee_table(), &data)
            .unwrap();
        assert_eq!(names(view.rows()), vec!["Jane Doe", "John Smith", "adam Zed"]);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let data = rows();
        let day = NaiveDate::from_ymd_opt(2020, 5, 1).unwrap();
        let view = ViewQuery::new()
            .with_filter(
                "startDate",
                ColumnFilter::DateBetween {
                    from: Some(day),
                    to: Some(day),
                },
            )
            .apply(&ColumnSet::employee_table(), &data)
            .unwrap();
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn test_multi_select_and_global_filter() {
        let data = rows();
        let columns = ColumnSet::employee_table();
        let view = ViewQuery::new()
            .with_filter(
                "jobTitle",
                ColumnFilter::OneOf(vec!["Data Analyst".into(), "HR Manager".into()]),
            )
            .with_global_filter("BROWN")
            .apply(&columns, &data)
            .unwrap();
        assert_eq!(names(view.rows()), vec!["Emily Brown"]);
    }

    #[test]
    fn test_global_filter_matches_display_text() {
        let data = rows();
        let columns = ColumnSet::employee_table();

        let view = ViewQuery::new()
            .with_global_filter("$120,000")
            .apply(&columns, &data)
            .unwrap();
        assert_eq!(names(view.rows()), vec!["Emily Brown"]);

        let view = ViewQuery::new()
            .with_global_filter("05/01/2020")
            .apply(&columns, &data)
            .unwrap();
        assert_eq!(names(view.rows()), vec!["Jane Doe", "adam Zed"]);
    }

    #[test]
    fn test_filter_kind_mismatch() {
        let data = rows();
        let result = ViewQuery::new()
            .with_filter("email", ColumnFilter::Range { min: None, max: None })
            .apply(&ColumnSet::employee_table(), &data);
        assert!(matches!(result, Err(CoreError::FilterMismatch { .. })));

        let result = ViewQuery::new()
            .with_filter("avatar", ColumnFilter::Contains("x".into()))
            .apply(&ColumnSet::employee_table(), &data);
        assert_eq!(result.err(), Some(CoreError::UnknownColumn("avatar".into())));
    }

    #[test]
    fn test_sorting() {
        let data = rows();
        let columns = ColumnSet::employee_table();

        let by_salary = ViewQuery::new()
            .with_sort(Sort::descending("salary"))
            .apply(&columns, &data)
            .unwrap();
        assert_eq!(
            names(by_salary.rows()),
            vec!["Emily Brown", "adam Zed", "Jane Doe", "John Smith"]
        );

        let by_name = ViewQuery::new()
            .with_sort(Sort::ascending("name"))
            .apply(&columns, &data)
            .unwrap();
        assert_eq!(
            names(by_name.rows()),
            vec!["adam Zed", "Emily Brown", "Jane Doe", "John Smith"]
        );

        // equal dates keep snapshot order
        let by_date = ViewQuery::new()
            .with_sort(Sort::ascending("startDate"))
            .apply(&columns, &data)
            .unwrap();
        assert_eq!(
            names(by_date.rows()),
            vec!["John Smith", "Jane Doe", "adam Zed", "Emily Brown"]
        );
    }

    #[test]
    fn test_pagination() {
        let data = rows();
        let columns = ColumnSet::employee_table();
        let view = ViewQuery::new().with_page(1, 3).apply(&columns, &data).unwrap();

        assert_eq!(view.page_count(), 2);
        assert_eq!(names(view.page_rows()), vec!["adam Zed"]);
        assert_eq!(view.rows().len(), 4);

        let past_end = ViewQuery::new().with_page(5, 3).apply(&columns, &data).unwrap();
        assert!(past_end.page_rows().is_empty());

        let zero = ViewQuery::new().with_page(0, 0).apply(&columns, &data);
        assert!(matches!(zero, Err(CoreError::InvalidPage(_))));
    }

    #[test]
    fn test_select_and_facets() {
        let data = rows();
        let columns = ColumnSet::employee_table();
        let view = ViewQuery::new()
            .with_sort(Sort::descending("salary"))
            .apply(&columns, &data)
            .unwrap();

        let selected = view.select(&[0, 3]).unwrap();
        assert_eq!(names(&selected), vec!["Emily Brown", "John Smith"]);
        assert!(view.select(&[4]).is_err());

        assert_eq!(
            view.facets(&columns, "jobTitle").unwrap(),
            vec!["Data Analyst", "HR Manager", "Software Engineer"]
        );
    }

    #[test]
    fn test_facets_use_display_text_in_value_order() {
        let mut data = rows();
        data.push(sample("Max", "Low", 30_000, "2015-01-01"));
        let columns = ColumnSet::employee_table();
        let view = ViewQuery::new().apply(&columns, &data).unwrap();

        assert_eq!(
            view.facets(&columns, "salary").unwrap(),
            vec!["$30,000", "$45,000", "$60,000", "$75,000", "$120,000"]
        );
        assert_eq!(
            view.facets(&columns, "startDate").unwrap(),
            vec!["01/01/2015", "02/10/2016", "05/01/2020", "11/30/2022"]
        );
    }

    #[test]
    fn test_group_by_keeps_first_seen_order() {
        let data = rows();
        let columns = ColumnSet::employee_table();
        let view = ViewQuery::new().apply(&columns, &data).unwrap();

        let groups = view.group_by(&columns, "jobTitle").unwrap();
        let summary: Vec<(&str, usize)> = groups
            .iter()
            .map(|g| (g.value.as_str(), g.count()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Data Analyst", 2),
                ("Software Engineer", 1),
                ("HR Manager", 1)
            ]
        );
        assert_eq!(groups[0].positions, vec![0, 3]);
        assert_eq!(names(&groups[0].rows), vec!["Jane Doe", "adam Zed"]);

        assert!(view.group_by(&columns, "avatar").is_err());
    }

    #[test]
    fn test_group_by_follows_sort_and_display_format() {
        let data = rows();
        let columns = ColumnSet::employee_table();
        let view = ViewQuery::new()
            .with_sort(Sort::ascending("name"))
            .apply(&columns, &data)
            .unwrap();

        let groups = view.group_by(&columns, "startDate").unwrap();
        let values: Vec<&str> = groups.iter().map(|g| g.value.as_str()).collect();
        // adam Zed, Emily Brown, Jane Doe, John Smith
        assert_eq!(values, vec!["05/01/2020", "11/30/2022", "02/10/2016"]);
        assert_eq!(groups[0].positions, vec![0, 2]);
    }

    #[test]
    fn test_page_bounds() {
        let data = rows();
        let columns = ColumnSet::employee_table();
        let view = ViewQuery::new().with_page(1, 3).apply(&columns, &data).unwrap();
        assert_eq!(view.page_bounds(), 3..4);

        let unpaged = ViewQuery::new().apply(&columns, &data).unwrap();
        assert_eq!(unpaged.page_bounds(), 0..4);
    }
}
