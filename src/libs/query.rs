//! Report search criteria.
//!
//! The date range is pushed down to SQL by `Reports::search`; project and
//! keyword need the bound template to know which fields to look at, so they
//! are applied in memory by [`ReportQuery::matches`].

use crate::libs::error::{NippoError, Result};
use crate::libs::report::Report;
use crate::libs::template::Template;
use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportQuery {
    /// Inclusive lower bound; `None` is unbounded.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound; `None` is unbounded.
    pub date_to: Option<NaiveDate>,
    /// Case-insensitive substring of the project-like field.
    pub project: Option<String>,
    /// Case-insensitive substring of all text and memo values.
    pub keyword: Option<String>,
    pub template_id: Option<i64>,
    pub limit: Option<usize>,
}

impl ReportQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(date: NaiveDate) -> Self {
        Self::new().between(Some(date), Some(date))
    }

    /// Every day of `year`-`month`.
    pub fn month(year: i32, month: u32) -> Result<Self> {
        let (first, last) = month_bounds(year, month)?;
        Ok(Self::new().between(Some(first), Some(last)))
    }

    pub fn between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    pub fn project(mut self, project: &str) -> Self {
        self.project = Some(project.to_string());
        self
    }

    pub fn keyword(mut self, keyword: &str) -> Self {
        self.keyword = Some(keyword.to_string());
        self
    }

    pub fn template(mut self, template_id: i64) -> Self {
        self.template_id = Some(template_id);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Applies the in-memory filters to a report and its bound template.
    pub fn matches(&self, report: &Report, template: &Template) -> bool {
        if let Some(project) = non_blank(&self.project) {
            let found = report
                .project_name(template)
                .map(|name| contains_ignore_case(name, project))
                .unwrap_or(false);
            if !found {
                return false;
            }
        }
        if let Some(keyword) = non_blank(&self.keyword) {
            if !contains_ignore_case(&report.searchable_text(template), keyword) {
                return false;
            }
        }
        true
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// First and last day of a month.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let invalid = || NippoError::InvalidPeriod { year, month };
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid)?;
    let last = next.pred_opt().ok_or_else(invalid)?;
    debug_assert_eq!(last.month(), month);
    Ok((first, last))
}
