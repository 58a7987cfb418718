//! Report model and schema validation.
//!
//! A report's data is an ordered association of field name to value
//! ([`ReportData`]). Nothing crossing into the store is trusted: every create
//! and update runs [`validate_report`] against the bound template, which
//! normalises values, applies defaults, rejects or drops unknown keys and
//! derives the report date and worked minutes.

use crate::libs::error::{NippoError, Result};
use crate::libs::field::{parse_date, parse_time};
use crate::libs::template::Template;
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

pub const MINUTES_PER_DAY: i64 = 24 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataEntry {
    pub name: String,
    pub value: String,
}

/// Ordered field name to value association.
///
/// Inserting an existing name replaces its value in place, so the order of
/// first insertion is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportData(Vec<DataEntry>);

impl ReportData {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.iter().find(|e| e.name == name).map(|e| e.value.as_str())
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.value = value,
            None => self.0.push(DataEntry { name, value }),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.0.iter().position(|e| e.name == name)?;
        Some(self.0.remove(index).value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|e| e.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|e| (e.name.as_str(), e.value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overlays `other` onto a copy of `self`.
    pub fn merged(&self, other: &ReportData) -> ReportData {
        let mut merged = self.clone();
        for (name, value) in other.iter() {
            merged.insert(name, value);
        }
        merged
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ReportData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut data = ReportData::new();
        for (name, value) in iter {
            data.insert(name, value);
        }
        data
    }
}

/// One filled instance of a template.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub id: i64,
    pub template_id: i64,
    /// Value of the template's first `date` field, or the creation date.
    pub date: NaiveDate,
    pub data: ReportData,
    pub work_minutes: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Report {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.data.get(name)
    }

    pub fn project_name<'a>(&'a self, template: &Template) -> Option<&'a str> {
        template.project_field().and_then(|f| self.data.get(&f.name)).filter(|v| !v.is_empty())
    }

    /// Concatenated `text`/`memo` values, used by keyword search.
    pub fn searchable_text(&self, template: &Template) -> String {
        template
            .fields
            .iter()
            .filter(|f| f.is_searchable())
            .filter_map(|f| self.data.get(&f.name))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// How keys unknown to the template are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Unknown keys fail with `UnknownField`.
    Create,
    /// Unknown keys (left over from an edited template) are dropped.
    Update,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedReport {
    /// Normalised values in template field order.
    pub data: ReportData,
    /// `None` when the template has no date field.
    pub date: Option<NaiveDate>,
    pub work_minutes: i64,
    pub dropped_keys: Vec<String>,
}

/// Validates `raw` against `template`.
///
/// Fields are checked in template order and the first failure aborts with
/// an error naming the field. Blank values count as absent: required fields
/// then fail with `RequiredFieldMissing`, optional ones take their default.
pub fn validate_report(template: &Template, raw: &ReportData, mode: ValidationMode, today: NaiveDate) -> Result<ValidatedReport> {
    let dropped_keys = match mode {
        ValidationMode::Create => {
            reject_unknown_fields(template, raw)?;
            Vec::new()
        }
        ValidationMode::Update => raw.keys().filter(|k| !template.has_field(k)).map(str::to_string).collect(),
    };

    let mut data = ReportData::new();
    for field in &template.fields {
        let supplied = raw.get(&field.name).filter(|v| !v.trim().is_empty());
        match supplied {
            Some(value) => data.insert(&field.name, field.normalize(value, today)?),
            None if field.required => {
                return Err(NippoError::RequiredFieldMissing { field: field.name.clone() });
            }
            None => {
                if let Some(default) = field.resolved_default(today)? {
                    data.insert(&field.name, default);
                }
            }
        }
    }

    let date = template.date_field().and_then(|f| data.get(&f.name)).and_then(parse_date);
    let work_minutes = work_minutes(template, &data);

    Ok(ValidatedReport {
        data,
        date,
        work_minutes,
        dropped_keys,
    })
}

/// Fails with `UnknownField` on the first key `template` does not define.
pub fn reject_unknown_fields(template: &Template, data: &ReportData) -> Result<()> {
    match data.keys().find(|k| !template.has_field(k)) {
        Some(key) => Err(NippoError::UnknownField {
            field: key.to_string(),
            template: template.name.clone(),
        }),
        None => Ok(()),
    }
}

/// Minutes worked according to the template's start/end time pairs.
///
/// An end time earlier than its start spans midnight. Pairs with a missing
/// side contribute nothing.
pub fn work_minutes(template: &Template, data: &ReportData) -> i64 {
    template
        .time_pairs()
        .into_iter()
        .filter_map(|(start, end)| {
            let start = parse_time(data.get(&start.name)?)?;
            let end = parse_time(data.get(&end.name)?)?;
            let start = i64::from(start.hour() * 60 + start.minute());
            let end = i64::from(end.hour() * 60 + end.minute());
            Some(if end >= start { end - start } else { end + MINUTES_PER_DAY - start })
        })
        .sum()
}
