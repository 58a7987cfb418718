//! Field type registry: the fixed set of field kinds and their contracts.
//!
//! A [`TemplateField`] is one slot of a template schema. Its [`FieldKind`]
//! is a tagged variant that carries only the attributes meaningful to that
//! kind, so a `date` field cannot hold selection options and only `text`
//! fields have a length cap.
//!
//! All per-type validation and normalisation goes through
//! [`TemplateField::normalize`], which is used by the report validator, by
//! template definition checks (for default values) and by the interactive
//! input provider.
//!
//! | kind        | accepted input                         | stored form      |
//! |-------------|----------------------------------------|------------------|
//! | `date`      | `YYYY-MM-DD`, `today`, `yesterday`, `tomorrow` | `YYYY-MM-DD` |
//! | `time`      | `H:MM` / `HH:MM`, 24-hour              | `HH:MM`          |
//! | `text`      | single line, at most `max_length` chars | trimmed         |
//! | `memo`      | any text                               | trimmed          |
//! | `selection` | one of `options`                       | as given         |

use crate::libs::error::{NippoError, Result};
use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length cap for `text` fields without an explicit `max_length`.
pub const DEFAULT_TEXT_MAX_LENGTH: usize = 255;

/// Grid used by guided time input.
pub const TIME_STEP_MINUTES: u32 = 15;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// Plain discriminant of a field kind, as stored in `template_fields.field_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Date,
    Time,
    Text,
    Memo,
    Selection,
}

impl FieldType {
    pub const ALL: [FieldType; 5] = [FieldType::Date, FieldType::Time, FieldType::Text, FieldType::Memo, FieldType::Selection];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Date => "date",
            FieldType::Time => "time",
            FieldType::Text => "text",
            FieldType::Memo => "memo",
            FieldType::Selection => "selection",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        FieldType::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| format!("unknown field type '{}'", s))
    }
}

/// Relative date tokens accepted as `date` defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateDefault {
    Today,
    Yesterday,
    Tomorrow,
}

impl DateDefault {
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "today" => Some(DateDefault::Today),
            "yesterday" => Some(DateDefault::Yesterday),
            "tomorrow" => Some(DateDefault::Tomorrow),
            _ => None,
        }
    }

    pub fn resolve(&self, today: NaiveDate) -> NaiveDate {
        match self {
            DateDefault::Today => today,
            DateDefault::Yesterday => today - Duration::days(1),
            DateDefault::Tomorrow => today + Duration::days(1),
        }
    }
}

/// Kind of a field together with the attributes only that kind may carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    Date,
    Time,
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },
    Memo,
    Selection { options: Vec<String> },
}

impl FieldKind {
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldKind::Date => FieldType::Date,
            FieldKind::Time => FieldType::Time,
            FieldKind::Text { .. } => FieldType::Text,
            FieldKind::Memo => FieldType::Memo,
            FieldKind::Selection { .. } => FieldType::Selection,
        }
    }

    /// Rebuilds a kind from its flat storage columns.
    ///
    /// Rejects attribute combinations the variant cannot hold, so a row that
    /// was written by hand with `options` on a `date` field never loads.
    pub fn from_parts(field: &str, field_type: FieldType, options: Option<Vec<String>>, max_length: Option<usize>) -> Result<Self> {
        let misplaced = |attr: &str| NippoError::InvalidFieldDefinition {
            field: field.to_string(),
            reason: format!("'{}' is not allowed on a {} field", attr, field_type),
        };

        if options.is_some() && field_type != FieldType::Selection {
            return Err(misplaced("options"));
        }
        if max_length.is_some() && field_type != FieldType::Text {
            return Err(misplaced("max_length"));
        }

        Ok(match field_type {
            FieldType::Date => FieldKind::Date,
            FieldType::Time => FieldKind::Time,
            FieldType::Text => FieldKind::Text { max_length },
            FieldType::Memo => FieldKind::Memo,
            FieldType::Selection => FieldKind::Selection {
                options: options.unwrap_or_default(),
            },
        })
    }

    pub fn options(&self) -> Option<&[String]> {
        match self {
            FieldKind::Selection { options } => Some(options),
            _ => None,
        }
    }

    pub fn max_length(&self) -> Option<usize> {
        match self {
            FieldKind::Text { max_length } => *max_length,
            _ => None,
        }
    }
}

/// One slot of a template schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateField {
    /// Machine identifier, unique within the template.
    pub name: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Display and input position, unique within the template.
    pub order: i32,
}

impl TemplateField {
    pub fn new(name: &str, label: &str, kind: FieldKind, order: i32) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required: false,
            default_value: None,
            placeholder: None,
            order,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: &str) -> Self {
        self.default_value = Some(value.to_string());
        self
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    pub fn field_type(&self) -> FieldType {
        self.kind.field_type()
    }

    /// A `text` field named `project` groups reports by project.
    pub fn is_project_like(&self) -> bool {
        self.field_type() == FieldType::Text && self.name == "project"
    }

    /// A `memo` field named `issues` collects open problems for summaries.
    pub fn is_issues_like(&self) -> bool {
        self.field_type() == FieldType::Memo && self.name == "issues"
    }

    /// Fields whose values take part in keyword search.
    pub fn is_searchable(&self) -> bool {
        matches!(self.field_type(), FieldType::Text | FieldType::Memo)
    }

    /// Resolves the field's default to a storable value.
    ///
    /// Relative date tokens are resolved against `today`; they are never
    /// stored as the token itself.
    pub fn resolved_default(&self, today: NaiveDate) -> Result<Option<String>> {
        match self.default_value.as_deref() {
            Some(value) if !value.trim().is_empty() => self.normalize(value, today).map(Some),
            _ => Ok(None),
        }
    }

    /// Validates a non-empty raw value against this field's type contract and
    /// returns its stored form.
    pub fn normalize(&self, raw: &str, today: NaiveDate) -> Result<String> {
        match &self.kind {
            FieldKind::Date => self.normalize_date(raw, today),
            FieldKind::Time => self.normalize_time(raw),
            FieldKind::Text { max_length } => self.normalize_text(raw, max_length.unwrap_or(DEFAULT_TEXT_MAX_LENGTH)),
            FieldKind::Memo => Ok(raw.trim().to_string()),
            FieldKind::Selection { options } => self.normalize_selection(raw, options),
        }
    }

    fn normalize_date(&self, raw: &str, today: NaiveDate) -> Result<String> {
        if let Some(token) = DateDefault::parse(raw) {
            return Ok(token.resolve(today).format(DATE_FORMAT).to_string());
        }
        let date = parse_date(raw).ok_or_else(|| self.invalid(format!("'{}' is not a YYYY-MM-DD date", raw.trim())))?;
        Ok(date.format(DATE_FORMAT).to_string())
    }

    fn normalize_time(&self, raw: &str) -> Result<String> {
        let time = parse_time(raw).ok_or_else(|| self.invalid(format!("'{}' is not a 24-hour HH:MM time", raw.trim())))?;
        Ok(time.format(TIME_FORMAT).to_string())
    }

    fn normalize_text(&self, raw: &str, max: usize) -> Result<String> {
        if raw.contains('\n') || raw.contains('\r') {
            return Err(self.invalid("line breaks are not allowed in a single-line field".to_string()));
        }
        let value = raw.trim();
        let actual = value.chars().count();
        if actual > max {
            return Err(NippoError::FieldTooLong {
                field: self.name.clone(),
                max,
                actual,
            });
        }
        Ok(value.to_string())
    }

    fn normalize_selection(&self, raw: &str, options: &[String]) -> Result<String> {
        let value = raw.trim();
        match options.iter().find(|o| o.as_str() == value) {
            Some(option) => Ok(option.clone()),
            None => Err(NippoError::InvalidSelection {
                field: self.name.clone(),
                value: value.to_string(),
                options: options.to_vec(),
            }),
        }
    }

    fn invalid(&self, reason: String) -> NippoError {
        NippoError::InvalidFieldValue {
            field: self.name.clone(),
            reason,
        }
    }

    /// Checks the field definition itself: identifiers, kind attributes and
    /// that the default value honours the field's own contract.
    pub fn check_definition(&self, today: NaiveDate) -> Result<()> {
        let invalid = |reason: &str| NippoError::InvalidFieldDefinition {
            field: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name must not be empty"));
        }
        if self.name.chars().any(char::is_whitespace) {
            return Err(invalid("name must not contain whitespace"));
        }
        if self.label.trim().is_empty() {
            return Err(invalid("label must not be empty"));
        }

        match &self.kind {
            FieldKind::Selection { options } => {
                if options.is_empty() {
                    return Err(invalid("a selection field needs at least one option"));
                }
                if options.iter().any(|o| o.trim().is_empty()) {
                    return Err(invalid("selection options must not be blank"));
                }
                for (i, option) in options.iter().enumerate() {
                    if options[..i].contains(option) {
                        return Err(invalid(&format!("option '{}' is listed twice", option)));
                    }
                }
            }
            FieldKind::Text { max_length: Some(max) } if *max == 0 || *max > DEFAULT_TEXT_MAX_LENGTH => {
                return Err(invalid(&format!("max_length must be between 1 and {}", DEFAULT_TEXT_MAX_LENGTH)));
            }
            _ => {}
        }

        self.resolved_default(today)
            .map_err(|e| invalid(&format!("default value is invalid: {}", e)))?;
        Ok(())
    }
}

/// Strict `YYYY-MM-DD`; chrono alone also takes signed years and
/// unpadded fields.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let shape_ok = raw.len() == 10
        && raw.char_indices().all(|(i, c)| match i {
            4 | 7 => c == '-',
            _ => c.is_ascii_digit(),
        });
    if !shape_ok {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    let (hours, minutes) = raw.split_once(':')?;
    if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
        return None;
    }
    if !hours.chars().chain(minutes.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }
    NaiveTime::from_hms_opt(hours.parse().ok()?, minutes.parse().ok()?, 0)
}

/// Times on the guided-input grid, `00:00` through `23:45`.
pub fn time_grid() -> Vec<String> {
    (0..24 * 60)
        .step_by(TIME_STEP_MINUTES as usize)
        .map(|m| format!("{:02}:{:02}", m / 60, m % 60))
        .collect()
}

/// Index of the grid slot nearest to `time`, used to preselect the stepper.
pub fn nearest_grid_index(time: NaiveTime) -> usize {
    use chrono::Timelike;
    let minutes = time.hour() * 60 + time.minute();
    let slot = (minutes + TIME_STEP_MINUTES / 2) / TIME_STEP_MINUTES;
    (slot as usize) % (24 * 60 / TIME_STEP_MINUTES as usize)
}
