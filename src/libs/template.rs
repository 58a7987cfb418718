//! Template model: a named, ordered schema of typed fields.
//!
//! Templates are plain data. Structural checks (unique field names and
//! orders, well-formed field definitions) live in [`validate_fields`] so the
//! store can run them before every write, whether the template is new or
//! the result of a set of [`TemplateChange`]s.

use crate::libs::error::{NippoError, Result};
use crate::libs::field::{FieldKind, FieldType, TemplateField};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashSet;

/// Name of the template seeded into a fresh database.
pub const DEFAULT_TEMPLATE_NAME: &str = "default";

#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Always sorted by `order`.
    pub fields: Vec<TemplateField>,
    pub is_default: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Template {
    pub fn field(&self, name: &str) -> Option<&TemplateField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// First `date` field in display order; its value dates the report.
    pub fn date_field(&self) -> Option<&TemplateField> {
        self.fields.iter().find(|f| f.field_type() == FieldType::Date)
    }

    pub fn project_field(&self) -> Option<&TemplateField> {
        self.fields.iter().find(|f| f.is_project_like())
    }

    pub fn next_order(&self) -> i32 {
        self.fields.iter().map(|f| f.order).max().unwrap_or(0) + 1
    }

    /// Start/end time field pairs used to compute worked minutes.
    ///
    /// A `time` field whose name contains `start` pairs with the field named
    /// the same with its first `start` replaced by `end`.
    pub fn time_pairs(&self) -> Vec<(&TemplateField, &TemplateField)> {
        self.fields
            .iter()
            .filter(|f| f.field_type() == FieldType::Time && f.name.contains("start"))
            .filter_map(|start| {
                let end_name = start.name.replacen("start", "end", 1);
                self.field(&end_name)
                    .filter(|end| end.field_type() == FieldType::Time)
                    .map(|end| (start, end))
            })
            .collect()
    }
}

/// Input for creating a template.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTemplate {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<TemplateField>,
}

impl NewTemplate {
    pub fn new(name: &str, description: Option<&str>, fields: Vec<TemplateField>) -> Self {
        Self {
            name: name.to_string(),
            description: description.map(str::to_string),
            fields,
        }
    }
}

/// One mutation applied by `Templates::update`.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateChange {
    Rename(String),
    Describe(Option<String>),
    AddField(TemplateField),
    /// Replaces the field currently named by the first element.
    ReplaceField(String, TemplateField),
    RemoveField(String),
}

/// Applies `changes` in order to a copy of `fields`.
///
/// Returns the new name, description and field list. The result is not yet
/// validated; callers run [`validate_fields`] on it before persisting.
pub fn apply_changes(template: &Template, changes: &[TemplateChange]) -> Result<(String, Option<String>, Vec<TemplateField>)> {
    let mut name = template.name.clone();
    let mut description = template.description.clone();
    let mut fields = template.fields.clone();

    for change in changes {
        match change {
            TemplateChange::Rename(new_name) => name = new_name.clone(),
            TemplateChange::Describe(text) => description = text.clone(),
            TemplateChange::AddField(field) => fields.push(field.clone()),
            TemplateChange::ReplaceField(target, field) => {
                let slot = fields.iter_mut().find(|f| &f.name == target).ok_or_else(|| unknown_field(target, &name))?;
                *slot = field.clone();
            }
            TemplateChange::RemoveField(target) => {
                let before = fields.len();
                fields.retain(|f| &f.name != target);
                if fields.len() == before {
                    return Err(unknown_field(target, &name));
                }
            }
        }
    }

    fields.sort_by_key(|f| f.order);
    Ok((name, description, fields))
}

fn unknown_field(field: &str, template: &str) -> NippoError {
    NippoError::UnknownField {
        field: field.to_string(),
        template: template.to_string(),
    }
}

/// Validates a template name and its field list.
pub fn validate_fields(name: &str, fields: &[TemplateField], today: NaiveDate) -> Result<()> {
    if name.trim().is_empty() {
        return Err(NippoError::InvalidFieldDefinition {
            field: String::new(),
            reason: "template name must not be empty".to_string(),
        });
    }

    let mut names = HashSet::new();
    let mut orders = HashSet::new();
    for field in fields {
        if !names.insert(field.name.as_str()) {
            return Err(NippoError::DuplicateFieldName { name: field.name.clone() });
        }
        if !orders.insert(field.order) {
            return Err(NippoError::DuplicateFieldOrder { order: field.order });
        }
    }

    for field in fields {
        field.check_definition(today)?;
    }
    Ok(())
}

/// The template seeded on first database open.
pub fn default_template() -> NewTemplate {
    let fields = vec![
        TemplateField::new("date", "日付", FieldKind::Date, 1).required().with_default("today"),
        TemplateField::new("project", "プロジェクト名", FieldKind::Text { max_length: Some(100) }, 2)
            .required()
            .with_placeholder("例: プロジェクトA"),
        TemplateField::new("start_time", "開始時刻", FieldKind::Time, 3).with_default("09:00"),
        TemplateField::new("end_time", "終了時刻", FieldKind::Time, 4).with_default("18:00"),
        TemplateField::new("content", "作業内容", FieldKind::Memo, 5)
            .required()
            .with_placeholder("今日の作業内容を記入してください"),
        TemplateField::new(
            "progress",
            "進捗状況",
            FieldKind::Selection {
                options: vec!["完了".to_string(), "進行中".to_string(), "未着手".to_string()],
            },
            6,
        )
        .with_default("進行中"),
        TemplateField::new("issues", "課題・問題点", FieldKind::Memo, 7).with_placeholder("課題や問題点があれば記入してください"),
        TemplateField::new("tomorrow_plan", "明日の予定", FieldKind::Memo, 8).with_placeholder("明日の作業予定を記入してください"),
        TemplateField::new("notes", "備考・メモ", FieldKind::Memo, 9).with_placeholder("その他のメモや備考"),
    ];

    NewTemplate::new(DEFAULT_TEMPLATE_NAME, Some("日報作成用の標準テンプレート"), fields)
}
