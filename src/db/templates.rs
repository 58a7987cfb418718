//! Template persistence.
//!
//! A template is one `templates` row plus its `template_fields` rows. Every
//! write validates the complete resulting template first and then runs in
//! one transaction, so a failed update leaves the stored template as it was.
//!
//! ```rust,no_run
//! use smart_nippo::db::templates::Templates;
//! use smart_nippo::libs::field::{FieldKind, TemplateField};
//! use smart_nippo::libs::template::NewTemplate;
//!
//! let mut templates = Templates::new()?;
//! let template = templates.create(&NewTemplate::new(
//!     "standup",
//!     None,
//!     vec![TemplateField::new("date", "Date", FieldKind::Date, 1).required()],
//! ))?;
//! templates.set_default(template.id)?;
//! # Ok::<(), smart_nippo::libs::error::NippoError>(())
//! ```

use super::db::Db;
use crate::libs::error::{NippoError, Result};
use crate::libs::field::{FieldKind, FieldType, TemplateField};
use crate::libs::template::{apply_changes, validate_fields, NewTemplate, Template, TemplateChange, DEFAULT_TEMPLATE_NAME};
use chrono::{Local, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension};

const INSERT_TEMPLATE: &str = "INSERT INTO templates (name, description, is_default, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)";
const INSERT_FIELD: &str = "INSERT INTO template_fields
    (template_id, name, label, field_type, required, default_value, options, placeholder, max_length, field_order)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";
const SELECT_TEMPLATE: &str = "SELECT id, name, description, is_default, created_at, updated_at FROM templates WHERE id = ?1";
const SELECT_FIELDS: &str = "SELECT name, label, field_type, required, default_value, options, placeholder, max_length, field_order
    FROM template_fields WHERE template_id = ?1 ORDER BY field_order";
const SELECT_ID_BY_NAME: &str = "SELECT id FROM templates WHERE name = ?1";
const SELECT_DEFAULT_ID: &str = "SELECT id FROM templates WHERE is_default = 1";
const SELECT_ALL_IDS: &str = "SELECT id FROM templates ORDER BY name";
const UPDATE_TEMPLATE: &str = "UPDATE templates SET name = ?2, description = ?3, updated_at = ?4 WHERE id = ?1";
const DELETE_FIELDS: &str = "DELETE FROM template_fields WHERE template_id = ?1";
const DELETE_TEMPLATE: &str = "DELETE FROM templates WHERE id = ?1";
const DELETE_TEMPLATE_REPORTS: &str = "DELETE FROM reports WHERE template_id = ?1";
const COUNT_TEMPLATE_REPORTS: &str = "SELECT COUNT(*) FROM reports WHERE template_id = ?1";
const CLEAR_DEFAULT: &str = "UPDATE templates SET is_default = 0 WHERE is_default = 1";
const SET_DEFAULT: &str = "UPDATE templates SET is_default = 1, updated_at = ?2 WHERE id = ?1";

pub struct Templates {
    conn: Connection,
}

impl Templates {
    pub fn new() -> Result<Self> {
        Ok(Self::from_db(Db::new()?))
    }

    pub fn from_db(db: Db) -> Self {
        Templates { conn: db.conn }
    }

    /// Validates and stores a new, non-default template.
    pub fn create(&mut self, template: &NewTemplate) -> Result<Template> {
        validate_fields(&template.name, &template.fields, Local::now().date_naive())?;

        let tx = self.conn.transaction()?;
        ensure_name_free(&tx, &template.name, None)?;
        let id = insert_template(&tx, template, false, Local::now().naive_local())?;
        tx.commit()?;

        tracing::debug!(id, name = %template.name, "template created");
        load_template(&self.conn, id)
    }

    pub fn get(&self, id: i64) -> Result<Template> {
        load_template(&self.conn, id)
    }

    pub fn get_by_name(&self, name: &str) -> Result<Template> {
        match template_id_by_name(&self.conn, name)? {
            Some(id) => load_template(&self.conn, id),
            None => Err(NippoError::TemplateNotFound(name.to_string())),
        }
    }

    /// Looks a template up by name, falling back to a numeric id.
    pub fn find(&self, key: &str) -> Result<Template> {
        if let Some(id) = template_id_by_name(&self.conn, key)? {
            return load_template(&self.conn, id);
        }
        match key.trim().parse::<i64>() {
            Ok(id) => load_template(&self.conn, id).map_err(|e| match e {
                NippoError::TemplateNotFound(_) => NippoError::TemplateNotFound(key.to_string()),
                other => other,
            }),
            Err(_) => Err(NippoError::TemplateNotFound(key.to_string())),
        }
    }

    pub fn get_default(&self) -> Result<Template> {
        let id: Option<i64> = self.conn.query_row(SELECT_DEFAULT_ID, [], |row| row.get(0)).optional()?;
        match id {
            Some(id) => load_template(&self.conn, id),
            None => Err(NippoError::TemplateNotFound(DEFAULT_TEMPLATE_NAME.to_string())),
        }
    }

    /// All templates, ordered by name.
    pub fn list(&self) -> Result<Vec<Template>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_IDS)?;
        let ids = stmt
            .query_map([], |row| row.get::<_, i64>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        ids.into_iter().map(|id| load_template(&self.conn, id)).collect()
    }

    /// Applies `changes` in order and stores the result.
    ///
    /// The changed template is validated as a whole before anything is
    /// written. Reports bound to it keep their stored data; keys the
    /// template no longer defines are dropped on each report's next update.
    pub fn update(&mut self, id: i64, changes: &[TemplateChange]) -> Result<Template> {
        let current = load_template(&self.conn, id)?;
        let (name, description, fields) = apply_changes(&current, changes)?;
        validate_fields(&name, &fields, Local::now().date_naive())?;

        let tx = self.conn.transaction()?;
        ensure_name_free(&tx, &name, Some(id))?;
        tx.execute(UPDATE_TEMPLATE, params![id, name, description, Local::now().naive_local()])?;
        tx.execute(DELETE_FIELDS, params![id])?;
        insert_fields(&tx, id, &fields)?;
        tx.commit()?;

        tracing::debug!(id, changes = changes.len(), "template updated");
        load_template(&self.conn, id)
    }

    /// Deletes a template.
    ///
    /// Fails with `TemplateInUse` while reports reference it, unless
    /// `cascade` is set; then those reports are deleted in the same
    /// transaction. Returns the number of reports deleted.
    pub fn delete(&mut self, id: i64, cascade: bool) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let template = load_template(&tx, id)?;
        let reports = count_reports(&tx, id)?;
        if reports > 0 && !cascade {
            return Err(NippoError::TemplateInUse {
                template: template.name,
                reports,
            });
        }

        let removed = tx.execute(DELETE_TEMPLATE_REPORTS, params![id])?;
        tx.execute(DELETE_TEMPLATE, params![id])?;
        tx.commit()?;

        if template.is_default {
            tracing::warn!(id, name = %template.name, "default template deleted; no default remains");
        }
        tracing::debug!(id, removed, "template deleted");
        Ok(removed)
    }

    /// Makes `id` the only default template.
    pub fn set_default(&mut self, id: i64) -> Result<Template> {
        let tx = self.conn.transaction()?;
        load_template(&tx, id)?;
        tx.execute(CLEAR_DEFAULT, [])?;
        tx.execute(SET_DEFAULT, params![id, Local::now().naive_local()])?;
        tx.commit()?;

        tracing::debug!(id, "default template switched");
        load_template(&self.conn, id)
    }

    pub fn report_count(&self, id: i64) -> Result<usize> {
        count_reports(&self.conn, id)
    }
}

/// Raw `template_fields` row, converted after the statement is done.
struct FieldRow {
    name: String,
    label: String,
    field_type: String,
    required: bool,
    default_value: Option<String>,
    options: Option<String>,
    placeholder: Option<String>,
    max_length: Option<i64>,
    order: i32,
}

impl FieldRow {
    fn into_field(self) -> Result<TemplateField> {
        let field_type: FieldType = self.field_type.parse().map_err(NippoError::CorruptRecord)?;
        let options = self.options.as_deref().map(serde_json::from_str::<Vec<String>>).transpose()?;
        let max_length = match self.max_length {
            Some(n) => Some(usize::try_from(n).map_err(|_| NippoError::CorruptRecord(format!("field '{}' has max_length {}", self.name, n)))?),
            None => None,
        };
        let kind = FieldKind::from_parts(&self.name, field_type, options, max_length)?;

        Ok(TemplateField {
            name: self.name,
            label: self.label,
            kind,
            required: self.required,
            default_value: self.default_value,
            placeholder: self.placeholder,
            order: self.order,
        })
    }
}

fn load_fields(conn: &Connection, template_id: i64) -> Result<Vec<TemplateField>> {
    let mut stmt = conn.prepare(SELECT_FIELDS)?;
    let rows = stmt
        .query_map(params![template_id], |row| {
            Ok(FieldRow {
                name: row.get(0)?,
                label: row.get(1)?,
                field_type: row.get(2)?,
                required: row.get(3)?,
                default_value: row.get(4)?,
                options: row.get(5)?,
                placeholder: row.get(6)?,
                max_length: row.get(7)?,
                order: row.get(8)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    rows.into_iter().map(FieldRow::into_field).collect()
}

/// Loads a template with its fields; shared with the report store.
pub(crate) fn load_template(conn: &Connection, id: i64) -> Result<Template> {
    let row = conn
        .query_row(SELECT_TEMPLATE, params![id], |row| {
            Ok((
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, bool>(3)?,
                row.get::<_, NaiveDateTime>(4)?,
                row.get::<_, NaiveDateTime>(5)?,
            ))
        })
        .optional()?;
    let Some((name, description, is_default, created_at, updated_at)) = row else {
        return Err(NippoError::TemplateNotFound(id.to_string()));
    };

    Ok(Template {
        id,
        name,
        description,
        fields: load_fields(conn, id)?,
        is_default,
        created_at,
        updated_at,
    })
}

/// Inserts a template and its fields without validating them.
pub(crate) fn insert_template(conn: &Connection, template: &NewTemplate, is_default: bool, now: NaiveDateTime) -> Result<i64> {
    conn.execute(INSERT_TEMPLATE, params![template.name, template.description, is_default, now])?;
    let id = conn.last_insert_rowid();
    insert_fields(conn, id, &template.fields)?;
    Ok(id)
}

fn insert_fields(conn: &Connection, template_id: i64, fields: &[TemplateField]) -> Result<()> {
    let mut stmt = conn.prepare(INSERT_FIELD)?;
    for field in fields {
        let options = field.kind.options().map(serde_json::to_string).transpose()?;
        let max_length = field.kind.max_length().and_then(|n| i64::try_from(n).ok());
        stmt.execute(params![
            template_id,
            field.name,
            field.label,
            field.field_type().as_str(),
            field.required,
            field.default_value,
            options,
            field.placeholder,
            max_length,
            field.order,
        ])?;
    }
    Ok(())
}

fn template_id_by_name(conn: &Connection, name: &str) -> Result<Option<i64>> {
    Ok(conn.query_row(SELECT_ID_BY_NAME, params![name], |row| row.get(0)).optional()?)
}

fn ensure_name_free(conn: &Connection, name: &str, owner: Option<i64>) -> Result<()> {
    match template_id_by_name(conn, name)? {
        Some(id) if Some(id) != owner => Err(NippoError::TemplateNameTaken(name.to_string())),
        _ => Ok(()),
    }
}

fn count_reports(conn: &Connection, template_id: i64) -> Result<usize> {
    let count: i64 = conn.query_row(COUNT_TEMPLATE_REPORTS, params![template_id], |row| row.get(0))?;
    Ok(usize::try_from(count).unwrap_or(0))
}
