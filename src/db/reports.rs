//! Report persistence and queries.
//!
//! Create and update resolve the bound template, validate inside the same
//! transaction that writes, and store the normalised data as an ordered
//! JSON list together with the derived `report_date` and `work_minutes`
//! columns. Nothing is written when validation fails.

use super::db::Db;
use super::templates::load_template;
use crate::libs::error::{NippoError, Result};
use crate::libs::query::ReportQuery;
use crate::libs::report::{validate_report, Report, ReportData, ValidationMode, MINUTES_PER_DAY};
use crate::libs::summary::{MonthlySummary, Statistics, TemplateIndex};
use chrono::{Local, NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension, Row};

const INSERT_REPORT: &str = "INSERT INTO reports (template_id, report_date, work_minutes, data_json, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?5)";
const UPDATE_REPORT: &str = "UPDATE reports SET report_date = ?2, work_minutes = ?3, data_json = ?4, updated_at = ?5 WHERE id = ?1";
const DELETE_REPORT: &str = "DELETE FROM reports WHERE id = ?1";
const SELECT_REPORT: &str = "SELECT id, template_id, report_date, work_minutes, data_json, created_at, updated_at FROM reports WHERE id = ?1";
const SELECT_REPORTS: &str = "SELECT id, template_id, report_date, work_minutes, data_json, created_at, updated_at FROM reports
    WHERE (?1 IS NULL OR report_date >= ?1)
      AND (?2 IS NULL OR report_date <= ?2)
      AND (?3 IS NULL OR template_id = ?3)
    ORDER BY report_date, created_at, id";
const SELECT_RECENT: &str = "SELECT id, template_id, report_date, work_minutes, data_json, created_at, updated_at FROM reports
    ORDER BY report_date DESC, created_at DESC, id DESC LIMIT ?1";
const SUM_MINUTES_ON_DATE: &str = "SELECT COALESCE(SUM(work_minutes), 0) FROM reports WHERE report_date = ?1 AND id != ?2";

/// Result of [`Reports::update`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReportUpdate {
    pub report: Report,
    /// Stored keys the template no longer defines; removed by this update.
    pub dropped_keys: Vec<String>,
}

pub struct Reports {
    conn: Connection,
}

impl Reports {
    pub fn new() -> Result<Self> {
        Ok(Self::from_db(Db::new()?))
    }

    pub fn from_db(db: Db) -> Self {
        Reports { conn: db.conn }
    }

    pub fn create(&mut self, template_id: i64, raw: &ReportData) -> Result<Report> {
        self.create_on(template_id, raw, Local::now().date_naive())
    }

    /// Like [`Reports::create`] with an explicit current date for relative
    /// date tokens and the undated fallback.
    pub fn create_on(&mut self, template_id: i64, raw: &ReportData, today: NaiveDate) -> Result<Report> {
        let tx = self.conn.transaction()?;
        let template = load_template(&tx, template_id)?;
        let validated = validate_report(&template, raw, ValidationMode::Create, today)?;
        let date = validated.date.unwrap_or(today);
        check_work_hours(&tx, date, validated.work_minutes, None)?;

        let data_json = serde_json::to_string(&validated.data)?;
        tx.execute(
            INSERT_REPORT,
            params![template_id, date, validated.work_minutes, data_json, Local::now().naive_local()],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        tracing::debug!(id, template_id, %date, "report created");
        self.get(id)
    }

    pub fn update(&mut self, id: i64, changes: &ReportData) -> Result<ReportUpdate> {
        self.update_on(id, changes, Local::now().date_naive())
    }

    /// Overlays `changes` on the stored data and revalidates the result
    /// against the template's current fields.
    ///
    /// A blank value clears an optional field (its default applies again).
    pub fn update_on(&mut self, id: i64, changes: &ReportData, today: NaiveDate) -> Result<ReportUpdate> {
        let tx = self.conn.transaction()?;
        let existing = load_report(&tx, id)?;
        let template = load_template(&tx, existing.template_id)?;
        let merged = existing.data.merged(changes);
        let validated = validate_report(&template, &merged, ValidationMode::Update, today)?;
        let date = validated.date.unwrap_or(existing.date);
        check_work_hours(&tx, date, validated.work_minutes, Some(id))?;

        let data_json = serde_json::to_string(&validated.data)?;
        tx.execute(
            UPDATE_REPORT,
            params![id, date, validated.work_minutes, data_json, Local::now().naive_local()],
        )?;
        tx.commit()?;

        if !validated.dropped_keys.is_empty() {
            tracing::warn!(id, keys = ?validated.dropped_keys, template = %template.name, "dropped fields the template no longer defines");
        }
        tracing::debug!(id, %date, "report updated");

        Ok(ReportUpdate {
            report: self.get(id)?,
            dropped_keys: validated.dropped_keys,
        })
    }

    pub fn get(&self, id: i64) -> Result<Report> {
        load_report(&self.conn, id)
    }

    pub fn delete(&mut self, id: i64) -> Result<()> {
        let affected = self.conn.execute(DELETE_REPORT, params![id])?;
        if affected == 0 {
            return Err(NippoError::ReportNotFound(id));
        }
        tracing::debug!(id, "report deleted");
        Ok(())
    }

    /// Reports matching `query`, ordered by date, then creation time.
    pub fn search(&self, query: &ReportQuery) -> Result<Vec<Report>> {
        let candidates = self.select(query)?;
        let templates = self.templates_for(&candidates)?;

        let mut reports: Vec<Report> = candidates
            .into_iter()
            .filter(|r| templates.get(&r.template_id).map(|t| query.matches(r, t)).unwrap_or(false))
            .collect();
        if let Some(limit) = query.limit {
            reports.truncate(limit);
        }
        Ok(reports)
    }

    pub fn on_date(&self, date: NaiveDate) -> Result<Vec<Report>> {
        self.search(&ReportQuery::on(date))
    }

    /// The latest `limit` reports, newest first.
    pub fn recent(&self, limit: usize) -> Result<Vec<Report>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut stmt = self.conn.prepare(SELECT_RECENT)?;
        let rows = stmt
            .query_map(params![limit], ReportRow::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        rows.into_iter().map(ReportRow::into_report).collect()
    }

    /// Templates bound to `reports`, keyed by id.
    pub fn templates_for(&self, reports: &[Report]) -> Result<TemplateIndex> {
        let mut index = TemplateIndex::new();
        for report in reports {
            if !index.contains_key(&report.template_id) {
                index.insert(report.template_id, load_template(&self.conn, report.template_id)?);
            }
        }
        Ok(index)
    }

    pub fn aggregate_monthly(&self, year: i32, month: u32) -> Result<MonthlySummary> {
        let reports = self.search(&ReportQuery::month(year, month)?)?;
        let templates = self.templates_for(&reports)?;
        Ok(MonthlySummary::build(year, month, &reports, &templates))
    }

    pub fn statistics(&self, date_from: Option<NaiveDate>, date_to: Option<NaiveDate>) -> Result<Statistics> {
        let reports = self.search(&ReportQuery::new().between(date_from, date_to))?;
        let templates = self.templates_for(&reports)?;
        Ok(Statistics::build(date_from, date_to, &reports, &templates))
    }

    fn select(&self, query: &ReportQuery) -> Result<Vec<Report>> {
        let mut stmt = self.conn.prepare(SELECT_REPORTS)?;
        let rows = stmt
            .query_map(params![query.date_from, query.date_to, query.template_id], ReportRow::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        rows.into_iter().map(ReportRow::into_report).collect()
    }
}

struct ReportRow {
    id: i64,
    template_id: i64,
    date: NaiveDate,
    work_minutes: i64,
    data_json: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl ReportRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(ReportRow {
            id: row.get(0)?,
            template_id: row.get(1)?,
            date: row.get(2)?,
            work_minutes: row.get(3)?,
            data_json: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }

    fn into_report(self) -> Result<Report> {
        let data: ReportData = serde_json::from_str(&self.data_json)
            .map_err(|e| NippoError::CorruptRecord(format!("report {}: {}", self.id, e)))?;
        Ok(Report {
            id: self.id,
            template_id: self.template_id,
            date: self.date,
            data,
            work_minutes: self.work_minutes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn load_report(conn: &Connection, id: i64) -> Result<Report> {
    conn.query_row(SELECT_REPORT, params![id], ReportRow::from_row)
        .optional()?
        .ok_or(NippoError::ReportNotFound(id))?
        .into_report()
}

/// Fails when `minutes` plus everything else logged on `date` exceeds a day.
fn check_work_hours(conn: &Connection, date: NaiveDate, minutes: i64, exclude: Option<i64>) -> Result<()> {
    if minutes == 0 {
        return Ok(());
    }
    let others: i64 = conn.query_row(SUM_MINUTES_ON_DATE, params![date, exclude.unwrap_or(-1)], |row| row.get(0))?;
    let total = others + minutes;
    if total > MINUTES_PER_DAY {
        return Err(NippoError::WorkHoursExceeded { date, minutes: total });
    }
    Ok(())
}
