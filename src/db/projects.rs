use super::db::Db;
use super::templates::load_template;
use crate::libs::error::{NippoError, Result};
use crate::libs::project::{NewProject, Project};
use chrono::Local;
use rusqlite::{params, Connection, OptionalExtension, Row};

const INSERT_PROJECT: &str = "INSERT INTO projects (name, description, template_id, is_active, created_at) VALUES (?1, ?2, ?3, 1, ?4)";
const SELECT_PROJECT_BY_NAME: &str = "SELECT id, name, description, template_id, is_active, created_at FROM projects WHERE name = ?1";
const SELECT_PROJECTS: &str = "SELECT id, name, description, template_id, is_active, created_at FROM projects
    WHERE (?1 = 1 OR is_active = 1) ORDER BY name";
const DEACTIVATE_PROJECT: &str = "UPDATE projects SET is_active = 0 WHERE name = ?1";
const DELETE_PROJECT: &str = "DELETE FROM projects WHERE name = ?1";

pub struct Projects {
    conn: Connection,
}

impl Projects {
    pub fn new() -> Result<Self> {
        Ok(Self::from_db(Db::new()?))
    }

    pub fn from_db(db: Db) -> Self {
        Projects { conn: db.conn }
    }

    pub fn create(&mut self, project: &NewProject) -> Result<Project> {
        let name = project.name.trim();
        if name.is_empty() {
            return Err(NippoError::InvalidFieldValue {
                field: "name".to_string(),
                reason: "project name must not be empty".to_string(),
            });
        }

        let tx = self.conn.transaction()?;
        if find_by_name(&tx, name)?.is_some() {
            return Err(NippoError::ProjectNameTaken(name.to_string()));
        }
        if let Some(template_id) = project.template_id {
            load_template(&tx, template_id)?;
        }
        tx.execute(
            INSERT_PROJECT,
            params![name, project.description, project.template_id, Local::now().naive_local()],
        )?;
        tx.commit()?;

        tracing::debug!(name, "project created");
        self.get_by_name(name)
    }

    /// Projects ordered by name; inactive ones only when `include_inactive`.
    pub fn list(&self, include_inactive: bool) -> Result<Vec<Project>> {
        let mut stmt = self.conn.prepare(SELECT_PROJECTS)?;
        let projects = stmt
            .query_map(params![include_inactive], project_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(projects)
    }

    pub fn get_by_name(&self, name: &str) -> Result<Project> {
        find_by_name(&self.conn, name.trim())?.ok_or_else(|| NippoError::ProjectNotFound(name.to_string()))
    }

    pub fn deactivate(&mut self, name: &str) -> Result<Project> {
        if self.conn.execute(DEACTIVATE_PROJECT, params![name.trim()])? == 0 {
            return Err(NippoError::ProjectNotFound(name.to_string()));
        }
        self.get_by_name(name)
    }

    pub fn delete(&mut self, name: &str) -> Result<()> {
        if self.conn.execute(DELETE_PROJECT, params![name.trim()])? == 0 {
            return Err(NippoError::ProjectNotFound(name.to_string()));
        }
        Ok(())
    }
}

fn project_from_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        template_id: row.get(3)?,
        is_active: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn find_by_name(conn: &Connection, name: &str) -> Result<Option<Project>> {
    Ok(conn.query_row(SELECT_PROJECT_BY_NAME, params![name], project_from_row).optional()?)
}
