//! SQLite persistence.
//!
//! Each store owns its own connection, opened through [`db::Db`], which
//! also applies pending migrations. Stores validate before they write and
//! run every mutation in a single transaction.
//!
//! ```rust,no_run
//! use smart_nippo::db::{reports::Reports, templates::Templates};
//! use smart_nippo::libs::report::ReportData;
//!
//! let templates = Templates::new()?;
//! let template = templates.get_default()?;
//!
//! let mut reports = Reports::new()?;
//! let data: ReportData = [("date", "2024-01-15"), ("project", "Alpha"), ("content", "did work")]
//!     .into_iter()
//!     .collect();
//! let report = reports.create(template.id, &data)?;
//! # Ok::<(), smart_nippo::libs::error::NippoError>(())
//! ```

/// Connection setup.
pub mod db;

/// Versioned schema migrations and the seeded default template.
pub mod migrations;

/// Project labels.
pub mod projects;

/// Report create/update/delete, search and aggregation.
pub mod reports;

/// Template and field definitions.
pub mod templates;
