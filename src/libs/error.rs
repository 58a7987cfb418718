//! Typed errors for the report engine.
//!
//! Every failure of a template, report, query or export operation surfaces
//! as a [`NippoError`]. Validation variants name the offending field so the
//! command layer can print a precise message; infrastructure variants wrap
//! the storage and file system layers.
//!
//! Command handlers work with `anyhow::Result` and the binary downcasts back
//! to `NippoError` to pick a process exit code via [`NippoError::exit_code`].

use chrono::NaiveDate;
use thiserror::Error;

/// Result alias used by the core and the database stores.
pub type Result<T> = std::result::Result<T, NippoError>;

/// Process exit codes reported by the binary.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const DATABASE: i32 = 2;
    pub const INPUT: i32 = 3;
    pub const FILE_IO: i32 = 4;
}

#[derive(Debug, Error)]
pub enum NippoError {
    #[error("field '{field}' is required")]
    RequiredFieldMissing { field: String },

    #[error("field '{field}' has an invalid value: {reason}")]
    InvalidFieldValue { field: String, reason: String },

    #[error("field '{field}' is too long ({actual} characters, maximum {max})")]
    FieldTooLong { field: String, max: usize, actual: usize },

    #[error("field '{field}' does not accept '{value}' (choose one of: {})", .options.join(", "))]
    InvalidSelection { field: String, value: String, options: Vec<String> },

    #[error("field '{field}' is not defined in template '{template}'")]
    UnknownField { field: String, template: String },

    #[error("work hours on {date} would reach {}h {:02}m, exceeding 24 hours", .minutes / 60, .minutes % 60)]
    WorkHoursExceeded { date: NaiveDate, minutes: i64 },

    #[error("invalid definition for field '{field}': {reason}")]
    InvalidFieldDefinition { field: String, reason: String },

    #[error("field name '{name}' is used more than once")]
    DuplicateFieldName { name: String },

    #[error("field order {order} is used more than once")]
    DuplicateFieldOrder { order: i32 },

    #[error("template '{0}' not found")]
    TemplateNotFound(String),

    #[error("template name '{0}' is already taken")]
    TemplateNameTaken(String),

    #[error("template '{template}' is still used by {reports} report(s)")]
    TemplateInUse { template: String, reports: usize },

    #[error("report {0} not found")]
    ReportNotFound(i64),

    #[error("project '{0}' not found")]
    ProjectNotFound(String),

    #[error("project name '{0}' is already taken")]
    ProjectNameTaken(String),

    #[error("unsupported export format '{0}' (expected csv, tsv, markdown or text)")]
    UnsupportedFormat(String),

    #[error("invalid period {year}-{month:02}")]
    InvalidPeriod { year: i32, month: u32 },

    #[error("input cancelled")]
    Cancelled,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("storage failure: {0}")]
    StorageFailure(#[from] rusqlite::Error),

    #[error("stored record is corrupted: {0}")]
    CorruptRecord(String),

    #[error("file error: {0}")]
    Io(#[from] std::io::Error),
}

impl NippoError {
    /// Whether the error was caused by user input rather than the environment.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            NippoError::RequiredFieldMissing { .. }
                | NippoError::InvalidFieldValue { .. }
                | NippoError::FieldTooLong { .. }
                | NippoError::InvalidSelection { .. }
                | NippoError::UnknownField { .. }
                | NippoError::WorkHoursExceeded { .. }
                | NippoError::InvalidFieldDefinition { .. }
                | NippoError::DuplicateFieldName { .. }
                | NippoError::DuplicateFieldOrder { .. }
                | NippoError::TemplateNameTaken(_)
                | NippoError::TemplateInUse { .. }
                | NippoError::ProjectNameTaken(_)
                | NippoError::UnsupportedFormat(_)
                | NippoError::InvalidPeriod { .. }
                | NippoError::Config(_)
        )
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            NippoError::StorageFailure(_) | NippoError::CorruptRecord(_) => exit_code::DATABASE,
            NippoError::Io(_) => exit_code::FILE_IO,
            e if e.is_validation() => exit_code::INPUT,
            _ => exit_code::GENERAL,
        }
    }
}

impl From<serde_json::Error> for NippoError {
    fn from(e: serde_json::Error) -> Self {
        NippoError::CorruptRecord(e.to_string())
    }
}
