//! Core library: the template and report model, validation, queries,
//! summaries, export and terminal presentation.

pub mod clipboard;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod export;
pub mod field;
pub mod formatter;
pub mod input;
pub mod messages;
pub mod project;
pub mod query;
pub mod report;
pub mod summary;
pub mod template;
pub mod view;
