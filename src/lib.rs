//! # Smart Nippo
//!
//! A command-line utility for writing daily work reports (日報) from
//! user-defined templates.
//!
//! ## Features
//!
//! - **Templates**: Typed, ordered fields with defaults, options and limits
//! - **Validated reports**: Required fields, selections and a 24h cap per day
//! - **Search**: Filter by date, month, project, keyword or template
//! - **Summaries**: Monthly hours per project and overall statistics
//! - **Export**: CSV, TSV, Markdown and plain text
//!
//! ## Usage
//!
//! ```rust,no_run
//! use smart_nippo::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
