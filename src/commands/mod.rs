//! Command-line interface.
//!
//! Each subcommand lives in its own module with a clap `Args` struct and a
//! `cmd` entry point. Handlers return `anyhow::Result`; typed
//! [`NippoError`](crate::libs::error::NippoError)s pass through unchanged so
//! the binary can map them to exit codes.

pub mod analyze;
pub mod clipboard;
pub mod config;
pub mod create;
pub mod delete;
pub mod edit;
pub mod export;
pub mod init;
pub mod list;
pub mod monthly;
pub mod project;
pub mod show;
pub mod template;

use crate::libs::field::{parse_date, DateDefault};
use crate::libs::report::ReportData;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Create the configuration file and database")]
    Init(init::InitArgs),
    #[command(about = "Create a report")]
    Create(create::CreateArgs),
    #[command(about = "Edit a report")]
    Edit(edit::EditArgs),
    #[command(about = "List reports")]
    List(list::ListArgs),
    #[command(about = "Show one report")]
    Show(show::ShowArgs),
    #[command(about = "Delete a report")]
    Delete(delete::DeleteArgs),
    #[command(about = "Export reports to CSV, TSV, Markdown or text")]
    Export(export::ExportArgs),
    #[command(about = "Monthly summary by project")]
    Monthly(monthly::MonthlyArgs),
    #[command(about = "Manage templates")]
    Template(template::TemplateArgs),
    #[command(about = "Manage projects")]
    Project(project::ProjectArgs),
    #[command(about = "Report statistics")]
    Analyze(analyze::AnalyzeArgs),
    #[command(about = "Show or change configuration")]
    Config(config::ConfigArgs),
    #[command(about = "Copy text or a report to the clipboard")]
    Copy(clipboard::CopyArgs),
    #[command(about = "Print the clipboard contents")]
    Paste(clipboard::PasteArgs),
}

#[derive(Debug, Parser)]
#[command(name = "smart-nippo", author, version, about = "Template-driven daily work reports", long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> anyhow::Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Create(args) => create::cmd(args),
            Commands::Edit(args) => edit::cmd(args),
            Commands::List(args) => list::cmd(args),
            Commands::Show(args) => show::cmd(args),
            Commands::Delete(args) => delete::cmd(args),
            Commands::Export(args) => export::cmd(args),
            Commands::Monthly(args) => monthly::cmd(args),
            Commands::Template(args) => template::cmd(args),
            Commands::Project(args) => project::cmd(args),
            Commands::Analyze(args) => analyze::cmd(args),
            Commands::Config(args) => config::cmd(args),
            Commands::Copy(args) => clipboard::copy(args),
            Commands::Paste(args) => clipboard::paste(args),
        }
    }
}

/// Parses a `name=value` pair given with `--set`.
pub(crate) fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim().to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{}'", raw)),
    }
}

/// Parses a CLI date: `YYYY-MM-DD` or `today`/`yesterday`/`tomorrow`.
pub(crate) fn parse_cli_date(raw: &str) -> Result<NaiveDate, String> {
    if let Some(token) = DateDefault::parse(raw) {
        return Ok(token.resolve(Local::now().date_naive()));
    }
    parse_date(raw).ok_or_else(|| format!("expected YYYY-MM-DD or today/yesterday/tomorrow, got '{}'", raw))
}

/// Parses a `YYYY-MM` month.
pub(crate) fn parse_month(raw: &str) -> Result<(i32, u32), String> {
    let invalid = || format!("expected YYYY-MM, got '{}'", raw);
    let (year, month) = raw.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

pub(crate) fn assignments_to_data(assignments: &[(String, String)]) -> ReportData {
    assignments.iter().map(|(name, value)| (name.as_str(), value.as_str())).collect()
}

