use super::{parse_cli_date, parse_month};
use crate::{
    db::{db::Db, reports::Reports},
    libs::{
        config::Config,
        export::{ExportFormat, Exporter},
        messages::Message,
        query::ReportQuery,
    },
    msg_info, msg_success,
};
use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// csv, tsv, markdown or text; defaults to the configured format
    #[arg(short, long)]
    format: Option<String>,

    /// Output file; a timestamped name in the current directory when omitted
    #[arg(short, long, conflicts_with = "stdout")]
    output: Option<PathBuf>,

    /// Print to standard output instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Whole month as YYYY-MM
    #[arg(short, long, value_parser = parse_month, conflicts_with_all = ["from", "to"])]
    month: Option<(i32, u32)>,

    #[arg(long, value_parser = parse_cli_date)]
    from: Option<NaiveDate>,

    #[arg(long, value_parser = parse_cli_date)]
    to: Option<NaiveDate>,

    #[arg(short, long)]
    project: Option<String>,

    #[arg(short, long)]
    keyword: Option<String>,
}

pub fn cmd(args: ExportArgs) -> Result<()> {
    let config = Config::read()?;
    let format: ExportFormat = args.format.as_deref().unwrap_or(&config.defaults.export_format).parse()?;
    let reports = Reports::from_db(Db::open(&config.database_path())?);

    let mut query = match args.month {
        Some((year, month)) => ReportQuery::month(year, month)?,
        None => ReportQuery::new().between(args.from, args.to),
    };
    if let Some(project) = &args.project {
        query = query.project(project);
    }
    if let Some(keyword) = &args.keyword {
        query = query.keyword(keyword);
    }

    let found = reports.search(&query)?;
    let templates = reports.templates_for(&found)?;
    let exporter = Exporter::new(format);

    if args.stdout {
        print!("{}", exporter.render(&found, &templates)?);
        return Ok(());
    }

    if found.is_empty() {
        msg_info!(Message::NoReportsFound);
    }
    let path = args.output.unwrap_or_else(|| exporter.default_path());
    exporter.export_to(&found, &templates, &path)?;
    msg_success!(Message::ExportCompleted(found.len(), path.display().to_string()));

    Ok(())
}
