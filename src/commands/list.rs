use super::parse_cli_date;
use crate::{
    db::{db::Db, reports::Reports, templates::Templates},
    libs::{config::Config, messages::Message, query::ReportQuery, view::View},
    msg_info, msg_print,
};
use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only reports dated on this day
    #[arg(short, long, value_parser = parse_cli_date, conflicts_with_all = ["from", "to"])]
    date: Option<NaiveDate>,

    /// Earliest report date (inclusive)
    #[arg(long, value_parser = parse_cli_date)]
    from: Option<NaiveDate>,

    /// Latest report date (inclusive)
    #[arg(long, value_parser = parse_cli_date)]
    to: Option<NaiveDate>,

    /// Project name substring
    #[arg(short, long)]
    project: Option<String>,

    /// Keyword searched in text and memo fields
    #[arg(short, long)]
    keyword: Option<String>,

    /// Template name or id
    #[arg(short, long)]
    template: Option<String>,

    #[arg(short, long, default_value_t = 50)]
    limit: usize,
}

pub fn cmd(args: ListArgs) -> Result<()> {
    let config = Config::read()?;
    let path = config.database_path();
    let reports = Reports::from_db(Db::open(&path)?);

    let mut query = match args.date {
        Some(date) => ReportQuery::on(date),
        None => ReportQuery::new().between(args.from, args.to),
    }
    .limit(args.limit);
    if let Some(project) = &args.project {
        query = query.project(project);
    }
    if let Some(keyword) = &args.keyword {
        query = query.keyword(keyword);
    }
    if let Some(key) = &args.template {
        let templates = Templates::from_db(Db::open(&path)?);
        query = query.template(templates.find(key)?.id);
    }

    let found = reports.search(&query)?;
    if found.is_empty() {
        msg_info!(Message::NoReportsFound);
        return Ok(());
    }

    let index = reports.templates_for(&found)?;
    msg_print!(Message::ReportsHeader(found.len()), true);
    View::reports(&found, &index, &config)?;

    Ok(())
}
