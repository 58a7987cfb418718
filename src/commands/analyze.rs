use super::parse_cli_date;
use crate::{
    db::reports::Reports,
    libs::{messages::Message, view::View},
    msg_info, msg_print,
};
use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    #[arg(long, value_parser = parse_cli_date)]
    from: Option<NaiveDate>,

    #[arg(long, value_parser = parse_cli_date)]
    to: Option<NaiveDate>,
}

pub fn cmd(args: AnalyzeArgs) -> Result<()> {
    let stats = Reports::new()?.statistics(args.from, args.to)?;
    if stats.total_reports == 0 {
        msg_info!(Message::NoReportsFound);
        return Ok(());
    }

    let period = match (stats.date_from, stats.date_to) {
        (None, None) => Message::PeriodAll.to_string(),
        (from, to) => format!(
            "{} .. {}",
            from.map(|d| d.to_string()).unwrap_or_default(),
            to.map(|d| d.to_string()).unwrap_or_default()
        ),
    };
    msg_print!(Message::StatisticsHeader(period), true);
    View::statistics(&stats)?;

    Ok(())
}
