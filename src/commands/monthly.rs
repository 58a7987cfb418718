use super::parse_month;
use crate::{
    db::reports::Reports,
    libs::{messages::Message, view::View},
    msg_info, msg_print,
};
use anyhow::Result;
use chrono::{Datelike, Local};
use clap::Args;

#[derive(Debug, Args)]
pub struct MonthlyArgs {
    /// Month as YYYY-MM; the current month when omitted
    #[arg(value_parser = parse_month)]
    month: Option<(i32, u32)>,
}

pub fn cmd(args: MonthlyArgs) -> Result<()> {
    let today = Local::now().date_naive();
    let (year, month) = args.month.unwrap_or((today.year(), today.month()));

    let summary = Reports::new()?.aggregate_monthly(year, month)?;
    if summary.report_count == 0 {
        msg_info!(Message::NoReportsForMonth(year, month));
        return Ok(());
    }

    msg_print!(Message::MonthlyHeader(year, month, summary.day_count), true);
    View::monthly(&summary)?;

    Ok(())
}
