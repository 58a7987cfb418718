use crate::{
    db::{db::Db, reports::Reports, templates::Templates},
    libs::{config::Config, view::View},
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Report id
    id: i64,
}

pub fn cmd(args: ShowArgs) -> Result<()> {
    let config = Config::read()?;
    let path = config.database_path();
    let reports = Reports::from_db(Db::open(&path)?);
    let templates = Templates::from_db(Db::open(&path)?);

    let report = reports.get(args.id)?;
    let template = templates.get(report.template_id)?;
    View::report(&report, &template, &config)?;

    Ok(())
}
