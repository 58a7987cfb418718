use crate::{
    db::reports::Reports,
    libs::{input::prompt_error, messages::Message},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Report id
    id: i64,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub fn cmd(args: DeleteArgs) -> Result<()> {
    let mut reports = Reports::new()?;
    let report = reports.get(args.id)?;

    if !args.yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteReport(report.id, report.date.to_string()).to_string())
            .default(false)
            .interact()
            .map_err(prompt_error)?;
        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    reports.delete(report.id)?;
    msg_success!(Message::ReportDeleted(report.id));
    Ok(())
}
