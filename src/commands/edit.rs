use super::{assignments_to_data, parse_assignment};
use crate::{
    db::{db::Db, reports::Reports, templates::Templates},
    libs::{
        config::Config,
        formatter::preview,
        input::{collect_report_data, prompt_error, DialoguerPrompter},
        messages::Message,
        view::View,
    },
    msg_info, msg_success, msg_warning,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Select};

const RECENT_LIMIT: usize = 20;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Report id; choose from recent reports when omitted
    id: Option<i64>,

    /// Field value as NAME=VALUE; repeatable
    #[arg(short, long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    set: Vec<(String, String)>,

    /// Do not prompt; apply --set values only
    #[arg(long)]
    no_input: bool,
}

pub fn cmd(args: EditArgs) -> Result<()> {
    let config = Config::read()?;
    let path = config.database_path();
    let templates = Templates::from_db(Db::open(&path)?);
    let mut reports = Reports::from_db(Db::open(&path)?);

    let id = match args.id {
        Some(id) => id,
        None => match select_recent(&reports)? {
            Some(id) => id,
            None => return Ok(()),
        },
    };

    let report = reports.get(id)?;
    let template = templates.get(report.template_id)?;
    let changes = assignments_to_data(&args.set);
    let today = Local::now().date_naive();

    let data = if args.no_input {
        changes
    } else {
        let current = report.data.merged(&changes);
        let mut prompter = DialoguerPrompter::new(&config.editor_command(), today);
        collect_report_data(&template, &mut prompter, Some(&current), today)?
    };

    let update = reports.update_on(id, &data, today)?;
    if !update.dropped_keys.is_empty() {
        msg_warning!(Message::StaleFieldsDropped(update.dropped_keys.join(", ")));
    }
    msg_success!(Message::ReportUpdated(id));
    View::report(&update.report, &template, &config)?;

    Ok(())
}

fn select_recent(reports: &Reports) -> Result<Option<i64>> {
    let recent = reports.recent(RECENT_LIMIT)?;
    if recent.is_empty() {
        msg_info!(Message::NoReportsFound);
        return Ok(None);
    }

    let index = reports.templates_for(&recent)?;
    let items: Vec<String> = recent
        .iter()
        .map(|r| {
            let project = index.get(&r.template_id).and_then(|t| r.project_name(t)).unwrap_or("");
            format!("#{} {} {}", r.id, r.date, preview(project, 30))
        })
        .collect();

    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::SelectReportToEdit.to_string())
        .items(&items)
        .default(0)
        .interact_opt()
        .map_err(prompt_error)?;

    Ok(choice.map(|i| recent[i].id))
}
