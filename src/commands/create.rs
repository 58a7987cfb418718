use super::{assignments_to_data, parse_assignment};
use crate::{
    db::{db::Db, projects::Projects, reports::Reports, templates::Templates},
    libs::{
        config::Config,
        error::NippoError,
        input::{collect_report_data, fill_required_defaults, DialoguerPrompter},
        messages::Message,
        report::reject_unknown_fields,
        template::Template,
        view::View,
    },
    msg_debug, msg_success,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Template name or id; defaults to the project's template, then the configured default
    #[arg(short, long)]
    template: Option<String>,

    /// Project name, stored in the template's project field
    #[arg(short, long)]
    project: Option<String>,

    /// Field value as NAME=VALUE; repeatable
    #[arg(short, long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    set: Vec<(String, String)>,

    /// Do not prompt; use --set values and field defaults only
    #[arg(long)]
    no_input: bool,
}

pub fn cmd(args: CreateArgs) -> Result<()> {
    let config = Config::read()?;
    let path = config.database_path();
    let templates = Templates::from_db(Db::open(&path)?);
    let projects = Projects::from_db(Db::open(&path)?);
    let mut reports = Reports::from_db(Db::open(&path)?);

    let project = args.project.clone().or_else(|| Some(config.defaults.project.clone()).filter(|p| !p.trim().is_empty()));
    let template = resolve_template(&templates, &projects, &config, args.template.as_deref(), args.project.as_deref())?;
    msg_debug!(Message::UsingTemplate(template.name.clone()));

    let mut preset = assignments_to_data(&args.set);
    if let (Some(project), Some(field)) = (project, template.project_field()) {
        if !preset.contains(&field.name) {
            preset.insert(&field.name, project);
        }
    }

    reject_unknown_fields(&template, &preset)?;

    let today = Local::now().date_naive();
    let data = if args.no_input {
        fill_required_defaults(&template, &preset, today)?
    } else {
        let mut prompter = DialoguerPrompter::new(&config.editor_command(), today);
        collect_report_data(&template, &mut prompter, Some(&preset), today)?
    };

    let report = reports.create_on(template.id, &data, today)?;
    msg_success!(Message::ReportCreated(report.id, report.date.to_string()));
    View::report(&report, &template, &config)?;

    Ok(())
}

/// Explicit template, then the project's template, then the configured
/// default name, then the flagged default.
fn resolve_template(templates: &Templates, projects: &Projects, config: &Config, explicit: Option<&str>, project: Option<&str>) -> Result<Template> {
    if let Some(key) = explicit {
        return Ok(templates.find(key)?);
    }
    if let Some(name) = project {
        match projects.get_by_name(name) {
            Ok(project) => {
                if let Some(id) = project.template_id {
                    return Ok(templates.get(id)?);
                }
            }
            Err(NippoError::ProjectNotFound(_)) => {}
            Err(e) => return Err(e.into()),
        }
    }
    let configured = config.defaults.template.trim();
    if !configured.is_empty() {
        match templates.find(configured) {
            Ok(template) => return Ok(template),
            Err(NippoError::TemplateNotFound(_)) => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(templates.get_default()?)
}
