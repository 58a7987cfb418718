use crate::{
    db::templates::Templates,
    libs::{
        error::NippoError,
        input::prompt_error,
        field::{FieldKind, FieldType, TemplateField},
        messages::Message,
        template::{default_template, NewTemplate, TemplateChange},
        view::View,
    },
    msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct TemplateArgs {
    #[command(subcommand)]
    command: TemplateCommand,
}

#[derive(Debug, Subcommand)]
enum TemplateCommand {
    /// List templates
    List,
    /// Show a template's fields
    Show { template: String },
    /// Create a template
    Create {
        name: String,
        #[arg(short, long)]
        description: Option<String>,
        /// YAML or JSON list of field definitions
        #[arg(short, long, conflicts_with = "copy_from")]
        fields: Option<PathBuf>,
        /// Copy the fields of an existing template
        #[arg(long)]
        copy_from: Option<String>,
    },
    /// Add a field to a template
    AddField(AddFieldArgs),
    /// Remove a field from a template
    RemoveField { template: String, field: String },
    /// Delete a template
    Delete {
        template: String,
        /// Also delete every report bound to the template
        #[arg(long)]
        cascade: bool,
        #[arg(short, long)]
        yes: bool,
    },
    /// Make a template the default
    SetDefault { template: String },
}

#[derive(Debug, Args)]
struct AddFieldArgs {
    template: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    label: String,
    /// date, time, text, memo or selection
    #[arg(long = "type", value_parser = parse_field_type)]
    field_type: FieldType,
    #[arg(long)]
    required: bool,
    #[arg(long)]
    default: Option<String>,
    #[arg(long)]
    placeholder: Option<String>,
    /// Comma-separated options for a selection field
    #[arg(long, value_delimiter = ',')]
    options: Vec<String>,
    /// Character limit for a text field
    #[arg(long)]
    max_length: Option<usize>,
    /// Position; after the last field when omitted
    #[arg(long)]
    order: Option<i32>,
}

pub fn cmd(args: TemplateArgs) -> Result<()> {
    match args.command {
        TemplateCommand::List => handle_list(),
        TemplateCommand::Show { template } => handle_show(&template),
        TemplateCommand::Create {
            name,
            description,
            fields,
            copy_from,
        } => handle_create(&name, description.as_deref(), fields, copy_from.as_deref()),
        TemplateCommand::AddField(args) => handle_add_field(args),
        TemplateCommand::RemoveField { template, field } => handle_remove_field(&template, &field),
        TemplateCommand::Delete { template, cascade, yes } => handle_delete(&template, cascade, yes),
        TemplateCommand::SetDefault { template } => handle_set_default(&template),
    }
}

fn parse_field_type(raw: &str) -> Result<FieldType, String> {
    raw.parse()
}

fn handle_list() -> Result<()> {
    let templates = Templates::new()?.list()?;

    if templates.is_empty() {
        msg_info!(Message::NoTemplatesFound);
        return Ok(());
    }

    msg_print!(Message::TemplateListHeader, true);
    View::templates(&templates)?;
    Ok(())
}

fn handle_show(key: &str) -> Result<()> {
    let templates = Templates::new()?;
    let template = templates.find(key)?;

    msg_print!(Message::TemplateHeader(template.name.clone(), template.description.clone().unwrap_or_default()), true);
    View::template_fields(&template)?;
    msg_info!(Message::TemplateReportCount(templates.report_count(template.id)?));
    Ok(())
}

fn handle_create(name: &str, description: Option<&str>, fields_file: Option<PathBuf>, copy_from: Option<&str>) -> Result<()> {
    let mut templates = Templates::new()?;

    let fields = match (fields_file, copy_from) {
        (Some(path), _) => read_fields(&path)?,
        (None, Some(key)) => templates.find(key)?.fields,
        (None, None) => default_template().fields,
    };

    let template = templates.create(&NewTemplate::new(name, description, fields))?;
    msg_success!(Message::TemplateCreated(template.name.clone()));
    View::template_fields(&template)?;
    Ok(())
}

/// Field definitions in YAML (a JSON document is valid YAML too).
fn read_fields(path: &Path) -> Result<Vec<TemplateField>> {
    let content = fs::read_to_string(path).map_err(NippoError::Io)?;
    serde_yaml_ng::from_str(&content).map_err(|e| {
        NippoError::InvalidFieldDefinition {
            field: String::new(),
            reason: format!("{}: {}", path.display(), e),
        }
        .into()
    })
}

fn handle_add_field(args: AddFieldArgs) -> Result<()> {
    let mut templates = Templates::new()?;
    let template = templates.find(&args.template)?;

    let options = (!args.options.is_empty()).then(|| args.options.iter().map(|o| o.trim().to_string()).collect());
    let kind = FieldKind::from_parts(&args.name, args.field_type, options, args.max_length)?;
    let mut field = TemplateField::new(&args.name, &args.label, kind, args.order.unwrap_or_else(|| template.next_order()));
    field.required = args.required;
    field.default_value = args.default;
    field.placeholder = args.placeholder;

    let updated = templates.update(template.id, &[TemplateChange::AddField(field)])?;
    msg_success!(Message::TemplateFieldAdded(args.name, updated.name.clone()));
    View::template_fields(&updated)?;
    Ok(())
}

fn handle_remove_field(key: &str, field: &str) -> Result<()> {
    let mut templates = Templates::new()?;
    let template = templates.find(key)?;

    let updated = templates.update(template.id, &[TemplateChange::RemoveField(field.to_string())])?;
    msg_success!(Message::TemplateFieldRemoved(field.to_string(), updated.name.clone()));
    if templates.report_count(updated.id)? > 0 {
        msg_warning!(Message::StaleFieldsKept(field.to_string()));
    }
    Ok(())
}

fn handle_delete(key: &str, cascade: bool, yes: bool) -> Result<()> {
    let mut templates = Templates::new()?;
    let template = templates.find(key)?;
    let reports = templates.report_count(template.id)?;

    if !yes {
        let prompt = if cascade && reports > 0 {
            Message::ConfirmDeleteTemplateCascade(template.name.clone(), reports)
        } else {
            Message::ConfirmDeleteTemplate(template.name.clone())
        };
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt.to_string())
            .default(false)
            .interact()
            .map_err(prompt_error)?;
        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    let removed = templates.delete(template.id, cascade)?;
    msg_success!(Message::TemplateDeleted(template.name.clone(), removed));
    if template.is_default {
        msg_warning!(Message::NoDefaultTemplate);
    }
    Ok(())
}

fn handle_set_default(key: &str) -> Result<()> {
    let mut templates = Templates::new()?;
    let template = templates.find(key)?;

    let template = templates.set_default(template.id)?;
    msg_success!(Message::TemplateSetDefault(template.name));
    Ok(())
}
