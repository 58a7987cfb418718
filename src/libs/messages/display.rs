//! User-facing text for every [`Message`].
//!
//! All wording lives here so commands only pick a variant and its data.

use super::types::Message;
use crate::libs::field::DateDefault;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            // === REPORT MESSAGES ===
            Message::ReportCreated(id, date) => format!("Report #{} created for {}", id, date),
            Message::ReportUpdated(id) => format!("Report #{} updated", id),
            Message::ReportDeleted(id) => format!("Report #{} deleted", id),
            Message::ReportsHeader(count) => format!("Reports ({})", count),
            Message::NoReportsFound => "No reports found".to_string(),
            Message::SelectReportToEdit => "Select a report to edit".to_string(),
            Message::ConfirmDeleteReport(id, date) => format!("Delete report #{} ({})?", id, date),
            Message::StaleFieldsDropped(keys) => {
                format!("Dropped values for fields the template no longer defines: {}", keys)
            }
            Message::UsingTemplate(name) => format!("Using template '{}'", name),

            // === INPUT MESSAGES ===
            Message::DateChoiceCurrent(date) => format!("Keep {}", date),
            Message::DateChoice(token, date) => {
                let word = match token {
                    DateDefault::Today => "Today",
                    DateDefault::Yesterday => "Yesterday",
                    DateDefault::Tomorrow => "Tomorrow",
                };
                format!("{} ({})", word, date)
            }
            Message::ChoiceCustom => "Enter manually...".to_string(),
            Message::EditorOpening(label, editor) => format!("{}: opening {} (save and quit to continue)", label, editor),

            // === TEMPLATE MESSAGES ===
            Message::TemplateCreated(name) => format!("Template '{}' created", name),
            Message::TemplateDeleted(name, 0) => format!("Template '{}' deleted", name),
            Message::TemplateDeleted(name, reports) => {
                format!("Template '{}' deleted together with {} report(s)", name, reports)
            }
            Message::TemplateSetDefault(name) => format!("Template '{}' is now the default", name),
            Message::TemplateFieldAdded(field, template) => format!("Field '{}' added to template '{}'", field, template),
            Message::TemplateFieldRemoved(field, template) => {
                format!("Field '{}' removed from template '{}'", field, template)
            }
            Message::TemplateListHeader => "Templates:".to_string(),
            Message::TemplateHeader(name, description) if description.is_empty() => format!("Template '{}'", name),
            Message::TemplateHeader(name, description) => format!("Template '{}': {}", name, description),
            Message::TemplateReportCount(count) => format!("{} report(s) use this template", count),
            Message::NoTemplatesFound => "No templates found".to_string(),
            Message::NoDefaultTemplate => "No default template is set; use `template set-default`".to_string(),
            Message::DefaultTemplateIs(name) => format!("Default template: {}", name),
            Message::StaleFieldsKept(field) => {
                format!("Existing reports keep their '{}' values until they are next edited", field)
            }
            Message::ConfirmDeleteTemplate(name) => format!("Delete template '{}'?", name),
            Message::ConfirmDeleteTemplateCascade(name, reports) => {
                format!("Delete template '{}' and its {} report(s)?", name, reports)
            }

            // === PROJECT MESSAGES ===
            Message::ProjectCreated(name) => format!("Project '{}' created", name),
            Message::ProjectDeactivated(name) => format!("Project '{}' deactivated", name),
            Message::ProjectDeleted(name) => format!("Project '{}' deleted", name),
            Message::ProjectListHeader => "Projects:".to_string(),
            Message::NoProjectsFound => "No projects found".to_string(),

            // === SUMMARY MESSAGES ===
            Message::MonthlyHeader(year, month, days) => {
                format!("Monthly summary {}-{:02} ({} day(s) reported)", year, month, days)
            }
            Message::NoReportsForMonth(year, month) => format!("No reports for {}-{:02}", year, month),
            Message::StatisticsHeader(period) => format!("Statistics: {}", period),
            Message::PeriodAll => "all reports".to_string(),

            // === EXPORT MESSAGES ===
            Message::ExportCompleted(count, path) => format!("Exported {} report(s) to {}", count, path),

            // === CLIPBOARD MESSAGES ===
            Message::ClipboardCopied(chars) => format!("Copied {} character(s) to the clipboard", chars),
            Message::ClipboardContents(chars) => format!("Clipboard contents ({} characters):", chars),
            Message::ClipboardEmpty => "The clipboard is empty".to_string(),

            // === CONFIG MESSAGES ===
            Message::ConfigWizardHeader => "Configure smart-nippo (Enter keeps the current value)".to_string(),
            Message::ConfigSaved => "Configuration saved".to_string(),
            Message::ConfigCreated(path) => format!("Configuration created at {}", path),
            Message::ConfigExists(path) => format!("Using existing configuration at {}", path),
            Message::ConfigFileAt(path) => format!("Configuration file: {}", path),
            Message::ConfigValueSet(key, value) => format!("{} set to '{}'", key, value),

            // === DATABASE MESSAGES ===
            Message::DatabaseReady(path, version) => format!("Database ready at {} (schema v{})", path, version),
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),

            // === GENERAL ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
        };
        write!(f, "{}", s)
    }
}
