use super::config::Config;
use super::formatter::{format_date, format_minutes, preview};
use super::project::Project;
use super::report::Report;
use super::summary::{MonthlySummary, Statistics, TemplateIndex};
use super::template::Template;
use crate::libs::error::Result;
use prettytable::{row, Table};

const PREVIEW_WIDTH: usize = 40;

pub struct View {}

impl View {
    pub fn templates(templates: &[Template]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "FIELDS", "DEFAULT", "DESCRIPTION"]);
        for template in templates {
            table.add_row(row![
                template.id,
                template.name,
                template.fields.len(),
                if template.is_default { "*" } else { "" },
                template.description.as_deref().unwrap_or("")
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn template_fields(template: &Template) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ORDER", "NAME", "LABEL", "TYPE", "REQUIRED", "DEFAULT", "OPTIONS"]);
        for field in &template.fields {
            let options = match (field.kind.options(), field.kind.max_length()) {
                (Some(options), _) => options.join(", "),
                (None, Some(max)) => format!("max {}", max),
                (None, None) => String::new(),
            };
            table.add_row(row![
                field.order,
                field.name,
                field.label,
                field.field_type(),
                if field.required { "yes" } else { "" },
                field.default_value.as_deref().unwrap_or(""),
                options
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn reports(reports: &[Report], templates: &TemplateIndex, config: &Config) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "DATE", "TEMPLATE", "PROJECT", "HOURS", "SUMMARY"]);
        for report in reports {
            let template = templates.get(&report.template_id);
            let project = template.and_then(|t| report.project_name(t)).unwrap_or("");
            let summary = template
                .and_then(|t| t.fields.iter().filter(|f| f.is_searchable() && !f.is_project_like()).find_map(|f| report.get(&f.name)))
                .unwrap_or("");
            table.add_row(row![
                report.id,
                format_date(report.date, &config.display.date_format),
                template.map(|t| t.name.as_str()).unwrap_or(""),
                project,
                format_minutes(report.work_minutes),
                preview(summary, PREVIEW_WIDTH)
            ]);
        }
        table.printstd();

        Ok(())
    }

    /// Every field of one report, labelled, in template order.
    pub fn report(report: &Report, template: &Template, config: &Config) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", report.id]);
        table.add_row(row!["DATE", format_date(report.date, &config.display.date_format)]);
        table.add_row(row!["TEMPLATE", template.name]);
        for field in &template.fields {
            table.add_row(row![field.label, report.get(&field.name).unwrap_or("")]);
        }
        table.add_row(row!["HOURS", format_minutes(report.work_minutes)]);
        table.add_row(row!["UPDATED", report.updated_at.format("%Y-%m-%d %H:%M")]);
        table.printstd();

        Ok(())
    }

    pub fn monthly(summary: &MonthlySummary) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["PROJECT", "REPORTS", "HOURS"]);
        for project in &summary.projects {
            table.add_row(row![project.name, project.report_count, format_minutes(project.minutes)]);
        }
        table.add_row(row!["TOTAL", summary.report_count, format_minutes(summary.total_minutes)]);
        table.printstd();

        if !summary.issues.is_empty() {
            let mut issues = Table::new();
            issues.add_row(row!["#", "ISSUE"]);
            for (i, issue) in summary.issues.iter().enumerate() {
                issues.add_row(row![i + 1, issue]);
            }
            issues.printstd();
        }

        Ok(())
    }

    pub fn statistics(stats: &Statistics) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["REPORTS", stats.total_reports]);
        table.add_row(row!["HOURS", format_minutes(stats.total_minutes)]);
        table.printstd();

        let mut by_template = Table::new();
        by_template.add_row(row!["TEMPLATE", "REPORTS"]);
        for (name, count) in &stats.templates {
            by_template.add_row(row![name, count]);
        }
        by_template.printstd();

        let mut by_project = Table::new();
        by_project.add_row(row!["PROJECT", "REPORTS"]);
        for (name, count) in &stats.projects {
            by_project.add_row(row![name, count]);
        }
        by_project.printstd();

        Ok(())
    }

    pub fn projects(projects: &[Project], templates: &[Template]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "TEMPLATE", "ACTIVE", "DESCRIPTION"]);
        for project in projects {
            let template = project
                .template_id
                .and_then(|id| templates.iter().find(|t| t.id == id))
                .map(|t| t.name.as_str())
                .unwrap_or("");
            table.add_row(row![
                project.id,
                project.name,
                template,
                if project.is_active { "yes" } else { "no" },
                project.description.as_deref().unwrap_or("")
            ]);
        }
        table.printstd();

        Ok(())
    }
}
