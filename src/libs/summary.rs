//! Aggregations over report sets: the monthly summary and report statistics.
//!
//! Both take reports already ordered by the query engine together with an
//! index of their templates, so first-seen order is deterministic.

use crate::libs::report::Report;
use crate::libs::template::Template;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

/// Group label for reports without a project value.
pub const UNASSIGNED_PROJECT: &str = "未分類";

pub type TemplateIndex = HashMap<i64, Template>;

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSummary {
    pub name: String,
    pub report_count: usize,
    pub minutes: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub report_count: usize,
    pub day_count: usize,
    pub total_minutes: i64,
    /// In order of first appearance.
    pub projects: Vec<ProjectSummary>,
    /// Non-empty issues values, deduplicated, in order of first appearance.
    pub issues: Vec<String>,
}

impl MonthlySummary {
    pub fn build(year: i32, month: u32, reports: &[Report], templates: &TemplateIndex) -> Self {
        let mut projects: Vec<ProjectSummary> = Vec::new();
        let mut issues: Vec<String> = Vec::new();
        let mut days: HashSet<NaiveDate> = HashSet::new();

        for report in reports {
            days.insert(report.date);
            let template = templates.get(&report.template_id);

            let name = template
                .and_then(|t| report.project_name(t))
                .unwrap_or(UNASSIGNED_PROJECT)
                .to_string();
            match projects.iter_mut().find(|p| p.name == name) {
                Some(group) => {
                    group.report_count += 1;
                    group.minutes += report.work_minutes;
                }
                None => projects.push(ProjectSummary {
                    name,
                    report_count: 1,
                    minutes: report.work_minutes,
                }),
            }

            let Some(template) = template else { continue };
            for field in template.fields.iter().filter(|f| f.is_issues_like()) {
                if let Some(value) = report.get(&field.name).map(str::trim).filter(|v| !v.is_empty()) {
                    if !issues.iter().any(|i| i == value) {
                        issues.push(value.to_string());
                    }
                }
            }
        }

        Self {
            year,
            month,
            report_count: reports.len(),
            day_count: days.len(),
            total_minutes: projects.iter().map(|p| p.minutes).sum(),
            projects,
            issues,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub total_reports: usize,
    pub total_minutes: i64,
    /// (template name, report count), most used first.
    pub templates: Vec<(String, usize)>,
    /// (project name, report count), most used first.
    pub projects: Vec<(String, usize)>,
}

impl Statistics {
    pub fn build(date_from: Option<NaiveDate>, date_to: Option<NaiveDate>, reports: &[Report], templates: &TemplateIndex) -> Self {
        let mut by_template: Vec<(String, usize)> = Vec::new();
        let mut by_project: Vec<(String, usize)> = Vec::new();

        for report in reports {
            let template = templates.get(&report.template_id);
            let template_name = template.map(|t| t.name.clone()).unwrap_or_else(|| format!("#{}", report.template_id));
            let project_name = template
                .and_then(|t| report.project_name(t))
                .unwrap_or(UNASSIGNED_PROJECT)
                .to_string();
            bump(&mut by_template, template_name);
            bump(&mut by_project, project_name);
        }

        Self {
            date_from,
            date_to,
            total_reports: reports.len(),
            total_minutes: reports.iter().map(|r| r.work_minutes).sum(),
            templates: ranked(by_template),
            projects: ranked(by_project),
        }
    }
}

fn bump(counts: &mut Vec<(String, usize)>, key: String) {
    match counts.iter_mut().find(|(name, _)| *name == key) {
        Some((_, count)) => *count += 1,
        None => counts.push((key, 1)),
    }
}

fn ranked(mut counts: Vec<(String, usize)>) -> Vec<(String, usize)> {
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}
