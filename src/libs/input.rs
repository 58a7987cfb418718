//! Interactive collection of report values.
//!
//! [`collect_report_data`] walks a template's fields in order and asks a
//! [`FieldPrompter`] for each raw value. The prompter only presents; the
//! report store validates everything it receives. A cancelled prompt aborts
//! the whole collection with `NippoError::Cancelled`, so nothing is written.

use crate::libs::error::{NippoError, Result};
use crate::libs::field::{nearest_grid_index, parse_date, parse_time, time_grid, DateDefault, FieldKind, TemplateField, DATE_FORMAT};
use crate::libs::messages::Message;
use crate::libs::report::ReportData;
use crate::libs::template::Template;
use crate::msg_print;
use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Editor, Input, Select};
use std::io;

/// Source of raw field values.
pub trait FieldPrompter {
    /// Asks for one field. `current` is the stored value when editing, or
    /// the resolved default when creating. `Ok(None)` means cancelled.
    fn prompt(&mut self, field: &TemplateField, current: Option<&str>) -> Result<Option<String>>;
}

/// Prompts for every field of `template`.
///
/// With `existing` set (editing) the stored values are offered as the
/// starting point, otherwise each field's default is.
pub fn collect_report_data(
    template: &Template,
    prompter: &mut dyn FieldPrompter,
    existing: Option<&ReportData>,
    today: NaiveDate,
) -> Result<ReportData> {
    let mut data = ReportData::new();
    for field in &template.fields {
        let current = match existing.and_then(|d| d.get(&field.name)) {
            Some(value) => Some(value.to_string()),
            None => field.resolved_default(today)?,
        };
        match prompter.prompt(field, current.as_deref())? {
            Some(value) => data.insert(&field.name, value),
            None => return Err(NippoError::Cancelled),
        }
    }
    Ok(data)
}

/// Non-interactive counterpart of [`collect_report_data`].
///
/// Blank or absent required fields take the default the prompt would have
/// offered. Optional fields are left to the validator.
pub fn fill_required_defaults(template: &Template, preset: &ReportData, today: NaiveDate) -> Result<ReportData> {
    let mut data = preset.clone();
    for field in template.fields.iter().filter(|f| f.required) {
        if data.get(&field.name).is_some_and(|v| !v.trim().is_empty()) {
            continue;
        }
        if let Some(default) = field.resolved_default(today)? {
            data.insert(&field.name, default);
        }
    }
    Ok(data)
}

/// Terminal prompter built on `dialoguer`.
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
    editor_command: String,
    today: NaiveDate,
}

impl DialoguerPrompter {
    pub fn new(editor_command: &str, today: NaiveDate) -> Self {
        Self {
            theme: ColorfulTheme::default(),
            editor_command: editor_command.to_string(),
            today,
        }
    }

    fn label(field: &TemplateField) -> String {
        if field.required {
            format!("{} *", field.label)
        } else {
            field.label.clone()
        }
    }

    fn prompt_date(&self, field: &TemplateField, current: Option<&str>) -> Result<Option<String>> {
        let today = self.today;
        let mut choices: Vec<(String, Option<NaiveDate>)> = Vec::new();
        if let Some(date) = current.and_then(parse_date) {
            choices.push((Message::DateChoiceCurrent(date.format(DATE_FORMAT).to_string()).to_string(), Some(date)));
        }
        for token in [DateDefault::Today, DateDefault::Yesterday, DateDefault::Tomorrow] {
            let date = token.resolve(today);
            choices.push((Message::DateChoice(token, date.format(DATE_FORMAT).to_string()).to_string(), Some(date)));
        }
        choices.push((Message::ChoiceCustom.to_string(), None));

        let items: Vec<&str> = choices.iter().map(|(label, _)| label.as_str()).collect();
        let Some(index) = Select::with_theme(&self.theme)
            .with_prompt(Self::label(field))
            .items(&items)
            .default(0)
            .interact_opt()
            .map_err(prompt_error)?
        else {
            return Ok(None);
        };

        match choices[index].1 {
            Some(date) => Ok(Some(date.format(DATE_FORMAT).to_string())),
            None => self.prompt_line(field, current),
        }
    }

    fn prompt_time(&self, field: &TemplateField, current: Option<&str>) -> Result<Option<String>> {
        let mut items = time_grid();
        items.push(Message::ChoiceCustom.to_string());
        let default = current.and_then(parse_time).map(nearest_grid_index).unwrap_or(9 * 4);

        let Some(index) = Select::with_theme(&self.theme)
            .with_prompt(Self::label(field))
            .items(&items)
            .default(default)
            .max_length(12)
            .interact_opt()
            .map_err(prompt_error)?
        else {
            return Ok(None);
        };

        if index + 1 == items.len() {
            return self.prompt_line(field, current);
        }
        Ok(Some(items[index].clone()))
    }

    /// Free single-line entry, checked against the field contract as typed.
    fn prompt_line(&self, field: &TemplateField, current: Option<&str>) -> Result<Option<String>> {
        let today = self.today;
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(Self::label(field))
            .allow_empty(!field.required);
        if let Some(value) = current {
            input = input.with_initial_text(value);
        } else if let Some(placeholder) = &field.placeholder {
            input = input.with_prompt(format!("{} ({})", Self::label(field), placeholder));
        }

        let value = input
            .validate_with(|value: &String| -> std::result::Result<(), String> {
                if value.trim().is_empty() {
                    return Ok(());
                }
                field.normalize(value, today).map(|_| ()).map_err(|e| e.to_string())
            })
            .interact_text()
            .map_err(prompt_error)?;
        Ok(Some(value))
    }

    fn prompt_memo(&self, field: &TemplateField, current: Option<&str>) -> Result<Option<String>> {
        msg_print!(Message::EditorOpening(Self::label(field), self.editor_command.clone()));
        if let (None, Some(placeholder)) = (current, &field.placeholder) {
            msg_print!(placeholder);
        }

        Editor::new()
            .executable(&self.editor_command)
            .extension(".md")
            .edit(current.unwrap_or(""))
            .map_err(prompt_error)
    }

    fn prompt_selection(&self, field: &TemplateField, options: &[String], current: Option<&str>) -> Result<Option<String>> {
        let default = current.and_then(|c| options.iter().position(|o| o == c)).unwrap_or(0);
        let index = Select::with_theme(&self.theme)
            .with_prompt(Self::label(field))
            .items(options)
            .default(default)
            .interact_opt()
            .map_err(prompt_error)?;
        Ok(index.map(|i| options[i].clone()))
    }
}

impl FieldPrompter for DialoguerPrompter {
    fn prompt(&mut self, field: &TemplateField, current: Option<&str>) -> Result<Option<String>> {
        match &field.kind {
            FieldKind::Date => self.prompt_date(field, current),
            FieldKind::Time => self.prompt_time(field, current),
            FieldKind::Text { .. } => self.prompt_line(field, current),
            FieldKind::Memo => self.prompt_memo(field, current),
            FieldKind::Selection { options } => self.prompt_selection(field, options, current),
        }
    }
}

/// Maps a failed `dialoguer` prompt or editor session.
pub fn prompt_error(e: dialoguer::Error) -> NippoError {
    match e {
        dialoguer::Error::IO(e) => io_error(e),
    }
}

/// Ctrl-C surfaces as `Interrupted` and counts as a cancel.
pub fn io_error(e: io::Error) -> NippoError {
    if e.kind() == io::ErrorKind::Interrupted {
        NippoError::Cancelled
    } else {
        NippoError::Io(e)
    }
}
