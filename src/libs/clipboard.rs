//! System clipboard access for report text.

use crate::libs::error::{NippoError, Result};
use crate::libs::export::{ExportFormat, Exporter};
use crate::libs::report::Report;
use crate::libs::summary::TemplateIndex;
use arboard::Clipboard;
use std::slice;

/// Substitutes `text` for every `{text}` in `template` when one is given,
/// otherwise wraps it in `prefix` and `suffix`.
pub fn decorate(text: &str, prefix: &str, suffix: &str, template: Option<&str>) -> String {
    match template.filter(|t| !t.is_empty()) {
        Some(template) => template.replace("{text}", text),
        None => format!("{}{}{}", prefix, text, suffix),
    }
}

/// One report in the plain-text export layout.
pub fn report_text(report: &Report, templates: &TemplateIndex) -> Result<String> {
    Exporter::new(ExportFormat::Text).render(slice::from_ref(report), templates)
}

pub fn copy(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().map_err(clipboard_error)?;
    clipboard.set_text(text).map_err(clipboard_error)
}

/// Current clipboard text; empty when it holds nothing textual.
pub fn paste() -> Result<String> {
    let mut clipboard = Clipboard::new().map_err(clipboard_error)?;
    match clipboard.get_text() {
        Ok(text) => Ok(text),
        Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
        Err(e) => Err(clipboard_error(e)),
    }
}

fn clipboard_error(e: arboard::Error) -> NippoError {
    NippoError::Clipboard(e.to_string())
}
