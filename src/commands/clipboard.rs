use crate::{
    db::{db::Db, reports::Reports},
    libs::{clipboard, config::Config, messages::Message},
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{ArgGroup, Args};

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("source").required(true).args(["text", "report"])))]
pub struct CopyArgs {
    /// Text to copy
    text: Option<String>,

    /// Copy a report in the plain-text export layout
    #[arg(short, long, value_name = "ID")]
    report: Option<i64>,

    #[arg(short, long, default_value = "")]
    prefix: String,

    #[arg(short, long, default_value = "")]
    suffix: String,

    /// Format string; `{text}` is replaced with the copied text
    #[arg(short, long)]
    template: Option<String>,

    /// Print what was copied
    #[arg(long)]
    show: bool,

    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Args)]
pub struct PasteArgs {}

pub fn copy(args: CopyArgs) -> Result<()> {
    let text = match (args.text, args.report) {
        (_, Some(id)) => {
            let reports = Reports::from_db(Db::open(&Config::read()?.database_path())?);
            let report = reports.get(id)?;
            let templates = reports.templates_for(std::slice::from_ref(&report))?;
            clipboard::report_text(&report, &templates)?
        }
        (Some(text), None) => text,
        (None, None) => String::new(),
    };

    let text = clipboard::decorate(&text, &args.prefix, &args.suffix, args.template.as_deref());
    clipboard::copy(&text)?;

    if !args.quiet {
        msg_success!(Message::ClipboardCopied(text.chars().count()));
    }
    if args.show {
        msg_print!(text);
    }
    Ok(())
}

pub fn paste(_args: PasteArgs) -> Result<()> {
    let text = clipboard::paste()?;
    if text.is_empty() {
        msg_info!(Message::ClipboardEmpty);
        return Ok(());
    }
    msg_print!(Message::ClipboardContents(text.chars().count()), true);
    msg_print!(text);
    Ok(())
}
