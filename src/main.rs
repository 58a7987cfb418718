use smart_nippo::{
    commands::Cli,
    libs::{
        error::{exit_code, NippoError},
        messages::{macros::is_debug_mode, Message},
    },
    msg_error, msg_info,
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    if is_debug_mode() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
            .with_writer(std::io::stderr)
            .init();
    }

    match Cli::menu() {
        Ok(()) => ExitCode::from(exit_code::SUCCESS as u8),
        Err(error) => {
            if let Some(NippoError::Cancelled) = error.downcast_ref::<NippoError>() {
                msg_info!(Message::OperationCancelled);
                return ExitCode::from(exit_code::GENERAL as u8);
            }
            msg_error!(error);
            ExitCode::from(exit_code_for(&error) as u8)
        }
    }
}

fn exit_code_for(error: &anyhow::Error) -> i32 {
    if let Some(e) = error.downcast_ref::<NippoError>() {
        e.exit_code()
    } else if error.downcast_ref::<std::io::Error>().is_some() {
        exit_code::FILE_IO
    } else if error.downcast_ref::<rusqlite::Error>().is_some() {
        exit_code::DATABASE
    } else {
        exit_code::GENERAL
    }
}
