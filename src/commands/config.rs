use crate::{
    libs::{
        config::{Config, CONFIG_KEYS},
        messages::Message,
    },
    msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
    /// Print every setting
    Show,
    /// Print one setting, e.g. `editor.command`
    Get { key: String },
    /// Change one setting
    Set { key: String, value: String },
    /// Walk through every setting interactively
    Init,
}

pub fn cmd(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = Config::read()?;
            msg_print!(Message::ConfigFileAt(Config::path()?.display().to_string()), true);
            for key in CONFIG_KEYS {
                println!("{} = {}", key, config.get(key)?);
            }
        }
        ConfigCommand::Get { key } => {
            println!("{}", Config::read()?.get(&key)?);
        }
        ConfigCommand::Set { key, value } => {
            let mut config = Config::read()?;
            config.set(&key, &value)?;
            config.save()?;
            msg_success!(Message::ConfigValueSet(key, value));
        }
        ConfigCommand::Init => {
            Config::init()?.save()?;
            msg_success!(Message::ConfigSaved);
        }
    }

    Ok(())
}
