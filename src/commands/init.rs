use crate::{
    db::{db::Db, migrations::get_db_version, templates::Templates},
    libs::{config::Config, messages::Message},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Run the interactive configuration walkthrough
    #[arg(short, long)]
    interactive: bool,
}

pub fn cmd(args: InitArgs) -> Result<()> {
    let config_path = Config::path()?;
    let config = if args.interactive {
        let config = Config::init()?;
        config.save()?;
        msg_success!(Message::ConfigSaved);
        config
    } else if config_path.exists() {
        msg_info!(Message::ConfigExists(config_path.display().to_string()));
        Config::read()?
    } else {
        let config = Config::default();
        config.save()?;
        msg_success!(Message::ConfigCreated(config_path.display().to_string()));
        config
    };

    let db_path = config.database_path();
    let db = Db::open(&db_path)?;
    let version = get_db_version(&db.conn)?;
    msg_success!(Message::DatabaseReady(db_path.display().to_string(), version));

    let templates = Templates::from_db(db);
    if let Ok(template) = templates.get_default() {
        msg_info!(Message::DefaultTemplateIs(template.name));
    }

    Ok(())
}
