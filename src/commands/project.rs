use crate::{
    db::{db::Db, projects::Projects, templates::Templates},
    libs::{config::Config, messages::Message, project::NewProject, view::View},
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct ProjectArgs {
    #[command(subcommand)]
    command: ProjectCommand,
}

#[derive(Debug, Subcommand)]
enum ProjectCommand {
    /// List projects
    List {
        /// Include deactivated projects
        #[arg(short, long)]
        all: bool,
    },
    /// Add a project
    Add {
        name: String,
        #[arg(short, long)]
        description: Option<String>,
        /// Template used for this project's reports
        #[arg(short, long)]
        template: Option<String>,
    },
    /// Hide a project from the active list
    Deactivate { name: String },
    /// Delete a project
    Delete { name: String },
}

pub fn cmd(args: ProjectArgs) -> Result<()> {
    let path = Config::read()?.database_path();
    let mut projects = Projects::from_db(Db::open(&path)?);

    match args.command {
        ProjectCommand::List { all } => {
            let list = projects.list(all)?;
            if list.is_empty() {
                msg_info!(Message::NoProjectsFound);
                return Ok(());
            }
            let templates = Templates::from_db(Db::open(&path)?).list()?;
            msg_print!(Message::ProjectListHeader, true);
            View::projects(&list, &templates)?;
        }
        ProjectCommand::Add {
            name,
            description,
            template,
        } => {
            let mut project = NewProject::new(&name);
            if let Some(description) = description {
                project = project.with_description(&description);
            }
            if let Some(key) = template {
                let template = Templates::from_db(Db::open(&path)?).find(&key)?;
                project = project.with_template(template.id);
            }
            let created = projects.create(&project)?;
            msg_success!(Message::ProjectCreated(created.name));
        }
        ProjectCommand::Deactivate { name } => {
            let project = projects.deactivate(&name)?;
            msg_success!(Message::ProjectDeactivated(project.name));
        }
        ProjectCommand::Delete { name } => {
            projects.delete(&name)?;
            msg_success!(Message::ProjectDeleted(name));
        }
    }

    Ok(())
}
