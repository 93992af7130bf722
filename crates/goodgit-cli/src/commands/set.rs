use clap::Subcommand;
use goodgit_bind::RemoteAction;

use super::{choose_alias, Services};
use crate::{prompt, style};

#[derive(Subcommand)]
pub enum SetAction {
    /// Set the identity used by the current repository
    User {
        /// Identity alias (prompted if omitted)
        #[arg(long)]
        user: Option<String>,
    },
}

pub async fn run(action: SetAction) -> anyhow::Result<()> {
    match action {
        SetAction::User { user } => {
            let services = Services::load()?;
            let engine = services.engine();
            let alias = choose_alias(&engine, user)?;
            let cwd = std::env::current_dir()?;

            let binding = engine
                .bind_existing_repository(&cwd, &alias, || prompt::input("Enter the repository URL"))
                .await?;

            let remote = &services.config.remote;
            match binding.remote_action {
                RemoteAction::Added => println!("Remote '{remote}' added: {}", binding.remote_url),
                RemoteAction::Updated => println!("Remote '{remote}' set to {}", binding.remote_url),
                RemoteAction::Unchanged => {
                    println!("Remote '{remote}' already uses {}", binding.remote_url)
                }
            }
            println!(
                "{}",
                style::success(&format!(
                    "Repository now commits as {} <{}>",
                    binding.identity.username, binding.identity.email
                ))
            );
            Ok(())
        }
    }
}
