use clap::Args;

use super::Services;
use crate::{prompt, style};

#[derive(Args)]
pub struct RemoveArgs {
    /// Alias to remove (prompted if omitted)
    alias: Option<String>,
}

pub fn run(args: RemoveArgs) -> anyhow::Result<()> {
    let services = Services::load()?;
    let engine = services.engine();

    let alias = match args.alias {
        Some(a) => a,
        None => {
            let aliases: Vec<String> = engine
                .identities()?
                .into_iter()
                .map(|identity| identity.ssh_key)
                .collect();
            if aliases.is_empty() {
                println!("{}", style::warn("No identities registered."));
                return Ok(());
            }
            prompt::select("Select the user to remove", &aliases)?
        }
    };

    let removed = engine.unregister(&alias)?;
    println!(
        "{}",
        style::success(&format!(
            "Identity '{}' removed ({} <{}>)",
            removed.ssh_key, removed.username, removed.email
        ))
    );
    Ok(())
}
