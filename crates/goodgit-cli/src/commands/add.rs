use clap::Args;

use super::Services;
use crate::{prompt, style};

#[derive(Args)]
pub struct AddArgs {
    /// SSH key alias, the file name after `id_` (prompted if omitted)
    #[arg(long)]
    user: Option<String>,
    /// Git user name (prompted if omitted)
    #[arg(long)]
    username: Option<String>,
    /// Git email (prompted if omitted)
    #[arg(long)]
    email: Option<String>,
}

pub fn run(args: AddArgs) -> anyhow::Result<()> {
    let services = Services::load()?;
    let engine = services.engine();

    let (mut keys, advisories) = engine.discover_keys()?.into_parts();
    for advisory in &advisories {
        eprintln!("{}", style::warn(&advisory.to_string()));
    }

    let username = match args.username {
        Some(u) => u,
        None => prompt::input("Enter your username")?,
    };
    let email = match args.email {
        Some(e) => e,
        None => prompt::input("Enter your email")?,
    };
    let alias = match args.user {
        Some(k) => k,
        None if keys.is_empty() => prompt::input("Enter the SSH key alias (after id_)")?,
        None => {
            keys.sort();
            prompt::select("Select the SSH key", &keys)?
        }
    };

    // Advisories were reported before prompting.
    let (identity, _) = engine.register(&alias, &username, &email)?.into_parts();

    println!(
        "{}",
        style::success(&format!(
            "Identity '{}' added ({} <{}>) to {}",
            identity.ssh_key,
            identity.username,
            identity.email,
            services.store_file().display()
        ))
    );
    println!(
        "{}",
        style::dim(&format!(
            "Host {}.{} now uses {} ({})",
            identity.ssh_key,
            engine.canonical_host(),
            identity.identity_file(),
            services.ssh_config_file().display()
        ))
    );
    Ok(())
}
