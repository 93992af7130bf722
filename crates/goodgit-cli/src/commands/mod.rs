pub mod add;
pub mod clone;
pub mod config;
pub mod list;
pub mod remove;
pub mod set;

use std::path::Path;

use clap::Subcommand;
use goodgit_bind::BindingEngine;
use goodgit_core::config::GoodgitConfig;
use goodgit_git::SystemGit;
use goodgit_ssh::{SshConfigFile, SshKeyDir};
use goodgit_store::JsonFileStore;

use crate::prompt;

#[derive(Subcommand)]
pub enum Command {
    /// Register a new identity
    Add(add::AddArgs),
    /// List registered identities
    #[command(visible_alias = "ls")]
    List,
    /// Remove an identity
    Remove(remove::RemoveArgs),
    /// Clone a repository as one of the identities
    Clone(clone::CloneArgs),
    /// Bind the current repository to an identity
    Set {
        #[command(subcommand)]
        action: set::SetAction,
    },
    /// Initialize and show goodgit configuration
    Config {
        #[command(subcommand)]
        action: config::ConfigAction,
    },
}

pub async fn run(cmd: Command) -> anyhow::Result<()> {
    match cmd {
        Command::Add(args) => add::run(args),
        Command::List => list::run(),
        Command::Remove(args) => remove::run(args),
        Command::Clone(args) => clone::run(args).await,
        Command::Set { action } => set::run(action).await,
        Command::Config { action } => config::run(action),
    }
}

/// On-disk collaborators wired from the config file.
pub struct Services {
    pub config: GoodgitConfig,
    store: JsonFileStore,
    registry: SshConfigFile,
    keys: SshKeyDir,
    git: SystemGit,
}

impl Services {
    pub fn load() -> anyhow::Result<Self> {
        let config = GoodgitConfig::load()?;
        Ok(Self::from_config(config)?)
    }

    pub fn from_config(config: GoodgitConfig) -> Result<Self, goodgit_core::error::GoodgitError> {
        Ok(Self {
            store: JsonFileStore::new(config.store_path()?),
            registry: SshConfigFile::new(config.ssh_config_path()?, config.canonical_host.clone()),
            keys: SshKeyDir::new(config.ssh_dir()?),
            git: SystemGit,
            config,
        })
    }

    pub fn store_file(&self) -> &Path {
        self.store.path()
    }

    pub fn ssh_config_file(&self) -> &Path {
        self.registry.path()
    }

    pub fn engine(&self) -> BindingEngine<'_> {
        BindingEngine::new(
            &self.store,
            &self.registry,
            &self.keys,
            &self.git,
            self.config.canonical_host.clone(),
        )
        .with_remote(self.config.remote.clone())
        .with_strict_keys(self.config.strict_keys)
    }
}

/// Alias given on the command line, or one picked from the registered identities.
pub fn choose_alias(engine: &BindingEngine<'_>, given: Option<String>) -> anyhow::Result<String> {
    if let Some(alias) = given {
        return Ok(alias);
    }
    let aliases: Vec<String> = engine
        .identities()?
        .into_iter()
        .map(|identity| identity.ssh_key)
        .collect();
    if aliases.is_empty() {
        anyhow::bail!("No identities registered. Use `goodgit add` to register one.");
    }
    Ok(prompt::select("Select the user", &aliases)?)
}
