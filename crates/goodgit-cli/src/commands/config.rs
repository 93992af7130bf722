use clap::Subcommand;
use goodgit_core::config::GoodgitConfig;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Write ~/.goodgit.toml with default settings
    Init,
    /// Show current configuration and resolved paths
    Show,
}

pub fn run(action: ConfigAction) -> anyhow::Result<()> {
    match action {
        ConfigAction::Init => {
            let path = GoodgitConfig::init()?;
            println!("Initialized goodgit config at {}", path.display());
            Ok(())
        }
        ConfigAction::Show => {
            let config = GoodgitConfig::load()?;
            let toml_str = toml::to_string_pretty(&config)?;
            println!("{toml_str}");
            println!("# store:      {}", config.store_path()?.display());
            println!("# ssh keys:   {}", config.ssh_dir()?.display());
            println!("# ssh config: {}", config.ssh_config_path()?.display());
            Ok(())
        }
    }
}
