use std::time::Duration;

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use super::{choose_alias, Services};
use crate::style;

#[derive(Args)]
pub struct CloneArgs {
    /// Repository URL, e.g. git@github.com:org/repo.git
    pub repo: String,
    /// Destination directory
    pub out: Option<String>,
    /// Extra `git clone` options, as one string
    #[arg(short, long, allow_hyphen_values = true)]
    pub options: Option<String>,
    /// Identity alias to clone as (prompted if omitted)
    #[arg(long)]
    pub user: Option<String>,
}

pub async fn run(args: CloneArgs) -> anyhow::Result<()> {
    let services = Services::load()?;
    let engine = services.engine();
    let alias = choose_alias(&engine, args.user)?;
    let cwd = std::env::current_dir()?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")?.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "),
    );
    pb.enable_steady_tick(Duration::from_millis(80));
    pb.set_message(format!("Cloning the repository with user {alias}"));

    let result = engine
        .resolve_for_clone(
            &cwd,
            &alias,
            &args.repo,
            args.out.as_deref(),
            args.options.as_deref(),
        )
        .await;

    match result {
        Ok(outcome) => {
            pb.finish_with_message(style::success("Repository cloned successfully"));
            if !outcome.routed {
                println!(
                    "{}",
                    style::warn(&format!(
                        "{} was not rewritten for {}; the default SSH key may be used",
                        outcome.url,
                        engine.canonical_host()
                    ))
                );
            }
            Ok(())
        }
        Err(e) => {
            pb.finish_and_clear();
            Err(e.into())
        }
    }
}
