use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use goodgit_core::error::GoodgitError;
use tokio::process::Command;

/// Result of a git command execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

impl GitOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            success: true,
        }
    }

    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            success: false,
        }
    }
}

/// Runs the `git` executable.
#[async_trait]
pub trait GitRunner: Send + Sync {
    /// Run a git command in `dir`. A non-zero exit is reported in the output, not as an error.
    async fn run(&self, dir: &Path, args: &[String]) -> Result<GitOutput, GoodgitError>;

    /// Run a git command in `dir`, returning an error if it fails.
    async fn run_ok(&self, dir: &Path, args: &[String]) -> Result<String, GoodgitError> {
        let out = self.run(dir, args).await?;
        if !out.success {
            return Err(GoodgitError::SubprocessFailure {
                command: format!("git {}", args.join(" ")),
                message: out.stderr.trim().to_string(),
            });
        }
        Ok(out.stdout)
    }
}

/// Runs the system `git` binary found on `PATH`.
#[derive(Debug, Default)]
pub struct SystemGit;

#[async_trait]
impl GitRunner for SystemGit {
    async fn run(&self, dir: &Path, args: &[String]) -> Result<GitOutput, GoodgitError> {
        tracing::debug!(dir = %dir.display(), "git {}", args.join(" "));
        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .await
            .map_err(|e| GoodgitError::SubprocessFailure {
                command: format!("git {}", args.join(" ")),
                message: format!("failed to run git: {e}"),
            })?;

        Ok(GitOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
        })
    }
}

fn owned(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}

/// Clone `url` with per-clone config overrides.
///
/// `config` entries become `--config key=value`, which git writes into the new
/// repository's local config only.
pub async fn clone(
    git: &dyn GitRunner,
    dir: &Path,
    url: &str,
    destination: Option<&str>,
    options: &[String],
    config: &[(&str, &str)],
) -> Result<(), GoodgitError> {
    let mut args = vec!["clone".to_string()];
    for (key, value) in config {
        args.push("--config".to_string());
        args.push(format!("{key}={value}"));
    }
    args.extend(options.iter().cloned());
    args.push(url.to_string());
    if let Some(dest) = destination {
        args.push(dest.to_string());
    }
    git.run_ok(dir, &args).await?;
    Ok(())
}

/// URL of `remote`, or `None` if the remote does not exist.
pub async fn remote_url(
    git: &dyn GitRunner,
    dir: &Path,
    remote: &str,
) -> Result<Option<String>, GoodgitError> {
    let out = git.run(dir, &owned(&["remote", "get-url", remote])).await?;
    let url = out.stdout.trim();
    if !out.success || url.is_empty() {
        return Ok(None);
    }
    Ok(Some(url.to_string()))
}

/// Add a remote.
pub async fn add_remote(
    git: &dyn GitRunner,
    dir: &Path,
    remote: &str,
    url: &str,
) -> Result<(), GoodgitError> {
    git.run_ok(dir, &owned(&["remote", "add", remote, url])).await?;
    Ok(())
}

/// Point an existing remote at a new URL.
pub async fn set_remote_url(
    git: &dyn GitRunner,
    dir: &Path,
    remote: &str,
    url: &str,
) -> Result<(), GoodgitError> {
    git.run_ok(dir, &owned(&["remote", "set-url", remote, url]))
        .await?;
    Ok(())
}

/// Set a key in the repository's local config.
pub async fn set_local_config(
    git: &dyn GitRunner,
    dir: &Path,
    key: &str,
    value: &str,
) -> Result<(), GoodgitError> {
    git.run_ok(dir, &owned(&["config", "--local", key, value]))
        .await?;
    Ok(())
}

/// Git runner that replays canned outputs and records every call, for testing.
///
/// Calls without a scripted response succeed with empty output.
#[derive(Default)]
pub struct ScriptedGit {
    responses: Mutex<Vec<(Vec<String>, GitOutput)>>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedGit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to `args` with `output`.
    pub fn respond(self, args: &[&str], output: GitOutput) -> Self {
        self.responses.lock().unwrap().push((owned(args), output));
        self
    }

    /// Every argument list seen so far, in order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GitRunner for ScriptedGit {
    async fn run(&self, _dir: &Path, args: &[String]) -> Result<GitOutput, GoodgitError> {
        self.calls.lock().unwrap().push(args.to_vec());
        let responses = self.responses.lock().unwrap();
        Ok(responses
            .iter()
            .find(|(expected, _)| expected.as_slice() == args)
            .map(|(_, out)| out.clone())
            .unwrap_or_else(|| GitOutput::ok("")))
    }
}
