//! Host-alias blocks in the SSH client configuration.
//!
//! Blocks are located by exact text match rather than by parsing the config
//! into stanzas. A block whose lines were reformatted or reordered by hand is
//! no longer recognized, and `add_host_alias` will append a second copy.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use goodgit_core::error::GoodgitError;
use goodgit_core::models::identity::KEY_PREFIX;

/// Routes alias-qualified hostnames to per-alias SSH keys.
pub trait HostRegistry: Send + Sync {
    /// Append the block for `alias` unless it is already present.
    /// Returns whether the config changed.
    fn add_host_alias(&self, alias: &str) -> Result<bool, GoodgitError>;

    /// Remove the block for `alias` if present. Returns whether the config changed.
    fn remove_host_alias(&self, alias: &str) -> Result<bool, GoodgitError>;
}

/// Canonical block text for `alias`, without surrounding newlines.
pub fn host_alias_block(alias: &str, host: &str) -> String {
    format!(
        "Host {alias}.{host}\nHostName {host}\nIdentitiesOnly yes\nIdentityFile ~/.ssh/{KEY_PREFIX}{alias}"
    )
}

/// Byte range of `block` inside `config`, if it occupies whole lines.
fn find_block(config: &str, block: &str) -> Option<(usize, usize)> {
    config.match_indices(block).find_map(|(start, _)| {
        let end = start + block.len();
        let starts_line = start == 0 || config.as_bytes()[start - 1] == b'\n';
        let ends_line = end == config.len() || config.as_bytes()[end] == b'\n';
        (starts_line && ends_line).then_some((start, end))
    })
}

/// Config text with the block for `alias` appended, or `None` if already present.
pub fn insert_block(config: &str, alias: &str, host: &str) -> Option<String> {
    let block = host_alias_block(alias, host);
    if find_block(config, &block).is_some() {
        return None;
    }
    Some(format!("{config}\n{block}\n"))
}

/// Config text with the block for `alias` removed, or `None` if absent.
///
/// The newline written before the block by [`insert_block`], and the one after
/// it, go with it, so that insert followed by remove restores the original text.
pub fn remove_block(config: &str, alias: &str, host: &str) -> Option<String> {
    let block = host_alias_block(alias, host);
    let (mut start, mut end) = find_block(config, &block)?;

    let bytes = config.as_bytes();
    if start > 0 && end < bytes.len() && bytes[start - 1] == b'\n' && bytes[end] == b'\n' {
        start -= 1;
        end += 1;
    }

    let mut out = String::with_capacity(config.len() - (end - start));
    out.push_str(&config[..start]);
    out.push_str(&config[end..]);
    Some(out)
}

/// Registry backed by the SSH client configuration file.
pub struct SshConfigFile {
    path: PathBuf,
    host: String,
}

impl SshConfigFile {
    pub fn new(path: impl Into<PathBuf>, host: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            host: host.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<String, GoodgitError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, content: &str) -> Result<(), GoodgitError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl HostRegistry for SshConfigFile {
    fn add_host_alias(&self, alias: &str) -> Result<bool, GoodgitError> {
        let config = self.read()?;
        match insert_block(&config, alias, &self.host) {
            Some(updated) => {
                self.write(&updated)?;
                tracing::debug!(alias, path = %self.path.display(), "added host alias");
                Ok(true)
            }
            None => {
                tracing::debug!(alias, "host alias already present");
                Ok(false)
            }
        }
    }

    fn remove_host_alias(&self, alias: &str) -> Result<bool, GoodgitError> {
        if !self.path.exists() {
            return Ok(false);
        }
        let config = self.read()?;
        match remove_block(&config, alias, &self.host) {
            Some(updated) => {
                self.write(&updated)?;
                tracing::debug!(alias, path = %self.path.display(), "removed host alias");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// In-memory registry for testing.
pub struct MemoryRegistry {
    host: String,
    config: Mutex<String>,
}

impl MemoryRegistry {
    pub fn new(host: impl Into<String>, initial: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            config: Mutex::new(initial.into()),
        }
    }

    pub fn contents(&self) -> String {
        self.config.lock().unwrap().clone()
    }
}

impl HostRegistry for MemoryRegistry {
    fn add_host_alias(&self, alias: &str) -> Result<bool, GoodgitError> {
        let mut config = self.config.lock().unwrap();
        match insert_block(&config, alias, &self.host) {
            Some(updated) => {
                *config = updated;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn remove_host_alias(&self, alias: &str) -> Result<bool, GoodgitError> {
        let mut config = self.config.lock().unwrap();
        match remove_block(&config, alias, &self.host) {
            Some(updated) => {
                *config = updated;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
