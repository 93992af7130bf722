use std::collections::HashSet;
use std::path::{Path, PathBuf};

use goodgit_core::error::GoodgitError;
use goodgit_core::models::identity::{KEY_PREFIX, PUBLIC_KEY_SUFFIX};
use walkdir::WalkDir;

/// Source of SSH key aliases available for registration.
pub trait KeySource: Send + Sync {
    /// Directory the aliases were discovered in, for diagnostics.
    fn location(&self) -> &Path;

    /// Aliases in discovery order, without duplicates.
    fn aliases(&self) -> Result<Vec<String>, GoodgitError>;
}

/// Discovers key aliases from private key files in an SSH directory.
pub struct SshKeyDir {
    dir: PathBuf,
}

impl SshKeyDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Lazily walk the directory, yielding one alias per private key file.
    ///
    /// Order follows the directory listing. Duplicates are not removed here.
    pub fn iter(&self) -> Result<impl Iterator<Item = String>, GoodgitError> {
        if !self.dir.is_dir() {
            return Err(GoodgitError::DirectoryNotFound {
                path: self.dir.clone(),
            });
        }

        let walker = WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|entry| !entry.file_type().is_dir())
            .filter_map(|entry| alias_from_file_name(&entry.file_name().to_string_lossy()));

        Ok(walker)
    }
}

impl KeySource for SshKeyDir {
    fn location(&self) -> &Path {
        &self.dir
    }

    fn aliases(&self) -> Result<Vec<String>, GoodgitError> {
        let mut seen = HashSet::new();
        let aliases: Vec<String> = self
            .iter()?
            .filter(|alias| seen.insert(alias.clone()))
            .collect();
        tracing::debug!(dir = %self.dir.display(), count = aliases.len(), "discovered SSH keys");
        Ok(aliases)
    }
}

/// Derive an alias from a key file name, e.g. `id_work` -> `work`.
pub fn alias_from_file_name(name: &str) -> Option<String> {
    if name.ends_with(PUBLIC_KEY_SUFFIX) {
        return None;
    }
    let alias = name.strip_prefix(KEY_PREFIX)?;
    if alias.is_empty() {
        return None;
    }
    Some(alias.to_string())
}

/// Fixed list of aliases for testing.
pub struct StaticKeys {
    dir: PathBuf,
    aliases: Vec<String>,
}

impl StaticKeys {
    pub fn new<I, S>(aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dir: PathBuf::from("~/.ssh"),
            aliases: aliases.into_iter().map(Into::into).collect(),
        }
    }
}

impl KeySource for StaticKeys {
    fn location(&self) -> &Path {
        &self.dir
    }

    fn aliases(&self) -> Result<Vec<String>, GoodgitError> {
        Ok(self.aliases.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_from_file_name() {
        assert_eq!(alias_from_file_name("id_work"), Some("work".to_string()));
        assert_eq!(
            alias_from_file_name("id_ed25519"),
            Some("ed25519".to_string())
        );
        assert_eq!(alias_from_file_name("id_work.pub"), None);
        assert_eq!(alias_from_file_name("known_hosts"), None);
        assert_eq!(alias_from_file_name("config"), None);
        assert_eq!(alias_from_file_name("id_"), None);
    }

    #[test]
    fn test_discovers_private_keys_only() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "id_personal",
            "id_personal.pub",
            "id_work",
            "id_work.pub",
            "config",
            "known_hosts",
        ] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        std::fs::create_dir(dir.path().join("id_backup")).unwrap();

        let mut aliases = SshKeyDir::new(dir.path()).aliases().unwrap();
        aliases.sort();
        assert_eq!(aliases, vec!["personal".to_string(), "work".to_string()]);
    }

    #[test]
    fn test_empty_directory_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("id_rsa.pub"), "").unwrap();
        assert!(SshKeyDir::new(dir.path()).aliases().unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join(".ssh");
        assert!(matches!(
            SshKeyDir::new(&missing).aliases(),
            Err(GoodgitError::DirectoryNotFound { path }) if path == missing
        ));
    }
}
