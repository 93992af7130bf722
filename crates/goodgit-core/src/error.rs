use std::path::PathBuf;

/// Central error type for goodgit.
#[derive(Debug, thiserror::Error)]
pub enum GoodgitError {
    #[error("identity store at {} is corrupt: {message}", path.display())]
    CorruptStore { path: PathBuf, message: String },

    #[error("directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("no identity registered for alias '{alias}'")]
    UnknownAlias { alias: String },

    #[error("no SSH key found for alias '{alias}' (available: {})", available.join(", "))]
    KeyNotFound {
        alias: String,
        available: Vec<String>,
    },

    #[error("no SSH keys found in {}", dir.display())]
    NoKeysAvailable { dir: PathBuf },

    #[error("{command} failed: {message}")]
    SubprocessFailure { command: String, message: String },

    #[error("invalid identity: {field} cannot be empty")]
    InvalidIdentity { field: &'static str },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("prompt error: {message}")]
    Prompt { message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl GoodgitError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            GoodgitError::InvalidIdentity { .. }
            | GoodgitError::Config { .. }
            | GoodgitError::Prompt { .. } => 2,
            GoodgitError::CorruptStore { .. } => 3,
            GoodgitError::DirectoryNotFound { .. } => 4,
            GoodgitError::UnknownAlias { .. } | GoodgitError::KeyNotFound { .. } => 5,
            GoodgitError::NoKeysAvailable { .. } => 6,
            GoodgitError::SubprocessFailure { .. } => 7,
            GoodgitError::Io(_) | GoodgitError::Serialization(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_per_taxonomy() {
        let corrupt = GoodgitError::CorruptStore {
            path: "/tmp/x.json".into(),
            message: "eof".into(),
        };
        let missing = GoodgitError::DirectoryNotFound {
            path: "/tmp/.ssh".into(),
        };
        let unknown = GoodgitError::UnknownAlias {
            alias: "work".into(),
        };
        let no_keys = GoodgitError::NoKeysAvailable {
            dir: "/tmp/.ssh".into(),
        };
        let subprocess = GoodgitError::SubprocessFailure {
            command: "git clone".into(),
            message: "repository not found".into(),
        };

        let codes = [
            corrupt.exit_code(),
            missing.exit_code(),
            unknown.exit_code(),
            no_keys.exit_code(),
            subprocess.exit_code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            assert_ne!(*a, 0);
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_key_not_found_lists_available_keys() {
        let err = GoodgitError::KeyNotFound {
            alias: "work".into(),
            available: vec!["personal".into(), "oss".into()],
        };
        assert_eq!(
            err.to_string(),
            "no SSH key found for alias 'work' (available: personal, oss)"
        );
    }
}
