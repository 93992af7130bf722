use serde::{Deserialize, Serialize};

use crate::error::GoodgitError;

/// Prefix shared by private key file names in the SSH directory.
pub const KEY_PREFIX: &str = "id_";

/// Suffix of public key files, which never name an alias.
pub const PUBLIC_KEY_SUFFIX: &str = ".pub";

/// A registered identity, keyed in the store by its SSH key alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
    pub email: String,
    /// Alias of the SSH key, i.e. the file name after `id_`.
    pub ssh_key: String,
}

impl Identity {
    /// Build an identity, rejecting blank fields.
    ///
    /// The alias is written into `Host` and `IdentityFile` lines of the SSH
    /// config, so it may not contain whitespace, control characters or `/`.
    pub fn new(alias: &str, username: &str, email: &str) -> Result<Self, GoodgitError> {
        let alias = non_blank(alias, "alias")?;
        if alias
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || c == '/')
        {
            return Err(GoodgitError::InvalidIdentity { field: "alias" });
        }
        let username = non_blank(username, "username")?;
        let email = non_blank(email, "email")?;
        Ok(Self {
            username,
            email,
            ssh_key: alias,
        })
    }

    pub fn alias(&self) -> &str {
        &self.ssh_key
    }

    /// Path of the private key, as written into the SSH config.
    pub fn identity_file(&self) -> String {
        format!("~/.ssh/{KEY_PREFIX}{}", self.ssh_key)
    }
}

fn non_blank(value: &str, field: &'static str) -> Result<String, GoodgitError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GoodgitError::InvalidIdentity { field });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_fields() {
        let id = Identity::new(" work ", "Jane Doe ", " jane@corp.com").unwrap();
        assert_eq!(id.alias(), "work");
        assert_eq!(id.username, "Jane Doe");
        assert_eq!(id.email, "jane@corp.com");
        assert_eq!(id.identity_file(), "~/.ssh/id_work");
    }

    #[test]
    fn test_new_rejects_blank_fields() {
        assert!(matches!(
            Identity::new("work", "   ", "jane@corp.com"),
            Err(GoodgitError::InvalidIdentity { field: "username" })
        ));
        assert!(matches!(
            Identity::new("work", "Jane", ""),
            Err(GoodgitError::InvalidIdentity { field: "email" })
        ));
        assert!(matches!(
            Identity::new("", "Jane", "jane@corp.com"),
            Err(GoodgitError::InvalidIdentity { field: "alias" })
        ));
    }

    #[test]
    fn test_alias_must_be_a_single_host_label() {
        for alias in ["my work", "work\nHost *", "keys/work", "a\tb", "a\u{7}b"] {
            assert!(
                matches!(
                    Identity::new(alias, "Jane", "jane@corp.com"),
                    Err(GoodgitError::InvalidIdentity { field: "alias" })
                ),
                "{alias:?} was accepted"
            );
        }
        assert!(Identity::new("work-2024_old", "Jane", "jane@corp.com").is_ok());
    }

    #[test]
    fn test_email_is_not_rfc_validated() {
        let id = Identity::new("oss", "jd", "not-an-email").unwrap();
        assert_eq!(id.email, "not-an-email");
    }
}
