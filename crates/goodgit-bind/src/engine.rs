use std::path::Path;

use goodgit_core::advisory::{Advisory, Outcome};
use goodgit_core::error::GoodgitError;
use goodgit_core::models::identity::Identity;
use goodgit_git::GitRunner;
use goodgit_ssh::{HostRegistry, KeySource};
use goodgit_store::IdentityStore;

use crate::url::{is_qualified, qualify_url, unqualify_url, RewriteKind};

/// What happened to the repository remote during binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteAction {
    /// The remote did not exist and was created.
    Added,
    /// The remote existed and now points at the rewritten URL.
    Updated,
    /// The remote already routed through the alias.
    Unchanged,
}

/// Result of binding an existing repository to an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub identity: Identity,
    pub remote_url: String,
    pub remote_action: RemoteAction,
}

/// Result of cloning a repository with an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneOutcome {
    pub identity: Identity,
    pub url: String,
    /// False when the canonical host was missing and the URL went through unchanged.
    pub routed: bool,
}

/// Binds identities to SSH transport and repository config.
///
/// The identity store and the SSH config are written one after the other with
/// no rollback; a failure between the two writes leaves them out of step until
/// the operator re-runs the command.
pub struct BindingEngine<'a> {
    store: &'a dyn IdentityStore,
    registry: &'a dyn HostRegistry,
    keys: &'a dyn KeySource,
    git: &'a dyn GitRunner,
    host: String,
    remote: String,
    strict_keys: bool,
}

impl<'a> BindingEngine<'a> {
    pub fn new(
        store: &'a dyn IdentityStore,
        registry: &'a dyn HostRegistry,
        keys: &'a dyn KeySource,
        git: &'a dyn GitRunner,
        host: impl Into<String>,
    ) -> Self {
        Self {
            store,
            registry,
            keys,
            git,
            host: host.into(),
            remote: "origin".to_string(),
            strict_keys: false,
        }
    }

    /// Remote rewritten by [`Self::bind_existing_repository`].
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    /// Treat an empty key directory as fatal instead of advisory.
    pub fn with_strict_keys(mut self, strict: bool) -> Self {
        self.strict_keys = strict;
        self
    }

    pub fn canonical_host(&self) -> &str {
        &self.host
    }

    /// All registered identities, ordered by alias.
    pub fn identities(&self) -> Result<Vec<Identity>, GoodgitError> {
        Ok(self.store.load()?.into_values().collect())
    }

    /// The identity registered under `alias`.
    pub fn lookup(&self, alias: &str) -> Result<Identity, GoodgitError> {
        self.store
            .get(alias)?
            .ok_or_else(|| GoodgitError::UnknownAlias {
                alias: alias.to_string(),
            })
    }

    /// Key aliases available for registration.
    pub fn discover_keys(&self) -> Result<Outcome<Vec<String>>, GoodgitError> {
        let aliases = self.keys.aliases()?;
        if !aliases.is_empty() {
            return Ok(Outcome::clean(aliases));
        }
        let dir = self.keys.location().to_path_buf();
        if self.strict_keys {
            return Err(GoodgitError::NoKeysAvailable { dir });
        }
        tracing::warn!(dir = %dir.display(), "no SSH keys found");
        Ok(Outcome::with(aliases, Advisory::NoKeysAvailable { dir }))
    }

    /// Register an identity and route `<alias>.<host>` through its key.
    ///
    /// The alias must name a discoverable key. When no keys are discoverable at
    /// all, any alias is accepted and the outcome carries an advisory.
    pub fn register(
        &self,
        alias: &str,
        username: &str,
        email: &str,
    ) -> Result<Outcome<Identity>, GoodgitError> {
        let identity = Identity::new(alias, username, email)?;
        let alias = identity.alias().to_string();

        let keys = self.discover_keys()?;
        if !keys.value.is_empty() && !keys.value.contains(&alias) {
            return Err(GoodgitError::KeyNotFound {
                alias,
                available: keys.value,
            });
        }

        self.store.upsert(&alias, identity.clone())?;
        if let Err(e) = self.registry.add_host_alias(&alias) {
            tracing::warn!(alias = %alias, "identity saved but SSH config was not updated");
            return Err(e);
        }
        tracing::info!(alias = %alias, "registered identity");

        Ok(keys.map(|_| identity))
    }

    /// Remove an identity and its SSH host alias.
    pub fn unregister(&self, alias: &str) -> Result<Identity, GoodgitError> {
        let removed = self
            .store
            .delete(alias)?
            .ok_or_else(|| GoodgitError::UnknownAlias {
                alias: alias.to_string(),
            })?;

        if let Err(e) = self.registry.remove_host_alias(alias) {
            tracing::warn!(alias, "identity removed but SSH config still holds its host alias");
            return Err(e);
        }
        tracing::info!(alias, "unregistered identity");
        Ok(removed)
    }

    /// Clone `url` through the alias-qualified host with the identity's name and email.
    ///
    /// `options` is passed to `git clone` split on whitespace.
    pub async fn resolve_for_clone(
        &self,
        dir: &Path,
        alias: &str,
        url: &str,
        destination: Option<&str>,
        options: Option<&str>,
    ) -> Result<CloneOutcome, GoodgitError> {
        let identity = self.lookup(alias)?;

        let rewrite = qualify_url(url.trim(), alias, &self.host);
        if rewrite.kind == RewriteKind::HostMissing {
            tracing::warn!(url, host = %self.host, "host not found in URL, cloning without alias");
        }

        let options: Vec<String> = options
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_string)
            .collect();

        goodgit_git::clone(
            self.git,
            dir,
            &rewrite.url,
            destination,
            &options,
            &[
                ("user.name", identity.username.as_str()),
                ("user.email", identity.email.as_str()),
            ],
        )
        .await?;

        Ok(CloneOutcome {
            identity,
            url: rewrite.url,
            routed: rewrite.kind != RewriteKind::HostMissing,
        })
    }

    /// Point the repository in `dir` at the alias-qualified host and set its
    /// local `user.name` and `user.email`.
    ///
    /// `ask_url` is called for a URL when the repository has no remote yet.
    pub async fn bind_existing_repository<F>(
        &self,
        dir: &Path,
        alias: &str,
        ask_url: F,
    ) -> Result<Binding, GoodgitError>
    where
        F: FnOnce() -> Result<String, GoodgitError>,
    {
        let identity = self.lookup(alias)?;

        let current = goodgit_git::remote_url(self.git, dir, &self.remote).await?;
        let existed = current.is_some();
        let url = match current {
            Some(url) => url,
            None => {
                let url = ask_url()?.replace('\n', "").trim().to_string();
                if url.is_empty() {
                    return Err(GoodgitError::Prompt {
                        message: "repository URL cannot be empty".into(),
                    });
                }
                url
            }
        };

        let target = if is_qualified(&url, alias, &self.host) {
            url.clone()
        } else {
            let base = self.strip_other_alias(&url, alias)?;
            let rewrite = qualify_url(&base, alias, &self.host);
            if rewrite.kind == RewriteKind::HostMissing {
                tracing::warn!(url = %url, host = %self.host, "host not found in remote URL");
            }
            rewrite.url
        };

        let remote_action = if !existed {
            goodgit_git::add_remote(self.git, dir, &self.remote, &target).await?;
            RemoteAction::Added
        } else if target != url {
            goodgit_git::set_remote_url(self.git, dir, &self.remote, &target).await?;
            RemoteAction::Updated
        } else {
            RemoteAction::Unchanged
        };

        goodgit_git::set_local_config(self.git, dir, "user.name", &identity.username).await?;
        goodgit_git::set_local_config(self.git, dir, "user.email", &identity.email).await?;

        Ok(Binding {
            identity,
            remote_url: target,
            remote_action,
        })
    }

    /// Drop a qualification by another registered alias, so that switching
    /// identities does not stack aliases (`a.b.github.com`).
    fn strip_other_alias(&self, url: &str, alias: &str) -> Result<String, GoodgitError> {
        let others = self.store.load()?;
        Ok(others
            .keys()
            .filter(|other| other.as_str() != alias)
            .find_map(|other| unqualify_url(url, other, &self.host))
            .unwrap_or_else(|| url.to_string()))
    }
}
