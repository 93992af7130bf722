use std::path::PathBuf;

/// A non-fatal condition raised while completing an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    /// The SSH key directory holds no recognizable private keys.
    NoKeysAvailable { dir: PathBuf },
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Advisory::NoKeysAvailable { dir } => {
                write!(f, "no SSH keys found in {}", dir.display())
            }
        }
    }
}

/// A successful result paired with the advisories raised while producing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<T> {
    pub value: T,
    pub advisories: Vec<Advisory>,
}

impl<T> Outcome<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            advisories: Vec::new(),
        }
    }

    pub fn with(value: T, advisory: Advisory) -> Self {
        Self {
            value,
            advisories: vec![advisory],
        }
    }

    pub fn is_clean(&self) -> bool {
        self.advisories.is_empty()
    }

    /// Replace the value, keeping the advisories.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            value: f(self.value),
            advisories: self.advisories,
        }
    }

    pub fn into_parts(self) -> (T, Vec<Advisory>) {
        (self.value, self.advisories)
    }
}
