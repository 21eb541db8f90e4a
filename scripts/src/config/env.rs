//! Read-only snapshot of the process environment

use std::{collections::HashMap, env, sync::OnceLock};

use dotenv::dotenv;
use tracing::debug;

/// Guards the `.env` load, which must happen at most once per process
static DOTENV_LOADED: OnceLock<bool> = OnceLock::new();

/// An immutable string -> string view over the environment
#[derive(Debug, Clone, Default)]
pub struct Environment {
    /// Variables with their raw values
    vars: HashMap<String, String>,
}

impl Environment {
    /// Load the `.env` file (first call only) and snapshot the process environment
    pub fn load() -> Self {
        let loaded = *DOTENV_LOADED.get_or_init(|| dotenv().is_ok());
        debug!(dotenv_file = loaded, "Loaded environment");

        Self::from_map(env::vars().collect())
    }

    /// Build an environment from an explicit mapping
    pub fn from_map(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }

    /// Value of `key`, `None` when unset or blank
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_read_as_unset() {
        let env: Environment = [("URL", "   "), ("PRIVATE_KEY", "abc")].into_iter().collect();

        assert_eq!(env.get("URL"), None);
        assert_eq!(env.get("PRIVATE_KEY"), Some("abc"));
        assert_eq!(env.get("MISSING"), None);
    }

    #[test]
    fn load_is_repeatable() {
        // The second call must not try to re-read the .env file
        let first = Environment::load();
        let second = Environment::load();
        assert_eq!(first.get("PATH"), second.get("PATH"));
    }
}
