//! Key set configuration
//!
//! The only configurable thing is which keys mean red and which mean green.
//!
//! ```toml
//! red = ["r", "ArrowLeft", "PageDown"]
//! green = ["g", "ArrowRight", "PageUp"]
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use crate::core::keymap::KeyMap;
use crate::types::{ConfigError, KeyAction};

/// The two key sets
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct KeySets {
    #[serde(default)]
    pub red: Vec<String>,
    #[serde(default)]
    pub green: Vec<String>,
}

impl KeySets {
    /// Sets of the default table
    pub fn defaults() -> Self {
        let map = KeyMap::default();
        Self {
            red: owned(map.keys_for(KeyAction::ActivateRed)),
            green: owned(map.keys_for(KeyAction::ActivateGreen)),
        }
    }

    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overlay command-line keys. A non-empty CLI set replaces the file's.
    pub fn merge(mut self, red: &[String], green: &[String]) -> Self {
        if !red.is_empty() {
            self.red = red.to_vec();
        }
        if !green.is_empty() {
            self.green = green.to_vec();
        }
        self
    }

    /// Either set left empty falls back to the default keys for that color
    pub fn build(self) -> Result<KeyMap, ConfigError> {
        let defaults = Self::defaults();
        let red = if self.red.is_empty() { defaults.red } else { self.red };
        let green = if self.green.is_empty() { defaults.green } else { self.green };
        Ok(KeyMap::from_sets(red, green)?)
    }
}

fn owned(keys: Vec<&str>) -> Vec<String> {
    keys.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KeyMapError;
    use std::io::Write;

    #[test]
    fn test_empty_sets_build_default_map() {
        let map = KeySets::default().build().unwrap();
        assert_eq!(map, KeyMap::default());
    }

    #[test]
    fn test_load_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "red = [\"b\", \"Escape\"]").unwrap();
        writeln!(file, "green = [\"n\"]").unwrap();

        let sets = KeySets::load(file.path()).unwrap();
        assert_eq!(sets.red, vec!["b", "Escape"]);

        let map = sets.build().unwrap();
        assert_eq!(map.resolve("B"), KeyAction::ActivateRed);
        assert_eq!(map.resolve("n"), KeyAction::ActivateGreen);
        assert_eq!(map.resolve("r"), KeyAction::Ignored);
    }

    #[test]
    fn test_page_keys_match_defaults() {
        let sets: KeySets = toml::from_str(
            "red = [\"r\", \"ArrowLeft\", \"PageDown\"]\ngreen = [\"g\", \"ArrowRight\", \"PageUp\"]",
        )
        .unwrap();
        let map = sets.build().unwrap();
        let defaults = KeyMap::default();
        for key in ["r", "ArrowLeft", "PageDown", "g", "ArrowRight", "PageUp"] {
            assert_eq!(map.resolve(key), defaults.resolve(key), "{}", key);
        }
    }

    #[test]
    fn test_only_one_set_configured() {
        let map = KeySets::default().merge(&["x".to_string()], &[]).build().unwrap();
        assert_eq!(map.resolve("x"), KeyAction::ActivateRed);
        assert_eq!(map.resolve("r"), KeyAction::Ignored);
        assert_eq!(map.resolve("PageUp"), KeyAction::ActivateGreen);
    }

    #[test]
    fn test_cli_overrides_file() {
        let sets = KeySets {
            red: vec!["a".to_string()],
            green: vec!["b".to_string()],
        }
        .merge(&[], &["c".to_string()]);
        assert_eq!(sets.red, vec!["a"]);
        assert_eq!(sets.green, vec!["c"]);
    }

    #[test]
    fn test_conflict_is_reported() {
        let sets = KeySets {
            red: vec!["ArrowUp".to_string()],
            green: vec![],
        };
        // default green keys include ArrowUp
        let err = sets.build().unwrap_err();
        assert!(matches!(err, ConfigError::KeyMap(KeyMapError::Conflict(k)) if k == "ArrowUp"));
    }

    #[test]
    fn test_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "red = r").unwrap();
        assert!(matches!(KeySets::load(file.path()), Err(ConfigError::Parse { .. })));
    }
}
