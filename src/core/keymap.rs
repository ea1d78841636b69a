//! Key alias table: raw key identifiers → KeyAction
//!
//! Single-character keys match case-insensitively ("R" == "r").
//! Named keys ("ArrowLeft", "PageDown", ...) match exactly.

use lazy_static::lazy_static;
use std::collections::HashMap;
use crate::types::{KeyAction, KeyMapError};

lazy_static! {
    // =========================================================================
    // Default bindings: keyboard letters plus presenter-remote keys.
    // Red: r, Left, Down, PageDown. Green: g, Right, Up, PageUp.
    // =========================================================================
    static ref DEFAULT_BINDINGS: HashMap<&'static str, KeyAction> = {
        let mut m = HashMap::new();
        for key in ["r", "ArrowLeft", "ArrowDown", "PageDown"] {
            m.insert(key, KeyAction::ActivateRed);
        }
        for key in ["g", "ArrowRight", "ArrowUp", "PageUp"] {
            m.insert(key, KeyAction::ActivateGreen);
        }
        m
    };
}

/// Immutable alias table, built once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    bindings: HashMap<String, KeyAction>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            bindings: DEFAULT_BINDINGS
                .iter()
                .map(|(key, action)| (key.to_string(), *action))
                .collect(),
        }
    }
}

impl KeyMap {
    /// Build a map from the two configured key sets
    pub fn from_sets<R, G>(red: R, green: G) -> Result<Self, KeyMapError>
    where
        R: IntoIterator,
        R::Item: AsRef<str>,
        G: IntoIterator,
        G::Item: AsRef<str>,
    {
        let mut bindings = HashMap::new();

        for key in red {
            let key = canonical_binding(key.as_ref())?;
            bindings.insert(key, KeyAction::ActivateRed);
        }
        for key in green {
            let key = canonical_binding(key.as_ref())?;
            if bindings.get(&key) == Some(&KeyAction::ActivateRed) {
                return Err(KeyMapError::Conflict(key));
            }
            bindings.insert(key, KeyAction::ActivateGreen);
        }

        Ok(Self { bindings })
    }

    /// Resolve a raw key identifier
    pub fn resolve(&self, raw: &str) -> KeyAction {
        let key = normalize(raw);
        self.bindings
            .get(&*key)
            .copied()
            .unwrap_or(KeyAction::Ignored)
    }

    /// Does the host default handling need to be suppressed for this key?
    ///
    /// True for every key in the table, whatever the debounce gate decides.
    pub fn suppresses(&self, raw: &str) -> bool {
        self.resolve(raw) != KeyAction::Ignored
    }

    /// Keys bound to an action, sorted
    pub fn keys_for(&self, action: KeyAction) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(k, _)| k.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Fold single-character keys to lowercase; leave named keys alone
fn normalize(raw: &str) -> std::borrow::Cow<'_, str> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_uppercase() => c.to_lowercase().collect::<String>().into(),
        _ => raw.into(),
    }
}

fn canonical_binding(raw: &str) -> Result<String, KeyMapError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(KeyMapError::EmptyKey);
    }
    Ok(normalize(trimmed).into_owned())
}
