use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Configurable keyboard bindings mapping actions to key codes.
pub struct KeybindingOptions {
    /// Maps action → key string (e.g. `ToggleProjection` → `"KeyO"`).
    pub bindings: HashMap<KeyAction, String>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            (KeyAction::ToggleProjection, "KeyO".into()),
            (KeyAction::ToggleDebug, "KeyB".into()),
            (KeyAction::FrameContent, "KeyF".into()),
        ]);
        Self { bindings }
    }
}

impl KeybindingOptions {
    /// Look up the action for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.bindings
            .iter()
            .find(|(_, bound)| bound.as_str() == key)
            .map(|(action, _)| *action)
    }

    /// A key string bound to more than one action, if any.
    #[must_use]
    pub fn duplicate_key(&self) -> Option<&str> {
        let mut seen = HashSet::with_capacity(self.bindings.len());
        let mut keys: Vec<&str> =
            self.bindings.values().map(String::as_str).collect();
        keys.sort_unstable();
        keys.into_iter().find(|key| !seen.insert(*key))
    }
}
