//! Localization lookup used by field derivation

use std::collections::HashMap;

/// Read-only label lookup
pub trait Localization: Send + Sync {
    /// Translate `key` for `module`, `None` when no string is known
    fn translate(&self, key: &str, module: &str) -> Option<String>;
}

/// Map-backed strings: module strings override application strings
#[derive(Debug, Clone, Default)]
pub struct LanguageStrings {
    app: HashMap<String, String>,
    modules: HashMap<String, HashMap<String, String>>,
}

impl LanguageStrings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_app_string(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.app.insert(key.into(), value.into());
        self
    }

    pub fn with_module_string(
        mut self,
        module: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.modules
            .entry(module.into())
            .or_default()
            .insert(key.into(), value.into());
        self
    }
}

impl Localization for LanguageStrings {
    fn translate(&self, key: &str, module: &str) -> Option<String> {
        self.modules
            .get(module)
            .and_then(|strings| strings.get(key))
            .or_else(|| self.app.get(key))
            .cloned()
    }
}
