use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Contents of the optional `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Editor used when `$EDITOR` is unset
    #[serde(default)]
    pub editor: Option<String>,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Theme overrides, e.g. `highlight = "#FB4196"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}
