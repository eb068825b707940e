//! Machine configuration.

use crate::builder::ConfigError;
use serde::{Deserialize, Serialize};

/// Options applied by a [`MachineFactory`](crate::engine::MachineFactory)
/// to every machine it creates.
///
/// ```rust
/// use statewise::config::MachineConfig;
///
/// let config = MachineConfig::from_json(r#"{ "auto_startup": true }"#)?;
/// assert!(config.auto_startup);
///
/// assert!(!MachineConfig::from_json("{}")?.auto_startup);
/// # Ok::<(), statewise::builder::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MachineConfig {
    /// Start each machine as soon as the factory creates it.
    pub auto_startup: bool,
}

impl MachineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_auto_startup(mut self, auto_startup: bool) -> Self {
        self.auto_startup = auto_startup;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
