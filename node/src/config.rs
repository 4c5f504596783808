//! Runtime configuration loading for the node binary.

use std::path::Path;

use neo_config::NodeConfig;
use serde::{Deserialize, Serialize};

/// Top-level configuration document read from a TOML file on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub node: NodeConfig,
}

impl RuntimeConfig {
    /// Loads configuration from a TOML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;
        let config: RuntimeConfig = toml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("failed to parse config file {}: {e}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_testnet() {
        let config = RuntimeConfig::default();
        assert!(!config.node.consensus_enabled);
    }

    #[test]
    fn loads_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("node.toml");
        std::fs::write(&path, "[node]\nconsensus_enabled = true\nnetwork_type = \"TestNet\"\n\n[node.consensus_config]\nenabled = true\nview_timeout_ms = 5000\nblock_time_ms = 15000\n").unwrap();

        let config = RuntimeConfig::load(&path).unwrap();
        assert!(config.node.consensus_enabled);
    }
}
