//! Storage and per-unit lock configuration.

use serde::{Deserialize, Serialize};

fn default_root() -> String {
    "workspace".to_string()
}

const fn default_wait_timeout_secs() -> u64 {
    30
}

const fn default_retry_delay_ms() -> u64 {
    250
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Root directory holding `draft/`, `approved/`, `.locks/` and `trail/`.
    #[serde(default = "default_root")]
    pub root: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LockConfig {
    /// How long to wait for another pass on the same unit before failing it.
    #[serde(default = "default_wait_timeout_secs")]
    pub wait_timeout_secs: u64,

    /// Delay between lock acquisition attempts.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            wait_timeout_secs: default_wait_timeout_secs(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        assert_eq!(StorageConfig::default().root, "workspace");
        let lock = LockConfig::default();
        assert_eq!(lock.wait_timeout_secs, 30);
        assert_eq!(lock.retry_delay_ms, 250);
    }
}
