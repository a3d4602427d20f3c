//! Configuration for the Verifier

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Verifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Maximum time for a single verification call (seconds)
    pub verification_timeout_secs: u64,
}

impl VerifierConfig {
    /// Get the verification timeout as a Duration
    pub fn verification_timeout(&self) -> Duration {
        Duration::from_secs(self.verification_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.verification_timeout_secs == 0 {
            return Err("verification_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            verification_timeout_secs: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(VerifierConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = VerifierConfig::from_toml("verification_timeout_secs = 0").unwrap();
        assert!(config.validate().is_err());
    }
}
