//! Service configuration with TOML file support.

use agora_crypto::Pepper;
use agora_types::LedgerParams;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// Configuration for the service.
///
/// Can be loaded from a TOML file via [`ServiceConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). The pepper is the one field
/// with no default: a deployment that loses it loses every pseudonym, so
/// it must always be supplied explicitly.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Hashing pepper as 64 hex characters (32 bytes). Secret; the same
    /// value must be used for the lifetime of the deployment.
    pub pepper: String,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Ledger policy values.
    #[serde(default)]
    pub params: LedgerParams,
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ServiceConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, ServiceError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ServiceError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ServiceError> {
        toml::from_str(s).map_err(|e| ServiceError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ServiceError> {
        toml::to_string_pretty(self).map_err(|e| ServiceError::Config(e.to_string()))
    }

    /// Decode the configured pepper.
    pub fn pepper(&self) -> Result<Pepper, ServiceError> {
        let bytes = hex::decode(&self.pepper)
            .map_err(|_| ServiceError::Config("pepper is not valid hex".to_string()))?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| ServiceError::Config("pepper must be exactly 32 bytes".to_string()))?;
        Ok(Pepper::new(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogFormat;
    use std::io::Write;

    const PEPPER_HEX: &str = "0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f";

    #[test]
    fn minimal_toml_uses_defaults() {
        let toml = format!("pepper = \"{PEPPER_HEX}\"");
        let config = ServiceConfig::from_toml_str(&toml).expect("should parse");
        assert_eq!(config.log_format, "human");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.params.legal_voting_age, 18);
        assert_eq!(config.params.initial_credit_balance, 100);
        assert!(config.pepper().is_ok());
    }

    #[test]
    fn missing_pepper_is_an_error() {
        assert!(matches!(
            ServiceConfig::from_toml_str("log_level = \"debug\""),
            Err(ServiceError::Config(_))
        ));
    }

    #[test]
    fn short_pepper_rejected() {
        let config = ServiceConfig::from_toml_str("pepper = \"abcdef\"").expect("should parse");
        assert!(matches!(config.pepper(), Err(ServiceError::Config(_))));
    }

    #[test]
    fn non_hex_pepper_rejected() {
        let toml = format!("pepper = \"{}\"", "zz".repeat(32));
        let config = ServiceConfig::from_toml_str(&toml).expect("should parse");
        assert!(matches!(config.pepper(), Err(ServiceError::Config(_))));
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = format!(
            "pepper = \"{PEPPER_HEX}\"\nlog_format = \"json\"\nlog_level = \"debug\""
        );
        let config = ServiceConfig::from_toml_str(&toml).expect("should parse");
        assert_eq!(LogFormat::from_config_str(&config.log_format), LogFormat::Json);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn config_round_trips_through_toml() {
        let toml = format!("pepper = \"{PEPPER_HEX}\"");
        let config = ServiceConfig::from_toml_str(&toml).expect("should parse");
        let serialized = config.to_toml_string().expect("should serialize");
        let parsed = ServiceConfig::from_toml_str(&serialized).expect("should reparse");
        assert_eq!(parsed.pepper, config.pepper);
        assert_eq!(parsed.params.max_commit_retries, config.params.max_commit_retries);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "pepper = \"{PEPPER_HEX}\"").expect("write");
        writeln!(file, "[params]").expect("write");
        writeln!(file, "legal_voting_age = 21").expect("write");
        writeln!(file, "ceremony_ttl_secs = 300").expect("write");
        writeln!(file, "link_ttl_secs = 180").expect("write");
        writeln!(file, "reauth_window_secs = 600").expect("write");
        writeln!(file, "max_commit_retries = 8").expect("write");
        writeln!(file, "initial_credit_balance = 50").expect("write");

        let path = file.path().to_str().expect("utf-8 path");
        let config = ServiceConfig::from_toml_file(path).expect("should load");
        assert_eq!(config.params.legal_voting_age, 21);
        assert_eq!(config.params.initial_credit_balance, 50);
    }
}
