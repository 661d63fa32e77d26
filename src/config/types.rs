//! Configuration types for the payroll engine.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::DeductionKind;
use crate::store::retry::RetryPolicy;

/// The full engine configuration.
///
/// Loaded from a YAML file; see [`EngineConfig::load`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Retry policy for transient store failures.
    #[serde(default)]
    pub retry: RetryConfig,
    /// Bootstrap data applied to an empty store.
    #[serde(default)]
    pub seed: SeedConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The address the API binds to, e.g. "0.0.0.0:8080".
    pub bind_addr: String,
}

/// Retry policy settings for transient store failures.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Delay before the first retry, in milliseconds; doubles per retry.
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 50,
        }
    }
}

impl RetryConfig {
    /// Converts to the store-level retry policy.
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            base_delay: Duration::from_millis(self.base_delay_ms),
        }
    }
}

/// Bootstrap data applied once to an empty store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedConfig {
    /// The initial administrator account, if any.
    #[serde(default)]
    pub admin: Option<AdminSeed>,
    /// Departments to create.
    #[serde(default)]
    pub departments: Vec<String>,
    /// Deduction rules to create, in catalog order.
    #[serde(default)]
    pub deductions: Vec<DeductionSeed>,
}

/// The initial administrator, created before any other record so the
/// system has an actor able to onboard everyone else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSeed {
    /// Full name.
    pub name: String,
    /// Account email.
    pub email: String,
    /// Initial account password. Local bootstrap only.
    pub password: String,
}

/// One seeded deduction rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionSeed {
    /// Rule name.
    pub name: String,
    /// How the amount is interpreted.
    #[serde(rename = "type")]
    pub kind: DeductionKind,
    /// Currency amount or percentage.
    pub amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_retry_config_converts_to_policy() {
        let config = RetryConfig {
            max_attempts: 5,
            base_delay_ms: 20,
        };
        let policy = config.policy();
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.base_delay, Duration::from_millis(20));
    }

    #[test]
    fn test_minimal_yaml_uses_defaults() {
        let yaml = "server:\n  bind_addr: \"127.0.0.1:9000\"\n";
        let config: EngineConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.server.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.retry.max_attempts, 3);
        assert!(config.seed.admin.is_none());
        assert!(config.seed.departments.is_empty());
        assert!(config.seed.deductions.is_empty());
    }

    #[test]
    fn test_full_yaml_parses() {
        let yaml = r#"
server:
  bind_addr: "0.0.0.0:8080"
retry:
  max_attempts: 4
  base_delay_ms: 25
seed:
  admin:
    name: "System Administrator"
    email: "admin@example.com"
    password: "change-me"
  departments:
    - Engineering
    - Human Resources
  deductions:
    - name: "Dental Insurance"
      type: Fixed
      amount: "25.00"
    - name: "401(k) Contribution"
      type: Percentage
      amount: "5"
"#;
        let config: EngineConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.retry.max_attempts, 4);
        let seed = config.seed;
        assert_eq!(seed.departments.len(), 2);
        assert_eq!(seed.deductions.len(), 2);
        assert_eq!(seed.deductions[0].kind, DeductionKind::Fixed);
        assert_eq!(
            seed.deductions[0].amount,
            Decimal::from_str("25.00").unwrap()
        );
        assert_eq!(seed.admin.unwrap().email, "admin@example.com");
    }
}
