//! Portal configuration

use rust_decimal::Decimal;
use serde::Deserialize;

use core_kernel::{Currency, Money};
use domain_plantation::{IncentivePolicy, PlantationError};

/// Portal configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Log level
    pub log_level: String,
    /// Currency incentives are paid in
    pub currency: Currency,
    /// Incentive per pit at 100% survival
    pub base_rate_per_pit: Decimal,
    /// Load the demo villages, farmers and claims on start
    pub seed_demo_data: bool,
    /// Entries shown by the activity command
    pub activity_feed_limit: usize,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            currency: Currency::INR,
            base_rate_per_pit: Decimal::from(domain_plantation::incentive::DEFAULT_RATE_PER_PIT),
            seed_demo_data: true,
            activity_feed_limit: 10,
        }
    }
}

impl PortalConfig {
    /// Loads configuration from `PORTAL_*` environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_environment(config::Environment::with_prefix("PORTAL"))
    }

    /// Loads configuration from an explicit environment source
    pub fn from_environment(env: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Incentive policy described by this configuration
    pub fn incentive_policy(&self) -> Result<IncentivePolicy, PlantationError> {
        IncentivePolicy::new(Money::new(self.base_rate_per_pit, self.currency))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let source = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::with_prefix("PORTAL").source(Some(source))
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = PortalConfig::from_environment(env(&[])).unwrap();
        assert_eq!(config, PortalConfig::default());
        assert_eq!(config.base_rate_per_pit, dec!(20));
        assert!(config.seed_demo_data);
    }

    #[test]
    fn test_reads_prefixed_variables() {
        let config = PortalConfig::from_environment(env(&[
            ("PORTAL_LOG_LEVEL", "debug"),
            ("PORTAL_BASE_RATE_PER_PIT", "30"),
            ("PORTAL_SEED_DEMO_DATA", "false"),
            ("PORTAL_ACTIVITY_FEED_LIMIT", "25"),
        ]))
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.base_rate_per_pit, dec!(30));
        assert!(!config.seed_demo_data);
        assert_eq!(config.activity_feed_limit, 25);
        assert_eq!(config.currency, Currency::INR);
    }

    #[test]
    fn test_incentive_policy_from_config() {
        let config = PortalConfig {
            base_rate_per_pit: dec!(30),
            ..PortalConfig::default()
        };
        let policy = config.incentive_policy().unwrap();
        assert_eq!(policy.incentive(10, None), Money::from_units(300, Currency::INR));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let config = PortalConfig {
            base_rate_per_pit: dec!(-1),
            ..PortalConfig::default()
        };
        assert!(config.incentive_policy().is_err());
    }

    #[test]
    fn test_oversized_rate_rejected_before_use() {
        let config = PortalConfig::from_environment(env(&[("PORTAL_BASE_RATE_PER_PIT", "5000000")])).unwrap();
        assert!(config.incentive_policy().unwrap_err().is_validation());

        let largest = PortalConfig {
            base_rate_per_pit: Decimal::from(domain_plantation::MAX_RATE_PER_PIT),
            ..PortalConfig::default()
        };
        let policy = largest.incentive_policy().unwrap();
        assert!(!policy.incentive(u32::MAX, Some(dec!(100))).is_negative());
    }
}
