use thiserror::Error;

use crate::ledger::OverpaymentPolicy;

pub const ENV_NAME: &str = "MARKETPLACE_NAME";
pub const ENV_MAILBOX_CAPACITY: &str = "MARKETPLACE_MAILBOX_CAPACITY";
pub const ENV_OVERPAYMENT: &str = "MARKETPLACE_OVERPAYMENT";

pub const DEFAULT_NAME: &str = "Aditi's Marketplace";
pub const DEFAULT_MAILBOX_CAPACITY: usize = 32;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must not be empty")]
    EmptyName { key: &'static str },
    #[error("{key} must be a positive integer, got {value:?}")]
    InvalidCapacity { key: &'static str, value: String },
    #[error("{key} must be \"refund\" or \"exact\", got {value:?}")]
    InvalidPolicy { key: &'static str, value: String },
}

/// Settings for one marketplace instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketplaceConfig {
    /// Display name returned by the `name()` read.
    pub name: String,
    /// Bound on queued ledger requests before callers wait.
    pub mailbox_capacity: usize,
    pub overpayment_policy: OverpaymentPolicy,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
            overpayment_policy: OverpaymentPolicy::Refund,
        }
    }
}

impl MarketplaceConfig {
    /// Reads overrides from the process environment; unset variables keep
    /// their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(name) = lookup(ENV_NAME) {
            if name.trim().is_empty() {
                return Err(ConfigError::EmptyName { key: ENV_NAME });
            }
            config.name = name;
        }

        if let Some(value) = lookup(ENV_MAILBOX_CAPACITY) {
            config.mailbox_capacity = match value.trim().parse::<usize>() {
                Ok(capacity) if capacity > 0 => capacity,
                _ => {
                    return Err(ConfigError::InvalidCapacity {
                        key: ENV_MAILBOX_CAPACITY,
                        value,
                    })
                }
            };
        }

        if let Some(value) = lookup(ENV_OVERPAYMENT) {
            config.overpayment_policy = match value.trim().to_ascii_lowercase().as_str() {
                "refund" => OverpaymentPolicy::Refund,
                "exact" => OverpaymentPolicy::RequireExact,
                _ => {
                    return Err(ConfigError::InvalidPolicy {
                        key: ENV_OVERPAYMENT,
                        value,
                    })
                }
            };
        }

        Ok(config)
    }
}
