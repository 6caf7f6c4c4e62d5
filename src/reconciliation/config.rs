//! Matcher configuration

use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};

use crate::types::*;

/// How expense records are allotted to bank transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// First qualifying expense in input order; an expense may back any number
    /// of bank transactions
    #[default]
    FirstMatch,
    /// Each expense backs at most one bank transaction; bank transactions
    /// claim the first unclaimed qualifying expense in input order
    OneToOne,
}

/// Tunables for the matcher
///
/// ```toml
/// tolerance = "0.01"
/// strategy = "first_match"
/// min_description_len = 0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchConfig {
    /// Amounts match when their absolute difference is strictly below this
    pub tolerance: BigDecimal,
    /// How expenses are allotted when several charges qualify
    pub strategy: MatchStrategy,
    /// Minimum length of the contained description; `0` disables the guard
    pub min_description_len: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            strategy: MatchStrategy::FirstMatch,
            min_description_len: 0,
        }
    }
}

/// 0.01 currency units
pub fn default_tolerance() -> BigDecimal {
    BigDecimal::new(1.into(), 2)
}

impl MatchConfig {
    /// Load and validate a config from TOML text; absent keys take defaults
    pub fn from_toml_str(content: &str) -> ReconcileResult<Self> {
        let config: MatchConfig =
            toml::from_str(content).map_err(|e| ReconcileError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the amount tolerance
    pub fn with_tolerance(mut self, tolerance: BigDecimal) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Replace the matching strategy
    pub fn with_strategy(mut self, strategy: MatchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the minimum contained-description length
    pub fn with_min_description_len(mut self, min_description_len: usize) -> Self {
        self.min_description_len = min_description_len;
        self
    }

    /// Reject settings the matcher cannot work with
    pub fn validate(&self) -> ReconcileResult<()> {
        if self.tolerance <= BigDecimal::zero() {
            return Err(ReconcileError::Config(format!(
                "Tolerance must be positive, got {}",
                self.tolerance
            )));
        }

        Ok(())
    }
}
