//! Walk configuration.
//!
//! Chooses the virus, what happens when a branch runs out, and the fancy
//! virus's threshold expression. Values come from the environment in the
//! binary and from [`WalkConfig::default`] otherwise.

use tracing::warn;

use crate::route::ForkExit;
use crate::virus::{
    BranchSelector, FANCY_THRESHOLD_EXPRESSION, PostfixError, UnknownVirusKind, VirusKind,
};

/// Environment variable naming the virus kind.
pub const VIRUS_KIND_VAR: &str = "VIRUS_KIND";

/// Environment variable enabling [`ForkExit::Rejoin`].
pub const VIRUS_REJOIN_VAR: &str = "VIRUS_REJOIN";

/// Environment variable overriding the fancy virus threshold expression.
pub const VIRUS_THRESHOLD_VAR: &str = "VIRUS_THRESHOLD";

/// Errors from building a walk configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The virus kind is not recognised
    #[error(transparent)]
    UnknownVirus(#[from] UnknownVirusKind),

    /// A boolean setting has an unrecognised value
    #[error("invalid value for {key}: {value:?} (expected true or false)")]
    InvalidFlag { key: &'static str, value: String },

    /// The threshold expression does not evaluate
    #[error("invalid threshold expression: {0}")]
    Threshold(#[from] PostfixError),
}

/// Configuration for a single walk.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkConfig {
    /// Which virus walks the route.
    pub virus: VirusKind,

    /// What happens when a chosen branch runs out.
    pub fork_exit: ForkExit,

    /// Postfix expression for the fancy virus threshold.
    pub threshold_expression: String,
}

impl WalkConfig {
    /// Create a configuration for the given virus with default settings.
    pub fn new(virus: VirusKind) -> Self {
        Self {
            virus,
            ..Self::default()
        }
    }

    /// Set the fork exit policy.
    pub fn with_fork_exit(mut self, fork_exit: ForkExit) -> Self {
        self.fork_exit = fork_exit;
        self
    }

    /// Set the fancy virus threshold expression.
    pub fn with_threshold_expression(mut self, expression: impl Into<String>) -> Self {
        self.threshold_expression = expression.into();
        self
    }

    /// Read the configuration from the process environment.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name
    /// to its value if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(kind) = lookup(VIRUS_KIND_VAR) {
            config.virus = kind.parse()?;
        }

        if let Some(rejoin) = lookup(VIRUS_REJOIN_VAR) {
            config.fork_exit = if parse_flag(VIRUS_REJOIN_VAR, &rejoin)? {
                ForkExit::Rejoin
            } else {
                ForkExit::EndOfBranch
            };
        }

        if let Some(expression) = lookup(VIRUS_THRESHOLD_VAR) {
            if config.virus != VirusKind::Fancy {
                warn!(
                    virus = %config.virus,
                    "{VIRUS_THRESHOLD_VAR} is set but only the fancy virus uses it"
                );
            }
            config.threshold_expression = expression;
        }

        Ok(config)
    }

    /// Build the configured branch selector.
    pub fn selector(&self) -> Result<Box<dyn BranchSelector + Send + Sync>, ConfigError> {
        Ok(self.virus.selector(&self.threshold_expression)?)
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            virus: VirusKind::Top,
            fork_exit: ForkExit::EndOfBranch,
            threshold_expression: FANCY_THRESHOLD_EXPRESSION.to_string(),
        }
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            key,
            value: value.to_string(),
        }),
    }
}
