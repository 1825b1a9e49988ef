use std::env::var;

use log::warn;
use serde_derive::{Deserialize, Serialize};

pub const VERBOSITY_VAR: &str = "TARTRACE_VERBOSITY";
pub const PREFIX_VAR: &str = "TARTRACE_PREFIX";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TracerConfig {
    /// 0 drops unresolved register entries, anything higher prints them
    /// flagged as invalid.
    #[serde(default)]
    pub verbosity: u8,
    /// Prepended to every trace line.
    #[serde(default)]
    pub prefix: String,
}

impl TracerConfig {
    pub fn new(verbosity: u8, prefix: &str) -> Self {
        Self {
            verbosity,
            prefix: prefix.to_string(),
        }
    }

    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(verbosity) = var(VERBOSITY_VAR) {
            match verbosity.trim().parse() {
                Ok(v) => config.verbosity = v,
                Err(_) => warn!("Ignoring {}={:?}", VERBOSITY_VAR, verbosity),
            }
        }

        if let Ok(prefix) = var(PREFIX_VAR) {
            config.prefix = prefix;
        }

        config
    }
}
