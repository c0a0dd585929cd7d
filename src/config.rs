//! Runtime configuration
//!
//! There is no configuration file, everything here has a built-in default.
//! Tests construct their own [`Config`] to point at temporary paths and stub
//! programs.
use std::path::PathBuf;

use crate::util::{LOG_PATH, LSMOD, MODPROBE};

/// Paths and programs used by a single invocation
#[derive(Debug, Clone)]
pub struct Config {
    /// Where audit records are appended
    pub log_path: PathBuf,

    /// Module loader. Called as `<modprobe> <module>` and
    /// `<modprobe> -r <module>`
    pub modprobe: String,

    /// Module lister. Called without arguments
    pub lsmod: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from(LOG_PATH),
            modprobe: MODPROBE.into(),
            lsmod: LSMOD.into(),
        }
    }
}

impl Config {
    /// Default programs, logging to `log_path`
    pub fn with_log_path(log_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = Config::default();
        assert_eq!(c.log_path, PathBuf::from("/var/log/devmgr.log"));
        assert_eq!(c.modprobe, "modprobe");
        assert_eq!(c.lsmod, "lsmod");
    }
}
