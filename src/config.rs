//! Engine settings, read from a YAML file
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
//! Every key is optional. For example:
//!
//! ```yaml
//! depth: 5
//! log_level: debug
//! log_file: /tmp/kestrel.log
//! ```
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Search depth in plies
    pub depth: usize,
    /// Log level used when logging is turned on
    pub log_level: String,
    /// Log file used when logging is turned on
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            depth: 4,
            log_level: "info".to_owned(),
            log_file: PathBuf::from("kestrel.log"),
        }
    }
}

impl Config {
    /// Reads settings from a YAML file.
    pub fn load(path: &Path) -> Result<Config, Error> {
        let s = read_to_string(path).map_err(|err| Error(format!("{}: {}", path.display(), err)))?;
        Config::from_yaml(&s).map_err(|err| Error(format!("{}: {}", path.display(), err)))
    }

    /// Parses settings from YAML text.
    pub fn from_yaml(s: &str) -> Result<Config, Error> {
        if s.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(s)?)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// An error reading the settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error(String);

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        self.0.fmt(f)
    }
}

impl std::error::Error for Error { }

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let config = Config::from_yaml("depth: 6\n").expect("valid yaml");
        assert_eq!(config.depth, 6);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_file, PathBuf::from("kestrel.log"));

        assert_eq!(Config::from_yaml("").expect("valid yaml"), Config::default());
    }

    #[test]
    fn all_keys() {
        let config = Config::from_yaml("depth: 2\nlog_level: debug\nlog_file: /tmp/k.log\n")
            .expect("valid yaml");
        assert_eq!(config, Config {
            depth: 2,
            log_level: "debug".to_owned(),
            log_file: PathBuf::from("/tmp/k.log"),
        });
    }

    #[test]
    fn bad_yaml_is_an_error() {
        assert!(Config::from_yaml("depth: deep\n").is_err());
        assert!(Config::from_yaml("depht: 3\n").is_err());
        assert!(Config::load(Path::new("/nonexistent/kestrel.yaml")).is_err());
    }
}
