use figment::{Figment, providers::{Format, Toml, Env}};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Tool settings, read from `plansync.toml` and `PLANSYNC_*` variables.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// The GitHub CLI executable
    pub gh_path: String,
    /// Upper bound for a single gh invocation, unbounded when unset
    pub timeout_secs: Option<u64>,
    /// Schedule document used when --schedule is not given
    pub schedule: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gh_path: "gh".to_string(),
            timeout_secs: None,
            schedule: PathBuf::from("roadmap.toml"),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Self::from_figment(
            Figment::new()
                .merge(Toml::file("plansync.toml"))
                .merge(Env::prefixed("PLANSYNC_")),
        )
    }

    fn from_figment(figment: Figment) -> Result<Self, figment::Error> {
        figment.extract()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.filter(|s| *s > 0).map(Duration::from_secs)
    }
}
