//! Runtime configuration.
//!
//! Values come from compiled defaults, then the environment (a `.env` file is
//! loaded by `main` through `dotenv`), then command line flags.

use std::env;

/// Environment variable with a comma separated list of interface names to skip.
pub const ENV_IGNORE: &str = "SUBNET_CHECK_IGNORE";
/// Environment variable holding the collection command.
pub const ENV_COLLECT_CMD: &str = "SUBNET_CHECK_COLLECT_CMD";

/// Largest collection command output accepted, in bytes.
pub const MAX_COLLECT_OUTPUT: usize = 16_000_000;

/// Interface names never analyzed unless overridden.
pub fn default_interfaces_to_ignore() -> Vec<&'static str> {
    vec!["lo"]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Interface names dropped before grouping.
    pub ignored_interfaces: Vec<String>,
    /// Command whose stdout is `node: iface STATE addr/len` lines.
    pub collect_cmd: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ignored_interfaces: default_interfaces_to_ignore()
                .into_iter()
                .map(String::from)
                .collect(),
            collect_cmd: None,
        }
    }
}

impl Config {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Config {
        Config::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        if let Some(list) = lookup(ENV_IGNORE) {
            config.ignored_interfaces = split_list(&list);
            log::debug!("{ENV_IGNORE}={:?}", config.ignored_interfaces);
        }
        if let Some(cmd) = lookup(ENV_COLLECT_CMD).filter(|c| !c.trim().is_empty()) {
            log::debug!("{ENV_COLLECT_CMD}={cmd}");
            config.collect_cmd = Some(cmd);
        }
        config
    }

    pub fn is_ignored(&self, interface: &str) -> bool {
        self.ignored_interfaces.iter().any(|i| i == interface)
    }
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.is_ignored("lo"));
        assert!(!config.is_ignored("100g1"));
        assert_eq!(config.collect_cmd, None);
    }

    #[test]
    fn test_from_lookup() {
        let config = Config::from_lookup(|key| match key {
            ENV_IGNORE => Some("lo, docker0,,virbr0".to_string()),
            ENV_COLLECT_CMD => Some("clush -a ip -br -4 addr".to_string()),
            _ => None,
        });
        assert_eq!(config.ignored_interfaces, vec!["lo", "docker0", "virbr0"]);
        assert_eq!(
            config.collect_cmd.as_deref(),
            Some("clush -a ip -br -4 addr")
        );
    }

    #[test]
    fn test_blank_collect_cmd_ignored() {
        let config = Config::from_lookup(|key| (key == ENV_COLLECT_CMD).then(|| "  ".to_string()));
        assert_eq!(config.collect_cmd, None);
        assert!(config.is_ignored("lo"));
    }
}
