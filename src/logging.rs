//! Logging setup.
//!
//! `log4rs.yml` in the working directory wins when present, otherwise a plain
//! stderr console appender is built. A level given on the command line
//! replaces the root level in both cases.

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::Path;

/// log4rs configuration file looked up in the working directory.
pub const LOG_CONFIG_FILE: &str = "log4rs.yml";

/// Root level when neither a config file nor a command line level is given.
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

/// Parse a level name such as `debug`, for use as a clap value parser.
pub fn parse_level(s: &str) -> Result<LevelFilter, String> {
    s.parse()
        .map_err(|_| format!("invalid log level '{s}', use off, error, warn, info, debug or trace"))
}

/// Load a log4rs config file, replacing its root level with `level` if given.
pub fn load_log_config(path: &Path, level: Option<LevelFilter>) -> Result<Config, Box<dyn Error>> {
    let mut config = log4rs::config::load_config_file(path, Default::default())
        .map_err(|e| format!("Error loading {}: {e}", path.display()))?;
    if let Some(level) = level {
        config.root_mut().set_level(level);
    }
    Ok(config)
}

/// Console-only config used when no config file exists.
pub fn console_log_config(level: Option<LevelFilter>) -> Result<Config, Box<dyn Error>> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {h({l})} {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(
            Root::builder()
                .appender("stderr")
                .build(level.unwrap_or(DEFAULT_LEVEL)),
        )?;
    Ok(config)
}

/// Install the global logger.
pub fn init_logging(level: Option<LevelFilter>) -> Result<(), Box<dyn Error>> {
    let path = Path::new(LOG_CONFIG_FILE);
    let config = if path.exists() {
        load_log_config(path, level)?
    } else {
        console_log_config(level)?
    };
    log4rs::init_config(config).map_err(|e| format!("Error initializing log4rs: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn console_yml() -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        write!(
            file,
            "appenders:\n  stderr:\n    kind: console\n    target: stderr\nroot:\n  level: info\n  appenders:\n    - stderr\n"
        )
        .unwrap();
        file
    }

    #[test]
    fn test_command_line_level_replaces_file_level() {
        let file = console_yml();
        let config = load_log_config(file.path(), Some(LevelFilter::Debug)).unwrap();
        assert_eq!(config.root().level(), LevelFilter::Debug);
        assert_eq!(config.root().appenders(), &["stderr".to_string()][..]);
    }

    #[test]
    fn test_file_level_kept_without_override() {
        let file = console_yml();
        let config = load_log_config(file.path(), None).unwrap();
        assert_eq!(config.root().level(), LevelFilter::Info);
    }

    #[test]
    fn test_console_config_level() {
        assert_eq!(console_log_config(None).unwrap().root().level(), DEFAULT_LEVEL);
        let config = console_log_config(Some(LevelFilter::Trace)).unwrap();
        assert_eq!(config.root().level(), LevelFilter::Trace);
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Ok(LevelFilter::Debug));
        assert_eq!(parse_level("WARN"), Ok(LevelFilter::Warn));
        assert!(parse_level("loud").unwrap_err().contains("invalid log level"));
    }
}
