//! CLI argument definitions for the Salus application.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

/// Salus — a health-information assistant with chat, lab-report analysis,
/// and clinic lookup.
#[derive(Parser, Debug)]
#[command(name = "salus", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// HTTP server port.
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,

    /// Data directory for transcripts, reports, and appointments.
    #[arg(short = 'd', long = "data-dir")]
    pub data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > SALUS_CONFIG env var > ~/.salus/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("SALUS_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the HTTP server port.
    ///
    /// Priority: --port flag > SALUS_PORT env var > 8530.
    pub fn resolve_port(&self) -> u16 {
        if let Some(p) = self.port {
            return p;
        }
        if let Ok(val) = std::env::var("SALUS_PORT") {
            if let Ok(p) = val.parse::<u16>() {
                return p;
            }
        }
        8530
    }

    /// Resolve the data directory override, if any.
    pub fn resolve_data_dir(&self) -> Option<String> {
        self.data_dir
            .as_ref()
            .map(|p| p.to_string_lossy().to_string())
    }

    /// Resolve the log level override, if any.
    pub fn resolve_log_level(&self) -> Option<String> {
        self.log_level.clone()
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".salus").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".salus").join("config.toml");
    }
    PathBuf::from("config.toml")
}

/// Expand a leading ~ to the home directory.
pub fn resolve_data_dir(data_dir: &str) -> PathBuf {
    if data_dir.starts_with("~/") || data_dir.starts_with("~\\") {
        #[cfg(target_os = "windows")]
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string());
        #[cfg(not(target_os = "windows"))]
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(&data_dir[2..])
    } else {
        PathBuf::from(data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CliArgs {
        CliArgs {
            config: None,
            port: None,
            data_dir: None,
            log_level: None,
        }
    }

    #[test]
    fn test_explicit_flags_win() {
        let cli = CliArgs {
            config: Some(PathBuf::from("/etc/salus.toml")),
            port: Some(9000),
            data_dir: Some(PathBuf::from("/var/salus")),
            log_level: Some("debug".to_string()),
        };
        assert_eq!(cli.resolve_config_path(), PathBuf::from("/etc/salus.toml"));
        assert_eq!(cli.resolve_port(), 9000);
        assert_eq!(cli.resolve_data_dir().as_deref(), Some("/var/salus"));
        assert_eq!(cli.resolve_log_level().as_deref(), Some("debug"));
    }

    #[test]
    fn test_defaults_without_flags() {
        let cli = args();
        assert!(cli.resolve_data_dir().is_none());
        assert!(cli.resolve_log_level().is_none());
    }

    #[test]
    fn test_resolve_data_dir_passthrough() {
        assert_eq!(resolve_data_dir("/abs/path"), PathBuf::from("/abs/path"));
        assert_eq!(resolve_data_dir("relative"), PathBuf::from("relative"));
    }

    #[test]
    fn test_resolve_data_dir_expands_home() {
        let expanded = resolve_data_dir("~/salus-data");
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().ends_with("salus-data"));
    }
}
