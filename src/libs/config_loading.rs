// Loads the optional operator config file. A missing file is the normal
// case and silently yields defaults; a malformed file is warned about and
// also yields defaults; configuration can tune a run but never break one.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;

use crate::schemas::config::RefreshConfig;
use crate::{log_debug, log_warn};

/// Resolves and loads the run configuration.
///
/// `explicit_path` comes from `--config` (or its environment fallback) and,
/// when given, is the only location consulted. Otherwise the default
/// per-user path is tried.
pub fn load_config(explicit_path: Option<&str>) -> RefreshConfig {
    let path = match explicit_path {
        Some(p) => PathBuf::from(p),
        None => match default_config_path() {
            Some(p) => p,
            None => {
                log_debug!("[Config] No user config directory; using built-in defaults");
                return RefreshConfig::default();
            }
        },
    };

    if !path.exists() {
        log_debug!(
            "[Config] No config file at {}; using built-in defaults",
            path.display()
        );
        return RefreshConfig::default();
    }

    match fs::read_to_string(&path) {
        Ok(contents) => match serde_yaml::from_str::<RefreshConfig>(&contents) {
            Ok(config) => {
                log_debug!(
                    "[Config] Loaded configuration from {}",
                    path.display().to_string().green()
                );
                config
            }
            Err(e) => {
                log_warn!(
                    "[Config] Could not parse {}: {}. Using built-in defaults.",
                    path.display().to_string().yellow(),
                    e
                );
                RefreshConfig::default()
            }
        },
        Err(e) => {
            log_warn!(
                "[Config] Could not read {}: {}. Using built-in defaults.",
                path.display().to_string().yellow(),
                e
            );
            RefreshConfig::default()
        }
    }
}

/// `<user config dir>/winget-refresh/config.yaml`.
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("winget-refresh").join("config.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_config(Some("/no/such/config.yaml"));
        assert_eq!(config.winget_path, "winget");
        assert_eq!(config.store_source, "msstore");
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "winget_path: C:\\Tools\\winget.exe").unwrap();

        let config = load_config(path.to_str());
        assert_eq!(config.winget_path, "C:\\Tools\\winget.exe");
        // Unset fields keep their defaults.
        assert_eq!(config.store_source, "msstore");
    }

    #[test]
    fn malformed_file_degrades_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "winget_path: [not: a: string").unwrap();

        let config = load_config(path.to_str());
        assert_eq!(config.winget_path, "winget");
    }
}
