//! # Operator Configuration Schema (`config.yaml`)
//!
//! Small optional YAML file overriding run defaults. Looked up (in order)
//! at the `--config` flag, the `WINGET_REFRESH_CONFIG` environment variable,
//! then `~/.config/winget-refresh/config.yaml`. A missing file is normal
//! and yields the defaults below.
//!
//! ```yaml
//! # config.yaml
//! winget_path: C:\Tools\winget.exe
//! store_source: msstore
//! ```

use serde::Deserialize;

/// Run defaults an operator can override without touching the command line.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshConfig {
    /// Package-manager binary to invoke. Plain `winget` resolves via PATH.
    #[serde(default = "default_winget_path")]
    pub winget_path: String,

    /// Source identifier of the curated store marketplace. Catalog entries
    /// from this source are excluded from selection unless the operator
    /// passes `--include-store`.
    #[serde(default = "default_store_source")]
    pub store_source: String,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        RefreshConfig {
            winget_path: default_winget_path(),
            store_source: default_store_source(),
        }
    }
}

fn default_winget_path() -> String {
    "winget".to_string()
}

fn default_store_source() -> String {
    "msstore".to_string()
}
