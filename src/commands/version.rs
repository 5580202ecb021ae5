// Version checking for `winget-refresh`: print the local build's version
// and compare it against the latest release published on GitHub.

use colored::Colorize;
use serde::Deserialize;

use crate::{log_error, log_info, log_warn};

const REPO_OWNER: &str = "kodelint";
const REPO_NAME: &str = "winget-refresh";

/// Minimal slice of the GitHub release API response.
#[derive(Deserialize)]
struct GitHubRelease {
    tag_name: String,
}

/// Fetches the latest release tag from GitHub.
fn get_latest_github_release() -> Result<String, Box<dyn std::error::Error>> {
    let url = format!(
        "https://api.github.com/repos/{}/{}/releases/latest",
        REPO_OWNER, REPO_NAME
    );

    let agent = ureq::AgentBuilder::new()
        .user_agent("winget-refresh-version-checker")
        .build();

    let response = agent.get(&url).call()?;
    let release: GitHubRelease = response.into_json()?;
    Ok(release.tag_name)
}

/// Prints the local version and whether a newer release exists.
pub fn run() {
    let local_version = env!("CARGO_PKG_VERSION");
    log_info!("winget-refresh {}", local_version);

    match get_latest_github_release() {
        Ok(latest_version) => {
            let latest = latest_version.trim().trim_start_matches('v');
            if latest != local_version {
                log_warn!(
                    "A newer version is available ({}). Consider upgrading.",
                    latest
                );
            } else {
                log_info!("You are running the latest version.");
            }
        }
        Err(e) => {
            log_error!("Failed to fetch the latest release from GitHub: {}", e);
        }
    }
}
