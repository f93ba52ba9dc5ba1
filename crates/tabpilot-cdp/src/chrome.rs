//! Chrome discovery and launch.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::{Child, Command};
use tracing::{info, warn};

use crate::error::CdpError;

/// Find a Chrome executable on this machine.
pub fn find_chrome() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        let paths = [
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
        ];
        for path in &paths {
            let p = PathBuf::from(path);
            if p.exists() {
                return Some(p);
            }
        }
    }

    #[cfg(target_os = "linux")]
    {
        let paths = [
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
        ];
        for path in &paths {
            let p = PathBuf::from(path);
            if p.exists() {
                return Some(p);
            }
        }
    }

    #[cfg(target_os = "windows")]
    {
        let paths = [
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ];
        for path in &paths {
            let p = PathBuf::from(path);
            if p.exists() {
                return Some(p);
            }
        }
    }

    None
}

/// Launch Chrome with remote debugging enabled.
///
/// A dedicated profile directory keeps the automation session away
/// from the user's daily profile. Not headless: the user must be able
/// to watch and, for matching questions, take over.
pub async fn launch_chrome(debug_port: u16, profile_dir: &PathBuf) -> Result<Child, CdpError> {
    let chrome_path = find_chrome().ok_or(CdpError::ChromeNotFound)?;

    if let Err(e) = std::fs::create_dir_all(profile_dir) {
        warn!("Failed to create profile directory: {}", e);
    }

    info!("Launching Chrome with profile at: {}", profile_dir.display());

    let mut cmd = Command::new(&chrome_path);
    cmd.arg(format!("--remote-debugging-port={}", debug_port))
        .arg(format!("--user-data-dir={}", profile_dir.display()))
        .arg("--no-first-run")
        .arg("--no-default-browser-check")
        .arg("--disable-background-networking")
        .arg("--disable-sync")
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    let child = cmd
        .spawn()
        .map_err(|e| CdpError::LaunchFailed(e.to_string()))?;

    info!("Chrome launched with PID: {:?}", child.id());
    Ok(child)
}

/// Check whether Chrome answers on the debug endpoint.
pub async fn is_chrome_running(endpoint: &str) -> bool {
    reqwest::get(format!("{}/json/version", endpoint.trim_end_matches('/')))
        .await
        .is_ok()
}
