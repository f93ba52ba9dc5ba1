//! Two-tier settings store.
//!
//! Mirrors the fast-local / cross-device-synced split of the original
//! preference storage: both tiers hold the full settings table, the
//! synced tier wins on conflicting keys, and whichever tier is missing
//! a key is backfilled on load.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, warn};

use tabpilot_protocols::ProviderKind;

use crate::error::ConfigError;
use crate::schema::Settings;

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;

/// Settings store over two TOML files.
pub struct SettingsStore {
    local_path: PathBuf,
    synced_path: PathBuf,
}

impl SettingsStore {
    pub fn new(local_path: impl Into<PathBuf>, synced_path: impl Into<PathBuf>) -> Self {
        Self {
            local_path: local_path.into(),
            synced_path: synced_path.into(),
        }
    }

    /// Store rooted at the platform config directory.
    pub fn open_default() -> Self {
        let base = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tabpilot");
        Self::new(base.join("local.toml"), base.join("synced.toml"))
    }

    /// Expand shell-style paths (e.g. `~/.config`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }

    /// Load the merged settings view.
    ///
    /// Missing or unreadable tiers are treated as empty; a fully
    /// missing configuration yields the defaults.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let local = Self::read_tier(&self.local_path);
        let synced = Self::read_tier(&self.synced_path);

        let merged = merge_tables(synced.clone().unwrap_or_default(), local.clone().unwrap_or_default());
        let settings: Settings = merged.clone().try_into()?;

        // Opportunistic backfill: a tier missing keys (or the whole
        // file) is brought up to the merged view. Failures only warn.
        for (path, tier) in [(&self.local_path, &local), (&self.synced_path, &synced)] {
            let needs_backfill = match tier {
                Some(table) => table != &merged,
                None => true,
            };
            if needs_backfill {
                if let Err(e) = Self::write_table(path, &merged) {
                    warn!("Backfill of {} failed: {}", path.display(), e);
                }
            }
        }

        Ok(settings)
    }

    /// Persist settings to both tiers.
    pub fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        let table = toml::Table::try_from(settings.clone())?;
        Self::write_table(&self.local_path, &table)?;
        Self::write_table(&self.synced_path, &table)?;
        debug!("Settings saved to both tiers");
        Ok(())
    }

    /// Set one key by name (CLI surface) and persist.
    pub fn set_key(&self, key: &str, value: &str) -> Result<Settings, ConfigError> {
        let mut settings = self.load()?;
        apply_key(&mut settings, key, value)?;
        self.save(&settings)?;
        Ok(settings)
    }

    fn read_tier(path: &Path) -> Option<toml::Table> {
        let content = std::fs::read_to_string(path).ok()?;
        let expanded = expand_env_vars(&content).ok()?;
        match toml::from_str::<toml::Table>(&expanded) {
            Ok(table) => Some(table),
            Err(e) => {
                warn!("Ignoring malformed settings tier {}: {}", path.display(), e);
                None
            }
        }
    }

    fn write_table(path: &Path, table: &toml::Table) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(table)?)?;
        Ok(())
    }
}

/// Merge two tiers; keys present in `synced` win.
fn merge_tables(synced: toml::Table, local: toml::Table) -> toml::Table {
    let mut merged = local;
    for (key, value) in synced {
        merged.insert(key, value);
    }
    merged
}

/// Expand environment variables in the format `${VAR}`.
fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
    let mut result = content.to_string();
    let re = regex::Regex::new(r"\$\{([^}]+)\}").unwrap();

    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        let var_value =
            std::env::var(var_name).map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
        result = result.replace(&cap[0], &var_value);
    }

    Ok(result)
}

fn apply_key(settings: &mut Settings, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "ai_model" => {
            settings.ai_model =
                ProviderKind::from_str(value).map_err(|message| ConfigError::InvalidValue {
                    field: key.to_string(),
                    message,
                })?;
        }
        "min_delay" => settings.min_delay = parse_number(key, value)?,
        "max_delay" => settings.max_delay = parse_number(key, value)?,
        "turbo_mode" => {
            let on = value
                .parse::<bool>()
                .map_err(|e| ConfigError::InvalidValue {
                    field: key.to_string(),
                    message: e.to_string(),
                })?;
            if on {
                settings.enable_turbo();
            } else {
                settings.disable_turbo();
            }
        }
        "website_url" => settings.website_url = value.to_string(),
        other => return Err(ConfigError::UnknownKey(other.to_string())),
    }
    Ok(())
}

fn parse_number(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        field: key.to_string(),
        message: "not a number".to_string(),
    })
}
