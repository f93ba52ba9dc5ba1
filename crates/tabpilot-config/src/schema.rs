//! Settings schema.

use serde::{Deserialize, Serialize};
use tabpilot_protocols::ProviderKind;

/// Placeholder until the user points tabpilot at their school's
/// textbook subdomain.
pub const WEBSITE_URL_PLACEHOLDER: &str = "yourschool.example.edu";

fn default_min_delay() -> u64 {
    22
}

fn default_max_delay() -> u64 {
    97
}

fn default_website_url() -> String {
    WEBSITE_URL_PLACEHOLDER.to_string()
}

/// User preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Which AI chat backend answers questions.
    #[serde(default)]
    pub ai_model: ProviderKind,

    /// Lower bound of the per-question delay, in seconds.
    #[serde(default = "default_min_delay")]
    pub min_delay: u64,

    /// Upper bound of the per-question delay, in seconds.
    #[serde(default = "default_max_delay")]
    pub max_delay: u64,

    /// Turbo mode forces both delays to zero. The prior bounds are
    /// remembered so leaving turbo restores them.
    #[serde(default)]
    pub turbo_mode: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_min_delay: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_max_delay: Option<u64>,

    /// Textbook platform subdomain the registry matches tabs against.
    #[serde(default = "default_website_url")]
    pub website_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ai_model: ProviderKind::default(),
            min_delay: default_min_delay(),
            max_delay: default_max_delay(),
            turbo_mode: false,
            saved_min_delay: None,
            saved_max_delay: None,
            website_url: default_website_url(),
        }
    }
}

impl Settings {
    /// Delay bounds after applying turbo mode.
    pub fn effective_delays(&self) -> (u64, u64) {
        if self.turbo_mode {
            (0, 0)
        } else {
            (self.min_delay, self.max_delay)
        }
    }

    /// Enter turbo mode, remembering the current bounds.
    pub fn enable_turbo(&mut self) {
        if !self.turbo_mode {
            self.saved_min_delay = Some(self.min_delay);
            self.saved_max_delay = Some(self.max_delay);
            self.min_delay = 0;
            self.max_delay = 0;
            self.turbo_mode = true;
        }
    }

    /// Leave turbo mode, restoring the remembered bounds.
    pub fn disable_turbo(&mut self) {
        if self.turbo_mode {
            self.min_delay = self.saved_min_delay.take().unwrap_or(default_min_delay());
            self.max_delay = self.saved_max_delay.take().unwrap_or(default_max_delay());
            self.turbo_mode = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.ai_model, ProviderKind::ChatGpt);
        assert_eq!(s.min_delay, 22);
        assert_eq!(s.max_delay, 97);
        assert!(!s.turbo_mode);
        assert_eq!(s.website_url, WEBSITE_URL_PLACEHOLDER);
    }

    #[test]
    fn test_empty_toml_yields_defaults() {
        let s: Settings = toml::from_str("").unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_effective_delays_respect_turbo() {
        let mut s = Settings::default();
        assert_eq!(s.effective_delays(), (22, 97));
        s.turbo_mode = true;
        assert_eq!(s.effective_delays(), (0, 0));
    }

    #[test]
    fn test_turbo_round_trip_restores_bounds() {
        let mut s = Settings {
            min_delay: 5,
            max_delay: 30,
            ..Settings::default()
        };
        s.enable_turbo();
        assert_eq!(s.effective_delays(), (0, 0));
        assert_eq!(s.saved_min_delay, Some(5));

        // Entering turbo twice must not clobber the saved bounds.
        s.enable_turbo();
        assert_eq!(s.saved_min_delay, Some(5));

        s.disable_turbo();
        assert_eq!((s.min_delay, s.max_delay), (5, 30));
        assert!(s.saved_min_delay.is_none());
    }
}
