use super::*;
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> SettingsStore {
    SettingsStore::new(
        dir.path().join("local.toml"),
        dir.path().join("synced.toml"),
    )
}

#[test]
fn test_missing_tiers_yield_defaults() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let settings = store.load().unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_synced_wins_on_conflict() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("local.toml"), "min_delay = 5\n").unwrap();
    std::fs::write(dir.path().join("synced.toml"), "min_delay = 40\n").unwrap();

    let settings = store_in(&dir).load().unwrap();
    assert_eq!(settings.min_delay, 40);
}

#[test]
fn test_local_fills_keys_missing_from_synced() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("local.toml"), "website_url = \"a.school.edu\"\n").unwrap();
    std::fs::write(dir.path().join("synced.toml"), "min_delay = 40\n").unwrap();

    let settings = store_in(&dir).load().unwrap();
    assert_eq!(settings.min_delay, 40);
    assert_eq!(settings.website_url, "a.school.edu");
}

#[test]
fn test_load_backfills_missing_tier() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("synced.toml"), "min_delay = 40\n").unwrap();

    let store = store_in(&dir);
    store.load().unwrap();

    // Local tier now carries the merged view.
    let local = std::fs::read_to_string(dir.path().join("local.toml")).unwrap();
    assert!(local.contains("min_delay = 40"));
}

#[test]
fn test_save_writes_both_tiers() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let mut settings = Settings::default();
    settings.website_url = "b.school.edu".into();
    store.save(&settings).unwrap();

    for tier in ["local.toml", "synced.toml"] {
        let content = std::fs::read_to_string(dir.path().join(tier)).unwrap();
        assert!(content.contains("b.school.edu"), "{tier} missing value");
    }
}

#[test]
fn test_set_key_provider() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let settings = store.set_key("ai_model", "gemini").unwrap();
    assert_eq!(settings.ai_model, ProviderKind::Gemini);
    assert_eq!(store.load().unwrap().ai_model, ProviderKind::Gemini);
}

#[test]
fn test_set_key_turbo_remembers_and_restores() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.set_key("min_delay", "10").unwrap();
    store.set_key("max_delay", "20").unwrap();

    let on = store.set_key("turbo_mode", "true").unwrap();
    assert_eq!(on.effective_delays(), (0, 0));

    let off = store.set_key("turbo_mode", "false").unwrap();
    assert_eq!((off.min_delay, off.max_delay), (10, 20));
}

#[test]
fn test_set_key_rejects_unknown() {
    let dir = TempDir::new().unwrap();
    let err = store_in(&dir).set_key("colour", "blue").unwrap_err();
    assert!(matches!(err, ConfigError::UnknownKey(_)));
}

#[test]
fn test_malformed_tier_is_ignored() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("local.toml"), "min_delay = [unclosed").unwrap();
    std::fs::write(dir.path().join("synced.toml"), "min_delay = 40\n").unwrap();

    let settings = store_in(&dir).load().unwrap();
    assert_eq!(settings.min_delay, 40);
}
