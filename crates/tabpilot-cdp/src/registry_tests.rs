use super::*;

fn target(id: &str, url: &str) -> TargetInfo {
    serde_json::from_value(serde_json::json!({
        "targetId": id,
        "type": "page",
        "title": "",
        "url": url,
    }))
    .unwrap()
}

fn registry() -> TabRegistry {
    TabRegistry::new("myschool.example.edu", ProviderKind::ChatGpt)
}

#[test]
fn test_resolve_picks_first_match_per_role() {
    let mut reg = registry();
    reg.resolve(&[
        target("t1", "https://news.site/"),
        target("t2", "https://myschool.example.edu/course/1"),
        target("t3", "https://myschool.example.edu/course/2"),
        target("t4", "https://chatgpt.com/"),
        target("t5", "https://chatgpt.com/c/abc"),
    ]);
    assert_eq!(reg.textbook().unwrap().target_id, "t2");
    assert_eq!(reg.assistant().unwrap().target_id, "t4");
    assert_eq!(reg.assistant().unwrap().provider, Some(ProviderKind::ChatGpt));
}

#[test]
fn test_unmatched_roles_stay_empty() {
    let mut reg = registry();
    reg.resolve(&[target("t1", "https://news.site/")]);
    assert!(reg.textbook().is_none());
    assert!(reg.assistant().is_none());

    let tabs = reg.snapshot();
    assert!(tabs.textbook.is_none());
    assert!(!tabs.same_window);
}

#[test]
fn test_removal_clears_slot() {
    let mut reg = registry();
    reg.resolve(&[
        target("t1", "https://myschool.example.edu/"),
        target("t2", "https://chatgpt.com/"),
    ]);
    reg.remove("t2");
    assert!(reg.assistant().is_none());
    assert!(reg.textbook().is_some());
}

#[test]
fn test_navigating_away_vacates_slot() {
    let mut reg = registry();
    reg.resolve(&[target("t1", "https://chatgpt.com/")]);
    assert!(reg.assistant().is_some());

    // Same tab now shows an unrelated page.
    reg.observe(&target("t1", "https://news.site/"));
    assert!(reg.assistant().is_none());
}

#[test]
fn test_navigation_can_swap_roles() {
    let mut reg = registry();
    reg.observe(&target("t1", "https://chatgpt.com/"));
    reg.observe(&target("t1", "https://myschool.example.edu/quiz"));
    assert!(reg.assistant().is_none());
    assert_eq!(reg.textbook().unwrap().target_id, "t1");
}

#[test]
fn test_non_page_targets_ignored() {
    let mut reg = registry();
    let worker: TargetInfo = serde_json::from_value(serde_json::json!({
        "targetId": "w1",
        "type": "service_worker",
        "title": "",
        "url": "https://chatgpt.com/sw.js",
    }))
    .unwrap();
    reg.observe(&worker);
    assert!(reg.assistant().is_none());
}

#[test]
fn test_same_window_requires_both_window_ids() {
    let mut reg = registry();
    reg.resolve(&[
        target("t1", "https://myschool.example.edu/"),
        target("t2", "https://chatgpt.com/"),
    ]);
    assert!(!reg.snapshot().same_window);

    reg.set_window_id("t1", 7);
    reg.set_window_id("t2", 7);
    assert!(reg.snapshot().same_window);

    reg.set_window_id("t2", 8);
    assert!(!reg.snapshot().same_window);
}

#[test]
fn test_provider_switch_via_new_registry() {
    let mut reg = TabRegistry::new("myschool.example.edu", ProviderKind::Gemini);
    reg.resolve(&[
        target("t1", "https://chatgpt.com/"),
        target("t2", "https://gemini.google.com/app"),
    ]);
    assert_eq!(reg.assistant().unwrap().target_id, "t2");
}

#[test]
fn test_set_website_url_drops_stale_textbook() {
    let mut reg = registry();
    reg.resolve(&[target("t1", "https://myschool.example.edu/")]);
    assert!(reg.textbook().is_some());

    reg.set_website_url("otherschool.example.edu");
    assert!(reg.textbook().is_none());
    assert_eq!(reg.classify("https://otherschool.example.edu/x"), Some(TabRole::Textbook));
}
