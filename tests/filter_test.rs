//! 公開 API を通したロケールフィルターのテスト

#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]
#![allow(missing_docs)]

use std::sync::Arc;

use locale_content_filter::audit::TextAuditor;
use locale_content_filter::config::{
    AuditConfig,
    ConfigManager,
};
use locale_content_filter::memo::LocalizedView;
use locale_content_filter::preference::{
    MemoryPreferenceStore,
    PreferenceStore,
};
use locale_content_filter::{
    Locale,
    contains_chinese,
    filter_value,
};
use serde_json::{
    Value,
    json,
};

fn site_fixture() -> Value {
    json!({
        "player": {
            "name": "杨瀚森",
            "team": "波特兰开拓者",
            "position": "中锋",
            "height": "2.16m",
            "draft": { "date": "2025年6月26日", "pick": 16 }
        },
        "news": [
            { "title": "杨瀚森夏季联赛首秀", "tags": ["开拓者", "新秀"] },
            { "title": "Yang Hansen signs rookie deal", "tags": [] }
        ],
        "videos": [{ "note": "加油中国篮球", "views": 120_000 }]
    })
}

#[test]
fn test_spec_examples() {
    let cases = [
        (json!({ "team": "波特兰开拓者" }), json!({ "team": "Portland Trail Blazers" })),
        (json!({ "name": "杨瀚森" }), json!({ "name": "Yang Hansen" })),
        (json!(42), json!(42)),
    ];

    for (input, expected) in cases {
        let filtered = filter_value(&input, Locale::En);
        assert_eq!(filtered.as_ref(), &expected);
    }

    let note = json!({ "note": "加油中国篮球" });
    let filtered = filter_value(&note, Locale::En);
    assert!(!contains_chinese(filtered["note"].as_str().unwrap()));
}

#[test]
fn test_native_locale_keeps_fixture() {
    let fixture = site_fixture();

    assert_eq!(filter_value(&fixture, Locale::Zh).as_ref(), &fixture);
}

#[test]
fn test_english_fixture_passes_audit() {
    let fixture = site_fixture();
    let filtered = filter_value(&fixture, Locale::En);

    let auditor =
        TextAuditor::new(AuditConfig { enabled: true, max_snippet_length: 20 }, Locale::En);
    let report = auditor.audit_value(&filtered).unwrap();

    assert!(report.is_clean(), "{report}");
    assert_eq!(filtered["player"]["draft"]["date"], json!("2025626"));
    assert_eq!(filtered["news"][0]["tags"], json!(["Trail Blazers", "Rookie"]));
    assert_eq!(filtered["videos"][0]["views"], json!(120_000));
}

#[test]
fn test_raw_fixture_fails_audit() {
    let fixture = site_fixture();

    let auditor =
        TextAuditor::new(AuditConfig { enabled: true, max_snippet_length: 20 }, Locale::En);
    let report = auditor.audit_value(&fixture).unwrap();

    let locations: Vec<String> =
        report.findings().iter().map(|finding| finding.location.to_string()).collect();
    assert_eq!(
        locations,
        vec![
            "/player/name",
            "/player/team",
            "/player/position",
            "/player/draft/date",
            "/news/0/title",
            "/news/0/tags/0",
            "/news/0/tags/1",
            "/videos/0/note",
        ]
    );
}

#[test]
fn test_view_follows_preference_changes() {
    let mut manager = ConfigManager::new();
    manager.load_settings(None).unwrap();
    let filter = Arc::new(manager.build_filter().unwrap());
    let store = MemoryPreferenceStore::new(manager.get_settings().default_locale);
    let mut view = LocalizedView::new(filter, Arc::new(site_fixture()));

    let native = view.get_preferred(&store);
    store.set(Locale::En);
    let english = view.get_preferred(&store);
    let english_again = view.get_preferred(&store);

    assert_eq!(native["player"]["name"], json!("杨瀚森"));
    assert_eq!(english["player"]["name"], json!("Yang Hansen"));
    assert!(Arc::ptr_eq(&english, &english_again));
    assert_eq!(view.recompute_count(), 2);
}
