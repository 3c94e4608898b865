// SPDX-License-Identifier: PMPL-1.0-or-later
//! End-to-end engine tests: fetch through a mock server, evaluate,
//! score, store, trend, and monitor.

use accessmonitor::engine::Engine;
use accessmonitor::monitor::Frequency;
use accessmonitor::record::{ComplianceLevel, ScanRecord, Severity};
use accessmonitor::rules;
use accessmonitor::storage::Storage;
use accessmonitor::trend::TrendDirection;
use accessmonitor::Config;
use chrono::Utc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ACCESSIBLE_HTML: &str = include_str!("fixtures/accessible.html");
const INACCESSIBLE_HTML: &str = include_str!("fixtures/inaccessible.html");

async fn mock_site() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/good"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ACCESSIBLE_HTML))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bad"))
        .respond_with(ResponseTemplate::new(200).set_body_string(INACCESSIBLE_HTML))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_scan_accessible_page_is_compliant() {
    let server = mock_site().await;
    let mut engine = Engine::new(&Config::default()).unwrap();

    let record = engine.scan(&format!("{}/good", server.uri())).await.unwrap();

    assert_eq!(record.score, 100, "issues: {:?}", record.issues);
    assert_eq!(record.level, ComplianceLevel::Compliant);
    assert!(record.issues.is_empty());
    assert!(record.warnings.is_empty());
    assert!(record.passes.len() >= 15);
    assert_eq!(record.metadata.title.as_deref(), Some("Example Team Directory"));
    assert_eq!(record.metadata.language.as_deref(), Some("en"));
}

#[tokio::test]
async fn test_scan_inaccessible_page_is_non_compliant() {
    let server = mock_site().await;
    let mut engine = Engine::new(&Config::default()).unwrap();

    let record = engine.scan(&format!("{}/bad", server.uri())).await.unwrap();

    assert_eq!(record.level, ComplianceLevel::NonCompliant);
    assert!(record.summary.critical >= 1);
    assert!(record.score < 50);

    let issued: Vec<&str> = record.issues.iter().map(|i| i.rule_id.as_str()).collect();
    for expected in [
        "img-alt",
        "input-label",
        "button-name",
        "link-name",
        "iframe-title",
        "html-lang",
        "document-title",
        "heading-order",
        "landmark-regions",
        "table-headers",
        "color-contrast",
        "viewport-meta",
        "meta-refresh",
        "positive-tabindex",
        "autoplay-media",
        "keyboard-trap",
        "focus-visible",
        "keyboard-access",
        "generic-link-text",
    ] {
        assert!(issued.contains(&expected), "missing issue {}", expected);
    }

    // First heading is an h2, so the advisory rule fires as a warning
    assert!(record
        .warnings
        .iter()
        .any(|w| w.rule_id == "first-heading-h1"));
}

#[test]
fn test_scenario_missing_lang_and_alt() {
    // One critical issue (missing alt); missing lang is serious
    let html =
        r#"<html><head><title>Test</title></head><body><img src="logo.png"></body></html>"#;
    let record = ScanRecord::new("https://example.com", rules::evaluate(html));

    let criticals: Vec<_> = record
        .issues
        .iter()
        .filter(|i| i.severity == Severity::Critical)
        .collect();
    assert_eq!(criticals.len(), 1);
    assert_eq!(criticals[0].rule_id, "img-alt");
    assert!(record
        .issues
        .iter()
        .any(|i| i.rule_id == "html-lang" && i.severity == Severity::Serious));
    assert_eq!(record.level, ComplianceLevel::NonCompliant);
}

#[tokio::test]
async fn test_history_and_persistence_across_restart() {
    let server = mock_site().await;
    let temp = tempfile::TempDir::new().unwrap();
    let config = Config::default();

    {
        let storage = Storage::new(temp.path());
        let mut engine = Engine::with_storage(&config, storage).unwrap();
        engine.scan(&format!("{}/bad", server.uri())).await.unwrap();
        engine.scan(&format!("{}/good", server.uri())).await.unwrap();
    }

    // A fresh engine over the same directory sees the same history
    let storage = Storage::new(temp.path());
    let engine = Engine::with_storage(&config, storage).unwrap();

    let history = engine.history(None, 10);
    assert_eq!(history.len(), 2);
    assert!(history[0].url.ends_with("/good"), "most recent first");

    let filtered = engine.history(Some("/bad"), 10);
    assert_eq!(filtered.len(), 1);
}

#[tokio::test]
async fn test_trend_and_diff_over_one_host() {
    let server = mock_site().await;
    let mut engine = Engine::new(&Config::default()).unwrap();

    // Same host, different paths: trend groups by hostname
    engine.scan(&format!("{}/bad", server.uri())).await.unwrap();
    engine.scan(&format!("{}/good", server.uri())).await.unwrap();

    let report = engine.trend(&server.uri()).unwrap();
    assert_eq!(report.scans.len(), 2);
    let summary = report.trend.expect("two scans give a summary");
    assert_eq!(summary.direction, TrendDirection::Improving);
    assert_eq!(summary.last_score, 100);
    assert!(summary.issue_delta < 0);

    let diffs = engine.diffs(&server.uri()).unwrap();
    assert_eq!(diffs.len(), 1);
    assert!(diffs[0].fixed.contains(&"img-alt".to_string()));
    assert!(diffs[0].introduced.is_empty());
}

#[tokio::test]
async fn test_trend_with_single_scan_has_no_summary() {
    let server = mock_site().await;
    let mut engine = Engine::new(&Config::default()).unwrap();
    engine.scan(&format!("{}/good", server.uri())).await.unwrap();

    let report = engine.trend(&server.uri()).unwrap();
    assert_eq!(report.scans.len(), 1);
    assert!(report.trend.is_none());
}

#[tokio::test]
async fn test_monitor_reregistration_is_idempotent() {
    let server = mock_site().await;
    let mut engine = Engine::new(&Config::default()).unwrap();
    let url = format!("{}/good", server.uri());

    let first = engine
        .register_monitor(&url, "a11y@example.com", Frequency::Weekly)
        .unwrap();
    let second = engine
        .register_monitor(&url, "a11y@example.com", Frequency::Daily)
        .unwrap();

    assert_eq!(engine.monitors().len(), 1);
    assert_eq!(first.id, second.id);
    assert_eq!(engine.monitors()[0].frequency, Frequency::Daily);
}

#[tokio::test]
async fn test_tick_scans_due_monitors() {
    let server = mock_site().await;
    let mut engine = Engine::new(&Config::default()).unwrap();
    let url = format!("{}/good", server.uri());

    let monitor = engine
        .register_monitor(&url, "a11y@example.com", Frequency::Daily)
        .unwrap();

    let summary = engine.tick(Utc::now()).await;
    assert_eq!(summary.scanned, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(engine.history(None, 10).len(), 1);

    let updated = engine
        .monitors()
        .iter()
        .find(|m| m.id == monitor.id)
        .unwrap()
        .clone();
    assert_eq!(updated.last_score, Some(100));
    assert!(updated.last_checked.is_some());
    assert!(updated.next_due > Utc::now());

    // Nothing is due any more, so the next tick is a no-op
    let summary = engine.tick(Utc::now()).await;
    assert_eq!(summary.scanned, 0);
}

#[tokio::test]
async fn test_tick_isolates_monitor_failures() {
    let server = mock_site().await;
    let mut engine = Engine::new(&Config::default()).unwrap();

    // A dead port: bind a listener to reserve a port, then drop it
    let dead_port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    engine
        .register_monitor(
            &format!("http://127.0.0.1:{}/", dead_port),
            "a11y@example.com",
            Frequency::Daily,
        )
        .unwrap();
    engine
        .register_monitor(
            &format!("{}/good", server.uri()),
            "b11y@example.com",
            Frequency::Daily,
        )
        .unwrap();

    let summary = engine.tick(Utc::now()).await;
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.scanned, 1, "failure must not abort the tick");

    // The failing monitor stays active for the next scheduled run
    assert!(engine.monitors().iter().all(|m| m.active));
}

#[tokio::test]
async fn test_deactivated_monitor_is_skipped() {
    let server = mock_site().await;
    let mut engine = Engine::new(&Config::default()).unwrap();

    let monitor = engine
        .register_monitor(
            &format!("{}/good", server.uri()),
            "a11y@example.com",
            Frequency::Daily,
        )
        .unwrap();
    engine.deactivate_monitor(monitor.id).unwrap();

    let summary = engine.tick(Utc::now()).await;
    assert_eq!(summary.scanned, 0);
    assert!(!engine.monitors()[0].active);

    // Unknown ids surface as not-found
    assert!(engine.deactivate_monitor(uuid::Uuid::new_v4()).is_err());
}
