//! Integration tests for URL resolution and scoring using wiremock

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{Duration, Utc};
use pkg_rank::rating;
use pkg_rank::source::{Provider, RepositorySource, SourceOrigin};
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Resolve an input URL with both API hosts pointed at the mock server.
async fn resolve_against(server: &MockServer, input: &str) -> pkg_rank::Result<Provider> {
    let base = Url::parse(&server.uri()).expect("mock server URI should parse");

    Provider::resolve(input, None, core::time::Duration::from_secs(5), &base, &base).await
}

/// Mount a 200 JSON response for a GET route.
async fn mount_json(server: &MockServer, at: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// The error shape GitHub returns for items that do not exist.
fn github_not_found() -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({
        "message": "Not Found",
        "documentation_url": "https://docs.github.com/rest"
    }))
}

/// A contents API payload carrying base64-encoded text.
fn content_payload(text: &str) -> serde_json::Value {
    json!({"content": STANDARD.encode(text), "encoding": "base64"})
}

#[tokio::test]
async fn test_scores_github_repository_end_to_end() {
    let server = MockServer::start().await;
    let opened = Utc::now() - Duration::days(10);
    let commit_at = Utc::now() - Duration::hours(1);

    mount_json(
        &server,
        "/repos/acme/rocket",
        json!({
            "stargazers_count": 20_000,
            "forks_count": 20_000,
            "watchers_count": 5_000,
            "open_issues_count": 0,
            "has_wiki": true,
            "has_pages": true,
            "has_discussions": true,
            "license": {"key": "mit"}
        }),
    )
    .await;

    let readme = format!("{}\n## License\nMIT", vec!["Usage notes."; 498].join("\n"));
    mount_json(&server, "/repos/acme/rocket/readme", content_payload(&readme)).await;

    // One issue answered after half the response window, one closed after
    // half the close window. Both penalties land at 0.5.
    mount_json(
        &server,
        "/repos/acme/rocket/issues",
        json!([
            {"number": 1, "created_at": opened.to_rfc3339(), "closed_at": null},
            {"number": 2, "created_at": opened.to_rfc3339(), "closed_at": (opened + Duration::hours(84)).to_rfc3339()}
        ]),
    )
    .await;
    mount_json(
        &server,
        "/repos/acme/rocket/issues/1/comments",
        json!([{"created_at": (opened + Duration::hours(84)).to_rfc3339()}]),
    )
    .await;
    mount_json(&server, "/repos/acme/rocket/issues/2/comments", json!([])).await;
    mount_json(&server, "/search/issues", json!({"total_count": 300})).await;

    mount_json(
        &server,
        "/repos/acme/rocket/pulls",
        json!([
            {"number": 7, "merged_at": commit_at.to_rfc3339()},
            {"number": 8, "merged_at": commit_at.to_rfc3339()},
            {"number": 9, "merged_at": null}
        ]),
    )
    .await;
    mount_json(&server, "/repos/acme/rocket/pulls/7/reviews", json!([{"id": 1}])).await;
    mount_json(&server, "/repos/acme/rocket/pulls/8/reviews", json!([])).await;

    mount_json(
        &server,
        "/repos/acme/rocket/contributors",
        json!([
            {"login": "alice", "contributions": 75},
            {"login": "bob", "contributions": 25}
        ]),
    )
    .await;
    mount_json(
        &server,
        "/repos/acme/rocket/commits",
        json!([{"commit": {"committer": {"date": commit_at.to_rfc3339()}}}]),
    )
    .await;

    let manifest = r#"{"dependencies": {"a": "1.2.3", "b": "^2.0.0"}, "devDependencies": {"c": "3.1.x"}}"#;
    mount_json(&server, "/repos/acme/rocket/contents/package.json", content_payload(manifest)).await;
    mount_json(&server, "/repos/acme/rocket/contents/tests", json!([])).await;
    mount_json(&server, "/repos/acme/rocket/contents/.github/workflows", json!([])).await;
    mount_json(&server, "/repos/acme/rocket/contents/README.md", json!({})).await;
    mount_json(&server, "/repos/acme/rocket/contents/.eslintrc", json!({})).await;

    let provider = resolve_against(&server, "https://github.com/acme/rocket")
        .await
        .expect("resolution should succeed");
    let report = rating::rate(&provider).await.expect("rating should succeed");

    assert!((report.ramp_up - 1.0).abs() < 1e-9);
    assert!((report.correctness - 1.0).abs() < 1e-9);
    assert!((report.bus_factor - 0.25).abs() < 1e-9);
    assert!((report.responsive_maintainer - 0.5).abs() < 1e-9);
    assert!((report.license_score - 1.0).abs() < 1e-9);
    assert!((report.good_pinning_practice - 0.67).abs() < 1e-9);
    assert!((report.pull_request - 0.5).abs() < 1e-9);
    assert!((report.net_score - 0.65).abs() < 1e-9);

    let value = serde_json::to_value(&report).expect("report should serialize");
    let object = value.as_object().expect("report should be a JSON object");
    assert_eq!(object.len(), 16);
    assert!(object.contains_key("NetScore"));
    assert!(object.contains_key("GoodPinningPractice"));
    assert!(object.contains_key("ResponsiveMaintainerLatency"));
}

#[tokio::test]
async fn test_resolves_npm_package_through_registry_metadata() {
    let server = MockServer::start().await;

    mount_json(
        &server,
        "/rocket-js/latest",
        json!({
            "repository": {"type": "git", "url": "git+https://github.com/acme/rocket.git"},
            "dependencies": {"a": "1.2.3"}
        }),
    )
    .await;

    let provider = resolve_against(&server, "https://www.npmjs.com/package/rocket-js")
        .await
        .expect("resolution should succeed");

    let repo = provider.repo_ref();
    assert_eq!(repo.owner(), "acme");
    assert_eq!(repo.repo(), "rocket");
    assert_eq!(repo.origin(), SourceOrigin::PackageRegistry);
    assert_eq!(repo.url().as_str(), "https://github.com/acme/rocket");
}

#[tokio::test]
async fn test_registry_package_without_repository_scores_from_registry_facts() {
    let server = MockServer::start().await;

    mount_json(
        &server,
        "/tiny-utils/latest",
        json!({
            "dependencies": {"a": "1.2.3"},
            "maintainers": [{"name": "alice"}, {"name": "bob"}]
        }),
    )
    .await;

    let provider = resolve_against(&server, "https://www.npmjs.com/package/tiny-utils")
        .await
        .expect("resolution should succeed");
    let report = rating::rate(&provider).await.expect("rating should succeed");

    // Host facts are missing, so only the registry document earns credit.
    assert!((report.good_pinning_practice - 1.0).abs() < 1e-9);
    assert!((report.bus_factor - 0.5).abs() < 1e-9);
    assert!((report.responsive_maintainer - 1.0).abs() < 1e-9);
    assert!((report.correctness - 0.2).abs() < 1e-9);
    assert!((report.ramp_up - 0.0).abs() < 1e-9);
    assert!((report.license_score - 0.0).abs() < 1e-9);
    assert!((report.net_score - 0.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_unknown_package_fails_resolution() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ghost-pkg/latest"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = resolve_against(&server, "https://www.npmjs.com/package/ghost-pkg").await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_unknown_repository_scores_facts_as_absent() {
    let server = MockServer::start().await;

    Mock::given(method("GET")).respond_with(github_not_found()).mount(&server).await;

    let provider = resolve_against(&server, "https://github.com/ghost/ghost")
        .await
        .expect("resolution should succeed");
    let report = rating::rate(&provider).await.expect("rating should succeed");

    // Absent data reads as real, poor scores rather than unavailability.
    assert!((report.ramp_up - 0.0).abs() < 1e-9);
    assert!((report.bus_factor - 0.0).abs() < 1e-9);
    assert!((report.responsive_maintainer - 1.0).abs() < 1e-9);
    assert!((report.pull_request - 0.0).abs() < 1e-9);
    assert!((report.correctness - 0.2).abs() < 1e-9);
    assert!((report.good_pinning_practice - 0.0).abs() < 1e-9);
    assert!((report.license_score - 0.0).abs() < 1e-9);
    assert!((report.net_score - 0.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_unreachable_host_reports_unavailable_metrics() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "internal error"})))
        .mount(&server)
        .await;

    let provider = resolve_against(&server, "https://github.com/acme/flaky")
        .await
        .expect("resolution should succeed");
    let report = rating::rate(&provider).await.expect("rating should still produce a report");

    assert!((report.ramp_up + 1.0).abs() < 1e-9);
    assert!((report.bus_factor + 1.0).abs() < 1e-9);
    assert!((report.responsive_maintainer + 1.0).abs() < 1e-9);
    assert!((report.pull_request + 1.0).abs() < 1e-9);

    // License and pinning checks degrade to hard zeroes instead.
    assert!((report.license_score - 0.0).abs() < 1e-9);
    assert!((report.good_pinning_practice - 0.0).abs() < 1e-9);
    assert!((report.correctness - 0.2).abs() < 1e-9);
    assert!((report.net_score - 0.0).abs() < 1e-9);

    let value = serde_json::to_value(&report).expect("report should serialize");
    assert_eq!(value["RampUp"], json!(-1.0));
}
