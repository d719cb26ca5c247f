//! End-to-end command runs against the mock backend.

mod common;

use std::sync::Arc;

use clap::Parser;
use common::mock_backend::{MockBackend, MockResponse};
use common::test_config;
use serde_json::Value;
use unisite::api::{Collection, Fetcher, HttpFetcher};
use unisite::cli::{execute, Cli, Command};
use unisite::config::Config;
use unisite::locale::Locale;

fn fetcher(config: &Config) -> Arc<dyn Fetcher> {
    Arc::new(HttpFetcher::new(&config.api).unwrap())
}

async fn run_command(
    config: &Config,
    command: Command,
    locale: Locale,
) -> (anyhow::Result<()>, String) {
    let mut out = Vec::new();
    let result = execute(command, locale, config, fetcher(config), &mut out).await;
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn parses_list_with_filters_and_global_flags() {
    let cli = Cli::try_parse_from([
        "unisite", "list", "centers", "--pages", "3", "--filter", "type=scientific", "--lang", "ar",
    ])
    .unwrap();

    assert_eq!(cli.lang, Some(Locale::Ar));
    match cli.command {
        Command::List {
            collection,
            pages,
            limit,
            filters,
        } => {
            assert_eq!(collection, Collection::Centers);
            assert_eq!(pages, 3);
            assert_eq!(limit, None);
            assert_eq!(filters, vec![("type".to_string(), "scientific".to_string())]);
        }
        other => panic!("expected list, got {other:?}"),
    }
}

#[test]
fn rejects_unknown_collection_and_bad_filter() {
    assert!(Cli::try_parse_from(["unisite", "list", "dorms"]).is_err());
    assert!(Cli::try_parse_from(["unisite", "list", "news", "--filter", "oops"]).is_err());
    assert!(Cli::try_parse_from(["unisite", "show", "news", "1", "--lang", "fr"]).is_err());
}

#[tokio::test]
async fn list_prints_each_item_once_across_pages() {
    let backend = MockBackend::start().await;
    backend.enqueue_for("page=1", MockResponse::page(4, 1, 2, &[1, 2])).await;
    backend.enqueue_for("page=2", MockResponse::page(4, 2, 2, &[2, 3])).await;
    let config = test_config(&backend.base_url());

    let (result, output) = run_command(
        &config,
        Command::List {
            collection: Collection::News,
            pages: 2,
            limit: Some(2),
            filters: Vec::new(),
        },
        Locale::En,
    )
    .await;
    result.unwrap();

    let ids: Vec<u64> = output
        .lines()
        .map(|line| serde_json::from_str::<Value>(line).unwrap()["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let requests = backend.captured_requests().await;
    assert_eq!(requests.len(), 2);
    assert!(requests[1].query.contains("page=2"));
    assert!(requests[1].query.contains("limit=2"));
}

#[tokio::test]
async fn list_failure_keeps_printed_items_and_errors() {
    let backend = MockBackend::start().await;
    backend.enqueue_for("page=1", MockResponse::page(4, 1, 2, &[1, 2])).await;
    backend
        .enqueue_for("page=2", MockResponse::error(500, "database offline"))
        .await;
    let config = test_config(&backend.base_url());

    let (result, output) = run_command(
        &config,
        Command::List {
            collection: Collection::Events,
            pages: 2,
            limit: Some(2),
            filters: Vec::new(),
        },
        Locale::En,
    )
    .await;

    assert_eq!(output.lines().count(), 2);
    let err = result.unwrap_err().to_string();
    assert!(err.contains("database offline"), "{err}");
}

#[tokio::test]
async fn show_prints_sanitized_item_with_page_meta() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(
            r#"{"id": 4, "name": "College of Engineering",
                "description": "<p>Founded <b>1990</b><script>alert(1)</script></p>"}"#,
        ))
        .await;
    let mut config = test_config(&backend.base_url());
    config.content.site_name = "Example University".to_string();

    let (result, output) = run_command(
        &config,
        Command::Show {
            collection: Collection::Colleges,
            id: "4".to_string(),
        },
        Locale::Ar,
    )
    .await;
    result.unwrap();

    let page: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(
        page["meta"]["title"],
        "College of Engineering | Example University"
    );
    assert_eq!(page["meta"]["description"], "Founded 1990");
    assert_eq!(page["meta"]["lang"], "ar");
    assert_eq!(page["meta"]["dir"], "rtl");

    let description = page["item"]["description"].as_str().unwrap();
    assert!(description.contains("<b>1990</b>"));
    assert!(!description.contains("script"));

    let requests = backend.captured_requests().await;
    assert_eq!(requests[0].path, "/colleges/4");
    assert_eq!(requests[0].header("website-language"), Some("ar"));
}

#[tokio::test]
async fn show_without_usable_id_fetches_nothing() {
    let backend = MockBackend::start().await;
    let config = test_config(&backend.base_url());

    for id in ["  ", "..", "."] {
        let (result, output) = run_command(
            &config,
            Command::Show {
                collection: Collection::Staff,
                id: id.to_string(),
            },
            Locale::En,
        )
        .await;

        assert!(result.is_err(), "id {id:?} should be rejected");
        assert!(output.is_empty());
    }
    assert!(backend.captured_requests().await.is_empty());
}

#[tokio::test]
async fn show_keeps_hostile_id_inside_its_collection() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(r#"{"id": 1, "name": "Someone"}"#))
        .await;
    let config = test_config(&backend.base_url());

    let (result, _) = run_command(
        &config,
        Command::Show {
            collection: Collection::Staff,
            id: "../colleges/1?page=2".to_string(),
        },
        Locale::En,
    )
    .await;
    result.unwrap();

    let requests = backend.captured_requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/staff/..%2Fcolleges%2F1%3Fpage=2");
    assert_eq!(requests[0].query, "");
}
