#![allow(clippy::unwrap_used)]
// Integration tests for the grid `Browser` against a wiremock catalog API.

mod common;

use std::time::Duration;

use pretty_assertions::assert_eq;

use common::{catalog_for, mount_details, mount_full_list, mount_missing, numbered_list};
use dexly_core::{Browser, CoreError, GridPage, LoadStatus, PageLoad};
use wiremock::MockServer;

async fn browser_with(server: &MockServer, items: usize, delay: Duration) -> Browser {
    mount_full_list(server, numbered_list(items)).await;
    mount_details(server, delay).await;
    Browser::new(catalog_for(server))
}

fn ready(load: PageLoad) -> std::sync::Arc<GridPage> {
    match load {
        PageLoad::Ready(page) => page,
        PageLoad::Superseded => panic!("expected a ready page"),
    }
}

fn ids(page: &GridPage) -> Vec<u32> {
    page.items.iter().map(|i| i.detail.id).collect()
}

// ── Navigation ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_first_page_and_window() {
    let server = MockServer::start().await;
    let browser = browser_with(&server, 100, Duration::ZERO).await;

    let page = ready(browser.load().await.unwrap());
    assert_eq!(page.items.len(), 30);
    assert_eq!(&ids(&page)[..3], &[1, 2, 3]);
    assert_eq!(page.total_filtered, 100);
    assert_eq!(page.total_pages, 4);
    assert_eq!(page.page_numbers, vec![1, 2, 3, 4]);
    assert!(page.has_next());
    assert!(!page.has_prev());

    let state = browser.state();
    assert_eq!(state.status, LoadStatus::Ready);
    assert!(!state.is_placeholder);
}

#[tokio::test]
async fn test_search_resets_to_first_page() {
    let server = MockServer::start().await;
    let browser = browser_with(&server, 100, Duration::ZERO).await;
    browser.load().await.unwrap();

    assert_eq!(browser.goto_page(3), 3);
    let third = ready(browser.load().await.unwrap());
    assert_eq!(ids(&third).first(), Some(&61));

    assert!(browser.set_search("item-1"));
    assert_eq!(browser.query().page, 1);

    let hits = ready(browser.load().await.unwrap());
    // item-1, item-10..=19, item-100
    assert_eq!(hits.total_filtered, 12);
    assert_eq!(hits.total_pages, 1);
    assert_eq!(hits.query.page, 1);
}

#[tokio::test]
async fn test_goto_clamps_to_known_pages() {
    let server = MockServer::start().await;
    let browser = browser_with(&server, 100, Duration::ZERO).await;
    browser.load().await.unwrap();

    assert_eq!(browser.goto_page(99), 4);
    assert!(!browser.next_page());
    assert!(browser.prev_page());
    assert_eq!(browser.query().page, 3);
    assert_eq!(browser.goto_page(0), 1);
    assert!(!browser.prev_page());
}

#[tokio::test]
async fn test_favorites_only_filters_and_flags_cards() {
    let server = MockServer::start().await;
    let browser = browser_with(&server, 100, Duration::ZERO).await;
    browser.catalog().favorites().add(5).unwrap();
    browser.catalog().favorites().add(42).unwrap();
    browser.load().await.unwrap();
    browser.goto_page(2);

    assert!(browser.toggle_favorites_only());
    assert_eq!(browser.query().page, 1);

    let page = ready(browser.load().await.unwrap());
    assert_eq!(ids(&page), vec![5, 42]);
    assert!(page.items.iter().all(|i| i.favorite));

    assert!(!browser.toggle_favorites_only());
    let all = ready(browser.load().await.unwrap());
    assert!(all.items[4].favorite);
    assert!(!all.items[0].favorite);
}

#[tokio::test]
async fn test_empty_favorites_yield_empty_page() {
    let server = MockServer::start().await;
    let browser = browser_with(&server, 10, Duration::ZERO).await;
    browser.set_favorites_only(true);

    let page = ready(browser.load().await.unwrap());
    assert!(page.is_empty());
    assert_eq!(page.total_pages, 0);
    assert!(page.page_numbers.is_empty());
}

// ── Loading semantics ───────────────────────────────────────────────

#[tokio::test]
async fn test_previous_page_is_placeholder_while_loading() {
    let server = MockServer::start().await;
    let browser = browser_with(&server, 100, Duration::from_millis(200)).await;
    browser.load().await.unwrap();
    assert!(browser.next_page());

    let (loaded, during) = tokio::join!(browser.load(), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        browser.state()
    });

    assert_eq!(during.status, LoadStatus::Loading);
    assert!(during.is_placeholder);
    assert_eq!(during.page.unwrap().query.page, 1);
    assert_eq!(during.query.page, 2);

    let second = ready(loaded.unwrap());
    assert_eq!(ids(&second).first(), Some(&31));
    assert!(!browser.state().is_placeholder);
}

#[tokio::test]
async fn test_load_superseded_by_query_change_is_discarded() {
    let server = MockServer::start().await;
    let browser = browser_with(&server, 100, Duration::from_millis(200)).await;
    browser.load().await.unwrap();
    browser.next_page();

    let (outcome, ()) = tokio::join!(browser.load(), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        browser.set_search("item-7");
    });
    assert!(matches!(outcome.unwrap(), PageLoad::Superseded));
    assert_eq!(browser.state().page.unwrap().query.page, 1);

    let page = ready(browser.load().await.unwrap());
    assert_eq!(page.query.search, "item-7");
    // item-7, item-70..=79
    assert_eq!(page.total_filtered, 11);
}

#[tokio::test]
async fn test_failed_detail_fails_the_page() {
    let server = MockServer::start().await;
    mount_missing(&server, "item-3").await;
    let browser = browser_with(&server, 30, Duration::ZERO).await;

    let err = browser.load().await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { .. }));

    let state = browser.state();
    assert_eq!(state.status, LoadStatus::Failed);
    assert_eq!(state.error, Some(err));
    assert!(state.page.is_none());
}
