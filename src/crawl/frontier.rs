// src/crawl/frontier.rs
// =============================================================================
// Breadth-first crawling of a single website, one depth level at a time.
//
// How it works:
// 1. The frontier starts as just the origin URL
// 2. Every unvisited URL in the frontier is fetched concurrently (a "wave"),
//    with at most `concurrency` requests in flight
// 3. Same-host links found on those pages are collected into the next
//    frontier, each link at most once
// 4. We wait for the WHOLE wave to finish before starting the next one
// 5. Stop when the frontier is empty, the depth budget is used up, or the
//    link budget is reached
//
// Only the driver loop touches the visited/discovered sets. Fetch tasks
// return their results and the loop folds them in one at a time, so the
// "is it new and under budget?" check and the insert can never race.
//
// Failures (timeouts, refused connections, non-HTML responses) only
// affect the URL that caused them. The crawl always finishes.
// =============================================================================

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use tracing::{debug, info, warn};
use url::Url;

use super::classify::{is_internal, is_valid_url};
use super::extract::PageLinks;
use super::fetch::{FetchOutcome, Fetcher};
use crate::config::CrawlConfig;
use crate::error::FetchError;
use crate::store::LinkStore;

/// What a finished crawl hands back.
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Every distinct internal link discovered (never more than max_links)
    pub links: HashSet<String>,
    /// Every URL a fetch was attempted for
    pub visited: HashSet<String>,
    /// Number of depth levels actually processed
    pub waves: usize,
    /// Fetches that failed at the transport level
    pub failures: usize,
}

impl CrawlReport {
    /// Links in a stable order for display.
    pub fn sorted_links(&self) -> Vec<&str> {
        let mut links: Vec<&str> = self.links.iter().map(String::as_str).collect();
        links.sort_unstable();
        links
    }
}

// The result of fetching and parsing one URL inside a wave
struct Visit {
    url: String,
    outcome: Result<VisitOutcome, FetchError>,
}

enum VisitOutcome {
    Parsed { status: u16, links: Vec<Url> },
    Skipped { status: u16 },
}

// Mutable crawl state, owned by the driver loop for one crawl
struct CrawlState {
    origin: String,
    max_links: usize,
    visited: HashSet<String>,
    discovered: HashSet<String>,
}

impl CrawlState {
    fn new(origin: &str, max_links: usize) -> Self {
        Self {
            origin: origin.to_string(),
            max_links,
            visited: HashSet::new(),
            discovered: HashSet::new(),
        }
    }

    fn budget_left(&self) -> bool {
        self.discovered.len() < self.max_links
    }

    // Adds `candidate` to the discovered set if it is a valid, internal,
    // new link and the budget allows. Returns true if it was added.
    fn admit(&mut self, candidate: &str) -> bool {
        if !self.budget_left() {
            return false;
        }
        if !is_valid_url(candidate) || !is_internal(&self.origin, candidate) {
            return false;
        }
        self.discovered.insert(candidate.to_string())
    }
}

/// Crawls `config.origin` and returns what was found.
///
/// Each page that came back as HTML is recorded in `store` with its
/// status code. The only error is failing to build the HTTP client.
pub async fn crawl(config: &CrawlConfig, store: &LinkStore) -> Result<CrawlReport> {
    let fetcher = Fetcher::new(config).context("failed to build HTTP client")?;
    Ok(crawl_with(config, &fetcher, store).await)
}

/// Same as `crawl`, with a caller-provided fetcher.
pub async fn crawl_with(config: &CrawlConfig, fetcher: &Fetcher, store: &LinkStore) -> CrawlReport {
    let mut state = CrawlState::new(config.origin_str(), config.max_links);
    let mut frontier: HashSet<String> = HashSet::from([config.origin_str().to_string()]);
    let mut depth_remaining = config.max_depth;
    let mut waves = 0;
    let mut failures = 0;

    while !frontier.is_empty() && depth_remaining > 0 && state.budget_left() {
        waves += 1;
        let wave: Vec<String> = frontier
            .drain()
            .filter(|url| !state.visited.contains(url))
            .collect();

        info!(wave = waves, urls = wave.len(), "starting wave");

        let mut next_frontier = HashSet::new();
        let mut visits = stream::iter(wave)
            .map(|url| visit(fetcher, url))
            .buffer_unordered(config.concurrency);

        // Barrier: the loop only ends once every task of this wave is done
        while let Some(finished) = visits.next().await {
            match finished.outcome {
                Ok(VisitOutcome::Parsed { status, links }) => {
                    let mut added = 0;
                    for link in links {
                        let link = String::from(link);
                        if state.admit(&link) {
                            next_frontier.insert(link);
                            added += 1;
                        }
                    }
                    debug!(url = %finished.url, status, added, "parsed page");

                    if let Err(e) = store.record(&finished.url, Some(status)) {
                        warn!(url = %finished.url, error = %e, "failed to record visit");
                    }
                }
                Ok(VisitOutcome::Skipped { status }) => {
                    debug!(url = %finished.url, status, "nothing to parse");
                }
                Err(e) => {
                    failures += 1;
                    warn!(url = %finished.url, error = %e, "error fetching page");
                }
            }
            state.visited.insert(finished.url);
        }

        info!(
            wave = waves,
            discovered = state.discovered.len(),
            next = next_frontier.len(),
            "wave complete"
        );

        frontier = next_frontier;
        depth_remaining -= 1;
    }

    CrawlReport {
        links: state.discovered,
        visited: state.visited,
        waves,
        failures,
    }
}

// Fetch one URL and, if it is HTML, pull out every link on it
async fn visit(fetcher: &Fetcher, url: String) -> Visit {
    let outcome = match fetcher.fetch(&url).await {
        Ok(FetchOutcome::Page(page)) => {
            let links = match Url::parse(&url) {
                Ok(page_url) => PageLinks::parse(&page_url, &page.body).iter().collect(),
                Err(e) => {
                    warn!(url = %url, error = %e, "cannot resolve links on unparseable URL");
                    Vec::new()
                }
            };
            Ok(VisitOutcome::Parsed {
                status: page.status,
                links,
            })
        }
        Ok(FetchOutcome::Skipped { status }) => Ok(VisitOutcome::Skipped { status }),
        Err(e) => Err(e),
    };

    Visit { url, outcome }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does buffer_unordered do here?
//    - stream::iter(wave) turns the URLs into a stream
//    - .map(...) turns each URL into a future (not started yet)
//    - .buffer_unordered(n) polls up to n of those futures at once and
//      yields each result as soon as it is ready, in completion order
//
// 2. Where is the "barrier" between waves?
//    - `while let Some(..) = visits.next().await` only exits once the
//      stream is exhausted, i.e. every future in the wave has finished
//    - The next wave's frontier is built inside that loop, so it is
//      complete by the time we move on
//
// 3. Why no Mutex around the sets?
//    - The futures only fetch and parse; they never touch CrawlState
//    - All inserts happen in the loop body, which runs one result at a time
//
// 4. Why HashSet<String> and not HashSet<Url>?
//    - URLs are compared by their exact string form after resolution,
//      and strings are what gets stored and printed
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn html(server: &MockServer, route: &str, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_raw(body.as_bytes().to_vec(), "text/html"))
            .mount(server)
            .await;
    }

    async fn hits(server: &MockServer, route: &str) -> usize {
        server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.url.path() == route)
            .count()
    }

    async fn total_hits(server: &MockServer) -> usize {
        server.received_requests().await.unwrap_or_default().len()
    }

    fn config(server: &MockServer, max_depth: usize, max_links: usize) -> CrawlConfig {
        CrawlConfig::new(&format!("{}/", server.uri()), max_depth, max_links)
            .unwrap()
            .with_timeout(Duration::from_secs(2))
    }

    fn set(urls: &[String]) -> HashSet<String> {
        urls.iter().cloned().collect()
    }

    #[test]
    fn test_admit_filters_and_dedups() {
        let mut state = CrawlState::new("http://example.test/", 10);
        assert!(state.admit("http://example.test/a"));
        assert!(!state.admit("http://example.test/a"));
        assert!(!state.admit("http://other.test/a"));
        assert!(!state.admit("mailto:a@example.test"));
        assert_eq!(state.discovered.len(), 1);
    }

    #[test]
    fn test_admit_respects_budget() {
        let mut state = CrawlState::new("http://example.test/", 2);
        assert!(state.admit("http://example.test/1"));
        assert!(state.admit("http://example.test/2"));
        assert!(!state.admit("http://example.test/3"));
        assert!(!state.budget_left());
    }

    #[tokio::test]
    async fn test_internal_links_only() {
        let server = MockServer::start().await;
        html(
            &server,
            "/",
            200,
            r#"<a href="/about">About</a>
               <a href="http://other.test/x">Other</a>
               <a href="mailto:a@b.com">Mail</a>"#,
        )
        .await;

        let store = LinkStore::in_memory().unwrap();
        let report = crawl(&config(&server, 1, 10), &store).await.unwrap();

        assert_eq!(report.links, set(&[format!("{}/about", server.uri())]));
        assert_eq!(report.waves, 1);
        // Depth 1 fetches the origin only
        assert_eq!(total_hits(&server).await, 1);

        let records = store.read_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].url, format!("{}/", server.uri()));
        assert_eq!(records[0].status, Some(200));
    }

    #[tokio::test]
    async fn test_zero_depth_fetches_nothing() {
        let server = MockServer::start().await;
        html(&server, "/", 200, r#"<a href="/about">About</a>"#).await;

        let store = LinkStore::in_memory().unwrap();
        let report = crawl(&config(&server, 0, 10), &store).await.unwrap();

        assert!(report.links.is_empty());
        assert_eq!(report.waves, 0);
        assert_eq!(total_hits(&server).await, 0);
        assert_eq!(store.len().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_zero_link_budget_fetches_nothing() {
        let server = MockServer::start().await;
        html(&server, "/", 200, r#"<a href="/about">About</a>"#).await;

        let store = LinkStore::in_memory().unwrap();
        let report = crawl(&config(&server, 3, 0), &store).await.unwrap();

        assert!(report.links.is_empty());
        assert_eq!(total_hits(&server).await, 0);
    }

    #[tokio::test]
    async fn test_error_status_page_is_still_followed() {
        let server = MockServer::start().await;
        html(&server, "/", 404, r#"<a href="/next">Next</a>"#).await;
        html(&server, "/next", 200, "<p>no links here</p>").await;

        let store = LinkStore::in_memory().unwrap();
        let report = crawl(&config(&server, 2, 10), &store).await.unwrap();

        assert_eq!(report.links, set(&[format!("{}/next", server.uri())]));
        assert_eq!(hits(&server, "/next").await, 1);

        let records = store.read_all().unwrap();
        let origin = records
            .iter()
            .find(|r| r.url == format!("{}/", server.uri()))
            .unwrap();
        assert_eq!(origin.status, Some(404));
    }

    #[tokio::test]
    async fn test_shared_link_in_one_wave_is_fetched_once() {
        let server = MockServer::start().await;
        html(&server, "/", 200, r#"<a href="/b">b</a><a href="/c">c</a>"#).await;
        html(&server, "/b", 200, r#"<a href="/d">d</a>"#).await;
        html(&server, "/c", 200, r#"<a href="/d">d</a>"#).await;
        html(&server, "/d", 200, "<p>leaf</p>").await;

        let store = LinkStore::in_memory().unwrap();
        let report = crawl(&config(&server, 3, 10), &store).await.unwrap();

        let uri = server.uri();
        assert_eq!(
            report.links,
            set(&[format!("{uri}/b"), format!("{uri}/c"), format!("{uri}/d")])
        );
        assert_eq!(hits(&server, "/d").await, 1);
        assert_eq!(report.waves, 3);
    }

    #[tokio::test]
    async fn test_link_back_to_origin_is_not_refetched() {
        let server = MockServer::start().await;
        html(&server, "/", 200, r#"<a href="/">home</a><a href="/a">a</a>"#).await;
        html(&server, "/a", 200, r#"<a href="/">home</a>"#).await;

        let store = LinkStore::in_memory().unwrap();
        let report = crawl(&config(&server, 5, 10), &store).await.unwrap();

        assert_eq!(hits(&server, "/").await, 1);
        assert_eq!(hits(&server, "/a").await, 1);
        // The origin counts as a discovered link once something points at it
        assert!(report.links.contains(&format!("{}/", server.uri())));
    }

    #[tokio::test]
    async fn test_link_budget_caps_discovery() {
        let server = MockServer::start().await;
        let body: String = (0..10)
            .map(|i| format!("<a href=\"/p{i}\">{i}</a>"))
            .collect();
        html(&server, "/", 200, &body).await;

        let store = LinkStore::in_memory().unwrap();
        let report = crawl(&config(&server, 5, 3), &store).await.unwrap();

        assert_eq!(report.links.len(), 3);
        // Budget reached after the first wave, so nothing else is fetched
        assert_eq!(report.waves, 1);
        assert_eq!(total_hits(&server).await, 1);
    }

    #[tokio::test]
    async fn test_depth_bounds_the_number_of_waves() {
        let server = MockServer::start().await;
        html(&server, "/", 200, r#"<a href="/1">1</a>"#).await;
        html(&server, "/1", 200, r#"<a href="/2">2</a>"#).await;
        html(&server, "/2", 200, r#"<a href="/3">3</a>"#).await;

        let store = LinkStore::in_memory().unwrap();
        let report = crawl(&config(&server, 2, 10), &store).await.unwrap();

        let uri = server.uri();
        assert_eq!(report.waves, 2);
        assert_eq!(report.links, set(&[format!("{uri}/1"), format!("{uri}/2")]));
        assert_eq!(hits(&server, "/2").await, 0);
    }

    #[tokio::test]
    async fn test_failures_are_isolated() {
        let server = MockServer::start().await;
        html(
            &server,
            "/",
            200,
            r#"<a href="/ok">ok</a><a href="/data">data</a><a href="/slow">slow</a>"#,
        )
        .await;
        html(&server, "/ok", 200, r#"<a href="/deeper">deeper</a>"#).await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(b"{}".to_vec(), "application/json"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(b"<a href=\"/never\">x</a>".to_vec(), "text/html")
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let store = LinkStore::in_memory().unwrap();
        let config = config(&server, 2, 10).with_timeout(Duration::from_millis(300));
        let report = crawl(&config, &store).await.unwrap();

        let uri = server.uri();
        assert_eq!(report.failures, 1);
        assert_eq!(
            report.links,
            set(&[
                format!("{uri}/ok"),
                format!("{uri}/data"),
                format!("{uri}/slow"),
                format!("{uri}/deeper"),
            ])
        );
        assert!(report.visited.contains(&format!("{uri}/slow")));

        // Only HTML pages get a stored status
        let stored: HashSet<String> = store.read_all().unwrap().into_iter().map(|r| r.url).collect();
        assert_eq!(stored, set(&[format!("{uri}/"), format!("{uri}/ok")]));
    }

    #[tokio::test]
    async fn test_single_worker_gives_same_result() {
        let server = MockServer::start().await;
        html(&server, "/", 200, r#"<a href="/b">b</a><a href="/c">c</a>"#).await;
        html(&server, "/b", 200, r#"<a href="/d">d</a>"#).await;
        html(&server, "/c", 200, r#"<a href="/e">e</a>"#).await;

        let store = LinkStore::in_memory().unwrap();
        let config = config(&server, 2, 10).with_concurrency(1).unwrap();
        let report = crawl(&config, &store).await.unwrap();

        assert_eq!(report.links.len(), 4);
        assert_eq!(report.visited.len(), 3);
    }

    #[test]
    fn test_sorted_links() {
        let report = CrawlReport {
            links: set(&["http://e.test/b".to_string(), "http://e.test/a".to_string()]),
            ..Default::default()
        };
        assert_eq!(report.sorted_links(), vec!["http://e.test/a", "http://e.test/b"]);
    }
}
