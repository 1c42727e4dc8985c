//! Unit tests for JobFeed pagination against a scripted JobSource.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use jobmark::services::job_feed::{HttpJobSource, JobFeed, JobPage, JobSource};
use jobmark::types::errors::FeedError;
use jobmark::types::job::JobRecord;
use jobmark::types::settings::FeedSettings;

/// Serves pre-built pages keyed by page number and records requests.
struct ScriptedSource {
    pages: Vec<(u32, JobPage)>,
    requested: Mutex<Vec<u32>>,
}

impl ScriptedSource {
    fn new(pages: Vec<(u32, JobPage)>) -> Self {
        Self {
            pages,
            requested: Mutex::new(Vec::new()),
        }
    }

    fn requested(&self) -> Vec<u32> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobSource for ScriptedSource {
    async fn fetch_page(&self, page: u32) -> JobPage {
        self.requested.lock().unwrap().push(page);
        self.pages
            .iter()
            .find(|(n, _)| *n == page)
            .map(|(_, p)| p.clone())
            .unwrap_or_default()
    }
}

fn jobs(ids: &[i64]) -> Vec<JobRecord> {
    ids.iter().map(|id| JobRecord::new(*id, format!("Job {}", id))).collect()
}

#[tokio::test]
async fn test_pages_append_until_empty() {
    let source = Arc::new(ScriptedSource::new(vec![
        (1, JobPage::ok(jobs(&[1, 2]))),
        (2, JobPage::ok(jobs(&[3]))),
    ]));
    let mut feed = JobFeed::new(source.clone(), 1);

    assert_eq!(feed.load_more().await.unwrap(), 2);
    assert_eq!(feed.load_more().await.unwrap(), 1);
    assert!(feed.has_more());
    assert_eq!(feed.load_more().await.unwrap(), 0);
    assert!(!feed.has_more());

    let ids: Vec<&str> = feed.jobs().iter().map(|j| j.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
    assert_eq!(source.requested(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_exhausted_feed_stops_requesting() {
    let source = Arc::new(ScriptedSource::new(vec![]));
    let mut feed = JobFeed::new(source.clone(), 1);

    assert_eq!(feed.load_more().await.unwrap(), 0);
    assert_eq!(feed.load_more().await.unwrap(), 0);
    assert_eq!(source.requested(), vec![1]);
}

#[tokio::test]
async fn test_error_on_empty_page_is_surfaced() {
    let source = Arc::new(ScriptedSource::new(vec![
        (1, JobPage::ok(jobs(&[1]))),
        (2, JobPage::failed(FeedError::Status(500))),
    ]));
    let mut feed = JobFeed::new(source, 1);

    feed.load_more().await.unwrap();
    let err = feed.load_more().await.unwrap_err();
    assert_eq!(err, FeedError::Status(500));
    assert_eq!(feed.last_error(), Some(&FeedError::Status(500)));
    assert!(!feed.has_more());
    assert_eq!(feed.jobs().len(), 1);
}

#[tokio::test]
async fn test_error_with_results_is_ignored() {
    let page = JobPage {
        results: jobs(&[1]),
        error: Some(FeedError::Transport("partial".to_string())),
    };
    let source = Arc::new(ScriptedSource::new(vec![(1, page)]));
    let mut feed = JobFeed::new(source, 1);

    assert_eq!(feed.load_more().await.unwrap(), 1);
    assert!(feed.last_error().is_none());
}

#[tokio::test]
async fn test_custom_first_page() {
    let source = Arc::new(ScriptedSource::new(vec![(5, JobPage::ok(jobs(&[50])))]));
    let mut feed = JobFeed::new(source.clone(), 5);

    assert_eq!(feed.load_more().await.unwrap(), 1);
    assert_eq!(feed.next_page(), 6);
    assert_eq!(source.requested(), vec![5]);
}

#[tokio::test]
async fn test_http_source_reports_transport_failure_as_empty_page() {
    // Port 9 (discard) on localhost is closed in test environments.
    let settings = FeedSettings {
        api_base_url: "http://127.0.0.1:9/common/jobs".to_string(),
        request_timeout_secs: 2,
        first_page: 1,
    };
    let source = HttpJobSource::new(&settings).unwrap();
    assert_eq!(source.base_url(), "http://127.0.0.1:9/common/jobs");

    let page = source.fetch_page(1).await;
    assert!(page.results.is_empty());
    assert!(matches!(page.error, Some(FeedError::Transport(_))));
}
