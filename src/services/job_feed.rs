//! Job Feed for jobmark.
//!
//! `JobSource` is the port to the remote listings API; `HttpJobSource`
//! implements it with `reqwest`. `JobFeed` drives pagination for the job
//! list surface: pages are appended until one comes back empty.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::types::errors::FeedError;
use crate::types::job::JobRecord;
use crate::types::settings::FeedSettings;

/// One page of results from the remote feed.
///
/// Failures are reported in `error` alongside an empty `results`, never as a panic
/// or a dropped page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobPage {
    pub results: Vec<JobRecord>,
    pub error: Option<FeedError>,
}

impl JobPage {
    pub fn ok(results: Vec<JobRecord>) -> Self {
        Self {
            results,
            error: None,
        }
    }

    pub fn failed(error: FeedError) -> Self {
        Self {
            results: Vec::new(),
            error: Some(error),
        }
    }
}

/// Port to a paginated source of job postings.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch_page(&self, page: u32) -> JobPage;
}

#[derive(Deserialize)]
struct PageBody {
    #[serde(default)]
    results: Vec<Value>,
}

/// Parses a feed response body.
///
/// Entries that are not job postings (the feed interleaves other card types)
/// are skipped.
pub fn parse_page(body: &str) -> Result<Vec<JobRecord>, FeedError> {
    let page: PageBody =
        serde_json::from_str(body).map_err(|e| FeedError::Decode(e.to_string()))?;

    let mut jobs = Vec::with_capacity(page.results.len());
    for item in page.results {
        match serde_json::from_value::<JobRecord>(item) {
            Ok(job) => jobs.push(job),
            Err(e) => debug!(error = %e, "skipping non-job feed entry"),
        }
    }
    Ok(jobs)
}

/// `JobSource` that calls `GET {base_url}?page={n}`.
pub struct HttpJobSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpJobSource {
    pub fn new(settings: &FeedSettings) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| FeedError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: settings.api_base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn request_page(&self, page: u32) -> Result<Vec<JobRecord>, FeedError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("page", page)])
            .send()
            .await
            .map_err(|e| FeedError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FeedError::Transport(e.to_string()))?;
        parse_page(&body)
    }
}

#[async_trait]
impl JobSource for HttpJobSource {
    async fn fetch_page(&self, page: u32) -> JobPage {
        match self.request_page(page).await {
            Ok(results) => JobPage::ok(results),
            Err(e) => {
                warn!(page, url = %self.base_url, error = %e, "job page fetch failed");
                JobPage::failed(e)
            }
        }
    }
}

/// Infinite-scroll state of the job list.
pub struct JobFeed {
    source: Arc<dyn JobSource>,
    next_page: u32,
    has_more: bool,
    jobs: Vec<JobRecord>,
    last_error: Option<FeedError>,
}

impl JobFeed {
    pub fn new(source: Arc<dyn JobSource>, first_page: u32) -> Self {
        Self {
            source,
            next_page: first_page,
            has_more: true,
            jobs: Vec::new(),
            last_error: None,
        }
    }

    /// Fetches the next page and appends it. Returns how many jobs were added.
    ///
    /// An empty page ends pagination. The source's error is returned only
    /// when it came with an empty page; once pagination has ended this is a
    /// no-op returning `Ok(0)`.
    pub async fn load_more(&mut self) -> Result<usize, FeedError> {
        if !self.has_more {
            return Ok(0);
        }

        let page = self.source.fetch_page(self.next_page).await;
        if page.results.is_empty() {
            self.has_more = false;
            if let Some(e) = page.error {
                self.last_error = Some(e.clone());
                return Err(e);
            }
            debug!(page = self.next_page, "job feed exhausted");
            return Ok(0);
        }

        let added = page.results.len();
        self.jobs.extend(page.results);
        self.next_page += 1;
        self.last_error = None;
        Ok(added)
    }

    pub fn jobs(&self) -> &[JobRecord] {
        &self.jobs
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    pub fn last_error(&self) -> Option<&FeedError> {
        self.last_error.as_ref()
    }
}
