use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::job::{JobId, JobRecord};

/// A bookmarked job as persisted in the `bookmarks` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarkRecord {
    pub id: JobId,
    pub title: String,
    pub location: String,
    pub salary: Option<String>,
    pub phone: Option<String>,
    pub description: String,
    pub company: String,
    /// Assigned by the store on first insert.
    pub saved_at: String,
}

/// Column values written on upsert. Has no `saved_at`: the store assigns it.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBookmark {
    pub id: JobId,
    pub title: String,
    pub location: String,
    pub salary: Option<String>,
    pub phone: Option<String>,
    pub description: String,
    pub company: String,
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl From<&JobRecord> for NewBookmark {
    fn from(job: &JobRecord) -> Self {
        Self {
            id: job.id.clone(),
            title: job.title.clone(),
            location: job.primary_details.place.clone(),
            salary: non_empty(&job.primary_details.salary),
            phone: non_empty(&job.whatsapp_no),
            description: job.other_details.clone(),
            company: job.company_name.clone(),
        }
    }
}

/// Point-in-time view of every bookmark, shared by all surfaces.
///
/// `ids` is derived from `records` inside [`BookmarkSnapshot::from_records`],
/// the only constructor, so the two can never disagree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookmarkSnapshot {
    records: Vec<BookmarkRecord>,
    ids: HashSet<JobId>,
}

impl BookmarkSnapshot {
    pub fn from_records(records: Vec<BookmarkRecord>) -> Self {
        let ids = records.iter().map(|r| r.id.clone()).collect();
        Self { records, ids }
    }

    /// Records ordered by `saved_at` ascending.
    pub fn records(&self) -> &[BookmarkRecord] {
        &self.records
    }

    pub fn ids(&self) -> &HashSet<JobId> {
        &self.ids
    }

    pub fn contains(&self, id: &JobId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
