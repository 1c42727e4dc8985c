use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a job posting, always held as a string.
///
/// The remote feed sends numeric ids while the bookmark table keys on
/// `TEXT`. Every conversion into a `JobId` goes through the `From` impls
/// below, so `42` and `"42"` always name the same bookmark.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawJobId", into = "String")]
pub struct JobId(String);

impl JobId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i64> for JobId {
    fn from(id: i64) -> Self {
        JobId(id.to_string())
    }
}

impl From<u64> for JobId {
    fn from(id: u64) -> Self {
        JobId(id.to_string())
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        JobId(id.trim().to_string())
    }
}

impl From<String> for JobId {
    fn from(id: String) -> Self {
        JobId::from(id.as_str())
    }
}

impl From<JobId> for String {
    fn from(id: JobId) -> Self {
        id.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wire shape of a job id: the feed uses numbers, stored rows use text.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawJobId {
    Unsigned(u64),
    Signed(i64),
    Text(String),
}

impl From<RawJobId> for JobId {
    fn from(raw: RawJobId) -> Self {
        match raw {
            RawJobId::Unsigned(n) => JobId::from(n),
            RawJobId::Signed(n) => JobId::from(n),
            RawJobId::Text(s) => JobId::from(s),
        }
    }
}

/// Headline details block of a job posting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimaryDetails {
    #[serde(rename = "Place")]
    pub place: String,
    #[serde(rename = "Salary")]
    pub salary: String,
    #[serde(rename = "Job_Type")]
    pub job_type: String,
    #[serde(rename = "Experience")]
    pub experience: String,
    #[serde(rename = "Qualification")]
    pub qualification: String,
    #[serde(rename = "Fees_Charged")]
    pub fees_charged: String,
}

/// A job posting as delivered by the remote feed.
///
/// Only the fields this crate reads are modelled; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: JobId,
    pub title: String,
    #[serde(default)]
    pub primary_details: PrimaryDetails,
    #[serde(default)]
    pub whatsapp_no: String,
    #[serde(default)]
    pub other_details: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub job_role: String,
    #[serde(default)]
    pub job_category: String,
    #[serde(default)]
    pub openings_count: u32,
    #[serde(default)]
    pub created_on: String,
    #[serde(default)]
    pub expire_on: String,
}

impl JobRecord {
    /// Minimal record with only an id and title, everything else defaulted.
    pub fn new(id: impl Into<JobId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            primary_details: PrimaryDetails::default(),
            whatsapp_no: String::new(),
            other_details: String::new(),
            company_name: String::new(),
            job_role: String::new(),
            job_category: String::new(),
            openings_count: 0,
            created_on: String::new(),
            expire_on: String::new(),
        }
    }
}

/// A job together with its bookmark state, as shown in the job list.
#[derive(Debug, Clone, Serialize)]
pub struct JobListItem {
    #[serde(flatten)]
    pub job: JobRecord,
    pub bookmarked: bool,
}
