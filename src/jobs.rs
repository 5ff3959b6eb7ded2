//! Job-application board: status model and client-side filtering.
//!
//! The board view keeps the full list in memory and filters it locally when
//! the user switches status tabs; no request is made per tab.

#[cfg(test)]
#[path = "jobs_test.rs"]
mod jobs_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobStatus {
    Applied,
    InReview,
    Interview,
    Offer,
    Rejected,
}

impl JobStatus {
    pub const ALL: [Self; 5] = [Self::Applied, Self::InReview, Self::Interview, Self::Offer, Self::Rejected];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::InReview => "in-review",
            Self::Interview => "interview",
            Self::Offer => "offer",
            Self::Rejected => "rejected",
        }
    }

    /// Title-cased display label, e.g. `In Review`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Applied => "Applied",
            Self::InReview => "In Review",
            Self::Interview => "Interview",
            Self::Offer => "Offer",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown job status '{0}' (expected applied, in-review, interview, offer, or rejected)")]
pub struct UnknownStatus(pub String);

impl FromStr for JobStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStatus(s.to_owned()))
    }
}

/// A tracked job application as the board renders it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: String,
    pub company: String,
    pub position: String,
    pub status: JobStatus,
    #[serde(default, alias = "appliedDate")]
    pub applied_date: Option<String>,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, alias = "type")]
    pub job_type: String,
}

// =============================================================================
// FILTERING
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(JobStatus),
}

impl StatusFilter {
    #[must_use]
    pub fn matches(self, job: &JobApplication) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => job.status == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

/// Jobs matching `filter`, in their original order.
#[must_use]
pub fn filter_jobs(jobs: &[JobApplication], filter: StatusFilter) -> Vec<&JobApplication> {
    jobs.iter().filter(|job| filter.matches(job)).collect()
}

/// Per-tab counts for the board header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub all: usize,
    pub applied: usize,
    pub in_review: usize,
    pub interview: usize,
    pub offer: usize,
    pub rejected: usize,
}

impl StatusCounts {
    #[must_use]
    pub fn get(&self, filter: StatusFilter) -> usize {
        match filter {
            StatusFilter::All => self.all,
            StatusFilter::Only(JobStatus::Applied) => self.applied,
            StatusFilter::Only(JobStatus::InReview) => self.in_review,
            StatusFilter::Only(JobStatus::Interview) => self.interview,
            StatusFilter::Only(JobStatus::Offer) => self.offer,
            StatusFilter::Only(JobStatus::Rejected) => self.rejected,
        }
    }
}

#[must_use]
pub fn status_counts(jobs: &[JobApplication]) -> StatusCounts {
    jobs.iter().fold(StatusCounts { all: jobs.len(), ..StatusCounts::default() }, |mut counts, job| {
        match job.status {
            JobStatus::Applied => counts.applied += 1,
            JobStatus::InReview => counts.in_review += 1,
            JobStatus::Interview => counts.interview += 1,
            JobStatus::Offer => counts.offer += 1,
            JobStatus::Rejected => counts.rejected += 1,
        }
        counts
    })
}

/// Pull the job list out of a `GET /jobs` body. Accepts a bare array or an
/// object with a `jobs` array; entries that do not parse are skipped.
#[must_use]
pub fn jobs_from_body(body: &serde_json::Value) -> Vec<JobApplication> {
    let items = body.as_array().or_else(|| body.get("jobs").and_then(serde_json::Value::as_array));
    items
        .map(|items| items.iter().filter_map(|item| serde_json::from_value(item.clone()).ok()).collect())
        .unwrap_or_default()
}
