use serde::{Deserialize, Serialize};

/// Represents the parsed components of a GitHub PR URL.
/// Extracted by parse_pr_url() in pr/mod.rs; lives for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrUrl {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

/// A single changed file as returned to our callers.
///
/// Reshaped from the GitHub files endpoint response: only filename, the
/// total change count, and the patch survive. `patch` is always present
/// here; records that arrive without one get a placeholder.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FileChangeSummary {
    pub filename: String,
    pub changes: u64,
    pub patch: String,
}

/// One entry of the GitHub `GET .../pulls/{number}/files` response.
/// GitHub omits `patch` for binary files and very large diffs.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubPrFile {
    pub filename: String,
    pub changes: u64,
    pub patch: Option<String>,
}
