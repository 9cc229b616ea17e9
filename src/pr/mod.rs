pub mod types;

pub use types::{FileChangeSummary, PrUrl};

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrError {
    #[error("GitHub API request failed: {0}")]
    ApiRequest(#[from] reqwest::Error),

    #[error("Invalid GitHub Pull Request URL format: {0}")]
    InvalidUrl(String),

    #[error("{detail}")]
    Upstream { status: u16, detail: &'static str },

    #[error("GitHub token not found in config or environment")]
    MissingToken,
}

lazy_static! {
    static ref PR_URL_RE: Regex =
        Regex::new(r"github\.com/(?P<owner>[^/]+)/(?P<repo>[^/]+)/pull/(?P<number>\d+)").unwrap();
}

/// Parse a GitHub PR URL into its component parts.
///
/// The pattern is matched as a substring, not anchored: any input that
/// contains `github.com/{owner}/{repo}/pull/{number}` somewhere parses,
/// including URLs with trailing path segments like `/files`. Inputs
/// without the pattern fail with PrError::InvalidUrl.
pub fn parse_pr_url(url: &str) -> Result<PrUrl, PrError> {
    let captures = PR_URL_RE
        .captures(url)
        .ok_or_else(|| PrError::InvalidUrl(url.to_string()))?;

    let number = captures["number"]
        .parse::<u64>()
        .map_err(|_| PrError::InvalidUrl(url.to_string()))?;

    Ok(PrUrl {
        owner: captures["owner"].to_string(),
        repo: captures["repo"].to_string(),
        number,
    })
}
