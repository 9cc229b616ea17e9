use crate::pr::types::GitHubPrFile;
use crate::pr::{FileChangeSummary, PrError, PrUrl};
use reqwest::StatusCode;
use tracing::{debug, instrument};

const USER_AGENT: &str = "pr-relay";
const NO_PATCH_PLACEHOLDER: &str = "No patch available";

/// Authenticated GitHub API client shared across requests.
///
/// Holds the bearer token and API base URL resolved once at startup, so
/// handlers never touch ambient environment state.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    token: String,
    api_url: String,
}

impl GitHubClient {
    pub fn new(token: String, api_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            token,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    fn pulls_url(&self, pr: &PrUrl) -> String {
        format!(
            "{}/repos/{}/{}/pulls/{}",
            self.api_url, pr.owner, pr.repo, pr.number
        )
    }

    /// Fetch the changed files of a pull request and reshape each record
    /// into a FileChangeSummary, preserving upstream order.
    ///
    /// Any non-200 upstream status becomes PrError::Upstream with a generic
    /// detail; the upstream error body is never forwarded.
    #[instrument(skip(self), fields(owner = %pr.owner, repo = %pr.repo, pr = pr.number))]
    pub async fn list_pr_files(&self, pr: &PrUrl) -> Result<Vec<FileChangeSummary>, PrError> {
        let url = format!("{}/files", self.pulls_url(pr));

        debug!("fetching PR files from GitHub API");
        let response = self
            .http
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github+json")
            .bearer_auth(&self.token)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(PrError::Upstream {
                status: response.status().as_u16(),
                detail: "Failed to fetch PR files",
            });
        }

        let files = response.json::<Vec<GitHubPrFile>>().await?;
        debug!(files = files.len(), "received PR file list");

        Ok(summarize_files(files))
    }

    /// Set a pull request's description (the GitHub `body` field).
    #[instrument(skip(self, description), fields(owner = %pr.owner, repo = %pr.repo, pr = pr.number))]
    pub async fn update_pr_description(
        &self,
        pr: &PrUrl,
        description: &str,
    ) -> Result<(), PrError> {
        debug!("updating PR description via GitHub API");
        let response = self
            .http
            .patch(self.pulls_url(pr))
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github+json")
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "body": description }))
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(PrError::Upstream {
                status: response.status().as_u16(),
                detail: "Failed to update PR description",
            });
        }

        debug!("PR description updated");
        Ok(())
    }
}

/// Select the three fields our callers care about, substituting a
/// placeholder when GitHub omits the patch (binary files, oversized diffs).
fn summarize_files(files: Vec<GitHubPrFile>) -> Vec<FileChangeSummary> {
    files
        .into_iter()
        .map(|file| FileChangeSummary {
            filename: file.filename,
            changes: file.changes,
            patch: file
                .patch
                .unwrap_or_else(|| NO_PATCH_PLACEHOLDER.to_string()),
        })
        .collect()
}
