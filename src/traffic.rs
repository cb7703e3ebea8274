// SPDX-License-Identifier: MIT OR Apache-2.0

//! View counts sourced from the GitHub Traffic API.
//!
//! The preferred counter is the visit statistics of the profile repository
//! (`owner/owner`). When that repository does not exist or is inaccessible,
//! the current repository's traffic is used instead. The Traffic API
//! requires push access, so both calls need an authenticated client.

use octocrab::Octocrab;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::Error;

/// Aggregate visit statistics returned by the Traffic API.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TrafficSummary {
    /// Total number of visits over the reporting window.
    pub count:   u64,
    /// Number of unique visitors over the reporting window.
    pub uniques: u64
}

/// Fetches the profile view count for the repository slug.
///
/// `repository` uses the `owner/repo` format of `GITHUB_REPOSITORY`. The
/// profile repository (`owner/owner`) is queried first; a 404 falls back to
/// the repository itself. A zero count is returned as-is so the caller can
/// decide whether to consult the next source.
///
/// # Errors
///
/// Returns [`Error::Validation`] for a malformed repository slug and
/// [`Error::Service`] when both traffic queries fail.
pub async fn fetch_profile_views(client: &Octocrab, repository: &str) -> Result<u64, Error> {
    let (owner, repo) = split_repository(repository)?;

    let profile_repo = format!("{owner}/{owner}");
    info!("fetching traffic statistics for {profile_repo}");

    match fetch_traffic(client, &profile_repo).await {
        Ok(summary) => {
            info!(
                "traffic for {profile_repo}: {} total, {} unique",
                summary.count, summary.uniques
            );
            Ok(summary.count)
        }
        Err(error) if is_not_found(&error) => {
            warn!("profile repository {profile_repo} not accessible, trying {owner}/{repo}");
            let summary = fetch_traffic(client, repository)
                .await
                .map_err(|e| Error::service(format!("traffic query for {repository} failed: {e}")))?;
            info!("traffic for {repository}: {} total", summary.count);
            Ok(summary.count)
        }
        Err(error) => Err(Error::service(format!(
            "traffic query for {profile_repo} failed: {error}"
        )))
    }
}

async fn fetch_traffic(client: &Octocrab, repository: &str) -> Result<TrafficSummary, octocrab::Error> {
    let route = format!("/repos/{repository}/traffic/views");
    client.get(route, None::<&()>).await
}

fn is_not_found(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::GitHub { source, .. } if source.status_code.as_u16() == 404
    )
}

fn split_repository(repository: &str) -> Result<(&str, &str), Error> {
    let mut parts = repository.splitn(2, '/');
    let owner = parts.next().filter(|s| !s.is_empty());
    let repo = parts.next().filter(|s| !s.is_empty());

    match (owner, repo) {
        (Some(owner), Some(repo)) => Ok((owner, repo)),
        _ => Err(Error::validation(format!(
            "repository must use the owner/repo format, got '{repository}'"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_repository_accepts_owner_repo() {
        let (owner, repo) = split_repository("octocat/hello-world").expect("valid slug");
        assert_eq!(owner, "octocat");
        assert_eq!(repo, "hello-world");
    }

    #[test]
    fn split_repository_rejects_missing_parts() {
        assert!(split_repository("octocat").is_err());
        assert!(split_repository("octocat/").is_err());
        assert!(split_repository("/repo").is_err());
        assert!(split_repository("").is_err());
    }

    #[test]
    fn traffic_summary_deserializes_api_payload() {
        let json = r#"{"count": 14850, "uniques": 3782, "views": []}"#;
        let summary: TrafficSummary = serde_json::from_str(json).expect("valid payload");
        assert_eq!(summary.count, 14850);
        assert_eq!(summary.uniques, 3782);
    }
}
