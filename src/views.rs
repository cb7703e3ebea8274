// SPDX-License-Identifier: MIT OR Apache-2.0

//! View count acquisition chain.
//!
//! No single source of view counts is authoritative: the Traffic API needs a
//! token with push access, the Gist counter needs a configured Gist id, and
//! the local JSON counter always works. Sources are tried in that order and
//! a failure in one simply moves the chain along, so `generate` degrades
//! gracefully all the way down to an offline run.

use std::{fmt, path::Path};

use octocrab::Octocrab;
use tracing::{info, warn};

use crate::{counter, error::Error, gist, traffic};

/// Which source ultimately supplied a view count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewSource {
    /// GitHub Traffic API statistics.
    Traffic,
    /// Counter record stored in a Gist.
    Gist,
    /// Local JSON counter, incremented for this run.
    LocalCounter
}

impl fmt::Display for ViewSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Traffic => "traffic API",
            Self::Gist => "gist counter",
            Self::LocalCounter => "local counter"
        };
        f.write_str(name)
    }
}

/// Resolves the current view count through the fallback chain.
///
/// # Arguments
///
/// * `client` - Authenticated GitHub client, when a token is configured
/// * `repository` - `owner/repo` slug for Traffic API queries
/// * `gist_id` - Gist holding the counter record
/// * `counter_path` - Local counter file, the source of last resort
///
/// # Errors
///
/// Returns an error only when every source fails, including the local
/// counter. Remote failures and zero traffic counts are logged and skipped.
pub async fn resolve_views(
    client: Option<&Octocrab>,
    repository: Option<&str>,
    gist_id: Option<&str>,
    counter_path: &Path
) -> Result<(u64, ViewSource), Error> {
    if let Some(client) = client {
        if let Some(repository) = repository {
            match traffic::fetch_profile_views(client, repository).await {
                Ok(count) if count > 0 => return Ok((count, ViewSource::Traffic)),
                Ok(_) => info!("traffic API reported no views, trying next source"),
                Err(error) => warn!("traffic API unavailable: {error}")
            }
        }

        if let Some(gist_id) = gist_id {
            match gist::fetch_gist_views(client, gist_id).await {
                Ok(views) => return Ok((views, ViewSource::Gist)),
                Err(error) => warn!("gist counter unavailable: {error}")
            }
        }
    }

    let views = counter::increment_views(counter_path)?;
    info!("using local counter: {views} views");
    Ok((views, ViewSource::LocalCounter))
}
