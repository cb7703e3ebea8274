// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gist-backed persistence for the badge and its counter.
//!
//! A private Gist acts as the durable home of the rendered badge and the
//! counter record, so the badge URL stays stable across repository history
//! rewrites. The Gist always carries two files: the SVG artifact and the
//! JSON counter document.

use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    badge::BADGE_FILE,
    counter::{VIEWS_FILE, ViewsRecord},
    error::Error
};

const GIST_DESCRIPTION: &str = "GitHub Profile Views Badge - Auto-generated";

/// Result of publishing badge artifacts to a Gist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GistPublishResult {
    /// Identifier of the updated or newly created Gist.
    pub gist_id:       String,
    /// Whether a new Gist was created.
    pub created:       bool,
    /// Browser URL of the Gist.
    pub html_url:      String,
    /// Raw URL of the badge file, suitable for embedding in a README.
    pub badge_raw_url: Option<String>
}

/// Reads the view count stored in the Gist's counter file.
///
/// # Arguments
///
/// * `client` - Authenticated GitHub client
/// * `gist_id` - Identifier of the Gist holding the counter
///
/// # Errors
///
/// Returns [`Error::Service`] when the Gist cannot be fetched, lacks the
/// counter file, or the counter content does not parse. Callers treat any of
/// these as a signal to fall back to the local counter.
pub async fn fetch_gist_views(client: &Octocrab, gist_id: &str) -> Result<u64, Error> {
    let gist = client
        .gists()
        .get(gist_id)
        .await
        .map_err(|e| Error::service(format!("failed to fetch gist {gist_id}: {e}")))?;

    let file = gist
        .files
        .get(VIEWS_FILE)
        .ok_or_else(|| Error::service(format!("gist {gist_id} does not contain {VIEWS_FILE}")))?;

    let content = file
        .content
        .as_deref()
        .ok_or_else(|| Error::service(format!("gist {gist_id} returned {VIEWS_FILE} without inline content")))?;

    let record: ViewsRecord = serde_json::from_str(content)
        .map_err(|e| Error::service(format!("failed to parse counter from gist {gist_id}: {e}")))?;

    debug!("read {} views from gist {gist_id}", record.views);
    Ok(record.views)
}

/// Publishes the badge and counter record to a Gist.
///
/// When `gist_id` is provided the existing Gist's files are replaced;
/// otherwise a new private Gist is created and its id returned so it can be
/// stored as a secret for subsequent runs.
///
/// # Arguments
///
/// * `client` - Authenticated GitHub client
/// * `gist_id` - Existing Gist identifier, or `None` to create one
/// * `badge_svg` - Rendered badge document
/// * `record` - Counter record accompanying the badge
///
/// # Errors
///
/// Returns [`Error::Json`] when the counter cannot be encoded and
/// [`Error::Service`] when the Gist API call fails.
pub async fn publish_badge(
    client: &Octocrab,
    gist_id: Option<&str>,
    badge_svg: &str,
    record: &ViewsRecord
) -> Result<GistPublishResult, Error> {
    let counter_json = record.to_json()?;

    let (gist, created) = match gist_id {
        Some(id) => {
            info!("updating gist {id}");
            let gist = client
                .gists()
                .update(id)
                .file(BADGE_FILE)
                .with_content(badge_svg)
                .file(VIEWS_FILE)
                .with_content(counter_json)
                .send()
                .await
                .map_err(|e| Error::service(format!("failed to update gist {id}: {e}")))?;
            (gist, false)
        }
        None => {
            info!("creating new private gist");
            let gist = client
                .gists()
                .create()
                .description(GIST_DESCRIPTION)
                .public(false)
                .file(BADGE_FILE, badge_svg)
                .file(VIEWS_FILE, counter_json)
                .send()
                .await
                .map_err(|e| Error::service(format!("failed to create gist: {e}")))?;
            (gist, true)
        }
    };

    let badge_raw_url = gist
        .files
        .get(BADGE_FILE)
        .map(|file| file.raw_url.to_string());

    Ok(GistPublishResult {
        gist_id: gist.id.to_string(),
        created,
        html_url: gist.html_url.to_string(),
        badge_raw_url
    })
}
