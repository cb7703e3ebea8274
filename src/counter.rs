// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local JSON persistence for the view counter.
//!
//! The counter lives in a small JSON document next to the badge artifact.
//! It doubles as the fallback view source when no GitHub token or Gist is
//! configured, and as the payload published to the Gist alongside the badge.

use std::{fs, path::Path};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{self, Error};

/// Default filename of the counter document.
pub const VIEWS_FILE: &str = "views-count.json";

/// Persisted counter record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewsRecord {
    /// Accumulated view count.
    pub views:        u64,
    /// RFC 3339 timestamp of the last update.
    pub last_updated: String
}

impl ViewsRecord {
    /// Creates a record for `views` stamped with the current UTC time.
    pub fn now(views: u64) -> Self {
        Self {
            views,
            last_updated: Utc::now().to_rfc3339()
        }
    }

    /// Serializes the record as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] when encoding fails.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Reads the view count from the counter file.
///
/// A missing file is not an error: the counter starts from zero. A file that
/// exists but cannot be read or parsed is reported so a corrupt counter is
/// never silently reset.
///
/// # Errors
///
/// Returns [`Error::Io`] when an existing file cannot be read and
/// [`Error::Json`] when its contents are not a valid record.
pub fn load_views(path: &Path) -> Result<u64, Error> {
    if !path.exists() {
        debug!("counter file {} absent, starting from 0", path.display());
        return Ok(0);
    }

    let contents = fs::read_to_string(path).map_err(|source| error::io_error(path, source))?;
    let record: ViewsRecord = serde_json::from_str(&contents)?;
    Ok(record.views)
}

/// Writes `views` to the counter file with a fresh timestamp.
///
/// # Errors
///
/// Returns [`Error::BadgeIo`] when the file cannot be written and
/// [`Error::Json`] when the record cannot be encoded.
pub fn save_views(path: &Path, views: u64) -> Result<ViewsRecord, Error> {
    let record = ViewsRecord::now(views);
    let json = record.to_json()?;
    fs::write(path, json).map_err(|source| error::badge_io_error(path, source))?;
    Ok(record)
}

/// Advances the local counter by one and persists the result.
///
/// This is the last resort of the view acquisition chain, used when neither
/// the Traffic API nor a Gist counter is reachable.
///
/// # Errors
///
/// Propagates [`load_views`] and [`save_views`] failures.
pub fn increment_views(path: &Path) -> Result<u64, Error> {
    let current = load_views(path)?;
    let next = current + 1;
    save_views(path, next)?;
    debug!("local counter advanced {current} -> {next}");
    Ok(next)
}
