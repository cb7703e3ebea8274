// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vertical SVG view-counter badge for GitHub profiles.
//!
//! The crate renders a badge shaped like a digital counter: an icon header
//! followed by one colored row per decimal digit of the view count. The
//! rendering core is pure and deterministic; view acquisition and
//! persistence (local JSON counter, Gist, GitHub Traffic API) are separate
//! collaborators wired together by the CLI.

mod badge;
mod counter;
mod error;
mod gist;
mod layout;
mod style;
mod traffic;
mod views;

pub use badge::{BADGE_FILE, render_badge, write_badge};
pub use counter::{VIEWS_FILE, ViewsRecord, increment_views, load_views, save_views};
pub use error::{Error, badge_io_error, io_error};
pub use gist::{GistPublishResult, fetch_gist_views, publish_badge};
pub use layout::{
    BadgeLayout, CORNER_RADIUS, DIGIT_HEIGHT, HEADER_HEIGHT, Particle, WIDTH, particle_positions
};
pub use style::BadgeStyle;
pub use traffic::{TrafficSummary, fetch_profile_views};
pub use views::{ViewSource, resolve_views};
