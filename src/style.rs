// SPDX-License-Identifier: MIT OR Apache-2.0

//! Badge style selection and normalization.
//!
//! Styles arrive as free-form strings from CLI flags or the `BADGE_STYLE`
//! environment variable. Normalization is deliberately forgiving: input is
//! trimmed, lowercased, matched against a small alias table, and anything
//! unrecognized falls back to the default animated variant. The renderer
//! itself only ever sees the resolved enum value.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Visual variants supported by the badge renderer.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum BadgeStyle {
    /// Static flat-color design with solid header and digit rows.
    Classic,
    /// Gradient, glow and motion effects driven by embedded CSS animations.
    #[default]
    Animated
}

impl BadgeStyle {
    /// Canonical names of the available styles, in declaration order.
    pub const NAMES: [&'static str; 2] = ["classic", "animated"];

    /// Normalizes a free-form style tag into a concrete variant.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Recognized aliases are `simple` and `basic` for [`BadgeStyle::Classic`]
    /// and `advanced` and `fancy` for [`BadgeStyle::Animated`]. Unrecognized
    /// input resolves to the default. This operation never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use views_badge::BadgeStyle;
    ///
    /// assert_eq!(BadgeStyle::normalize("  CLASSIC "), BadgeStyle::Classic);
    /// assert_eq!(BadgeStyle::normalize("fancy"), BadgeStyle::Animated);
    /// assert_eq!(BadgeStyle::normalize("no-such-style"), BadgeStyle::Animated);
    /// ```
    pub fn normalize(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "classic" | "simple" | "basic" => Self::Classic,
            "animated" | "advanced" | "fancy" => Self::Animated,
            _ => Self::default()
        }
    }

    /// Returns the canonical lowercase name of the style.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Animated => "animated"
        }
    }
}

impl fmt::Display for BadgeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BadgeStyle {
    type Err = std::convert::Infallible;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Ok(Self::normalize(tag))
    }
}
