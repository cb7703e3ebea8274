// SPDX-License-Identifier: MIT OR Apache-2.0

//! Badge geometry derived from the view count.
//!
//! The badge is a fixed-width column: a header block followed by one row per
//! decimal digit. All values are computed up front so the renderer only has
//! to interpolate them into markup. Nothing here touches I/O or global state.

/// Fixed badge width in pixels, shared by both styles.
pub const WIDTH: u32 = 40;

/// Height of the icon header block in pixels.
pub const HEADER_HEIGHT: u32 = 40;

/// Height of a single digit row in pixels.
pub const DIGIT_HEIGHT: u32 = 32;

/// Corner radius applied to the header top and the classic bottom row.
pub const CORNER_RADIUS: u32 = 4;

/// Vertical offset from a row's top edge to the digit text baseline.
pub const TEXT_BASELINE_OFFSET: u32 = 21;

/// Horizontal center of the badge, used as the text anchor.
pub const TEXT_CENTER_X: u32 = WIDTH / 2;

const PARTICLE_START_Y: u32 = 56;
const PARTICLE_STEP: u32 = 32;
const PARTICLE_BOTTOM_MARGIN: u32 = 16;
const PARTICLE_X_EVEN: u32 = 15;
const PARTICLE_X_ODD: u32 = 25;

/// Resolved badge geometry for a specific view count.
///
/// The total height grows linearly with the number of decimal digits:
/// `HEADER_HEIGHT + digit_count * DIGIT_HEIGHT`. Zero renders as a single
/// `"0"` row, so `digit_count` is always at least one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeLayout {
    digits:       String,
    total_height: u32
}

impl BadgeLayout {
    /// Computes the layout for the provided view count.
    ///
    /// # Examples
    ///
    /// ```
    /// use views_badge::BadgeLayout;
    ///
    /// let layout = BadgeLayout::for_views(305);
    /// assert_eq!(layout.digit_count(), 3);
    /// assert_eq!(layout.total_height(), 40 + 3 * 32);
    /// assert_eq!(layout.digits(), "305");
    /// ```
    pub fn for_views(views: u64) -> Self {
        let digits = views.to_string();
        let digit_count = digits.len() as u32;

        Self {
            digits,
            total_height: HEADER_HEIGHT + digit_count * DIGIT_HEIGHT
        }
    }

    /// Decimal digits of the view count, most significant first.
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Number of digit rows in the badge body.
    pub fn digit_count(&self) -> usize {
        self.digits.len()
    }

    /// Full badge height in pixels.
    pub fn total_height(&self) -> u32 {
        self.total_height
    }

    /// Top edge of the digit row at `index`.
    pub fn row_top(&self, index: usize) -> u32 {
        HEADER_HEIGHT + index as u32 * DIGIT_HEIGHT
    }

    /// Text baseline of the digit row at `index`.
    pub fn text_baseline(&self, index: usize) -> u32 {
        self.row_top(index) + TEXT_BASELINE_OFFSET
    }
}

/// A single floating-particle circle in the animated variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Particle {
    /// Horizontal center of the circle.
    pub x:          u32,
    /// Vertical center of the circle.
    pub y:          u32,
    /// Animation delay in seconds.
    pub delay_secs: u32
}

/// Generates the particle column for a badge of the given total height.
///
/// Positions step downward from a fixed start until the next particle would
/// intrude on the bottom margin. The horizontal offset alternates between two
/// fixed columns and the animation delay grows by two seconds per particle,
/// so taller badges get a longer, staggered drift.
///
/// # Examples
///
/// ```
/// use views_badge::{BadgeLayout, particle_positions};
///
/// let layout = BadgeLayout::for_views(1234);
/// let particles = particle_positions(layout.total_height());
/// assert!(particles.iter().all(|p| p.y < layout.total_height() - 16));
/// ```
pub fn particle_positions(total_height: u32) -> Vec<Particle> {
    let limit = total_height.saturating_sub(PARTICLE_BOTTOM_MARGIN);
    let mut particles = Vec::new();
    let mut y = PARTICLE_START_Y;
    let mut index = 0u32;

    while y < limit {
        let x = if index % 2 == 0 {
            PARTICLE_X_EVEN
        } else {
            PARTICLE_X_ODD
        };
        particles.push(Particle {
            x,
            y,
            delay_secs: index * 2
        });
        y += PARTICLE_STEP;
        index += 1;
    }

    particles
}
