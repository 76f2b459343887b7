//! Flat-index move offsets derived from a gravity vector.

use glam::Vec3;

/// The three candidate moves for one step, as signed offsets into the
/// flat pixel buffer: straight "down" plus its two flanking diagonals.
///
/// For an interior cell every offset lands inside the buffer, at worst
/// on the border ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    pub down: isize,
    pub left: isize,
    pub right: isize,
}

impl Direction {
    /// Fall toward increasing y, the bottom of the screen.
    #[must_use]
    pub fn down_screen(width: usize) -> Self {
        let w = width as isize;
        Self {
            down: w,
            left: w - 1,
            right: w + 1,
        }
    }

    /// Picks the offsets for whichever screen axis gravity pulls
    /// hardest along. The z component points into the screen and has
    /// nowhere to render, so only x and y compete; a tie falls
    /// vertically.
    #[must_use]
    pub fn from_gravity(gravity: Vec3, width: usize) -> Self {
        let w = width as isize;
        if gravity.x.abs() > gravity.y.abs() {
            if gravity.x < 0.0 {
                // Toward the left edge.
                Self {
                    down: -1,
                    left: -w - 1,
                    right: w - 1,
                }
            } else {
                // Toward the right edge.
                Self {
                    down: 1,
                    left: -w + 1,
                    right: w + 1,
                }
            }
        } else if gravity.y < 0.0 {
            // Toward the top edge.
            Self {
                down: -w,
                left: -w - 1,
                right: -w + 1,
            }
        } else {
            Self::down_screen(width)
        }
    }
}
