//! Pixel grid: the packed-color buffer, the per-step visited flags,
//! the border ring and the initial particle block.

use crate::color::hsl_to_rgb;

/// Empty cell: opaque black. Particles fall through it.
pub const BACKGROUND: u32 = 0xFF00_0000;

/// Immovable boundary cell: opaque white. Never a move source or target.
pub const BORDER: u32 = 0xFFFF_FFFF;

/// Rejected grid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },
}

/// The initial rectangular block of particles, hue-shaded along y.
///
/// The default matches a fullscreen canvas: a 200×200 block a little
/// way in from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedBlock {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Default for SeedBlock {
    fn default() -> Self {
        Self {
            x: 400,
            y: 100,
            width: 200,
            height: 200,
        }
    }
}

/// 2D grid of packed pixels, row-major, `i = y * width + x`.
///
/// Out-of-bounds reads return [`BORDER`], as if the world outside
/// the buffer were border, and out-of-bounds writes are no-ops. The
/// outermost ring always holds [`BORDER`] once allocated; anything
/// else with full alpha is a movable particle.
#[derive(Debug)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub colors: Vec<u32>,
    pub visited: Vec<u8>,
}

impl Grid {
    /// Allocates a `width × height` grid filled with [`BACKGROUND`]
    /// inside a one-cell [`BORDER`] ring.
    ///
    /// # Errors
    /// Rejects zero dimensions before allocating anything.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroDimension { width, height });
        }
        let mut grid = Self {
            width,
            height,
            colors: vec![BACKGROUND; width * height],
            visited: vec![0; width * height],
        };
        grid.paint_border();
        Ok(grid)
    }

    #[must_use]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height
    }

    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> u32 {
        if self.in_bounds(x, y) {
            self.colors[y as usize * self.width + x as usize]
        } else {
            BORDER
        }
    }

    pub fn set(&mut self, x: i32, y: i32, color: u32) {
        if self.in_bounds(x, y) {
            self.colors[y as usize * self.width + x as usize] = color;
        }
    }

    /// Paints the particle block, fully saturated with the hue swept
    /// from 0 to 1 over the block's own height. Rows and columns that
    /// fall outside the grid are dropped, so a partial block still
    /// shows its slice of the full gradient.
    ///
    /// The border is repainted last: a block reaching the edge must
    /// not punch a hole in the ring.
    pub fn seed(&mut self, block: &SeedBlock) {
        for y in block.y..block.y + block.height {
            let hue = (y - block.y) as f32 / block.height as f32;
            let color = hsl_to_rgb(hue, 1.0, 0.5);
            for x in block.x..block.x + block.width {
                self.set(x as i32, y as i32, color);
            }
        }
        self.paint_border();
    }

    /// Resets the per-step visited flags.
    pub fn clear_visited(&mut self) {
        self.visited.fill(0);
    }

    fn paint_border(&mut self) {
        for x in 0..self.width {
            self.colors[x] = BORDER;
            self.colors[(self.height - 1) * self.width + x] = BORDER;
        }
        for y in 0..self.height {
            self.colors[y * self.width] = BORDER;
            self.colors[y * self.width + self.width - 1] = BORDER;
        }
    }
}
