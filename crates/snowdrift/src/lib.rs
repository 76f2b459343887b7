//! Sensor-driven falling-snow pixel simulation.
//!
//! The crate compiles to WASM. A browser host owns the canvas, the
//! sensor events and the animation loop; everything else (the pixel
//! buffer, the falling-pixel automaton and the gravity vectors) lives
//! here, behind [`Universe`]. The host drives [`Universe::tick`] once
//! per animation frame and blits the pixel buffer straight out of
//! WASM memory.

pub mod color;
pub mod direction;
pub mod engine;
pub mod frame;
pub mod gravity;
pub mod grid;


pub use direction::Direction;
pub use engine::Engine;
pub use frame::FrameClock;
pub use gravity::{GravitySource, GravityState};
pub use grid::{Grid, GridError, SeedBlock, BACKGROUND, BORDER};

use wasm_bindgen::prelude::*;

/// One full simulation: grid, engine, gravity state and frame clock.
///
/// By default pixels fall straight down the screen and the gravity
/// vectors are only read back for the debug compasses; call
/// [`Universe::set_follow_gravity`] to steer the fall with the live
/// sensor readings instead.
#[wasm_bindgen]
#[derive(Debug)]
pub struct Universe {
    grid: Grid,
    engine: Engine,
    gravity: GravityState,
    clock: FrameClock,
    follow_gravity: bool,
}

impl Universe {
    /// Creates a `width × height` universe seeded with the default
    /// particle block. All randomness flows from `seed`.
    ///
    /// # Errors
    /// Rejects zero dimensions.
    pub fn try_new(width: usize, height: usize, seed: u64) -> Result<Self, GridError> {
        let mut grid = Grid::new(width, height)?;
        grid.seed(&SeedBlock::default());
        Ok(Self {
            grid,
            engine: Engine::new(width, height, seed),
            gravity: GravityState::default(),
            clock: FrameClock::default(),
            follow_gravity: false,
        })
    }

    /// Replaces the grid for a new viewport size and reseeds the
    /// particle block. No pixel state survives a resize.
    ///
    /// # Errors
    /// Rejects zero dimensions; the previous grid is kept on error.
    pub fn try_resize(&mut self, width: usize, height: usize) -> Result<(), GridError> {
        let mut grid = Grid::new(width, height)?;
        grid.seed(&SeedBlock::default());
        self.grid = grid;
        self.engine.resize(width, height);
        Ok(())
    }
}

#[wasm_bindgen]
impl Universe {
    /// Advances the simulation by one step. `now_ms` is the host's
    /// animation-frame timestamp, used only for the FPS window;
    /// there is no pacing, the simulation runs as fast as it is
    /// called.
    pub fn tick(&mut self, now_ms: f64) {
        self.clock.frame(now_ms);
        let dir = if self.follow_gravity {
            Direction::from_gravity(self.gravity.current(), self.grid.width)
        } else {
            Direction::down_screen(self.grid.width)
        };
        self.engine.tick(&mut self.grid, dir);
    }

    /// Pointer to `width × height` packed RGBA pixels in WASM memory,
    /// row-major. Valid until the next resize.
    #[must_use]
    pub fn colors_ptr(&self) -> *const u32 {
        self.grid.colors.as_ptr()
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.grid.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.grid.height
    }

    /// Feeds a `deviceorientation` event (angles in degrees).
    pub fn update_orientation(&mut self, alpha: f32, beta: f32, gamma: f32) {
        self.gravity.update_orientation(alpha, beta, gamma);
    }

    /// Feeds a `devicemotion` event (acceleration including gravity,
    /// m/s²).
    pub fn update_motion(&mut self, x: f32, y: f32, z: f32) {
        self.gravity.update_motion(x, y, z);
    }

    /// Feeds the screen angle after an `orientationchange`: the host
    /// passes `window.orientation` degrees verbatim, no negation.
    pub fn set_screen_angle(&mut self, degrees: f32) {
        self.gravity.set_screen_angle(degrees);
    }

    /// Switches the driving sensor between orientation and motion.
    pub fn use_motion_source(&mut self, motion: bool) {
        self.gravity.select(if motion {
            GravitySource::Motion
        } else {
            GravitySource::Orientation
        });
    }

    /// When enabled, the fall direction follows the live gravity
    /// vector instead of staying fixed down-screen.
    pub fn set_follow_gravity(&mut self, follow: bool) {
        self.follow_gravity = follow;
    }

    /// Orientation-derived gravity as `[x, y, z]`, for the compass.
    #[must_use]
    pub fn orientation_gravity(&self) -> Vec<f32> {
        self.gravity.orientation().to_array().to_vec()
    }

    /// Motion-derived gravity as `[x, y, z]`, for the compass.
    #[must_use]
    pub fn motion_gravity(&self) -> Vec<f32> {
        self.gravity.motion().to_array().to_vec()
    }

    /// Frames per second over the last completed one-second window.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.clock.fps()
    }
}

// Building a `JsError` calls an imported JS function, which panics on
// non-wasm targets, so the throwing wrappers exist only on the wasm
// build. Native callers use `try_new`/`try_resize` directly.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl Universe {
    /// JS-facing [`Universe::try_new`].
    ///
    /// # Errors
    /// Throws on zero dimensions.
    #[wasm_bindgen(constructor)]
    pub fn new(width: usize, height: usize, seed: u64) -> Result<Universe, JsError> {
        Ok(Universe::try_new(width, height, seed)?)
    }

    /// JS-facing [`Universe::try_resize`].
    ///
    /// # Errors
    /// Throws on zero dimensions; the previous grid is kept.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), JsError> {
        Ok(self.try_resize(width, height)?)
    }
}
