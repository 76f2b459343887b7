//! Gravity direction estimated from device sensor events.
//!
//! Two estimates are kept side by side: one fed by orientation events
//! (Tait-Bryan angles) and one fed by motion events (acceleration
//! including gravity). Exactly one of them drives the simulation;
//! both stay readable so the host can draw its debug compasses.
//!
//! Vectors are stored in screen terms: x grows toward the right edge
//! and y toward the bottom edge; z points out of the screen. There
//! is no error path here: if a sensor never fires, the last observed
//! (or default) vector simply keeps being served.

use glam::{Mat3, Vec3};

/// Straight down the screen.
const DEFAULT_DOWN: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Which sensor feeds the simulation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GravitySource {
    /// The `deviceorientation`-derived vector.
    #[default]
    Orientation,
    /// The `devicemotion`-derived vector.
    Motion,
}

/// Both gravity estimates plus the screen-rotation correction.
#[derive(Debug)]
pub struct GravityState {
    orientation: Vec3,
    motion: Vec3,
    screen: Mat3,
    source: GravitySource,
}

impl Default for GravityState {
    fn default() -> Self {
        Self {
            orientation: DEFAULT_DOWN,
            motion: DEFAULT_DOWN,
            screen: Mat3::IDENTITY,
            source: GravitySource::Orientation,
        }
    }
}

impl GravityState {
    /// Ingests a `deviceorientation` reading: intrinsic Z-X'-Y''
    /// Tait-Bryan angles in degrees.
    ///
    /// `R = Rz(α)·Rx(β)·Ry(γ)` maps device coordinates to earth
    /// coordinates, so its transpose brings the earth-frame down
    /// vector `(0, 0, -1)` into the device frame.
    pub fn update_orientation(&mut self, alpha: f32, beta: f32, gamma: f32) {
        let r = Mat3::from_rotation_z(alpha.to_radians())
            * Mat3::from_rotation_x(beta.to_radians())
            * Mat3::from_rotation_y(gamma.to_radians());
        let down = r.transpose() * Vec3::new(0.0, 0.0, -1.0);
        self.orientation = to_screen(self.screen * down);
    }

    /// Ingests a `devicemotion` reading: acceleration including
    /// gravity in m/s². The reported vector points away from gravity
    /// and runs to roughly ±9.81 per axis, so it is negated and
    /// scaled down to roughly ±1.
    pub fn update_motion(&mut self, x: f32, y: f32, z: f32) {
        let down = Vec3::new(-x, -y, -z) / 10.0;
        self.motion = to_screen(self.screen * down);
    }

    /// Records the screen-orientation angle in degrees, so later
    /// readings land in the rotated viewport's axes. Callers pass
    /// `window.orientation` as reported, without negating it.
    pub fn set_screen_angle(&mut self, degrees: f32) {
        self.screen = Mat3::from_rotation_z(degrees.to_radians());
    }

    /// Switches which sensor drives the simulation.
    pub fn select(&mut self, source: GravitySource) {
        self.source = source;
    }

    /// The vector driving the simulation this step.
    #[must_use]
    pub fn current(&self) -> Vec3 {
        match self.source {
            GravitySource::Orientation => self.orientation,
            GravitySource::Motion => self.motion,
        }
    }

    #[must_use]
    pub fn orientation(&self) -> Vec3 {
        self.orientation
    }

    #[must_use]
    pub fn motion(&self) -> Vec3 {
        self.motion
    }
}

/// Device y points up the screen, but pixel y grows downward: flip it.
fn to_screen(v: Vec3) -> Vec3 {
    Vec3::new(v.x, -v.y, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn defaults_point_down_the_screen() {
        let state = GravityState::default();
        assert_eq!(state.orientation(), DEFAULT_DOWN);
        assert_eq!(state.motion(), DEFAULT_DOWN);
        assert_eq!(state.current(), DEFAULT_DOWN);
    }

    #[test]
    fn select_switches_the_driving_source() {
        let mut state = GravityState::default();
        state.update_motion(0.0, 0.0, 9.81); // flat: into the screen
        assert_eq!(state.current(), state.orientation());

        state.select(GravitySource::Motion);
        assert_eq!(state.current(), state.motion());
        assert!(state.current().abs_diff_eq(Vec3::new(0.0, 0.0, -0.981), EPS));
    }

    #[test]
    fn flat_device_pulls_into_the_screen() {
        let mut state = GravityState::default();
        state.update_orientation(0.0, 0.0, 0.0);
        let g = state.orientation();
        assert!(g.abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), EPS), "got {g}");
    }

    #[test]
    fn upright_device_pulls_down_the_screen() {
        let mut state = GravityState::default();
        state.update_orientation(0.0, 90.0, 0.0);
        let g = state.orientation();
        assert!(g.abs_diff_eq(Vec3::new(0.0, 1.0, 0.0), EPS), "got {g}");
    }

    #[test]
    fn rolled_device_pulls_toward_the_low_edge() {
        let mut state = GravityState::default();
        state.update_orientation(0.0, 0.0, 90.0);
        let g = state.orientation();
        assert!(g.abs_diff_eq(Vec3::new(1.0, 0.0, 0.0), EPS), "got {g}");

        state.update_orientation(0.0, 0.0, -90.0);
        let g = state.orientation();
        assert!(g.abs_diff_eq(Vec3::new(-1.0, 0.0, 0.0), EPS), "got {g}");
    }

    #[test]
    fn motion_path_negates_and_scales() {
        let mut state = GravityState::default();
        // Upright at rest: the device reports the reaction force along
        // its y axis.
        state.update_motion(0.0, 9.81, 0.0);
        let g = state.motion();
        assert!(g.abs_diff_eq(Vec3::new(0.0, 0.981, 0.0), EPS), "got {g}");
    }

    #[test]
    fn screen_rotation_keeps_down_on_the_viewport() {
        // Device rolled onto its right edge while the viewport rotates
        // to landscape: gravity should still read as straight down the
        // (rotated) screen.
        let mut state = GravityState::default();
        state.set_screen_angle(-90.0);
        state.update_orientation(0.0, 0.0, 90.0);
        let g = state.orientation();
        assert!(g.abs_diff_eq(Vec3::new(0.0, 1.0, 0.0), EPS), "got {g}");
    }

    proptest! {
        // Spinning the device around the earth's vertical axis does
        // not change where gravity points relative to the device.
        #[test]
        fn prop_alpha_does_not_move_gravity(alpha in -360f32..360.0) {
            let mut state = GravityState::default();
            state.update_orientation(alpha, 90.0, 0.0);
            let g = state.orientation();
            prop_assert!(
                g.abs_diff_eq(Vec3::new(0.0, 1.0, 0.0), 1e-3),
                "alpha {alpha} moved gravity to {g}"
            );
        }
    }

    proptest! {
        // Rotations keep the vector unit length, so every component
        // stays within the documented rough bounds.
        #[test]
        fn prop_orientation_vector_stays_unit_length(
            alpha in -360f32..360.0,
            beta in -180f32..180.0,
            gamma in -90f32..90.0,
        ) {
            let mut state = GravityState::default();
            state.update_orientation(alpha, beta, gamma);
            let g = state.orientation();
            prop_assert!((g.length() - 1.0).abs() < 1e-3, "length {}", g.length());
        }
    }

    proptest! {
        #[test]
        fn prop_motion_vector_stays_in_rough_bounds(
            x in -15f32..15.0,
            y in -15f32..15.0,
            z in -15f32..15.0,
        ) {
            let mut state = GravityState::default();
            state.update_motion(x, y, z);
            let g = state.motion();
            prop_assert!(g.x.abs() <= 1.5 && g.y.abs() <= 1.5 && g.z.abs() <= 1.5);
        }
    }
}
