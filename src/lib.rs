//! Merge Lane - a highway merge driving simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (vehicle dynamics, traffic, collisions, game state)
//! - `levels`: Data-driven level table (road layout, traffic mix, vehicle tuning)
//! - `progress`: Round/level/lifetime counters
//! - `persistence`: Best-effort progress storage port

pub mod levels;
pub mod persistence;
pub mod progress;
pub mod sim;

pub use levels::{Level, LevelError, LevelProvider};
pub use progress::ProgressState;

use glam::Vec2;

/// Simulation constants shared by the dynamics model and the tick driver
pub mod consts {
    /// Aerodynamic drag coefficient of the player car body
    pub const DRAG_COEFFICIENT: f32 = 0.3;
    /// Air density at sea level (kg/m^3)
    pub const AIR_DENSITY: f32 = 1.225;
    /// Brake force applied while the brake is held (N)
    pub const MAX_BRAKE_FORCE: f32 = 8000.0;

    /// Below this speed (m/s) the full steering lock is available
    pub const STEER_ASSIST_SPEED: f32 = 1.0;
    /// Gain of the speed-sensitive steering assist. With the default tuning
    /// (0.3 rad lock, 2.7 m wheelbase) this saturates the yaw rate near
    /// 0.3 rad/s once the assist kicks in.
    pub const STEER_SPEED_GAIN: f32 = 0.37;
    /// Steering angles below this are treated as driving straight ahead,
    /// keeping the turning-radius division away from tan(0)
    pub const STEER_EPSILON: f32 = 1e-4;

    /// Upper clamp for the per-tick timestep (seconds). Frame hitches above
    /// this would destabilize the explicit Euler integration.
    pub const MAX_TICK_DT: f32 = 1.0 / 15.0;
}

/// Unit direction on the ground plane for a heading angle.
///
/// The plane is (x, z) with x pointing down the road and z growing to the
/// driver's right; a positive heading is a left yaw, so z decreases.
#[inline]
pub fn heading_dir(heading: f32) -> Vec2 {
    Vec2::new(heading.cos(), -heading.sin())
}

/// Convert m/s to km/h for display
#[inline]
pub fn mps_to_kmh(speed: f32) -> f32 {
    speed * 3.6
}
