//! Player vehicle dynamics
//!
//! Longitudinal force balance (engine, brake, aerodynamic drag) integrated
//! with explicit Euler, plus single-track "bicycle model" yaw kinematics.
//! The caller supplies dt in seconds (typically 1/60 to 1/30) and is
//! responsible for clamping it on frame hitches; see `consts::MAX_TICK_DT`.

use serde::{Deserialize, Serialize};

use super::state::{Footprint, PlayerState};
use crate::consts::{
    AIR_DENSITY, DRAG_COEFFICIENT, MAX_BRAKE_FORCE, STEER_ASSIST_SPEED, STEER_EPSILON,
    STEER_SPEED_GAIN,
};
use crate::heading_dir;

/// Immutable per-level vehicle parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VehicleTuning {
    /// Top speed (m/s); engine force fades to zero as speed approaches it
    pub max_speed: f32,
    /// Vehicle mass (kg)
    pub mass: f32,
    /// Frontal area for drag (m^2)
    pub front_area: f32,
    /// Peak engine drive force (N)
    pub engine_force: f32,
    /// Axle distance for the bicycle model (m)
    pub wheelbase: f32,
    /// Steering lock (radians, applied symmetrically)
    pub max_steering_angle: f32,
    pub footprint: Footprint,
}

impl Default for VehicleTuning {
    fn default() -> Self {
        Self {
            max_speed: 200.0 / 3.6,
            mass: 1200.0,
            front_area: 2.5,
            engine_force: 4100.0,
            wheelbase: 2.7,
            max_steering_angle: 0.3,
            footprint: Footprint::new(4.56, 1.823),
        }
    }
}

/// Steering angle actually commanded for a raw input in [-1, 1].
///
/// Left is positive, right is negative. At walking pace the full lock is
/// available; above `STEER_ASSIST_SPEED` the authority falls off inversely
/// with speed so a motorway-speed tap of the key stays a gentle lane change.
fn commanded_steering(steer_input: f32, speed: f32, tuning: &VehicleTuning) -> f32 {
    let authority = if speed < STEER_ASSIST_SPEED {
        tuning.max_steering_angle
    } else {
        (tuning.max_steering_angle / (speed * STEER_SPEED_GAIN)).min(tuning.max_steering_angle)
    };
    steer_input.clamp(-1.0, 1.0) * authority
}

/// Advance the player vehicle by one timestep.
///
/// `throttle` and `brake` are 0.0 or 1.0 intent levels; `steer_input` is
/// -1.0 (right), 0.0 (center) or 1.0 (left). Mutates only the player state.
pub fn advance(
    player: &mut PlayerState,
    tuning: &VehicleTuning,
    throttle: f32,
    brake: f32,
    steer_input: f32,
    dt: f32,
) {
    // Longitudinal force balance
    let engine_force = throttle * tuning.engine_force * (1.0 - player.speed / tuning.max_speed);
    let brake_force = brake * MAX_BRAKE_FORCE;
    let drag_factor = 0.5 * DRAG_COEFFICIENT * AIR_DENSITY * tuning.front_area / tuning.mass;

    let acceleration =
        (engine_force - brake_force) / tuning.mass - drag_factor * player.speed * player.speed;
    player.speed = (player.speed + acceleration * dt).max(0.0);

    // Bicycle model: turning radius = wheelbase / tan(steering angle).
    // A near-zero steering angle means a near-infinite radius, so yaw is
    // pinned to exactly zero instead of dividing through.
    player.steering_angle = commanded_steering(steer_input, player.speed, tuning);
    let angular_velocity = if player.steering_angle.abs() < STEER_EPSILON {
        0.0
    } else {
        let turning_radius = tuning.wheelbase / player.steering_angle.tan();
        player.speed / turning_radius
    };

    player.heading += angular_velocity * dt;
    player.pos += heading_dir(player.heading) * (player.speed * dt);

    player.throttle = throttle > 0.0;
    player.brake = brake > 0.0;
}
