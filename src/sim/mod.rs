//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - One synchronous tick per frame, dt supplied by the caller
//! - Seeded RNG only (traffic placement)
//! - No rendering or platform dependencies

pub mod collision;
pub mod dynamics;
pub mod road;
pub mod state;
pub mod tick;
pub mod traffic;

pub use collision::{RoundOutcome, evaluate};
pub use dynamics::VehicleTuning;
pub use road::{RoadGeometry, RoadParams};
pub use state::{Aabb, Footprint, GameState, HudSnapshot, PlayerState};
pub use tick::{TickInput, apply_outcome, tick};
pub use traffic::{TrafficAgent, TrafficConfig};
