//! Game state and core simulation types
//!
//! Holds everything that lives across ticks: the player vehicle, the traffic
//! set, the derived road geometry and the progress counters. Mutation happens
//! only inside `tick` and the reset paths.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::dynamics::VehicleTuning;
use super::road::RoadGeometry;
use super::traffic::{self, TrafficAgent};
use crate::levels::Level;
use crate::mps_to_kmh;
use crate::progress::ProgressState;

/// Rectangular ground-plane extent of a vehicle (length along x, width along z)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub length: f32,
    pub width: f32,
}

impl Footprint {
    pub fn new(length: f32, width: f32) -> Self {
        Self { length, width }
    }

    /// Axis-aligned bounding box of this footprint centered at `pos`
    pub fn aabb_at(&self, pos: Vec2) -> Aabb {
        let half = Vec2::new(self.length / 2.0, self.width / 2.0);
        Aabb {
            min: pos - half,
            max: pos + half,
        }
    }
}

/// 2D axis-aligned bounding box on the ground plane, (x, z)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

/// The player-controlled vehicle
#[derive(Debug, Clone)]
pub struct PlayerState {
    /// Position on the ground plane; `.x` is down-road, `.y` is the lateral z axis
    pub pos: Vec2,
    /// Heading in radians, 0 = straight down the road, positive = yawed left
    pub heading: f32,
    /// Scalar forward speed (m/s, never negative)
    pub speed: f32,
    /// Current steering angle (radians, left positive), bounded by the tuning lock
    pub steering_angle: f32,
    /// Throttle held this tick
    pub throttle: bool,
    /// Brake held this tick (wins over throttle when both are down)
    pub brake: bool,
    pub footprint: Footprint,
}

impl PlayerState {
    /// Spawn the player at the start of the merge lane at the level's entry speed
    pub fn at_level_start(road: &RoadGeometry, tuning: &VehicleTuning, speed: f32) -> Self {
        Self {
            pos: Vec2::new(road.merge_start, road.merge_center),
            heading: 0.0,
            speed,
            steering_angle: 0.0,
            throttle: false,
            brake: false,
            footprint: tuning.footprint,
        }
    }

    pub fn aabb(&self) -> Aabb {
        self.footprint.aabb_at(self.pos)
    }
}

/// Read-only presentation data exposed after each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudSnapshot {
    /// Display speed in km/h
    pub speed_kmh: f32,
    /// Current level (1-based)
    pub level: u32,
    /// Consecutive successes so far this level
    pub round: u32,
    /// Successes required to clear the level
    pub needed: u32,
}

/// Complete simulation state for one running game
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed used for traffic placement, kept for level reloads
    pub seed: u64,
    pub level: Level,
    pub road: RoadGeometry,
    pub player: PlayerState,
    pub traffic: Vec<TrafficAgent>,
    pub progress: ProgressState,
}

impl GameState {
    /// Start a game on the given level with fresh traffic
    pub fn new(level: Level, progress: ProgressState, seed: u64) -> Self {
        let road = RoadGeometry::derive(&level.road);
        let mut rng = Pcg32::seed_from_u64(seed ^ u64::from(level.number));
        let traffic = traffic::generate(&level.traffic, &road, &mut rng);
        let player =
            PlayerState::at_level_start(&road, &level.tuning, level.starting_speed);

        Self {
            seed,
            level,
            road,
            player,
            traffic,
            progress,
        }
    }

    /// Tear down the current level and load another one, keeping the counters.
    /// Traffic is regenerated from a seed derived from the level number so two
    /// visits to the same level see the same placement.
    pub fn load_level(&mut self, level: Level) {
        self.road = RoadGeometry::derive(&level.road);
        let mut rng = Pcg32::seed_from_u64(self.seed ^ u64::from(level.number));
        self.traffic = traffic::generate(&level.traffic, &self.road, &mut rng);
        self.player =
            PlayerState::at_level_start(&self.road, &level.tuning, level.starting_speed);
        self.level = level;
    }

    /// Hard reset of the player to the level's initial pose and entry speed
    pub fn reset_player(&mut self) {
        self.player = PlayerState::at_level_start(
            &self.road,
            &self.level.tuning,
            self.level.starting_speed,
        );
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            speed_kmh: mps_to_kmh(self.player.speed),
            level: self.level.number,
            round: self.progress.round,
            needed: self.level.suc_to_pass,
        }
    }
}
