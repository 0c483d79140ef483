//! Non-player traffic
//!
//! Each agent drives its lane at a constant speed and wraps conveyor-belt
//! style at the end of the road, which preserves the relative spacing inside
//! a lane. Agents never avoid each other; overlaps between NPCs are tolerated.
//!
//! Generation is seeded (Pcg32) so a level always produces the same traffic
//! for the same seed.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::road::RoadGeometry;
use super::state::{Aabb, Footprint};

/// Lateral jitter applied to each spawned car around its lane center (m)
const LANE_JITTER: f32 = 0.2;

/// One non-player vehicle
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficAgent {
    /// Ground-plane position; `.y` is the lateral z axis
    pub pos: Vec2,
    /// Constant speed (m/s)
    pub speed: f32,
    pub footprint: Footprint,
    /// Main-road lane index (0 = rightmost)
    pub lane: usize,
}

impl TrafficAgent {
    /// Move down the road by `speed * dt`. An agent found past `road_limit_x`
    /// is instead pulled back by exactly `wrap_reset_distance` and does not
    /// otherwise advance this tick.
    pub fn advance(&mut self, dt: f32, road_limit_x: f32, wrap_reset_distance: f32) {
        if self.pos.x > road_limit_x {
            self.pos.x -= wrap_reset_distance;
            return;
        }
        self.pos.x += self.speed * dt;
    }

    pub fn aabb(&self) -> Aabb {
        self.footprint.aabb_at(self.pos)
    }
}

/// Traffic generator parameters for one level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficConfig {
    /// Lane speeds in km/h, index = lane
    pub lane_speeds_kmh: Vec<f32>,
    /// Upper bound on cars per lane; a lane also stops filling once the
    /// placement cursor runs past the road length
    pub max_cars: Vec<usize>,
    /// Minimum extra gap between consecutive cars per lane (m)
    pub min_gaps: Vec<f32>,
    /// Random additional gap range per lane (m)
    pub max_gaps: Vec<f32>,
    /// Footprints drawn uniformly per car (trucks, hatchbacks, ...)
    pub car_types: Vec<Footprint>,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            lane_speeds_kmh: vec![95.0, 120.0],
            max_cars: vec![40, 20],
            min_gaps: vec![4.5, 7.0],
            max_gaps: vec![25.0, 50.0],
            car_types: vec![
                Footprint::new(16.5, 2.55),
                Footprint::new(4.66, 1.90),
                Footprint::new(4.66, 2.00),
                Footprint::new(3.57, 1.4),
                Footprint::new(4.4, 1.8),
                Footprint::new(4.2, 1.789),
            ],
        }
    }
}

/// Populate the main-road lanes, placing each lane's queue back from the
/// merge start so traffic streams past the player as the round opens.
pub fn generate(config: &TrafficConfig, road: &RoadGeometry, rng: &mut Pcg32) -> Vec<TrafficAgent> {
    let mut agents = Vec::new();

    for (lane, &speed_kmh) in config.lane_speeds_kmh.iter().enumerate() {
        let speed = speed_kmh / 3.6;
        let max_cars = config.max_cars.get(lane).copied().unwrap_or(0);
        let min_gap = config.min_gaps.get(lane).copied().unwrap_or(5.0);
        let max_gap = config.max_gaps.get(lane).copied().unwrap_or(20.0);

        let mut cursor = 0.0f32;
        for _ in 0..max_cars {
            let footprint = config.car_types[rng.random_range(0..config.car_types.len())];
            let jitter = rng.random_range(-LANE_JITTER..LANE_JITTER);

            agents.push(TrafficAgent {
                pos: Vec2::new(
                    road.merge_start - cursor - footprint.length / 2.0,
                    road.lane_center(lane) + jitter,
                ),
                speed,
                footprint,
                lane,
            });

            cursor += footprint.length + (min_gap + rng.random_range(0.0..1.0) * max_gap).floor();
            if cursor > road.main_road_length {
                break;
            }
        }
    }

    agents
}
