//! Data-driven level table
//!
//! Each level bundles road parameters, a traffic generator config, the
//! vehicle tuning and the number of successful rounds required to clear it.
//! The final level keeps an unreachable threshold so the game loops there
//! indefinitely.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sim::dynamics::VehicleTuning;
use crate::sim::road::RoadParams;
use crate::sim::traffic::TrafficConfig;

/// Default successful rounds needed to clear a level
const DEFAULT_SUC_TO_PASS: u32 = 3;

/// One level descriptor, supplied to the simulation as plain data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    /// 1-based level number
    pub number: u32,
    pub road: RoadParams,
    pub traffic: TrafficConfig,
    pub tuning: VehicleTuning,
    /// Player entry speed onto the merge lane (m/s)
    pub starting_speed: f32,
    /// Consecutive successes required to advance
    pub suc_to_pass: u32,
}

/// Requesting a level outside the table is fatal to the request; there is no
/// safe fallback level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelError {
    pub requested: u32,
    pub max: u32,
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid level {} (valid range 1..={})",
            self.requested, self.max
        )
    }
}

impl std::error::Error for LevelError {}

/// The built-in campaign
pub struct LevelProvider {
    levels: Vec<Level>,
}

impl Default for LevelProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelProvider {
    pub fn new() -> Self {
        Self {
            levels: build_campaign(),
        }
    }

    /// Highest valid level number
    pub fn max_level(&self) -> u32 {
        self.levels.len() as u32
    }

    /// Fetch a level by its 1-based number
    pub fn get(&self, number: u32) -> Result<Level, LevelError> {
        if number == 0 || number > self.max_level() {
            return Err(LevelError {
                requested: number,
                max: self.max_level(),
            });
        }
        Ok(self.levels[(number - 1) as usize].clone())
    }
}

struct LevelSpec {
    main_road_length: f32,
    merging_road_length: f32,
    merge_start_offset: f32,
    starting_speed_kmh: f32,
    lane_speeds_kmh: [f32; 2],
    max_cars: [usize; 2],
    min_gaps: [f32; 2],
    max_gaps: [f32; 2],
    suc_to_pass: u32,
}

fn build_level(number: u32, spec: LevelSpec) -> Level {
    Level {
        number,
        road: RoadParams {
            main_road_length: spec.main_road_length,
            merging_road_length: spec.merging_road_length,
            merge_start_offset: spec.merge_start_offset,
            ..RoadParams::default()
        },
        traffic: TrafficConfig {
            lane_speeds_kmh: spec.lane_speeds_kmh.to_vec(),
            max_cars: spec.max_cars.to_vec(),
            min_gaps: spec.min_gaps.to_vec(),
            max_gaps: spec.max_gaps.to_vec(),
            ..TrafficConfig::default()
        },
        tuning: VehicleTuning::default(),
        starting_speed: spec.starting_speed_kmh / 3.6,
        suc_to_pass: spec.suc_to_pass,
    }
}

/// Ten levels: shrinking merge lanes, denser and faster traffic, higher entry
/// speeds. Level 10 never completes by design (`suc_to_pass` 999).
fn build_campaign() -> Vec<Level> {
    let specs = [
        LevelSpec {
            main_road_length: 600.0,
            merging_road_length: 350.0,
            merge_start_offset: 150.0,
            starting_speed_kmh: 30.0,
            lane_speeds_kmh: [85.0, 100.0],
            max_cars: [30, 20],
            min_gaps: [15.0, 20.0],
            max_gaps: [35.0, 60.0],
            suc_to_pass: DEFAULT_SUC_TO_PASS,
        },
        LevelSpec {
            main_road_length: 600.0,
            merging_road_length: 300.0,
            merge_start_offset: 150.0,
            starting_speed_kmh: 30.0,
            lane_speeds_kmh: [85.0, 100.0],
            max_cars: [30, 20],
            min_gaps: [10.0, 20.0],
            max_gaps: [30.0, 60.0],
            suc_to_pass: DEFAULT_SUC_TO_PASS,
        },
        LevelSpec {
            main_road_length: 600.0,
            merging_road_length: 280.0,
            merge_start_offset: 150.0,
            starting_speed_kmh: 40.0,
            lane_speeds_kmh: [85.0, 110.0],
            max_cars: [30, 30],
            min_gaps: [10.0, 15.0],
            max_gaps: [20.0, 40.0],
            suc_to_pass: DEFAULT_SUC_TO_PASS,
        },
        LevelSpec {
            main_road_length: 600.0,
            merging_road_length: 250.0,
            merge_start_offset: 150.0,
            starting_speed_kmh: 50.0,
            lane_speeds_kmh: [90.0, 110.0],
            max_cars: [30, 30],
            min_gaps: [5.0, 15.0],
            max_gaps: [15.0, 30.0],
            suc_to_pass: DEFAULT_SUC_TO_PASS,
        },
        LevelSpec {
            main_road_length: 600.0,
            merging_road_length: 250.0,
            merge_start_offset: 150.0,
            starting_speed_kmh: 45.0,
            lane_speeds_kmh: [90.0, 110.0],
            max_cars: [50, 50],
            min_gaps: [4.0, 12.0],
            max_gaps: [20.0, 40.0],
            suc_to_pass: DEFAULT_SUC_TO_PASS,
        },
        LevelSpec {
            main_road_length: 600.0,
            merging_road_length: 350.0,
            merge_start_offset: 150.0,
            starting_speed_kmh: 25.0,
            lane_speeds_kmh: [100.0, 120.0],
            max_cars: [50, 50],
            min_gaps: [4.0, 12.0],
            max_gaps: [20.0, 40.0],
            suc_to_pass: DEFAULT_SUC_TO_PASS,
        },
        LevelSpec {
            main_road_length: 600.0,
            merging_road_length: 350.0,
            merge_start_offset: 150.0,
            starting_speed_kmh: 30.0,
            lane_speeds_kmh: [100.0, 120.0],
            max_cars: [50, 50],
            min_gaps: [4.0, 8.0],
            max_gaps: [12.0, 28.0],
            suc_to_pass: DEFAULT_SUC_TO_PASS,
        },
        LevelSpec {
            main_road_length: 500.0,
            merging_road_length: 150.0,
            merge_start_offset: 150.0,
            starting_speed_kmh: 50.0,
            lane_speeds_kmh: [80.0, 120.0],
            max_cars: [50, 50],
            min_gaps: [10.0, 14.0],
            max_gaps: [10.0, 30.0],
            suc_to_pass: DEFAULT_SUC_TO_PASS,
        },
        LevelSpec {
            main_road_length: 500.0,
            merging_road_length: 130.0,
            merge_start_offset: 150.0,
            starting_speed_kmh: 65.0,
            lane_speeds_kmh: [80.0, 120.0],
            max_cars: [50, 50],
            min_gaps: [10.0, 15.0],
            max_gaps: [12.0, 30.0],
            suc_to_pass: DEFAULT_SUC_TO_PASS,
        },
        LevelSpec {
            main_road_length: 600.0,
            merging_road_length: 400.0,
            merge_start_offset: 150.0,
            starting_speed_kmh: 70.0,
            lane_speeds_kmh: [105.0, 130.0],
            max_cars: [50, 50],
            min_gaps: [4.0, 10.0],
            max_gaps: [8.0, 30.0],
            // Unreachable threshold: the campaign loops here forever
            suc_to_pass: 999,
        },
    ];

    specs
        .into_iter()
        .enumerate()
        .map(|(i, spec)| build_level(i as u32 + 1, spec))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campaign_has_ten_levels() {
        let provider = LevelProvider::new();
        assert_eq!(provider.max_level(), 10);
        for n in 1..=10 {
            let level = provider.get(n).unwrap();
            assert_eq!(level.number, n);
        }
    }

    #[test]
    fn test_out_of_range_is_an_error() {
        let provider = LevelProvider::new();
        assert_eq!(
            provider.get(0).unwrap_err(),
            LevelError {
                requested: 0,
                max: 10
            }
        );
        assert!(provider.get(11).is_err());
        let msg = provider.get(11).unwrap_err().to_string();
        assert!(msg.contains("11"));
    }

    #[test]
    fn test_final_level_is_unclearable() {
        let provider = LevelProvider::new();
        let last = provider.get(provider.max_level()).unwrap();
        assert_eq!(last.suc_to_pass, 999);
    }

    #[test]
    fn test_merge_lane_fits_on_road() {
        let provider = LevelProvider::new();
        for n in 1..=provider.max_level() {
            let level = provider.get(n).unwrap();
            assert!(
                level.road.merge_start_offset + level.road.merging_road_length
                    <= level.road.main_road_length,
                "level {n}"
            );
        }
    }

    #[test]
    fn test_entry_speed_is_mps() {
        let level = LevelProvider::new().get(1).unwrap();
        assert!((level.starting_speed - 30.0 / 3.6).abs() < 1e-5);
    }
}
