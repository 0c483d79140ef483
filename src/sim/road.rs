//! Road geometry derived from level parameters
//!
//! Everything here is computed once at level load and stays immutable for the
//! level's lifetime. The ground plane is (x, z): x runs down the road, z grows
//! to the driver's right. The two-lane main road sits at negative z and the
//! merge lane at positive z, closed at its far end by a concrete block.

use serde::{Deserialize, Serialize};

/// Raw road parameters of a level, before derivation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadParams {
    /// Total main road length (m)
    pub main_road_length: f32,
    /// Width of one main-road lane (m)
    pub main_road_width: f32,
    /// Length of the merge lane (m)
    pub merging_road_length: f32,
    /// Width of the merge lane (m)
    pub merging_road_width: f32,
    /// Distance from the start of the main road to the start of the merge lane (m)
    pub merge_start_offset: f32,
}

impl Default for RoadParams {
    fn default() -> Self {
        Self {
            main_road_length: 400.0,
            main_road_width: 3.7,
            merging_road_length: 150.0,
            merging_road_width: 3.4,
            merge_start_offset: 150.0,
        }
    }
}

/// Derived scalar extents used by the collision check and traffic generator
#[derive(Debug, Clone, Copy)]
pub struct RoadGeometry {
    /// x of the start of the main road (the road is centered on x = 0)
    pub road_start: f32,
    pub main_road_length: f32,
    /// z of the rightmost main-road lane center
    pub main_road_center: f32,
    pub main_road_width: f32,
    /// x where the merge lane begins
    pub merge_start: f32,
    pub merge_length: f32,
    /// z of the merge-lane center
    pub merge_center: f32,
    pub merge_width: f32,
    /// z of the outer edge of the left main-road lane (hard shoulder)
    pub left_shoulder: f32,
    /// z of the right edge of the main road, where merge-lane territory begins
    pub main_right_edge: f32,
    /// z of the outer edge of the merge lane (barrier line)
    pub merge_outer_edge: f32,
    /// x where the merge lane is closed by the concrete block
    pub merge_end: f32,
    /// x of the goal line at the end of the main road
    pub goal_line_x: f32,
}

impl RoadGeometry {
    pub fn derive(p: &RoadParams) -> Self {
        let road_start = -p.main_road_length / 2.0;
        let main_road_center = -p.main_road_width / 2.0;
        let merge_start = road_start + p.merge_start_offset;
        let merge_center =
            main_road_center + p.main_road_width / 2.0 + p.merging_road_width / 2.0;

        Self {
            road_start,
            main_road_length: p.main_road_length,
            main_road_center,
            main_road_width: p.main_road_width,
            merge_start,
            merge_length: p.merging_road_length,
            merge_center,
            merge_width: p.merging_road_width,
            // Two lanes: centers at main_road_center and one lane width further left
            left_shoulder: main_road_center - p.main_road_width - p.main_road_width / 2.0,
            main_right_edge: main_road_center + p.main_road_width / 2.0,
            merge_outer_edge: merge_center + p.merging_road_width / 2.0,
            merge_end: merge_start + p.merging_road_length,
            goal_line_x: road_start + p.main_road_length,
        }
    }

    /// x past which a traffic agent wraps back
    #[inline]
    pub fn wrap_limit_x(&self) -> f32 {
        self.road_start + self.main_road_length
    }

    /// Distance subtracted when an agent wraps, preserving intra-lane spacing
    #[inline]
    pub fn wrap_reset_distance(&self) -> f32 {
        self.main_road_length
    }

    /// Center z of main-road lane `lane` (0 = rightmost, next to the merge lane)
    #[inline]
    pub fn lane_center(&self, lane: usize) -> f32 {
        self.main_road_center - self.main_road_width * lane as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_default_params() {
        let geo = RoadGeometry::derive(&RoadParams::default());

        assert_eq!(geo.road_start, -200.0);
        assert_eq!(geo.goal_line_x, 200.0);
        assert_eq!(geo.merge_start, -50.0);
        assert_eq!(geo.merge_end, 100.0);
        // Main road center is half a lane to the left of z = 0
        assert!((geo.main_road_center - (-1.85)).abs() < 1e-5);
        // Merge lane sits entirely right of the main road
        assert!((geo.merge_center - 1.7).abs() < 1e-5);
        assert!((geo.merge_outer_edge - 3.4).abs() < 1e-5);
        assert!((geo.main_right_edge - 0.0).abs() < 1e-5);
        // Left shoulder is past both lane centers
        assert!(geo.left_shoulder < geo.lane_center(1));
    }

    #[test]
    fn test_merge_zone_inside_road() {
        let geo = RoadGeometry::derive(&RoadParams::default());
        assert!(geo.merge_start >= geo.road_start);
        assert!(geo.merge_end <= geo.road_start + geo.main_road_length);
    }

    #[test]
    fn test_lane_centers_step_left() {
        let geo = RoadGeometry::derive(&RoadParams::default());
        let step = geo.lane_center(0) - geo.lane_center(1);
        assert!((step - geo.main_road_width).abs() < 1e-5);
    }
}
