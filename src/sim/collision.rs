//! Round outcome evaluation
//!
//! One pass per tick over the player's footprint box, the traffic set and the
//! road extents. The check order is load-bearing: boundary and traffic checks
//! run before the goal check so that clipping a car exactly on the goal line
//! still fails the round.

use super::road::RoadGeometry;
use super::state::Aabb;
use super::traffic::TrafficAgent;

/// Result of one tick's evaluation, consumed immediately by the progression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Round still in progress
    Continuing,
    /// Left the drivable corridor or ran out of merge lane
    BoundaryViolation,
    /// Footprint overlap with a traffic vehicle
    TrafficCollision,
    /// Front edge crossed the goal line
    GoalReached,
}

/// Evaluate the current round state.
///
/// Boundary predicate, in road coordinates (`min.y` = left edge, `max.y` =
/// right edge, `max.x` = front edge):
/// - left edge past the outer main-road shoulder, or
/// - right edge past the merge lane's outer barrier, or
/// - front past the end of the merge zone while the right edge still hangs
///   into former merge-lane territory (the merge was never completed and the
///   concrete block closes the lane).
pub fn evaluate(
    player_box: &Aabb,
    traffic: &[TrafficAgent],
    road: &RoadGeometry,
) -> RoundOutcome {
    let front = player_box.max.x;
    let left = player_box.min.y;
    let right = player_box.max.y;

    if left < road.left_shoulder
        || right > road.merge_outer_edge
        || (front > road.merge_end && right > road.main_right_edge)
    {
        return RoundOutcome::BoundaryViolation;
    }

    for agent in traffic {
        if agent.aabb().intersects(player_box) {
            return RoundOutcome::TrafficCollision;
        }
    }

    if front > road.goal_line_x {
        return RoundOutcome::GoalReached;
    }

    RoundOutcome::Continuing
}
