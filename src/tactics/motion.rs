//! Movement and acceleration command construction.

use crate::geometry::Vec3;
use crate::protocol::{EngineBlock, Ship, UserCommand};

use super::firing::FiringSolution;

/// Per-battle movement context, fixed at draft time.
#[derive(Clone, Copy, Debug)]
pub struct MotionContext {
    pub player_id: i32,
    pub map_size: i32,
}

impl MotionContext {
    /// Largest anchor cell a 2-cell-wide hull can occupy.
    fn anchor_bound(self) -> i32 {
        self.map_size - 2
    }

    /// The engine shows player 1 a mirrored coordinate frame, so waypoints
    /// computed here must be flipped before they go on the wire. Attack
    /// targets and acceleration deltas are absolute and stay untouched.
    pub fn mirrored(self, v: Vec3) -> Vec3 {
        if self.player_id == 1 {
            let bound = self.anchor_bound();
            Vec3::new(bound - v.x, bound - v.y, bound - v.z)
        } else {
            v
        }
    }

    /// MOVE order toward `waypoint`, mirrored when needed.
    pub fn move_to(self, id: i32, waypoint: Vec3) -> UserCommand {
        UserCommand::Move {
            id,
            target: self.mirrored(waypoint),
        }
    }

    /// Waypoint for a ship with nothing left to engage.
    pub fn center_waypoint(self) -> Vec3 {
        let mid = self.map_size / 2;
        Vec3::new(mid, mid, mid)
    }

    /// ACCELERATE order that cancels the ship's whole velocity this turn.
    pub fn brake(self, ship: &Ship) -> UserCommand {
        UserCommand::Accelerate {
            id: ship.id,
            vector: -ship.velocity,
        }
    }

    /// ACCELERATE order away from the closest corner pair, clamped to the
    /// engine limit. If the kick would carry the hull past the map's upper
    /// bound on any axis, the direction is reversed instead, back toward
    /// the interior.
    pub fn evade(self, ship: &Ship, engine: &EngineBlock, solution: FiringSolution) -> UserCommand {
        let mut escape =
            (solution.own_corner - solution.target_corner).clamp_per_axis(engine.max_accelerate);
        let landing = ship.position + escape;
        let bound = self.anchor_bound();
        if landing.x > bound || landing.y > bound || landing.z > bound {
            escape = -escape;
        }
        UserCommand::Accelerate {
            id: ship.id,
            vector: escape - ship.velocity,
        }
    }
}
