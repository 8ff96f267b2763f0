//! Firing-range geometry and engagement branch selection.

use crate::geometry::{distance, occupied_corners, Vec3};
use crate::protocol::{GunBlock, Ship, UserCommand};

use super::motion::MotionContext;

/// Closest pair of hull corners between shooter and target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FiringSolution {
    pub best_distance: i32,
    pub target_corner: Vec3,
    pub own_corner: Vec3,
}

/// Scan all 64 corner pairs for the minimum Chebyshev distance; the first
/// minimum found wins ties.
pub fn solve(own: &Ship, target: &Ship) -> FiringSolution {
    let mut best = FiringSolution {
        best_distance: i32::MAX,
        target_corner: target.position,
        own_corner: own.position,
    };
    for own_corner in occupied_corners(own.position) {
        for target_corner in occupied_corners(target.position) {
            let d = distance(own_corner, target_corner);
            if d < best.best_distance {
                best = FiringSolution {
                    best_distance: d,
                    target_corner,
                    own_corner,
                };
            }
        }
    }
    best
}

/// Plan one ship's engagement against its assigned target.
///
/// The branch is picked by comparing the first gun's radius to the
/// corner-pair distance: close the gap, brake and shoot, or kick away.
/// The too-far and too-close branches still try the opportunistic
/// nearest-enemy shot with every gun, since it scans all opponents, not
/// just the assigned one.
pub fn engage(
    ship: &Ship,
    target: &Ship,
    opponents: &[Ship],
    motion: &MotionContext,
    out: &mut Vec<UserCommand>,
) {
    let solution = solve(ship, target);
    let guns: Vec<&GunBlock> = ship.guns().collect();
    let engine = ship.engine();

    let (Some(gun), Some(engine)) = (guns.first(), engine) else {
        // Without both a gun and an engine there is no engagement to run;
        // close the distance and wait.
        out.push(motion.move_to(ship.id, solution.target_corner));
        return;
    };

    if gun.radius < solution.best_distance {
        out.push(motion.move_to(ship.id, solution.target_corner));
        for &gun in &guns {
            fire_at_weakest(ship, gun, opponents, out);
        }
    } else if gun.radius == solution.best_distance {
        out.push(motion.brake(ship));
        for (index, gun) in guns.iter().enumerate() {
            // Fan extra guns out along Z, one cell per gun.
            let aim = solution.target_corner + Vec3::new(0, 0, index as i32);
            out.push(UserCommand::Attack {
                id: ship.id,
                name: gun.name.clone(),
                target: aim,
            });
        }
    } else {
        out.push(motion.evade(ship, engine, solution));
        for &gun in &guns {
            fire_at_weakest(ship, gun, opponents, out);
        }
    }
}

/// Corner of the hull facing `enemy`, used as the notional turret for the
/// opportunistic shot: a positive axis delta selects that axis's +1 face.
fn firing_port(ship: &Ship, enemy: &Ship) -> Vec3 {
    let delta = enemy.position - ship.position;
    let face = |axis: i32| i32::from(axis > 0);
    ship.position + Vec3::new(face(delta.x), face(delta.y), face(delta.z))
}

/// Fire one gun at the lowest-health opponent any of whose corners is
/// inside the gun's radius from the firing port. Ignores the persistent
/// assignment entirely; emits nothing when no opponent is reachable.
pub fn fire_at_weakest(ship: &Ship, gun: &GunBlock, opponents: &[Ship], out: &mut Vec<UserCommand>) {
    let mut best: Option<(i32, Vec3)> = None;
    for enemy in opponents {
        let port = firing_port(ship, enemy);
        let mut nearest: Option<(i32, Vec3)> = None;
        for corner in occupied_corners(enemy.position) {
            let d = distance(port, corner);
            if d <= gun.radius && nearest.is_none_or(|(nd, _)| d < nd) {
                nearest = Some((d, corner));
            }
        }
        let Some((_, corner)) = nearest else {
            continue;
        };
        let health = enemy.health.unwrap_or(i32::MAX);
        if best.is_none_or(|(bh, _)| health < bh) {
            best = Some((health, corner));
        }
    }
    if let Some((_, corner)) = best {
        out.push(UserCommand::Attack {
            id: ship.id,
            name: gun.name.clone(),
            target: corner,
        });
    }
}
