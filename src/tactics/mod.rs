//! Per-turn decision engine.
//!
//! One [`TurnEngine`] lives for the whole battle. Everything except the
//! target memory arrives fresh in each snapshot; ships decide
//! independently, so iteration order only affects the order of commands in
//! the output batch.

pub mod firing;
pub mod motion;
pub mod targeting;

pub use firing::{engage, fire_at_weakest, solve, FiringSolution};
pub use motion::MotionContext;
pub use targeting::TargetBook;

use crate::protocol::{BattleOutput, BattleState, DraftOptions, UserCommand};

/// Turn-by-turn command planner, owner of the cross-turn target memory.
#[derive(Debug)]
pub struct TurnEngine {
    motion: MotionContext,
    targets: TargetBook,
}

impl TurnEngine {
    pub fn new(player_id: i32, map_size: i32) -> Self {
        Self {
            motion: MotionContext {
                player_id,
                map_size,
            },
            targets: TargetBook::new(),
        }
    }

    pub fn from_draft(options: &DraftOptions) -> Self {
        Self::new(options.player_id, options.map_size)
    }

    /// Plan one full turn from a snapshot.
    pub fn plan_turn(&mut self, state: &BattleState) -> BattleOutput {
        let mut commands: Vec<UserCommand> = Vec::new();
        for ship in &state.my {
            match self.targets.assign(ship, &state.opponent) {
                Some(target) => {
                    firing::engage(ship, target, &state.opponent, &self.motion, &mut commands);
                }
                None => {
                    // Field is clear; drift toward the middle of the map.
                    commands.push(self.motion.move_to(ship.id, self.motion.center_waypoint()));
                }
            }
        }
        log::debug!(
            "turn planned: ships={} opponents={} commands={}",
            state.my.len(),
            state.opponent.len(),
            commands.len()
        );
        BattleOutput {
            message: None,
            user_commands: commands,
        }
    }
}
