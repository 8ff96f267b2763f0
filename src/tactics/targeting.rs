//! Cross-turn target assignment.

use std::collections::{HashMap, HashSet};

use crate::geometry::distance;
use crate::protocol::Ship;

/// Remembers which opponent each own ship is hunting.
///
/// The taken set spreads fire: an opponent nobody has claimed yet always
/// beats a claimed one, however close the claimed one sits. Ids are only
/// ever added to the set; destroyed opponents stay in it.
#[derive(Debug, Default)]
pub struct TargetBook {
    assigned: HashMap<i32, i32>,
    taken: HashSet<i32>,
}

impl TargetBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// The opponent `ship` should engage this turn.
    ///
    /// Keeps the remembered assignment while that opponent is still on the
    /// field. Otherwise picks the minimum of `(already claimed, Chebyshev
    /// distance)` over the current opponents, first match winning ties, and
    /// claims it. Returns `None` only when no opponents are left.
    pub fn assign<'a>(&mut self, ship: &Ship, opponents: &'a [Ship]) -> Option<&'a Ship> {
        if let Some(&current) = self.assigned.get(&ship.id) {
            if let Some(target) = opponents.iter().find(|opp| opp.id == current) {
                return Some(target);
            }
        }

        let target = opponents.iter().min_by_key(|opp| {
            (
                self.taken.contains(&opp.id),
                distance(ship.position, opp.position),
            )
        })?;
        self.assigned.insert(ship.id, target.id);
        self.taken.insert(target.id);
        Some(target)
    }
}
