//! Draft phase: turn the purchase budget into a fleet.

use crate::protocol::{DraftChoice, DraftOptions, DraftShipChoice};

/// Buy the cheapest roster hull (roster order breaks price ties) until the
/// money or the fleet cap runs out. Positions are left unset so the engine
/// auto-places inside the start area.
pub fn plan_draft(options: &DraftOptions) -> DraftChoice {
    let mut choice = DraftChoice::default();
    let Some(cheapest) = options.ships.iter().min_by_key(|ship| ship.price) else {
        return choice;
    };

    let mut money = options.money;
    while money >= cheapest.price && (choice.ships.len() as i32) < options.max_ships_count {
        money -= cheapest.price;
        choice.ships.push(DraftShipChoice {
            complete_ship_id: cheapest.id.clone(),
            position: None,
        });
    }
    choice
}
