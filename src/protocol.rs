//! Wire schema for the line-oriented battle protocol.
//!
//! One JSON object per line in each direction. Field names are PascalCase
//! on the wire, vectors are `"X/Y/Z"` strings, and equipment blocks carry a
//! numeric kind tag. An unknown kind tag is a decode error, not a block to
//! drop: a silently shorter equipment list would desynchronize the ship's
//! gun and engine availability from what the engine believes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Vec3;

const KIND_ENERGY: i32 = 0;
const KIND_GUN: i32 = 1;
const KIND_ENGINE: i32 = 2;
const KIND_HEALTH: i32 = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodeError {
    UnknownEquipmentKind { name: String, kind: i32 },
    MissingEquipmentField { name: String, kind: &'static str, field: &'static str },
    UnknownEffectKind { kind: i32 },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownEquipmentKind { name, kind } => {
                write!(f, "equipment block {name:?} has unknown kind tag {kind}")
            }
            Self::MissingEquipmentField { name, kind, field } => {
                write!(f, "{kind} block {name:?} is missing field {field}")
            }
            Self::UnknownEffectKind { kind } => {
                write!(f, "unknown effect kind {kind}")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum EffectKind {
    Blaster,
}

impl TryFrom<i32> for EffectKind {
    type Error = DecodeError;

    fn try_from(kind: i32) -> Result<Self, Self::Error> {
        match kind {
            0 => Ok(Self::Blaster),
            other => Err(DecodeError::UnknownEffectKind { kind: other }),
        }
    }
}

impl From<EffectKind> for i32 {
    fn from(kind: EffectKind) -> i32 {
        match kind {
            EffectKind::Blaster => 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnergyBlock {
    pub name: String,
    pub increment_per_turn: i32,
    pub max_energy: i32,
    pub start_energy: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GunBlock {
    pub name: String,
    pub damage: i32,
    pub effect: EffectKind,
    pub energy_price: i32,
    pub radius: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineBlock {
    pub name: String,
    pub max_accelerate: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HealthBlock {
    pub name: String,
    pub max_health: i32,
    pub start_health: i32,
}

/// Closed set of equipment kinds, dispatched on the wire's numeric tag.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawEquipment")]
pub enum EquipmentBlock {
    Energy(EnergyBlock),
    Gun(GunBlock),
    Engine(EngineBlock),
    Health(HealthBlock),
}

/// Untyped superset of every kind's fields, as the wire delivers them.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawEquipment {
    name: String,
    #[serde(rename = "Type")]
    kind: i32,
    increment_per_turn: Option<i32>,
    max_energy: Option<i32>,
    start_energy: Option<i32>,
    damage: Option<i32>,
    effect_type: Option<i32>,
    energy_price: Option<i32>,
    radius: Option<i32>,
    max_accelerate: Option<i32>,
    max_health: Option<i32>,
    start_health: Option<i32>,
}

fn require(
    name: &str,
    kind: &'static str,
    field: &'static str,
    value: Option<i32>,
) -> Result<i32, DecodeError> {
    value.ok_or_else(|| DecodeError::MissingEquipmentField {
        name: name.to_string(),
        kind,
        field,
    })
}

impl TryFrom<RawEquipment> for EquipmentBlock {
    type Error = DecodeError;

    fn try_from(raw: RawEquipment) -> Result<Self, Self::Error> {
        match raw.kind {
            KIND_ENERGY => Ok(Self::Energy(EnergyBlock {
                increment_per_turn: require(
                    &raw.name,
                    "Energy",
                    "IncrementPerTurn",
                    raw.increment_per_turn,
                )?,
                max_energy: require(&raw.name, "Energy", "MaxEnergy", raw.max_energy)?,
                start_energy: require(&raw.name, "Energy", "StartEnergy", raw.start_energy)?,
                name: raw.name,
            })),
            KIND_GUN => Ok(Self::Gun(GunBlock {
                damage: require(&raw.name, "Gun", "Damage", raw.damage)?,
                effect: EffectKind::try_from(require(
                    &raw.name,
                    "Gun",
                    "EffectType",
                    raw.effect_type,
                )?)?,
                energy_price: require(&raw.name, "Gun", "EnergyPrice", raw.energy_price)?,
                radius: require(&raw.name, "Gun", "Radius", raw.radius)?,
                name: raw.name,
            })),
            KIND_ENGINE => Ok(Self::Engine(EngineBlock {
                max_accelerate: require(
                    &raw.name,
                    "Engine",
                    "MaxAccelerate",
                    raw.max_accelerate,
                )?,
                name: raw.name,
            })),
            KIND_HEALTH => Ok(Self::Health(HealthBlock {
                max_health: require(&raw.name, "Health", "MaxHealth", raw.max_health)?,
                start_health: require(&raw.name, "Health", "StartHealth", raw.start_health)?,
                name: raw.name,
            })),
            other => Err(DecodeError::UnknownEquipmentKind {
                name: raw.name,
                kind: other,
            }),
        }
    }
}

/// One ship as reported in a turn snapshot. Rebuilt from scratch every
/// turn; ids are unique within a side for that turn only.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Ship {
    pub id: i32,
    pub position: Vec3,
    pub velocity: Vec3,
    #[serde(default)]
    pub energy: Option<i32>,
    #[serde(default)]
    pub health: Option<i32>,
    #[serde(default)]
    pub equipment: Vec<EquipmentBlock>,
}

impl Ship {
    /// Gun blocks in equipment order.
    pub fn guns(&self) -> impl Iterator<Item = &GunBlock> {
        self.equipment.iter().filter_map(|block| match block {
            EquipmentBlock::Gun(gun) => Some(gun),
            _ => None,
        })
    }

    /// First engine block, if the ship has one.
    pub fn engine(&self) -> Option<&EngineBlock> {
        self.equipment.iter().find_map(|block| match block {
            EquipmentBlock::Engine(engine) => Some(engine),
            _ => None,
        })
    }
}

/// A shot that happened since the previous snapshot.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FireInfo {
    pub effect_type: EffectKind,
    pub source: Vec3,
    pub target: Vec3,
}

/// Full battle snapshot; replaces any prior state wholesale.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BattleState {
    #[serde(default)]
    pub fire_infos: Vec<FireInfo>,
    pub my: Vec<Ship>,
    pub opponent: Vec<Ship>,
}

/// One order in a turn response. Serializes to the wire's
/// `{"Command": ..., "Parameters": {...}}` shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "Command", content = "Parameters")]
pub enum UserCommand {
    /// Autopilot waypoint, interpreted by the external engine.
    #[serde(rename = "MOVE", rename_all = "PascalCase")]
    Move { id: i32, target: Vec3 },
    /// Fire the named gun block at a target point.
    #[serde(rename = "ATTACK", rename_all = "PascalCase")]
    Attack { id: i32, name: String, target: Vec3 },
    /// Velocity delta (desired minus current), never an absolute velocity.
    #[serde(rename = "ACCELERATE", rename_all = "PascalCase")]
    Accelerate { id: i32, vector: Vec3 },
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BattleOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub user_commands: Vec<UserCommand>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MapRegion {
    pub from: Vec3,
    pub to: Vec3,
}

/// Catalog entry in the draft request: one block and its hull size cost.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DraftEquipment {
    pub size: i32,
    pub equipment: EquipmentBlock,
}

/// Purchasable hull in the draft roster.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DraftCompleteShip {
    pub id: String,
    pub price: i32,
    #[serde(default)]
    pub equipment: Vec<String>,
}

/// The one-time draft request. `player_id` and `map_size` seed the
/// persistent context used for every later turn.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DraftOptions {
    pub player_id: i32,
    pub map_size: i32,
    pub money: i32,
    pub max_ships_count: i32,
    pub start_area: MapRegion,
    #[serde(default)]
    pub equipment: Vec<DraftEquipment>,
    #[serde(rename = "CompleteShips", default)]
    pub ships: Vec<DraftCompleteShip>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DraftShipChoice {
    pub complete_ship_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec3>,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DraftChoice {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub ships: Vec<DraftShipChoice>,
}
