//! Autopilot for a turn-based 3D space-combat game spoken over a
//! line-oriented JSON protocol: one fleet-draft request up front, then one
//! battle snapshot per turn, each answered with a batch of movement and
//! firing orders.

pub mod draft;
pub mod geometry;
pub mod protocol;
pub mod runner;
pub mod tactics;
