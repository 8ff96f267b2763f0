//! Integer grid geometry.
//!
//! The battle map is a cube of unit cells and a diagonal step costs the
//! same as an axis-aligned one, so every distance in the engine is the
//! Chebyshev norm. Vectors travel on the wire as `"X/Y/Z"` strings with
//! signed decimal components.

use std::fmt;
use std::str::FromStr;

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vec3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Vec3 {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Chebyshev norm: `max(|x|, |y|, |z|)`.
    pub fn norm(self) -> i32 {
        self.x.abs().max(self.y.abs()).max(self.z.abs())
    }

    /// Clamp every component to `[-limit, limit]`, keeping its sign.
    pub fn clamp_per_axis(self, limit: i32) -> Self {
        Self {
            x: self.x.clamp(-limit, limit),
            y: self.y.clamp(-limit, limit),
            z: self.z.clamp(-limit, limit),
        }
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl std::ops::Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// Chebyshev distance between two cells.
pub fn distance(a: Vec3, b: Vec3) -> i32 {
    (a - b).norm()
}

/// The 8 corners of the unit cube anchored at `position`, anchor being the
/// minimum corner. Approximates a ship's 2x2x2 hull; range checks always
/// run corner-to-corner, never center-to-center.
pub fn occupied_corners(position: Vec3) -> [Vec3; 8] {
    let mut corners = [position; 8];
    let mut index = 0;
    for dx in 0..2 {
        for dy in 0..2 {
            for dz in 0..2 {
                corners[index] = position + Vec3::new(dx, dy, dz);
                index += 1;
            }
        }
    }
    corners
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.x, self.y, self.z)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseVectorError {
    text: String,
}

impl fmt::Display for ParseVectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed vector {:?}, expected \"X/Y/Z\"", self.text)
    }
}

impl std::error::Error for ParseVectorError {}

impl FromStr for Vec3 {
    type Err = ParseVectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut axes = s.splitn(3, '/').map(|part| part.trim().parse::<i32>());
        match (axes.next(), axes.next(), axes.next()) {
            (Some(Ok(x)), Some(Ok(y)), Some(Ok(z))) => Ok(Self::new(x, y, z)),
            _ => Err(ParseVectorError { text: s.to_string() }),
        }
    }
}

impl Serialize for Vec3 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Vec3 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn norm_is_largest_axis_magnitude() {
        assert_eq!(Vec3::new(1, -7, 3).norm(), 7);
        assert_eq!(Vec3::new(0, 0, 0).norm(), 0);
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_self() {
        let a = Vec3::new(2, -3, 9);
        let b = Vec3::new(-4, 1, 0);
        assert_eq!(distance(a, b), distance(b, a));
        assert_eq!(distance(a, a), 0);
    }

    #[test]
    fn triangle_inequality_holds_on_sample_grid() {
        let samples = [
            Vec3::new(0, 0, 0),
            Vec3::new(3, -1, 2),
            Vec3::new(-5, 4, 0),
            Vec3::new(7, 7, -7),
        ];
        for a in samples {
            for b in samples {
                for c in samples {
                    assert!(distance(a, c) <= distance(a, b) + distance(b, c));
                }
            }
        }
    }

    #[test]
    fn corners_are_eight_distinct_unit_offsets() {
        let anchor = Vec3::new(4, -2, 11);
        let corners = occupied_corners(anchor);
        for (i, corner) in corners.iter().enumerate() {
            let offset = *corner - anchor;
            assert!((0..=1).contains(&offset.x));
            assert!((0..=1).contains(&offset.y));
            assert!((0..=1).contains(&offset.z));
            for other in &corners[..i] {
                assert_ne!(corner, other);
            }
        }
    }

    #[test]
    fn clamp_per_axis_keeps_sign_and_small_components() {
        let clamped = Vec3::new(9, -9, 2).clamp_per_axis(3);
        assert_eq!(clamped, Vec3::new(3, -3, 2));
        assert_eq!(Vec3::new(1, 0, -1).clamp_per_axis(3), Vec3::new(1, 0, -1));
    }

    #[test]
    fn wire_text_roundtrip() {
        let v: Vec3 = "3/-4/15".parse().unwrap();
        assert_eq!(v, Vec3::new(3, -4, 15));
        assert_eq!(v.to_string(), "3/-4/15");
    }

    #[test]
    fn rejects_malformed_wire_text() {
        assert!("1/2".parse::<Vec3>().is_err());
        assert!("a/b/c".parse::<Vec3>().is_err());
        assert!("1/2/3/4".parse::<Vec3>().is_err());
    }
}
