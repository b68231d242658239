//! Distance units for DWITHIN / BEYOND thresholds
//!
//! Thresholds are scaled to the base unit (meters) before the planar
//! comparison. There is no geodesic math here: the scaled threshold is
//! compared against distances in coordinate units, which is exactly what
//! the caller gets when the dataset is in a projected CRS with meter
//! units. Geographic datasets need projecting first; that machinery is
//! out of scope.

use serde::{Deserialize, Serialize};

/// Recognized distance units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    Meters,
    Kilometers,
    Feet,
}

impl DistanceUnit {
    /// Parse a unit name (case-insensitive, common abbreviations accepted)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "meter" | "meters" | "metre" | "metres" => Some(DistanceUnit::Meters),
            "km" | "kilometer" | "kilometers" | "kilometre" | "kilometres" => {
                Some(DistanceUnit::Kilometers)
            }
            "ft" | "foot" | "feet" => Some(DistanceUnit::Feet),
            _ => None,
        }
    }

    /// Scale factor to the base unit (meters)
    pub fn factor(&self) -> f64 {
        match self {
            DistanceUnit::Meters => 1.0,
            DistanceUnit::Kilometers => 1000.0,
            DistanceUnit::Feet => 0.3048,
        }
    }

    /// Canonical unit name
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceUnit::Meters => "meters",
            DistanceUnit::Kilometers => "kilometers",
            DistanceUnit::Feet => "feet",
        }
    }

    /// A threshold expressed in this unit, scaled to base units
    pub fn to_base(&self, value: f64) -> f64 {
        value * self.factor()
    }
}

impl std::fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
