//! Area units and the table of their square-meter factors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::square_meters_per;
use crate::error::BoundaryError;

/// Units an area can be reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AreaUnit {
    /// Square meters
    SquareMeters,
    /// International acres
    #[default]
    Acres,
    /// Hectares
    Hectares,
    /// Bigha (regional, see [`square_meters_per::BIGHA`])
    Bigha,
    /// Square feet
    SquareFeet,
}

impl AreaUnit {
    /// Get the display name for this unit.
    pub fn name(&self) -> &'static str {
        match self {
            AreaUnit::SquareMeters => "Square Meters",
            AreaUnit::Acres => "Acres",
            AreaUnit::Hectares => "Hectares",
            AreaUnit::Bigha => "Bigha",
            AreaUnit::SquareFeet => "Square Feet",
        }
    }

    /// Short label shown after a number.
    pub fn symbol(&self) -> &'static str {
        match self {
            AreaUnit::SquareMeters => "m²",
            AreaUnit::Acres => "ac",
            AreaUnit::Hectares => "ha",
            AreaUnit::Bigha => "bigha",
            AreaUnit::SquareFeet => "ft²",
        }
    }

    /// Key stored in the `area_unit` field of a persisted record.
    pub fn key(&self) -> &'static str {
        match self {
            AreaUnit::SquareMeters => "square_meters",
            AreaUnit::Acres => "acres",
            AreaUnit::Hectares => "hectares",
            AreaUnit::Bigha => "bigha",
            AreaUnit::SquareFeet => "square_feet",
        }
    }

    /// Get all units in menu order.
    pub fn all() -> &'static [AreaUnit] {
        &[
            AreaUnit::Acres,
            AreaUnit::Hectares,
            AreaUnit::Bigha,
            AreaUnit::SquareMeters,
            AreaUnit::SquareFeet,
        ]
    }

    /// Square meters in one of this unit, using the standard table.
    pub fn square_meters(&self) -> f64 {
        UnitTable::standard().factor(*self)
    }
}

impl fmt::Display for AreaUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for AreaUnit {
    type Err = BoundaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "square_meters" | "square_meter" | "sq_m" | "m2" | "m²" => Ok(AreaUnit::SquareMeters),
            "acres" | "acre" | "ac" => Ok(AreaUnit::Acres),
            "hectares" | "hectare" | "ha" => Ok(AreaUnit::Hectares),
            "bigha" | "bighas" => Ok(AreaUnit::Bigha),
            "square_feet" | "square_foot" | "sq_ft" | "sqft" | "ft2" | "ft²" => {
                Ok(AreaUnit::SquareFeet)
            }
            _ => Err(BoundaryError::UnknownUnit(s.to_string())),
        }
    }
}

/// Square-meter factors for every [`AreaUnit`].
///
/// Only the bigha factor varies between tables; every other unit is fixed by definition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitTable {
    bigha_m2: f64,
}

impl UnitTable {
    /// Table using the constants in [`square_meters_per`].
    pub const fn standard() -> Self {
        Self {
            bigha_m2: square_meters_per::BIGHA,
        }
    }

    /// Table with a regional bigha size in square meters.
    ///
    /// Non-positive or non-finite sizes fall back to the standard bigha.
    pub fn with_bigha(bigha_m2: f64) -> Self {
        if bigha_m2.is_finite() && bigha_m2 > 0.0 {
            Self { bigha_m2 }
        } else {
            log::warn!(
                "Ignoring invalid bigha size {}, using {} m²",
                bigha_m2,
                square_meters_per::BIGHA
            );
            Self::standard()
        }
    }

    /// Square meters in one `unit`.
    pub fn factor(&self, unit: AreaUnit) -> f64 {
        match unit {
            AreaUnit::SquareMeters => square_meters_per::SQUARE_METER,
            AreaUnit::Acres => square_meters_per::ACRE,
            AreaUnit::Hectares => square_meters_per::HECTARE,
            AreaUnit::Bigha => self.bigha_m2,
            AreaUnit::SquareFeet => square_meters_per::SQUARE_FOOT,
        }
    }

    /// Express an area given in square meters in `unit`.
    pub fn from_square_meters(&self, area_m2: f64, unit: AreaUnit) -> f64 {
        area_m2 / self.factor(unit)
    }

    /// Express an area given in `unit` in square meters.
    pub fn to_square_meters(&self, value: f64, unit: AreaUnit) -> f64 {
        value * self.factor(unit)
    }

    /// Convert `value` from one unit to another.
    pub fn convert(&self, value: f64, from: AreaUnit, to: AreaUnit) -> f64 {
        if from == to {
            return value;
        }
        value * (self.factor(from) / self.factor(to))
    }
}

impl Default for UnitTable {
    fn default() -> Self {
        Self::standard()
    }
}
