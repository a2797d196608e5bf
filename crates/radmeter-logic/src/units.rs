//! Unit conversion, validation and display formatting.
//!
//! All comparisons in the engine happen on the canonical intensity, μSv/h.
//! Readings in mSv/h or Sv/h are scaled into it by a fixed factor.
//!
//! ```
//! use radmeter_logic::units::{auto_format, convert_to_canonical, RadiationUnit};
//!
//! let canonical = convert_to_canonical(1.0, RadiationUnit::MillisievertsPerHour);
//! assert_eq!(canonical, 1000.0);
//! assert_eq!(auto_format(canonical), "1.000 mSv/h");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RadiationError, Result};

/// Highest canonical intensity accepted as a real reading (1000 Sv/h).
pub const MAX_CANONICAL_INTENSITY: f64 = 1_000_000_000.0;

/// Supported dose-rate units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RadiationUnit {
    /// μSv/h, the canonical unit.
    MicrosievertsPerHour,
    /// mSv/h, 1,000 μSv/h.
    MillisievertsPerHour,
    /// Sv/h, 1,000,000 μSv/h.
    SievertsPerHour,
}

impl RadiationUnit {
    pub const ALL: [RadiationUnit; 3] = [
        Self::MicrosievertsPerHour,
        Self::MillisievertsPerHour,
        Self::SievertsPerHour,
    ];

    /// The unit every intensity is normalized to.
    pub const CANONICAL: RadiationUnit = Self::MicrosievertsPerHour;

    /// Canonical units per one unit of `self`.
    pub fn scale(self) -> f64 {
        match self {
            Self::MicrosievertsPerHour => 1.0,
            Self::MillisievertsPerHour => 1_000.0,
            Self::SievertsPerHour => 1_000_000.0,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::MicrosievertsPerHour => "μSv/h",
            Self::MillisievertsPerHour => "mSv/h",
            Self::SievertsPerHour => "Sv/h",
        }
    }

    /// Decimal places used when displaying a value in this unit.
    pub fn precision(self) -> usize {
        match self {
            Self::MicrosievertsPerHour => 1,
            Self::MillisievertsPerHour => 3,
            Self::SievertsPerHour => 6,
        }
    }
}

impl fmt::Display for RadiationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for RadiationUnit {
    type Err = RadiationError;

    /// Accepts unit symbols (`uSv/h`, `μSv/h`, `mSv/h`, `Sv/h`) and long
    /// names, case-insensitively.
    fn from_str(tag: &str) -> Result<Self> {
        let normalized = tag.trim().to_lowercase();
        match normalized.as_str() {
            "usv/h" | "μsv/h" | "µsv/h" | "usv" | "μsv" | "µsv" | "microsieverts"
            | "microsieverts_per_hour" => Ok(Self::MicrosievertsPerHour),
            "msv/h" | "msv" | "millisieverts" | "millisieverts_per_hour" => {
                Ok(Self::MillisievertsPerHour)
            }
            "sv/h" | "sv" | "sieverts" | "sieverts_per_hour" => Ok(Self::SievertsPerHour),
            _ => Err(RadiationError::InvalidUnit(tag.to_string())),
        }
    }
}

/// A raw reading as entered by the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub value: f64,
    pub unit: RadiationUnit,
}

impl Reading {
    pub fn new(value: f64, unit: RadiationUnit) -> Self {
        Self { value, unit }
    }

    /// Parse a reading from a value and a unit tag.
    pub fn parse(value: f64, tag: &str) -> Result<Self> {
        Ok(Self::new(value, tag.parse()?))
    }

    pub fn canonical(&self) -> f64 {
        convert_to_canonical(self.value, self.unit)
    }

    /// Canonical intensity, or `InvalidInput` when the reading fails validation.
    pub fn validate(&self) -> Result<f64> {
        validate(self.value, self.unit)
    }
}

/// Scale a value in `unit` to canonical μSv/h.
pub fn convert_to_canonical(value: f64, unit: RadiationUnit) -> f64 {
    value * unit.scale()
}

/// Like [`convert_to_canonical`] but for an unparsed unit tag.
pub fn convert_tagged(value: f64, tag: &str) -> Result<f64> {
    let unit: RadiationUnit = tag.parse()?;
    Ok(convert_to_canonical(value, unit))
}

/// Express a canonical intensity in `unit`.
pub fn from_canonical(intensity: f64, unit: RadiationUnit) -> f64 {
    intensity / unit.scale()
}

/// Whether a raw reading is usable: non-negative, finite, and at most
/// [`MAX_CANONICAL_INTENSITY`] once converted.
pub fn is_valid(value: f64, unit: RadiationUnit) -> bool {
    validate(value, unit).is_ok()
}

/// Validate a raw reading and return its canonical intensity.
pub fn validate(value: f64, unit: RadiationUnit) -> Result<f64> {
    if value.is_nan() || value.is_infinite() {
        return Err(RadiationError::not_finite(value));
    }
    if value < 0.0 {
        return Err(RadiationError::negative(value));
    }
    validate_canonical(convert_to_canonical(value, unit))
}

/// Validate an intensity that is already canonical.
pub fn validate_canonical(intensity: f64) -> Result<f64> {
    if !intensity.is_finite() {
        Err(RadiationError::not_finite(intensity))
    } else if intensity < 0.0 {
        Err(RadiationError::negative(intensity))
    } else if intensity > MAX_CANONICAL_INTENSITY {
        Err(RadiationError::above_ceiling(intensity))
    } else {
        Ok(intensity)
    }
}

/// Render a canonical intensity in `unit` with that unit's fixed precision.
pub fn format_with_unit(intensity: f64, unit: RadiationUnit) -> String {
    format!(
        "{:.*} {}",
        unit.precision(),
        from_canonical(intensity, unit),
        unit.symbol()
    )
}

/// The coarsest unit that keeps the displayed number short.
pub fn display_unit(intensity: f64) -> RadiationUnit {
    if intensity >= 1_000_000.0 {
        RadiationUnit::SievertsPerHour
    } else if intensity >= 1_000.0 {
        RadiationUnit::MillisievertsPerHour
    } else {
        RadiationUnit::MicrosievertsPerHour
    }
}

/// Format a canonical intensity in its [`display_unit`].
pub fn auto_format(intensity: f64) -> String {
    format_with_unit(intensity, display_unit(intensity))
}
