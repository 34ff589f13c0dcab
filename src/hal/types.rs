use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::Marker;
use crate::error::ReplayError;

/// Length unit of a model or a recording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    Millimeters,
    Centimeters,
    Meters,
}

impl LengthUnit {
    /// Size of one unit in meters
    pub fn in_meters(self) -> f64 {
        match self {
            LengthUnit::Millimeters => 0.001,
            LengthUnit::Centimeters => 0.01,
            LengthUnit::Meters => 1.0,
        }
    }

    /// Factor that converts a value in `self` into `target`
    pub fn scale_to(self, target: LengthUnit) -> f64 {
        if self == target {
            return 1.0;
        }
        self.in_meters() / target.in_meters()
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            LengthUnit::Millimeters => "mm",
            LengthUnit::Centimeters => "cm",
            LengthUnit::Meters => "m",
        }
    }
}

impl Default for LengthUnit {
    fn default() -> Self {
        LengthUnit::Meters
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl FromStr for LengthUnit {
    type Err = ReplayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mm" | "millimeter" | "millimeters" => Ok(LengthUnit::Millimeters),
            "cm" | "centimeter" | "centimeters" => Ok(LengthUnit::Centimeters),
            "m" | "meter" | "meters" => Ok(LengthUnit::Meters),
            other => Err(ReplayError::InvalidParameter(format!(
                "Unknown length unit '{}'",
                other
            ))),
        }
    }
}

/// One row of a recording, already expressed in the requested units
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFrame {
    pub time: f64,
    pub markers: Vec<Marker>,
}
