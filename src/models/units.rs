//! Distance units requested from the comparison engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CompareError;

/// Kilometres per statute mile
pub const KM_PER_MILE: f64 = 1.609344;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    Km,
    Mi,
}

impl DistanceUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceUnit::Km => "km",
            DistanceUnit::Mi => "mi",
        }
    }

    /// Convert a distance in kilometres to this unit
    pub fn from_km(&self, km: f64) -> f64 {
        match self {
            DistanceUnit::Km => km,
            DistanceUnit::Mi => km / KM_PER_MILE,
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistanceUnit {
    type Err = CompareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "km" => Ok(DistanceUnit::Km),
            "mi" => Ok(DistanceUnit::Mi),
            _ => Err(CompareError::InvalidUnits(format!("{:?}", s))),
        }
    }
}

/// Which units every distance is reported in.
///
/// `Both` produces two-level (unit, metric) columns; a single unit
/// produces flat columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Km,
    Mi,
    #[default]
    Both,
}

impl Units {
    /// Parse a list of unit names.
    ///
    /// An empty list means kilometres. Anything other than "km", "mi", or
    /// the pair of them is rejected.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, CompareError> {
        let invalid = || {
            let given: Vec<&str> = names.iter().map(|s| s.as_ref()).collect();
            CompareError::InvalidUnits(format!("{:?}", given))
        };

        match names {
            [] => Ok(Units::Km),
            [one] => Ok(one.as_ref().parse::<DistanceUnit>()?.into()),
            [a, b] => {
                let a: DistanceUnit = a.as_ref().parse().map_err(|_| invalid())?;
                let b: DistanceUnit = b.as_ref().parse().map_err(|_| invalid())?;
                if a == b {
                    return Err(invalid());
                }
                Ok(Units::Both)
            }
            _ => Err(invalid()),
        }
    }

    /// Units in output order
    pub fn list(&self) -> &'static [DistanceUnit] {
        match self {
            Units::Km => &[DistanceUnit::Km],
            Units::Mi => &[DistanceUnit::Mi],
            Units::Both => &[DistanceUnit::Km, DistanceUnit::Mi],
        }
    }

    pub fn contains(&self, unit: DistanceUnit) -> bool {
        self.list().contains(&unit)
    }

    pub fn is_nested(&self) -> bool {
        matches!(self, Units::Both)
    }
}

impl From<DistanceUnit> for Units {
    fn from(unit: DistanceUnit) -> Self {
        match unit {
            DistanceUnit::Km => Units::Km,
            DistanceUnit::Mi => Units::Mi,
        }
    }
}

/// Parses a comma-separated list such as `km`, `mi` or `km,mi`
impl FromStr for Units {
    type Err = CompareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let names: Vec<&str> = s
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        Units::from_names(&names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_defaults_to_km() {
        let none: [&str; 0] = [];
        assert_eq!(Units::from_names(&none), Ok(Units::Km));
        assert_eq!("".parse::<Units>(), Ok(Units::Km));
    }

    #[test]
    fn test_valid_unit_lists() {
        assert_eq!(Units::from_names(&["mi"]), Ok(Units::Mi));
        assert_eq!(Units::from_names(&["km", "mi"]), Ok(Units::Both));
        assert_eq!(Units::from_names(&["mi", "km"]), Ok(Units::Both));
        assert_eq!("km, mi".parse::<Units>(), Ok(Units::Both));
    }

    #[test]
    fn test_invalid_unit_lists() {
        assert!(matches!(
            Units::from_names(&["m"]),
            Err(CompareError::InvalidUnits(_))
        ));
        assert!(Units::from_names(&["km", "km"]).is_err());
        assert!(Units::from_names(&["km", "ft"]).is_err());
        assert!(Units::from_names(&["km", "mi", "km"]).is_err());
    }

    #[test]
    fn test_mile_conversion() {
        let mi = DistanceUnit::Mi.from_km(KM_PER_MILE * 3.0);
        assert!((mi - 3.0).abs() < 1e-12);
        assert_eq!(DistanceUnit::Km.from_km(2.5), 2.5);
    }

    #[test]
    fn test_configured_default_is_both() {
        assert_eq!(Units::default(), Units::Both);
        assert!(Units::default().is_nested());
    }
}
