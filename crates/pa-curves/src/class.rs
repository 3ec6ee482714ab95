//! Motor curve classes.
//!
//! A curve class is the closed key under which a reference efficiency table is
//! stored: IEC efficiency class × pole count × rated power band.

use crate::error::CurveError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// IEC 60034-30-1 efficiency class from the nameplate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EfficiencyClass {
    IE1,
    IE2,
    IE3,
    IE4,
}

impl EfficiencyClass {
    pub const ALL: [EfficiencyClass; 4] = [Self::IE1, Self::IE2, Self::IE3, Self::IE4];

    pub fn label(self) -> &'static str {
        match self {
            Self::IE1 => "IE1",
            Self::IE2 => "IE2",
            Self::IE3 => "IE3",
            Self::IE4 => "IE4",
        }
    }
}

impl fmt::Display for EfficiencyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Number of magnetic poles. Serialized as the plain integer (`poles: 4`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PoleCount {
    Two,
    Four,
    Six,
    Eight,
}

impl PoleCount {
    pub const ALL: [PoleCount; 4] = [Self::Two, Self::Four, Self::Six, Self::Eight];

    pub fn count(self) -> u8 {
        match self {
            Self::Two => 2,
            Self::Four => 4,
            Self::Six => 6,
            Self::Eight => 8,
        }
    }

    /// Synchronous speed at the given supply frequency (rpm).
    pub fn synchronous_speed_rpm(self, supply_hz: f64) -> f64 {
        120.0 * supply_hz / f64::from(self.count())
    }
}

impl TryFrom<u8> for PoleCount {
    type Error = CurveError;

    fn try_from(poles: u8) -> Result<Self, Self::Error> {
        match poles {
            2 => Ok(Self::Two),
            4 => Ok(Self::Four),
            6 => Ok(Self::Six),
            8 => Ok(Self::Eight),
            _ => Err(CurveError::InvalidPoleCount { poles }),
        }
    }
}

impl From<PoleCount> for u8 {
    fn from(p: PoleCount) -> Self {
        p.count()
    }
}

impl fmt::Display for PoleCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-pole", self.count())
    }
}

/// Rated output band. Part-load behaviour differs markedly between a 5 kW and
/// a 100 kW machine, so each band carries its own curve shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerBand {
    /// Up to and including 7.5 kW
    Small,
    /// Above 7.5 kW up to and including 75 kW
    Medium,
    /// Above 75 kW
    Large,
}

impl PowerBand {
    pub const ALL: [PowerBand; 3] = [Self::Small, Self::Medium, Self::Large];

    pub const SMALL_MAX_KW: f64 = 7.5;
    pub const MEDIUM_MAX_KW: f64 = 75.0;

    pub fn for_rated_kw(rated_kw: f64) -> Self {
        if rated_kw <= Self::SMALL_MAX_KW {
            Self::Small
        } else if rated_kw <= Self::MEDIUM_MAX_KW {
            Self::Medium
        } else {
            Self::Large
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl fmt::Display for PowerBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Key of a reference efficiency curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CurveClass {
    pub efficiency: EfficiencyClass,
    pub poles: PoleCount,
    pub band: PowerBand,
}

impl CurveClass {
    pub const fn new(efficiency: EfficiencyClass, poles: PoleCount, band: PowerBand) -> Self {
        Self {
            efficiency,
            poles,
            band,
        }
    }

    /// Class for a motor with the given nameplate data.
    pub fn for_motor(efficiency: EfficiencyClass, poles: PoleCount, rated_kw: f64) -> Self {
        Self::new(efficiency, poles, PowerBand::for_rated_kw(rated_kw))
    }
}

impl fmt::Display for CurveClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.efficiency, self.poles, self.band)
    }
}
