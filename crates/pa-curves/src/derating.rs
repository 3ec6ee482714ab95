//! NEMA MG-1 phase-imbalance derating.

use crate::error::{CurveError, CurveResult};
use crate::table::interpolate_clamped;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeratingPoint {
    /// Phase imbalance (%)
    pub imbalance_pct: f64,
    /// Derating factor applied to motor output (0..1]
    pub factor: f64,
}

impl DeratingPoint {
    pub const fn new(imbalance_pct: f64, factor: f64) -> Self {
        Self {
            imbalance_pct,
            factor,
        }
    }
}

/// Derating factor vs. phase imbalance (NEMA MG-1 Part 14, Fig. 14-1).
///
/// Beyond the last point (5 %) NEMA advises against operation; the factor
/// is held at the boundary value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DeratingPoint>", into = "Vec<DeratingPoint>")]
pub struct DeratingTable {
    points: Vec<DeratingPoint>,
}

const NEMA_MG1: [DeratingPoint; 6] = [
    DeratingPoint::new(0.0, 1.00),
    DeratingPoint::new(1.0, 0.98),
    DeratingPoint::new(2.0, 0.95),
    DeratingPoint::new(3.0, 0.88),
    DeratingPoint::new(4.0, 0.82),
    DeratingPoint::new(5.0, 0.75),
];

impl DeratingTable {
    pub fn new(points: Vec<DeratingPoint>) -> CurveResult<Self> {
        let invalid = |what| CurveError::InvalidTable {
            context: "derating".to_string(),
            what,
        };

        if points.is_empty() {
            return Err(invalid("table has no points"));
        }
        if points.iter().any(|p| {
            !p.imbalance_pct.is_finite()
                || p.imbalance_pct < 0.0
                || !p.factor.is_finite()
                || p.factor <= 0.0
                || p.factor > 1.0
        }) {
            return Err(invalid("imbalance must be >= 0 and factor in (0, 1]"));
        }
        if points
            .windows(2)
            .any(|w| w[0].imbalance_pct >= w[1].imbalance_pct)
        {
            return Err(invalid("imbalance must be strictly increasing"));
        }
        if points.windows(2).any(|w| w[1].factor > w[0].factor) {
            return Err(invalid("factor must not increase with imbalance"));
        }
        Ok(Self { points })
    }

    pub fn nema_mg1() -> Self {
        Self {
            points: NEMA_MG1.to_vec(),
        }
    }

    pub fn points(&self) -> &[DeratingPoint] {
        &self.points
    }

    /// Derating factor at the given imbalance; negative input is treated as 0.
    pub fn factor_at(&self, imbalance_pct: f64) -> f64 {
        interpolate_clamped(&self.points, imbalance_pct.max(0.0), |p| {
            (p.imbalance_pct, p.factor)
        })
    }
}

impl Default for DeratingTable {
    fn default() -> Self {
        Self::nema_mg1()
    }
}

impl TryFrom<Vec<DeratingPoint>> for DeratingTable {
    type Error = CurveError;

    fn try_from(points: Vec<DeratingPoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<DeratingTable> for Vec<DeratingPoint> {
    fn from(t: DeratingTable) -> Self {
        t.points
    }
}
