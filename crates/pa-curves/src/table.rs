//! Piecewise-linear efficiency-vs-load tables.

use crate::error::{CurveError, CurveResult};
use serde::{Deserialize, Serialize};

/// One measured point of an efficiency curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Output load as a fraction of rated power
    pub load: f64,
    /// Motor efficiency (0..1]
    pub efficiency: f64,
}

impl CurvePoint {
    pub const fn new(load: f64, efficiency: f64) -> Self {
        Self { load, efficiency }
    }
}

/// Ordered efficiency curve for one motor class.
///
/// Points are strictly increasing in load. Lookups interpolate linearly
/// between the two bracketing points and hold the boundary value outside the
/// tabulated range; the table never extrapolates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CurvePoint>", into = "Vec<CurvePoint>")]
pub struct CurveTable {
    points: Vec<CurvePoint>,
}

impl CurveTable {
    /// Build a validated table.
    ///
    /// # Errors
    /// Returns [`CurveError::InvalidTable`] when the table is empty, not
    /// strictly increasing in load, or holds an efficiency outside (0, 1].
    pub fn new(points: Vec<CurvePoint>) -> CurveResult<Self> {
        let table = Self { points };
        table.validate("curve")?;
        Ok(table)
    }

    /// Skips validation. Only for bundled data, which is checked by tests.
    pub(crate) fn from_trusted(points: Vec<CurvePoint>) -> Self {
        Self { points }
    }

    pub(crate) fn validate(&self, context: &str) -> CurveResult<()> {
        let invalid = |what| CurveError::InvalidTable {
            context: context.to_string(),
            what,
        };

        if self.points.is_empty() {
            return Err(invalid("table has no points"));
        }
        for p in &self.points {
            if !p.load.is_finite() || p.load < 0.0 {
                return Err(invalid("load fraction must be finite and non-negative"));
            }
            if !p.efficiency.is_finite() || p.efficiency <= 0.0 || p.efficiency > 1.0 {
                return Err(invalid("efficiency must be in (0, 1]"));
            }
        }
        if self.points.windows(2).any(|w| w[0].load >= w[1].load) {
            return Err(invalid("load fractions must be strictly increasing"));
        }
        Ok(())
    }

    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Efficiency at `load`, clamped to the tabulated range.
    pub fn efficiency_at(&self, load: f64) -> f64 {
        interpolate_clamped(&self.points, load, |p| (p.load, p.efficiency))
    }

    /// Load fraction of the highest tabulated efficiency.
    pub fn peak(&self) -> CurvePoint {
        self.points
            .iter()
            .copied()
            .fold(self.points[0], |best, p| {
                if p.efficiency > best.efficiency {
                    p
                } else {
                    best
                }
            })
    }
}

impl TryFrom<Vec<CurvePoint>> for CurveTable {
    type Error = CurveError;

    fn try_from(points: Vec<CurvePoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<CurveTable> for Vec<CurvePoint> {
    fn from(t: CurveTable) -> Self {
        t.points
    }
}

/// Linear interpolation over points sorted by x, holding the end values
/// outside the range.
pub(crate) fn interpolate_clamped<T>(points: &[T], x: f64, xy: impl Fn(&T) -> (f64, f64)) -> f64 {
    let Some(first) = points.first() else {
        return f64::NAN;
    };
    let (x0, y0) = xy(first);
    if x <= x0 {
        return y0;
    }

    for w in points.windows(2) {
        let (xa, ya) = xy(&w[0]);
        let (xb, yb) = xy(&w[1]);
        if x <= xb {
            let t = (x - xa) / (xb - xa);
            return ya + t * (yb - ya);
        }
    }
    points.last().map(|p| xy(p).1).unwrap_or(y0)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn no_overshoot_between_neighbours(load in 0.0_f64..=1.0) {
            let t = CurveTable::new(vec![
                CurvePoint::new(0.25, 0.80),
                CurvePoint::new(0.50, 0.90),
                CurvePoint::new(0.75, 0.92),
                CurvePoint::new(1.00, 0.91),
            ]).unwrap();
            let eta = t.efficiency_at(load);
            let pts = t.points();
            let upper = pts.iter().position(|p| p.load >= load).unwrap_or(pts.len() - 1);
            let lower = upper.saturating_sub(1);
            let lo = pts[lower].efficiency.min(pts[upper].efficiency);
            let hi = pts[lower].efficiency.max(pts[upper].efficiency);
            prop_assert!(eta >= lo - 1e-12 && eta <= hi + 1e-12);
        }
    }
}
