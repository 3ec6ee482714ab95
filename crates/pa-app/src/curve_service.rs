//! Reference-curve introspection.

use pa_curves::{CurveClass, CurveLibrary, EfficiencyClass, PoleCount};

use crate::error::AppResult;

#[derive(Debug, Clone)]
pub struct CurveSummary {
    pub class: CurveClass,
    pub point_count: usize,
    pub full_load_efficiency: f64,
    pub peak_load: f64,
    pub peak_efficiency: f64,
}

/// Every class in the standard library, in class order.
pub fn list_curves() -> AppResult<Vec<CurveSummary>> {
    let curves = CurveLibrary::standard();
    curves
        .classes()
        .map(|class| -> AppResult<CurveSummary> {
            let table = curves.table(class)?;
            let peak = table.peak();
            Ok(CurveSummary {
                class,
                point_count: table.points().len(),
                full_load_efficiency: table.efficiency_at(1.0),
                peak_load: peak.load,
                peak_efficiency: peak.efficiency,
            })
        })
        .collect()
}

/// Motor efficiency for a motor of the given rating at `load_fraction`.
pub fn lookup(
    efficiency: EfficiencyClass,
    poles: PoleCount,
    rated_kw: f64,
    load_fraction: f64,
) -> AppResult<(CurveClass, f64)> {
    let class = CurveClass::for_motor(efficiency, poles, rated_kw);
    let eff = CurveLibrary::standard().efficiency_at(class, load_fraction)?;
    Ok((class, eff))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_the_bundled_classes() {
        let curves = list_curves().unwrap();
        assert_eq!(curves.len(), 36);
        assert!(curves.iter().all(|c| c.full_load_efficiency > 0.7));
    }

    #[test]
    fn eight_pole_lookup_fails() {
        assert!(lookup(EfficiencyClass::IE3, PoleCount::Eight, 30.0, 0.8).is_err());
    }
}
