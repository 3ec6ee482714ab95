//! Bundled IEC reference data.
//!
//! Full-load nominal efficiencies follow IEC 60034-30-1 (50 Hz) at a
//! representative rating per band: 5.5 kW (small), 30 kW (medium) and
//! 110 kW (large). Part-load points are the full-load value scaled by a
//! typical part-load ratio for the band, tabulated at the IEC 60034-2-1 test
//! loads of 25/50/75/100 %.
//!
//! 8-pole machines have no bundled curve.

use crate::class::{CurveClass, EfficiencyClass, PoleCount, PowerBand};
use crate::table::{CurvePoint, CurveTable};

use EfficiencyClass::{IE1, IE2, IE3, IE4};
use PoleCount::{Four, Six, Two};
use PowerBand::{Large, Medium, Small};

/// Tabulated load fractions.
pub const LOAD_POINTS: [f64; 4] = [0.25, 0.50, 0.75, 1.00];

/// Ratio of part-load to full-load efficiency at [`LOAD_POINTS`].
pub fn part_load_ratios(band: PowerBand) -> [f64; 4] {
    match band {
        PowerBand::Small => [0.870, 0.965, 0.996, 1.000],
        PowerBand::Medium => [0.925, 0.985, 1.003, 1.000],
        PowerBand::Large => [0.950, 0.992, 1.004, 1.000],
    }
}

/// (class, poles, band, full-load efficiency %)
const FULL_LOAD: [(EfficiencyClass, PoleCount, PowerBand, f64); 36] = [
    (IE1, Two, Small, 84.7),
    (IE1, Four, Small, 84.7),
    (IE1, Six, Small, 83.1),
    (IE1, Two, Medium, 90.7),
    (IE1, Four, Medium, 90.7),
    (IE1, Six, Medium, 90.2),
    (IE1, Two, Large, 93.3),
    (IE1, Four, Large, 93.3),
    (IE1, Six, Large, 93.3),
    (IE2, Two, Small, 87.0),
    (IE2, Four, Small, 87.7),
    (IE2, Six, Small, 86.0),
    (IE2, Two, Medium, 92.0),
    (IE2, Four, Medium, 92.3),
    (IE2, Six, Medium, 91.7),
    (IE2, Two, Large, 94.0),
    (IE2, Four, Large, 94.2),
    (IE2, Six, Large, 94.0),
    (IE3, Two, Small, 89.2),
    (IE3, Four, Small, 89.6),
    (IE3, Six, Small, 88.0),
    (IE3, Two, Medium, 93.3),
    (IE3, Four, Medium, 93.6),
    (IE3, Six, Medium, 92.9),
    (IE3, Two, Large, 95.0),
    (IE3, Four, Large, 95.4),
    (IE3, Six, Large, 95.1),
    (IE4, Two, Small, 91.5),
    (IE4, Four, Small, 91.9),
    (IE4, Six, Small, 90.2),
    (IE4, Two, Medium, 94.5),
    (IE4, Four, Medium, 94.9),
    (IE4, Six, Medium, 94.2),
    (IE4, Two, Large, 95.8),
    (IE4, Four, Large, 96.0),
    (IE4, Six, Large, 95.8),
];

/// Nominal full-load efficiency (fraction) for a bundled class.
pub fn full_load_efficiency(class: CurveClass) -> Option<f64> {
    FULL_LOAD
        .iter()
        .find(|(e, p, b, _)| *e == class.efficiency && *p == class.poles && *b == class.band)
        .map(|(_, _, _, pct)| pct / 100.0)
}

/// All bundled tables.
pub(crate) fn standard_tables() -> impl Iterator<Item = (CurveClass, CurveTable)> {
    FULL_LOAD.iter().map(|&(efficiency, poles, band, pct)| {
        let class = CurveClass::new(efficiency, poles, band);
        let full = pct / 100.0;
        let points = LOAD_POINTS
            .iter()
            .zip(part_load_ratios(band))
            .map(|(&load, ratio)| CurvePoint::new(load, full * ratio))
            .collect();
        (class, CurveTable::from_trusted(points))
    })
}
