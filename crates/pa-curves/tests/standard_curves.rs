//! Integration tests for the bundled curve library.

use pa_curves::{CurveClass, CurveLibrary, EfficiencyClass, PoleCount, PowerBand};
use proptest::prelude::*;

fn bundled_classes() -> Vec<CurveClass> {
    CurveLibrary::standard().classes().collect()
}

#[test]
fn concurrent_readers_see_the_same_tables() {
    let class = CurveClass::new(EfficiencyClass::IE2, PoleCount::Two, PowerBand::Small);
    let expected = CurveLibrary::bundled().efficiency_at(class, 0.42).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(move || CurveLibrary::standard().efficiency_at(class, 0.42)))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap().unwrap(), expected);
        }
    });
}

#[test]
fn part_load_is_below_peak_for_small_motors() {
    let lib = CurveLibrary::standard();
    for class in bundled_classes()
        .into_iter()
        .filter(|c| c.band == PowerBand::Small)
    {
        let quarter = lib.efficiency_at(class, 0.25).unwrap();
        let full = lib.efficiency_at(class, 1.0).unwrap();
        assert!(quarter < full, "{class}");
    }
}

#[test]
fn every_bundled_efficiency_is_a_fraction() {
    let lib = CurveLibrary::standard();
    for class in bundled_classes() {
        for p in lib.table(class).unwrap().points() {
            assert!(p.efficiency > 0.5 && p.efficiency < 1.0, "{class}");
        }
    }
}

proptest! {
    #[test]
    fn lookup_stays_within_bracketing_points(idx in 0usize..36, load in 0.0_f64..=1.0) {
        let lib = CurveLibrary::standard();
        let class = bundled_classes()[idx];
        let pts = lib.table(class).unwrap().points();
        let eta = lib.efficiency_at(class, load).unwrap();

        let upper = pts.iter().position(|p| p.load >= load).unwrap_or(pts.len() - 1);
        let lower = upper.saturating_sub(1);
        let lo = pts[lower].efficiency.min(pts[upper].efficiency);
        let hi = pts[lower].efficiency.max(pts[upper].efficiency);
        prop_assert!(eta >= lo - 1e-12 && eta <= hi + 1e-12);
    }

    #[test]
    fn derating_never_increases_with_imbalance(a in 0.0_f64..10.0, b in 0.0_f64..10.0) {
        let lib = CurveLibrary::standard();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(lib.derating_factor(hi) <= lib.derating_factor(lo) + 1e-12);
    }
}
