use crate::{PaError, PaResult};

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> PaResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PaError::NonFinite { what, value: v })
    }
}

/// Finite and `>= 0`. Gauge readings and tariffs go through this.
pub fn ensure_non_negative(v: Real, what: &'static str) -> PaResult<Real> {
    let v = ensure_finite(v, what)?;
    if v < 0.0 {
        Err(PaError::Negative { what, value: v })
    } else {
        Ok(v)
    }
}

/// Arithmetic mean of three phase values.
#[inline]
pub fn mean3(values: &[Real; 3]) -> Real {
    (values[0] + values[1] + values[2]) / 3.0
}

/// Largest absolute deviation of any phase from the three-phase mean.
pub fn max_deviation3(values: &[Real; 3]) -> Real {
    let mean = mean3(values);
    values
        .iter()
        .map(|v| (v - mean).abs())
        .fold(0.0, Real::max)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn deviation_is_non_negative(a in 0.0_f64..500.0, b in 0.0_f64..500.0, c in 0.0_f64..500.0) {
            prop_assert!(max_deviation3(&[a, b, c]) >= 0.0);
        }
    }
}
