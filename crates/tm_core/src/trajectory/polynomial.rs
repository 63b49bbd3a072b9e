/// Evaluate `Σ coeffs[i] * t^i`.
///
/// An empty coefficient list evaluates to 0. NaN coefficients propagate;
/// callers screen for missing data before evaluating.
pub fn evaluate(t: f64, coeffs: &[f64]) -> f64 {
    coeffs.iter().enumerate().fold(0.0, |acc, (i, c)| acc + c * t.powi(i as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(evaluate(3.7, &[]), 0.0);
    }

    #[test]
    fn test_constant_polynomial() {
        for t in [0.0, 0.5, 2.5, 100.0, -4.0] {
            assert_eq!(evaluate(t, &[7.25]), 7.25);
        }
    }

    #[test]
    fn test_at_zero_returns_first_coefficient() {
        assert_eq!(evaluate(0.0, &[-1.5, 3.0, 9.0, 2.0]), -1.5);
    }

    #[test]
    fn test_quadratic() {
        // 1 + 2t + 3t^2 at t = 2
        assert_eq!(evaluate(2.0, &[1.0, 2.0, 3.0]), 17.0);
    }

    #[test]
    fn test_nan_propagates() {
        assert!(evaluate(1.0, &[1.0, f64::NAN]).is_nan());
    }

    #[cfg(all(test, feature = "proptest"))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_constant_ignores_t(c in -1e6f64..1e6, t in -100.0f64..100.0) {
                prop_assert_eq!(evaluate(t, &[c]), c);
            }

            #[test]
            fn prop_zero_t_is_c0(coeffs in prop::collection::vec(-1e3f64..1e3, 1..10)) {
                prop_assert_eq!(evaluate(0.0, &coeffs), coeffs[0]);
            }
        }
    }
}
