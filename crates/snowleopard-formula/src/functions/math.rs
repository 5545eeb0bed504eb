//! Numeric primitives behind SUMDROP and BOUND

/// Sum `values` after dropping the `drop` lowest
///
/// With `weights`, the surviving values are sorted ascending and multiplied
/// position by position with the weights before summing. Returns `None` when
/// `drop` leaves no value, or when the weight count does not match the
/// surviving count.
///
/// ```rust
/// use snowleopard_formula::functions::math::sum_drop;
///
/// assert_eq!(sum_drop(&[10.0, 5.0, 8.0], 1, None), Some(18.0));
/// assert_eq!(sum_drop(&[10.0, 5.0, 8.0], 1, Some(&[1.0, 2.0])), Some(28.0));
/// assert_eq!(sum_drop(&[10.0], 1, None), None);
/// ```
pub fn sum_drop(values: &[f64], drop: usize, weights: Option<&[f64]>) -> Option<f64> {
    if drop >= values.len() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let kept = &sorted[drop..];

    match weights {
        None => Some(kept.iter().sum()),
        Some(weights) if weights.len() == kept.len() => {
            Some(kept.iter().zip(weights).map(|(v, w)| v * w).sum())
        }
        Some(_) => None,
    }
}

/// Clamp `value` to `[lower, upper]`
///
/// The lower bound is tested first and the bounds are never reordered, so
/// with `lower > upper` every value below `lower` yields `lower` and every
/// other value at or above `upper` yields `upper`.
pub fn bound(lower: f64, upper: f64, value: f64) -> f64 {
    if value < lower {
        lower
    } else if value > upper {
        upper
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sum_drop_basic() {
        assert_eq!(sum_drop(&[1.0, 2.0, 3.0], 0, None), Some(6.0));
        assert_eq!(sum_drop(&[10.0, 5.0, 8.0], 1, None), Some(18.0));
        assert_eq!(sum_drop(&[10.0, 5.0, 8.0], 2, None), Some(10.0));
        assert_eq!(sum_drop(&[10.0, 5.0, 8.0], 3, None), None);
        assert_eq!(sum_drop(&[], 0, None), None);
    }

    #[test]
    fn test_sum_drop_weights_follow_ascending_survivors() {
        // survivors ascending: 8, 10
        assert_eq!(sum_drop(&[10.0, 5.0, 8.0], 1, Some(&[0.5, 2.0])), Some(24.0));
        assert_eq!(sum_drop(&[10.0, 5.0, 8.0], 1, Some(&[1.0])), None);
    }

    #[test]
    fn test_bound_inverted_interval_is_not_reordered() {
        assert_eq!(bound(10.0, 0.0, 5.0), 10.0);
        assert_eq!(bound(10.0, 0.0, 20.0), 0.0);
        assert_eq!(bound(10.0, 0.0, 10.0), 0.0);
        assert_eq!(bound(10.0, 0.0, 0.0), 10.0);
    }

    proptest! {
        #[test]
        fn prop_bound_clamps(a in -1e6f64..1e6, width in 0f64..1e6, v in -3e6f64..3e6) {
            let b = a + width;
            let result = bound(a, b, v);
            if v <= a {
                prop_assert_eq!(result, a);
            } else if v >= b {
                prop_assert_eq!(result, b);
            } else {
                prop_assert_eq!(result, v);
            }
        }

        #[test]
        fn prop_sum_drop_zero_is_order_independent(
            mut values in prop::collection::vec(-1000i32..1000, 1..20)
        ) {
            let floats: Vec<f64> = values.iter().map(|&v| f64::from(v)).collect();
            let expected: f64 = floats.iter().sum();
            prop_assert_eq!(sum_drop(&floats, 0, None), Some(expected));

            values.reverse();
            let reversed: Vec<f64> = values.iter().map(|&v| f64::from(v)).collect();
            prop_assert_eq!(sum_drop(&reversed, 0, None), Some(expected));
        }

        #[test]
        fn prop_sum_drop_keeps_largest(
            values in prop::collection::vec(-1000i32..1000, 1..20),
            drop_seed in 0usize..100,
        ) {
            let floats: Vec<f64> = values.iter().map(|&v| f64::from(v)).collect();
            let drop = drop_seed % floats.len();

            let mut descending = floats.clone();
            descending.sort_by(|a, b| b.total_cmp(a));
            let expected: f64 = descending[..floats.len() - drop].iter().sum();

            prop_assert_eq!(sum_drop(&floats, drop, None), Some(expected));
            prop_assert_eq!(sum_drop(&floats, floats.len() - 1, None), Some(descending[0]));
            prop_assert_eq!(sum_drop(&floats, floats.len(), None), None);
        }
    }
}
