/// Body-mass index from weight in kilograms and height in centimetres.
///
/// Returns `None` when either input is absent, non-positive, or non-finite, or
/// when the ratio itself is not finite. Otherwise the value is rounded to one
/// decimal place, half away from zero (`f64::round` semantics).
pub fn compute_bmi(weight_kg: Option<f64>, height_cm: Option<f64>) -> Option<f64> {
    let weight = weight_kg.filter(|value| value.is_finite() && *value > 0.0)?;
    let height_m = height_cm.filter(|value| value.is_finite() && *value > 0.0)? / 100.0;
    if height_m == 0.0 {
        return None;
    }

    let bmi = weight / (height_m * height_m);
    if !bmi.is_finite() {
        return None;
    }

    Some((bmi * 10.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::compute_bmi;

    #[test]
    fn missing_or_zero_inputs_yield_none() {
        assert_eq!(compute_bmi(None, Some(170.0)), None);
        assert_eq!(compute_bmi(Some(70.0), None), None);
        assert_eq!(compute_bmi(Some(0.0), Some(170.0)), None);
        assert_eq!(compute_bmi(Some(70.0), Some(0.0)), None);
        assert_eq!(compute_bmi(Some(-70.0), Some(170.0)), None);
        assert_eq!(compute_bmi(Some(70.0), Some(f64::NAN)), None);
    }

    #[test]
    fn typical_value_rounds_to_one_decimal() {
        // 70 / 1.75^2 = 22.857... -> 22.9
        assert_eq!(compute_bmi(Some(70.0), Some(175.0)), Some(22.9));
    }

    #[test]
    fn exact_ratio_is_preserved() {
        // 61.44 / 1.6^2 = 24.0 exactly
        assert_eq!(compute_bmi(Some(61.44), Some(160.0)), Some(24.0));
    }

    #[test]
    fn half_boundary_rounds_away_from_zero() {
        // 93 / 2.0^2 = 23.25, exactly representable; 232.5 rounds up to 233.
        assert_eq!(compute_bmi(Some(93.0), Some(200.0)), Some(23.3));
    }

    #[test]
    fn repeated_calls_are_identical() {
        let first = compute_bmi(Some(58.3), Some(164.2));
        let second = compute_bmi(Some(58.3), Some(164.2));
        assert_eq!(first, second);
    }
}
