//! Deterministic numeric helpers for rollups.

/// Round `value` to `decimals` places.
#[must_use]
pub fn round_f64(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Two-decimal rounding used for every reported hour and percentage.
#[must_use]
pub fn round2(value: f64) -> f64 {
    round_f64(value, 2)
}

/// `numer / denom` to 4 decimals, 0 when `denom` is 0.
#[must_use]
pub fn safe_ratio(numer: usize, denom: usize) -> f64 {
    if denom == 0 {
        0.0
    } else {
        round_f64(numer as f64 / denom as f64, 4)
    }
}

/// Median of the present values; absent values are skipped, not zeroed.
///
/// Even counts average the two middle values. `None` when nothing is
/// present.
pub fn median<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut present: Vec<f64> = values.into_iter().flatten().filter(|v| v.is_finite()).collect();
    if present.is_empty() {
        return None;
    }
    present.sort_by(f64::total_cmp);

    let mid = present.len() / 2;
    Some(if present.len() % 2 == 0 {
        (present[mid - 1] + present[mid]) / 2.0
    } else {
        present[mid]
    })
}

/// `part / whole * 100`, 0 when `whole` is not positive.
#[must_use]
pub fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_two_places() {
        assert_eq!(round2(64.58333), 64.58);
        assert_eq!(round2(33.33333), 33.33);
    }

    #[test]
    fn median_skips_absent_values() {
        assert_eq!(median([Some(48.0), None, Some(48.0)]), Some(48.0));
        assert_eq!(median([Some(1.0), Some(9.0), Some(3.0)]), Some(3.0));
        assert_eq!(median([Some(2.0), Some(4.0)]), Some(3.0));
        assert_eq!(median([None, None]), None);
        assert_eq!(median(Vec::<Option<f64>>::new()), None);
    }

    #[test]
    fn ratios_guard_zero_denominators() {
        assert_eq!(safe_ratio(1, 0), 0.0);
        assert_eq!(safe_ratio(1, 3), 0.3333);
        assert_eq!(percent_of(5.0, 0.0), 0.0);
        assert_eq!(percent_of(1.0, 4.0), 25.0);
    }
}
