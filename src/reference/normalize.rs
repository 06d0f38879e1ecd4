/// Species names differ in case and padding between the regional and the
/// external dataset; both sides are compared in this form.
pub fn normalize_species(name: &str) -> String {
    name.trim().to_lowercase()
}

pub fn normalize_ratio(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Mean over the present, finite values. `None` when nothing is left.
pub fn mean_present<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values.into_iter().flatten() {
        if value.is_nan() {
            continue;
        }
        sum += value;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::{mean_present, normalize_species};

    #[test]
    fn mean_skips_missing_and_nan() {
        let mean = mean_present([Some(1.0), None, Some(f64::NAN), Some(3.0)]).expect("mean");
        assert!((mean - 2.0).abs() < 1e-9);
        assert!(mean_present([None, Some(f64::NAN)]).is_none());
        assert!(mean_present(Vec::new()).is_none());
    }

    #[test]
    fn species_are_trimmed_and_lowercased() {
        assert_eq!(normalize_species("  Banana "), "banana");
        assert_eq!(normalize_species("Maçã"), "maçã");
    }
}
