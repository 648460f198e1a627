//! Evaluation metrics
//!
//! RMSE and R² are the meaningful quality signals. The rounded-prediction
//! accuracy treats the regression output, rounded to the nearest integer, as
//! a discrete class; it is an approximate proxy kept for parity with the
//! reference runs and never gates anything.

/// Mean squared error
pub fn mse(y_true: &[f64], y_pred: &[f64]) -> f64 {
    if y_true.is_empty() || y_true.len() != y_pred.len() {
        return 0.0;
    }
    y_true
        .iter()
        .zip(y_pred)
        .map(|(t, p)| (t - p).powi(2))
        .sum::<f64>()
        / y_true.len() as f64
}

/// Root mean squared error between raw predictions and true targets
pub fn rmse(y_true: &[f64], y_pred: &[f64]) -> f64 {
    mse(y_true, y_pred).sqrt()
}

/// Share of predictions that match the target exactly after rounding to the
/// nearest integer
pub fn rounded_accuracy(y_true: &[f64], y_pred: &[f64]) -> f64 {
    if y_true.is_empty() || y_true.len() != y_pred.len() {
        return 0.0;
    }
    let matches = y_true
        .iter()
        .zip(y_pred)
        .filter(|(t, p)| (p.round() - **t).abs() < 1e-9)
        .count();
    matches as f64 / y_true.len() as f64
}

/// Coefficient of determination
pub fn r2(y_true: &[f64], y_pred: &[f64]) -> f64 {
    if y_true.is_empty() || y_true.len() != y_pred.len() {
        return 0.0;
    }
    let mean: f64 = y_true.iter().sum::<f64>() / y_true.len() as f64;
    let ss_tot: f64 = y_true.iter().map(|t| (t - mean).powi(2)).sum();
    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred)
        .map(|(t, p)| (t - p).powi(2))
        .sum();

    if ss_tot == 0.0 {
        return 0.0;
    }
    1.0 - ss_res / ss_tot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rmse_known_values() {
        let y_true = [1.0, 2.0, 3.0];
        let y_pred = [1.0, 2.0, 3.0];
        assert_eq!(rmse(&y_true, &y_pred), 0.0);

        let off_by_two = [3.0, 4.0, 5.0];
        assert_eq!(rmse(&y_true, &off_by_two), 2.0);
    }

    #[test]
    fn test_rmse_empty() {
        assert_eq!(rmse(&[], &[]), 0.0);
    }

    #[test]
    fn test_rounded_accuracy() {
        let y_true = [1000.0, 2000.0, 3000.0, 4000.0];
        let y_pred = [1000.4, 1999.6, 3010.0, 4000.0];
        // 1000.4 -> 1000, 1999.6 -> 2000, 3010 misses, 4000 matches
        assert_eq!(rounded_accuracy(&y_true, &y_pred), 0.75);
    }

    #[test]
    fn test_rounded_accuracy_mismatched_lengths() {
        assert_eq!(rounded_accuracy(&[1.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_r2_perfect_fit() {
        let y_true = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(r2(&y_true, &y_true), 1.0);
    }

    #[test]
    fn test_r2_mean_predictor_is_zero() {
        let y_true = [1.0, 2.0, 3.0];
        let mean_pred = [2.0, 2.0, 2.0];
        assert!(r2(&y_true, &mean_pred).abs() < 1e-12);
    }

    #[test]
    fn test_r2_constant_target() {
        assert_eq!(r2(&[5.0, 5.0], &[5.0, 5.0]), 0.0);
    }
}
