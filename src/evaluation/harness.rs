//! Training and evaluation harness
//!
//! Extracts the configured feature columns and the tariff target from the
//! split record sets, delegates fitting to the regressor seam, and assembles
//! the evaluation report: per-feature importances in training order, the
//! rounded-prediction accuracy, RMSE, and the regressor's native score. All
//! four are reported; none gates success.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::PipelineError;
use crate::evaluation::metrics::{rmse, rounded_accuracy};
use crate::models::{ExtendedRecord, COL_TARIFF};
use crate::regressor::Regressor;

/// Importance score of one feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub name: String,
    pub importance: f64,
}

/// Result of one train/evaluate run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalReport {
    /// (feature, importance) pairs in the configured feature order
    pub importances: Vec<FeatureImportance>,
    /// Exact-match share of integer-rounded predictions (proxy metric)
    pub rounded_accuracy: f64,
    /// RMSE of raw predictions against true targets
    pub rmse: f64,
    /// Regressor's native score on the test set
    pub score: f64,
    pub train_rows: usize,
    pub test_rows: usize,
}

/// Select the named feature columns and the tariff target
///
/// Fails with `SchemaMismatch` on the first feature name that does not
/// resolve to a column of the extended schema.
pub fn extract_features_and_target(
    records: &[ExtendedRecord],
    feature_names: &[String],
) -> Result<(Vec<Vec<f64>>, Vec<f64>), PipelineError> {
    let x = records
        .iter()
        .map(|record| {
            feature_names
                .iter()
                .map(|name| {
                    record
                        .feature_value(name)
                        .ok_or_else(|| PipelineError::SchemaMismatch(name.clone()))
                })
                .collect()
        })
        .collect::<Result<Vec<Vec<f64>>, _>>()?;

    let y = records
        .iter()
        .map(|record| {
            record
                .feature_value(COL_TARIFF)
                .ok_or_else(|| PipelineError::SchemaMismatch(COL_TARIFF.to_string()))
        })
        .collect::<Result<Vec<f64>, _>>()?;

    Ok((x, y))
}

/// Fit the regressor on the training split and evaluate it on the test split
pub fn train_and_evaluate<R: Regressor>(
    regressor: &mut R,
    train: &[ExtendedRecord],
    test: &[ExtendedRecord],
    feature_names: &[String],
) -> Result<EvalReport, PipelineError> {
    let (x_train, y_train) = extract_features_and_target(train, feature_names)?;
    let (x_test, y_test) = extract_features_and_target(test, feature_names)?;

    info!(
        train_rows = train.len(),
        test_rows = test.len(),
        features = feature_names.len(),
        "training regressor"
    );
    regressor.fit(&x_train, &y_train)?;

    let importances = feature_names
        .iter()
        .zip(regressor.feature_importances()?)
        .map(|(name, &importance)| FeatureImportance {
            name: name.clone(),
            importance,
        })
        .collect();

    let predictions = regressor.predict(&x_test)?;

    Ok(EvalReport {
        importances,
        rounded_accuracy: rounded_accuracy(&y_test, &predictions),
        rmse: rmse(&y_test, &predictions),
        score: regressor.score(&x_test, &y_test)?,
        train_rows: train.len(),
        test_rows: test.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{COL_DEPTH, COL_LEAD_TIME};
    use chrono::NaiveDate;

    /// Predicts the training-set mean, importances split evenly
    struct MeanRegressor {
        mean: Option<f64>,
        importances: Vec<f64>,
    }

    impl MeanRegressor {
        fn new() -> Self {
            Self {
                mean: None,
                importances: Vec::new(),
            }
        }
    }

    impl Regressor for MeanRegressor {
        fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> Result<(), PipelineError> {
            let n_features = x.first().map_or(0, Vec::len);
            self.mean = Some(y.iter().sum::<f64>() / y.len() as f64);
            self.importances = vec![1.0 / n_features as f64; n_features];
            Ok(())
        }

        fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>, PipelineError> {
            let mean = self.mean.ok_or(PipelineError::NotTrained)?;
            Ok(vec![mean; x.len()])
        }

        fn feature_importances(&self) -> Result<&[f64], PipelineError> {
            Ok(&self.importances)
        }

        fn score(&self, _x: &[Vec<f64>], _y: &[f64]) -> Result<f64, PipelineError> {
            Ok(0.0)
        }
    }

    fn record(tariff: f64, depth: i64, lead: i64) -> ExtendedRecord {
        ExtendedRecord {
            tariff_cost: tariff,
            created: NaiveDate::from_ymd_opt(2017, 6, 1).unwrap(),
            booking_depth: depth,
            arrival: NaiveDate::from_ymd_opt(2017, 6, 15).unwrap(),
            popularity: 0.0,
            lead_time: lead,
            season: 3,
            weekday: 4,
            holiday_flag: 1,
            lead_depth_bind: 0.0,
            season_weekday_bind: 1096.63,
        }
    }

    fn feature_names() -> Vec<String> {
        vec![COL_DEPTH.to_string(), COL_LEAD_TIME.to_string()]
    }

    #[test]
    fn test_extract_features_and_target() {
        let records = vec![record(1000.0, 10, 14), record(2000.0, 3, 7)];
        let (x, y) = extract_features_and_target(&records, &feature_names()).unwrap();

        assert_eq!(x, vec![vec![10.0, 14.0], vec![3.0, 7.0]]);
        assert_eq!(y, vec![1000.0, 2000.0]);
    }

    #[test]
    fn test_extract_unknown_feature_fails() {
        let records = vec![record(1000.0, 10, 14)];
        let names = vec!["Номер каюты".to_string()];
        let err = extract_features_and_target(&records, &names).unwrap_err();
        assert!(matches!(err, PipelineError::SchemaMismatch(_)));
    }

    #[test]
    fn test_train_and_evaluate_report_shape() {
        let train = vec![record(1000.0, 10, 14), record(3000.0, 3, 7)];
        let test = vec![record(2000.0, 5, 10)];
        let names = feature_names();

        let mut regressor = MeanRegressor::new();
        let report = train_and_evaluate(&mut regressor, &train, &test, &names).unwrap();

        assert_eq!(report.train_rows, 2);
        assert_eq!(report.test_rows, 1);
        assert_eq!(report.importances.len(), 2);
        assert_eq!(report.importances[0].name, COL_DEPTH);
        // mean prediction is 2000, the single test target
        assert_eq!(report.rmse, 0.0);
        assert_eq!(report.rounded_accuracy, 1.0);
    }
}
