//! External regressor seam
//!
//! The pipeline only relies on the narrow contract below: fit, predict,
//! importances aligned to the training feature order, and a native score.
//! `GbdtRegressor` backs it with gradient boosted trees from the `gbdt`
//! crate. Importances are permutation importances computed at fit time on
//! the training set with a fixed seed, so repeated runs report the same
//! ranking.

use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec, ValueType};
use gbdt::gradient_boost::GBDT;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::PipelineError;
use crate::evaluation::metrics::{mse, r2};

/// Supervised regressor contract used by the training harness
pub trait Regressor {
    /// Train on a feature matrix and target vector; fails fast on
    /// mismatched row counts
    fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> Result<(), PipelineError>;

    /// Predict targets for a feature matrix
    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>, PipelineError>;

    /// Importance scores aligned to the training feature order
    fn feature_importances(&self) -> Result<&[f64], PipelineError>;

    /// Native goodness-of-fit score (coefficient of determination)
    fn score(&self, x: &[Vec<f64>], y: &[f64]) -> Result<f64, PipelineError>;
}

/// Gradient boosting hyperparameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GbdtParams {
    /// Number of boosting iterations (trees)
    pub iterations: usize,
    /// Maximum depth of each tree
    pub max_depth: u32,
    /// Learning rate (shrinkage)
    pub shrinkage: f64,
    /// Seed for the permutation importance shuffles
    pub importance_seed: u64,
}

impl Default for GbdtParams {
    fn default() -> Self {
        Self {
            iterations: 100,
            max_depth: 6,
            shrinkage: 0.1,
            importance_seed: 42,
        }
    }
}

/// Gradient boosted tree regressor backed by the `gbdt` crate
pub struct GbdtRegressor {
    params: GbdtParams,
    model: Option<GBDT>,
    n_features: usize,
    importances: Vec<f64>,
}

impl GbdtRegressor {
    pub fn new(params: GbdtParams) -> Self {
        Self {
            params,
            model: None,
            n_features: 0,
            importances: Vec::new(),
        }
    }

    fn check_matrix(x: &[Vec<f64>], width: usize) -> Result<(), PipelineError> {
        for row in x {
            if row.len() != width {
                return Err(PipelineError::DimensionMismatch {
                    expected: width,
                    actual: row.len(),
                });
            }
        }
        Ok(())
    }

    fn predict_matrix(model: &GBDT, x: &[Vec<f64>]) -> Vec<f64> {
        let test_data: DataVec = x
            .iter()
            .map(|row| {
                Data::new_test_data(row.iter().map(|&v| v as ValueType).collect(), None)
            })
            .collect();
        model
            .predict(&test_data)
            .into_iter()
            .map(f64::from)
            .collect()
    }

    /// Permutation importance: MSE degradation on the training set when one
    /// feature column is shuffled, normalized to sum to 1
    fn permutation_importances(
        model: &GBDT,
        x: &[Vec<f64>],
        y: &[f64],
        seed: u64,
    ) -> Vec<f64> {
        let n_features = x.first().map_or(0, Vec::len);
        let baseline = mse(y, &Self::predict_matrix(model, x));
        let mut rng = StdRng::seed_from_u64(seed);

        let mut importances = Vec::with_capacity(n_features);
        for feature in 0..n_features {
            let mut column: Vec<f64> = x.iter().map(|row| row[feature]).collect();
            column.shuffle(&mut rng);

            let permuted: Vec<Vec<f64>> = x
                .iter()
                .zip(&column)
                .map(|(row, &shuffled)| {
                    let mut row = row.clone();
                    row[feature] = shuffled;
                    row
                })
                .collect();

            let degraded = mse(y, &Self::predict_matrix(model, &permuted));
            importances.push((degraded - baseline).max(0.0));
        }

        let total: f64 = importances.iter().sum();
        if total > 0.0 {
            for importance in &mut importances {
                *importance /= total;
            }
        }
        importances
    }
}

impl Regressor for GbdtRegressor {
    fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> Result<(), PipelineError> {
        if x.len() != y.len() {
            return Err(PipelineError::DimensionMismatch {
                expected: x.len(),
                actual: y.len(),
            });
        }
        let n_features = x.first().map_or(0, Vec::len);
        if n_features == 0 {
            return Err(PipelineError::DimensionMismatch {
                expected: 1,
                actual: 0,
            });
        }
        Self::check_matrix(x, n_features)?;

        let mut config = Config::new();
        config.set_feature_size(n_features);
        config.set_max_depth(self.params.max_depth);
        config.set_iterations(self.params.iterations);
        config.set_shrinkage(self.params.shrinkage as ValueType);
        config.set_loss("SquaredError");
        config.set_data_sample_ratio(1.0);
        config.set_feature_sample_ratio(1.0);
        config.set_training_optimization_level(2);
        config.set_debug(false);

        let mut training_data: DataVec = x
            .iter()
            .zip(y)
            .map(|(row, &label)| {
                Data::new_training_data(
                    row.iter().map(|&v| v as ValueType).collect(),
                    1.0,
                    label as ValueType,
                    None,
                )
            })
            .collect();

        info!(
            rows = x.len(),
            features = n_features,
            iterations = self.params.iterations,
            "fitting gradient boosted regressor"
        );

        let mut model = GBDT::new(&config);
        model.fit(&mut training_data);

        self.importances =
            Self::permutation_importances(&model, x, y, self.params.importance_seed);
        self.model = Some(model);
        self.n_features = n_features;
        Ok(())
    }

    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>, PipelineError> {
        let model = self.model.as_ref().ok_or(PipelineError::NotTrained)?;
        Self::check_matrix(x, self.n_features)?;
        Ok(Self::predict_matrix(model, x))
    }

    fn feature_importances(&self) -> Result<&[f64], PipelineError> {
        if self.model.is_none() {
            return Err(PipelineError::NotTrained);
        }
        Ok(&self.importances)
    }

    fn score(&self, x: &[Vec<f64>], y: &[f64]) -> Result<f64, PipelineError> {
        if x.len() != y.len() {
            return Err(PipelineError::DimensionMismatch {
                expected: x.len(),
                actual: y.len(),
            });
        }
        let predictions = self.predict(x)?;
        Ok(r2(y, &predictions))
    }
}
