//! Model evaluation: metric functions and the train/eval harness

pub mod harness;
pub mod metrics;

pub use harness::{extract_features_and_target, train_and_evaluate, EvalReport, FeatureImportance};
pub use metrics::{mse, r2, rmse, rounded_accuracy};
