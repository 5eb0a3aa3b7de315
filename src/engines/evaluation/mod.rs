pub mod evaluator;

pub use evaluator::{EvaluationReport, FitnessEvaluator};
