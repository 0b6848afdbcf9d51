pub mod cost;
pub mod dimer;
pub mod matrix;

pub use self::cost::{CostBreakdown, CostEvaluator};
pub use self::matrix::InteractionMatrix;
