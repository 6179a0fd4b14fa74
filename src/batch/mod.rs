pub mod driver;
pub mod plan;
pub mod report;

pub use driver::{apply_plan, transplant, BlockState};
pub use plan::ReplacementPlan;
pub use report::{BatchReport, BlockOutcome, Outcome};
