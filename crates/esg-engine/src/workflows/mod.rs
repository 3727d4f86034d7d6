pub mod assessment;
pub mod emissions;
