pub mod planner;
pub mod region;
