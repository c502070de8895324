pub mod catalog;
pub mod chart;
pub mod error;
