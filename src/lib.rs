pub mod chart;
pub mod cleanup;
pub mod compile;
pub mod config;
pub mod display;
pub mod errors;
pub mod pipeline;
pub mod probe;
pub mod stats;
pub mod timing;
pub mod types;
