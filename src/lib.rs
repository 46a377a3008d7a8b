pub mod cli;
pub mod config;
pub mod feasibility;
pub mod logging;
