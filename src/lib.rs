pub mod aggregate;
pub mod chart;
pub mod cli;
pub mod commands;
pub mod error;
pub mod git;
pub mod logging;
pub mod model;
pub mod util;
