pub mod common;
pub mod config;
pub mod maze;
pub mod scenario;
pub mod solver;
pub mod stat;
