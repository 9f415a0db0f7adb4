// Library root: re-exports all modules so integration tests and external
// consumers can access the crate's public API.

pub mod analysis;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod logos;
pub mod narrative;
pub mod sleeper;
