pub mod export;
pub mod runner;
