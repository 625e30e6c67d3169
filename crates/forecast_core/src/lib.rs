pub mod aggregate;
pub mod behavior;
pub mod error;
pub mod event;
pub mod handler;
pub mod network;
pub mod output;
pub mod simulation;
pub mod speculate;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
