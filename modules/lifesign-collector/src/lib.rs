pub mod benchmark;
pub mod classifier;
pub mod dataset;
pub mod fetch;
pub mod generate;
pub mod sources;
pub mod stats;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod traits;
