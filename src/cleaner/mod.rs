pub mod batch;
pub mod executor;
