pub mod accumulator;
pub mod batch;
