pub mod lowering_error;
pub use lowering_error::*;

pub mod config;
pub use config::*;

pub mod selection_deduplication;
pub use selection_deduplication::*;

pub mod query_part_processing_state;
pub use query_part_processing_state::*;

pub mod processing_state_stack;
pub use processing_state_stack::*;

pub mod select_lowering;
pub use select_lowering::*;

#[cfg(test)]
mod _tests;
