// src/output/mod.rs
//! Output handling with separate planning and execution.
//!
//! Commands build an `OutputPlan` (pure) and hand it to `deliver`, which
//! performs the I/O and reports what happened.

mod types;
mod writer;

pub use types::{
    CompletedOperation, DeliveryTarget, ExecutionStats, FailedOperation, OutputPlan, OutputReport,
};
pub use writer::deliver;
