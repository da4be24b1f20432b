//! Group analysis: tag predicates and per-group statistics.

pub mod aggregate;
pub mod spec;

pub use aggregate::{aggregate, median, GroupResult};
pub use spec::{matches, FilterSpec};
