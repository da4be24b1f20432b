//! Tag-based genre research over game datasets.
//!
//! The library holds everything both binaries share: loading and coercing
//! the dataset, tag parsing, group evaluation and aggregation, the in-memory
//! profile store, console reporting and the egui front end.

pub mod analysis;
pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod profile;
pub mod report;
pub mod state;
pub mod ui;
