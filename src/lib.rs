//! # Alarm Migrator Library
//!
//! Migrates raw alarms and their dependent records between two relational
//! databases, reusing destination-side equivalents and never inserting an
//! alarm twice.

pub mod batch;
pub mod config;
pub mod db;
pub mod error;
pub mod log_index;
pub mod migrate;
pub mod models;
pub mod repositories;
pub mod telemetry;
pub use migration;
