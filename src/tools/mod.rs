//! General-purpose helpers
//!
//! - [`conv`] - loose coercion of dynamic values to primitives
//! - [`json`] - loading JSON files into maps and structs
//! - [`maps`] - filtering, merging and removal over `HashMap`
//! - [`slices`] - searching, editing and numeric summaries over slices
//! - [`time_date`] - fixed-offset clocks, formatting and calendar differences
//! - [`math`] - rounding and float splitting

pub mod conv;
pub mod json;
pub mod maps;
pub mod math;
pub mod slices;
pub mod time_date;
