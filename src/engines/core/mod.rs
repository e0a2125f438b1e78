//! Core optimization engine: worker pool, file access and memory mapping.

pub mod io;
pub mod memory;
pub mod parallel;
