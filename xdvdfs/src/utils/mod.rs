//! Utility functions

pub mod datetime;
pub mod sector;
pub mod string;
