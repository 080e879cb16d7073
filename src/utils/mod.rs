//! Common utilities for the library.
//!

pub mod config;
pub mod log;
