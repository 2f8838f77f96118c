//! Utilities for DaoScaffold
//!
//! This module provides utility functions used across the library.

pub mod logging;
pub mod naming;

// Re-export key utility functions
pub use naming::{
    dao_file_name, lower_first, model_file_name, service_file_name, suggest_table_name,
};
