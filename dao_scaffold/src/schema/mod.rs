//! Schema module for DaoScaffold
//!
//! This module holds the table description types and the codec that moves
//! them in and out of the schema literal embedded in model files.

pub mod codec;
pub mod literal;
pub mod parser;
pub mod printer;
pub mod types;
pub mod validate;

// Re-export key types
pub use codec::{extract_table_info, table_info_to_code_text, text_to_table_info};
pub use literal::Literal;
pub use types::{FieldSpec, FieldType, TableInfo, View, NOW_SENTINEL};
pub use validate::validate_table_info;
