//! Artifact builders for the output-mapping writer.
//!
//! Turns sanitized table configurations into typed-table definitions and
//! builds the invocation of the external file-slicing binary.

pub mod slicer;
pub mod table_definition;

pub use slicer::{INPUT_SIZE_LOW_EXIT_CODE, SLICER_TIMEOUT, SliceCommandBuilder};
pub use table_definition::{
    BackendType, BaseType, TableDefinition, TableDefinitionColumn, TableDefinitionFactory,
};
