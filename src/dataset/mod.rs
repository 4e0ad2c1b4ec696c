//! Uploaded tables and the schema check that turns them into join rows.

mod io;
mod rows;

pub use io::{Dataset, LoadError, TabularFormat, load_tabular, load_tabular_bytes};
pub use rows::{DatasetRow, SchemaError, ValidatedRows, Validation};
