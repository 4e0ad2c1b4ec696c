use std::fmt;

use thiserror::Error;

use crate::classify::CellValue;

/// One `(delegation, value)` pair taken from the uploaded table.
#[derive(Clone, Debug, PartialEq)]
pub struct DatasetRow {
    pub delegation: String,
    pub value: CellValue,
}

impl DatasetRow {
    pub fn new(delegation: impl Into<String>, value: impl Into<CellValue>) -> Self {
        Self { delegation: delegation.into(), value: value.into() }
    }
}

/// Failure of the one-time schema check performed on a loaded table.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("missing required column(s): {}", quoted(.missing))]
    MissingColumns { required: Vec<String>, missing: Vec<String> },
    #[error("column '{column}' could not be read")]
    Unreadable {
        column: String,
        #[source]
        source: polars::prelude::PolarsError,
    },
}

/// Outcome of the dataset check, surfaced to the user-facing layer.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Validation {
    /// Nothing uploaded.
    #[default]
    NoDataset,
    Valid,
    MissingColumns { required: Vec<String>, missing: Vec<String> },
    Unreadable { column: String, reason: String },
}

impl Validation {
    /// `false` when a dataset was supplied but lacked a usable name or value column.
    pub fn has_required_columns(&self) -> bool {
        matches!(self, Self::NoDataset | Self::Valid)
    }

    /// Message to show the user, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::NoDataset | Self::Valid => None,
            Self::MissingColumns { required, .. } => {
                Some(format!("The file must contain the columns {}.", joined(required)))
            }
            Self::Unreadable { column, reason } => {
                Some(format!("The column '{column}' could not be read: {reason}"))
            }
        }
    }
}

impl From<&SchemaError> for Validation {
    fn from(err: &SchemaError) -> Self {
        match err {
            SchemaError::MissingColumns { required, missing } => {
                Self::MissingColumns { required: required.clone(), missing: missing.clone() }
            }
            SchemaError::Unreadable { column, source } => {
                Self::Unreadable { column: column.clone(), reason: source.to_string() }
            }
        }
    }
}

/// Rows ready for the joiner, paired with the validation signal.
///
/// When validation failed `rows` is empty, so the join yields no assignments.
#[derive(Clone, Debug, Default)]
pub struct ValidatedRows {
    pub rows: Vec<DatasetRow>,
    pub validation: Validation,
}

impl ValidatedRows {
    pub fn from_result(result: Result<Vec<DatasetRow>, SchemaError>) -> Self {
        match result {
            Ok(rows) => Self { rows, validation: Validation::Valid },
            Err(err) => {
                tracing::warn!("[dataset::validate] {err}");
                Self { rows: Vec::new(), validation: Validation::from(&err) }
            }
        }
    }
}

struct Quoted<'a>(&'a [String]);

impl fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.0.iter().enumerate() {
            if i > 0 { f.write_str(", ")? }
            write!(f, "'{name}'")?;
        }
        Ok(())
    }
}

fn quoted(names: &[String]) -> Quoted<'_> { Quoted(names) }

/// `'a'`, `'a' and 'b'`, `'a', 'b' and 'c'`.
fn joined(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => format!("'{only}'"),
        [init @ .., last] => format!("{} and '{last}'", quoted(init)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing(required: &[&str], missing: &[&str]) -> SchemaError {
        SchemaError::MissingColumns {
            required: required.iter().map(|s| s.to_string()).collect(),
            missing: missing.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn missing_columns_message_names_required_columns() {
        let validated = ValidatedRows::from_result(Err(missing(&["Delegations", "Valeurs"], &["Valeurs"])));
        assert!(validated.rows.is_empty());
        assert!(!validated.validation.has_required_columns());
        assert_eq!(
            validated.validation.message().as_deref(),
            Some("The file must contain the columns 'Delegations' and 'Valeurs'."),
        );
    }

    #[test]
    fn schema_error_lists_missing_columns() {
        let err = missing(&["Delegations", "Valeurs"], &["Delegations", "Valeurs"]);
        assert_eq!(err.to_string(), "missing required column(s): 'Delegations', 'Valeurs'");
    }

    #[test]
    fn valid_rows_pass_through() {
        let rows = vec![DatasetRow::new("Tunis", 10.0), DatasetRow::new("Sfax", "n/a")];
        let validated = ValidatedRows::from_result(Ok(rows.clone()));
        assert_eq!(validated.rows, rows);
        assert_eq!(validated.validation, Validation::Valid);
        assert!(validated.validation.message().is_none());
    }

    #[test]
    fn no_dataset_is_not_an_error() {
        let validation = Validation::default();
        assert_eq!(validation, Validation::NoDataset);
        assert!(validation.has_required_columns());
        assert!(validation.message().is_none());
    }
}
