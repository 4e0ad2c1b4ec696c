//! Loading uploaded tables into a [`Dataset`].

use std::{fs, io::Cursor, path::{Path, PathBuf}};

use calamine::{Data, Reader, Xlsx, XlsxError};
use polars::prelude::{Column, CsvReadOptions, DataFrame, DataType, JsonReader, PolarsError, SerReader};
use thiserror::Error;

use crate::classify::CellValue;
use crate::dataset::{DatasetRow, SchemaError, ValidatedRows};

/// Tabular file formats accepted for upload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TabularFormat {
    Csv,
    Json,
    Xlsx,
}

impl TabularFormat {
    /// Detect the format from a file name's extension (case-insensitive).
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let extension = Path::new(file_name).extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "xlsx" => Some(Self::Xlsx),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Xlsx => "xlsx",
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file type for '{file_name}' (expected .csv, .json or .xlsx)")]
    UnsupportedFileType { file_name: String },
    #[error("failed to read '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse '{file_name}' as {}", .format.extension())]
    Parse {
        file_name: String,
        format: TabularFormat,
        #[source]
        source: PolarsError,
    },
    #[error("failed to open workbook '{file_name}'")]
    Workbook {
        file_name: String,
        #[source]
        source: XlsxError,
    },
    #[error("workbook '{file_name}' has no worksheet")]
    NoWorksheet { file_name: String },
}

/// An uploaded table, not yet checked for the columns the join needs.
#[derive(Clone, Debug)]
pub struct Dataset {
    file_name: String,
    frame: DataFrame,
}

/// Read a CSV, JSON or XLSX table from disk.
pub fn load_tabular(path: &Path) -> Result<Dataset, LoadError> {
    let file_name = path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    // Reject unknown extensions before touching the file.
    if TabularFormat::from_file_name(&file_name).is_none() {
        return Err(LoadError::UnsupportedFileType { file_name });
    }

    let bytes = fs::read(path)
        .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
    load_tabular_bytes(&file_name, &bytes)
}

/// Parse an uploaded table from its bytes, dispatching on the file name.
pub fn load_tabular_bytes(file_name: &str, bytes: &[u8]) -> Result<Dataset, LoadError> {
    let format = TabularFormat::from_file_name(file_name)
        .ok_or_else(|| LoadError::UnsupportedFileType { file_name: file_name.to_string() })?;

    let parse_error = |source: PolarsError| LoadError::Parse { file_name: file_name.to_string(), format, source };
    let frame = match format {
        // Scan every row so a stray text cell turns the column into strings instead of failing.
        TabularFormat::Csv => CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()
            .map_err(parse_error)?,
        TabularFormat::Json => JsonReader::new(Cursor::new(bytes)).finish().map_err(parse_error)?,
        TabularFormat::Xlsx => read_first_sheet(file_name, bytes)?,
    };

    tracing::debug!("[dataset::load] {file_name}: {} rows, columns {:?}", frame.height(), frame.get_column_names());
    Ok(Dataset::from_frame(file_name, frame))
}

impl Dataset {
    pub fn from_frame(file_name: impl Into<String>, frame: DataFrame) -> Self {
        Self { file_name: file_name.into(), frame }
    }

    #[inline] pub fn file_name(&self) -> &str { &self.file_name }

    #[inline] pub fn frame(&self) -> &DataFrame { &self.frame }

    #[inline] pub fn height(&self) -> usize { self.frame.height() }

    pub fn column_names(&self) -> Vec<String> {
        self.frame.get_column_names().into_iter().map(|name| name.to_string()).collect()
    }

    /// Extract `(delegation, value)` rows, failing if either column is absent.
    ///
    /// Names are read as text; rows without a name are dropped. Numeric value
    /// columns become numbers, text columns stay text for later coercion.
    pub fn rows(&self, name_column: &str, value_column: &str) -> Result<Vec<DatasetRow>, SchemaError> {
        let required = [name_column, value_column];
        let missing = required.iter()
            .filter(|column| self.frame.column(column).is_err())
            .map(|column| column.to_string())
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            return Err(SchemaError::MissingColumns {
                required: required.iter().map(|column| column.to_string()).collect(),
                missing,
            });
        }

        let names = read_names(self.column(name_column)?)
            .map_err(|source| SchemaError::Unreadable { column: name_column.to_string(), source })?;
        let values = read_values(self.column(value_column)?)
            .map_err(|source| SchemaError::Unreadable { column: value_column.to_string(), source })?;

        let rows = names.into_iter()
            .zip(values)
            .enumerate()
            .filter_map(|(i, (name, value))| {
                let Some(delegation) = name else {
                    tracing::debug!("[dataset::rows] skipping row {i} of {}: no delegation name", self.file_name);
                    return None;
                };
                Some(DatasetRow { delegation, value })
            })
            .collect();
        Ok(rows)
    }

    /// Run the schema check, converting a failure into an empty row set plus a validation signal.
    pub fn validate(&self, name_column: &str, value_column: &str) -> ValidatedRows {
        ValidatedRows::from_result(self.rows(name_column, value_column))
    }

    fn column(&self, name: &str) -> Result<&Column, SchemaError> {
        self.frame.column(name)
            .map_err(|source| SchemaError::Unreadable { column: name.to_string(), source })
    }
}

/// First worksheet as a frame: the top row names the columns, the rest are data.
fn read_first_sheet(file_name: &str, bytes: &[u8]) -> Result<DataFrame, LoadError> {
    let workbook_error = |source: XlsxError| LoadError::Workbook { file_name: file_name.to_string(), source };

    let mut workbook = Xlsx::new(Cursor::new(bytes)).map_err(workbook_error)?;
    let range = workbook.worksheet_range_at(0)
        .ok_or_else(|| LoadError::NoWorksheet { file_name: file_name.to_string() })?
        .map_err(workbook_error)?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(DataFrame::empty());
    };
    let body = rows.collect::<Vec<_>>();

    let columns = header.iter()
        .enumerate()
        .map(|(i, cell)| {
            let name = match cell.to_string().trim() {
                "" => format!("Unnamed: {i}"),
                name => name.to_string(),
            };
            sheet_column(name, body.iter().map(|row| row.get(i)).collect())
        })
        .collect::<Vec<_>>();

    DataFrame::new(columns)
        .map_err(|source| LoadError::Parse { file_name: file_name.to_string(), format: TabularFormat::Xlsx, source })
}

/// Type a worksheet column the way the CSV reader would infer it:
/// whole numbers, then floats, else text.
fn sheet_column(name: String, cells: Vec<Option<&Data>>) -> Column {
    let numbers = cells.iter()
        .map(|cell| match cell {
            None | Some(Data::Empty | Data::Error(_)) => Ok(None),
            Some(Data::Int(value)) => Ok(Some(*value as f64)),
            Some(Data::Float(value)) => Ok(Some(*value)),
            Some(_) => Err(()),
        })
        .collect::<Result<Vec<_>, _>>();

    match numbers {
        Ok(numbers) if numbers.iter().flatten().all(|value| value.fract() == 0.0 && value.abs() < i64::MAX as f64) => {
            let integers = numbers.into_iter().map(|value| value.map(|value| value as i64)).collect::<Vec<_>>();
            Column::new(name.into(), integers)
        }
        Ok(numbers) => Column::new(name.into(), numbers),
        Err(()) => {
            let texts = cells.into_iter()
                .map(|cell| match cell {
                    None | Some(Data::Empty | Data::Error(_)) => None,
                    Some(Data::String(text)) => Some(text.clone()),
                    Some(other) => Some(other.to_string()),
                })
                .collect::<Vec<_>>();
            Column::new(name.into(), texts)
        }
    }
}

fn read_names(column: &Column) -> Result<Vec<Option<String>>, PolarsError> {
    let names = column.cast(&DataType::String)?;
    let names = names.str()?
        .into_iter()
        .map(|name| name.map(str::to_string))
        .collect();
    Ok(names)
}

fn read_values(column: &Column) -> Result<Vec<CellValue>, PolarsError> {
    if column.dtype() == &DataType::String {
        let values = column.str()?.into_iter().map(CellValue::from).collect();
        return Ok(values);
    }
    let numbers = column.cast(&DataType::Float64)?;
    let values = numbers.f64()?.into_iter().map(CellValue::from).collect();
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "Delegations,Valeurs\nTunis Medina,15\nLa Marsa,150\nCarthage,n/a\n";

    #[test]
    fn detects_format_from_extension() {
        assert_eq!(TabularFormat::from_file_name("data.csv"), Some(TabularFormat::Csv));
        assert_eq!(TabularFormat::from_file_name("DATA.CSV"), Some(TabularFormat::Csv));
        assert_eq!(TabularFormat::from_file_name("values.json"), Some(TabularFormat::Json));
        assert_eq!(TabularFormat::from_file_name("values.XLSX"), Some(TabularFormat::Xlsx));
        assert_eq!(TabularFormat::from_file_name("values.ods"), None);
        assert_eq!(TabularFormat::from_file_name("values"), None);
    }

    #[test]
    fn unsupported_extension_is_a_load_error() {
        let err = load_tabular_bytes("values.ods", b"whatever").unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFileType { ref file_name } if file_name == "values.ods"));
    }

    #[test]
    fn reads_csv_rows_with_mixed_values() {
        let dataset = load_tabular_bytes("upload.csv", CSV.as_bytes()).unwrap();
        assert_eq!(dataset.height(), 3);
        assert_eq!(dataset.column_names(), vec!["Delegations", "Valeurs"]);

        let rows = dataset.rows("Delegations", "Valeurs").unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].delegation, "Tunis Medina");
        assert_eq!(rows[0].value.as_f64(), Some(15.0));
        assert_eq!(rows[1].value.as_f64(), Some(150.0));
        assert_eq!(rows[2].value.as_f64(), None);
    }

    #[test]
    fn numeric_value_column_becomes_numbers() {
        let csv = "Delegations,Valeurs\nA,1.5\nB,\nC,42\n";
        let rows = load_tabular_bytes("upload.csv", csv.as_bytes()).unwrap()
            .rows("Delegations", "Valeurs").unwrap();
        assert_eq!(rows[0].value, CellValue::Number(1.5));
        assert_eq!(rows[1].value, CellValue::Missing);
        assert_eq!(rows[2].value, CellValue::Number(42.0));
    }

    #[test]
    fn missing_columns_are_reported_together() {
        let csv = "Name,Value\nA,1\n";
        let dataset = load_tabular_bytes("upload.csv", csv.as_bytes()).unwrap();
        match dataset.rows("Delegations", "Valeurs") {
            Err(SchemaError::MissingColumns { missing, .. }) => assert_eq!(missing, vec!["Delegations", "Valeurs"]),
            other => panic!("expected missing columns, got {other:?}"),
        }

        let validated = dataset.validate("Delegations", "Valeurs");
        assert!(validated.rows.is_empty());
        assert!(!validated.validation.has_required_columns());
    }

    #[test]
    fn reads_json_records() {
        let json = r#"[{"Delegations":"Sfax Ville","Valeurs":55},{"Delegations":"Gabes Sud","Valeurs":7}]"#;
        let rows = load_tabular_bytes("upload.json", json.as_bytes()).unwrap()
            .rows("Delegations", "Valeurs").unwrap();
        assert_eq!(rows, vec![DatasetRow::new("Sfax Ville", 55.0), DatasetRow::new("Gabes Sud", 7.0)]);
    }

    fn workbook(rows: &[&[&str]]) -> Vec<u8> {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let (r, c) = (r as u32, c as u16);
                let written = match cell.parse::<f64>() {
                    Ok(number) => sheet.write_number(r, c, number).map(|_| ()),
                    Err(_) if cell.is_empty() => Ok(()),
                    Err(_) => sheet.write_string(r, c, *cell).map(|_| ()),
                };
                written.unwrap();
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn reads_first_worksheet_of_xlsx() {
        let bytes = workbook(&[
            &["Delegations", "Valeurs"],
            &["Tunis Medina", "15"],
            &["La Marsa", "150.5"],
            &["Carthage", ""],
        ]);
        let dataset = load_tabular_bytes("upload.xlsx", &bytes).unwrap();
        assert_eq!(dataset.height(), 3);
        assert_eq!(dataset.column_names(), vec!["Delegations", "Valeurs"]);

        let rows = dataset.rows("Delegations", "Valeurs").unwrap();
        assert_eq!(rows, vec![
            DatasetRow::new("Tunis Medina", 15.0),
            DatasetRow::new("La Marsa", 150.5),
            DatasetRow { delegation: "Carthage".to_string(), value: CellValue::Missing },
        ]);
    }

    #[test]
    fn xlsx_text_values_and_numeric_names() {
        let bytes = workbook(&[
            &["Delegations", "Valeurs"],
            &["1101", "n/a"],
            &["1102", "40"],
        ]);
        let rows = load_tabular_bytes("upload.xlsx", &bytes).unwrap()
            .rows("Delegations", "Valeurs").unwrap();
        assert_eq!(rows[0].delegation, "1101");
        assert_eq!(rows[0].value.as_f64(), None);
        assert_eq!(rows[1].delegation, "1102");
        assert_eq!(rows[1].value.as_f64(), Some(40.0));
    }

    #[test]
    fn xlsx_missing_columns_are_a_schema_error() {
        let bytes = workbook(&[&["Name", "Value"], &["A", "1"]]);
        let dataset = load_tabular_bytes("upload.xlsx", &bytes).unwrap();
        assert!(matches!(dataset.rows("Delegations", "Valeurs"), Err(SchemaError::MissingColumns { .. })));
    }

    #[test]
    fn corrupt_xlsx_is_a_workbook_error() {
        let err = load_tabular_bytes("upload.xlsx", b"PK\x03\x04 not a workbook").unwrap_err();
        assert!(matches!(err, LoadError::Workbook { .. }));
    }

    #[test]
    fn load_tabular_reports_missing_file() {
        let err = load_tabular(Path::new("/nonexistent/upload.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
