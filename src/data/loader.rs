use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Dataset, PlayerRecord, StatField, DEFAULT_AGE};
use crate::error::LoadError;

/// Columns every data file must carry, in any order.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "Player",
    "Country",
    "Earnings",
    "Avg_Drive_Dis",
    "Avg_Putts_Hole",
    "Drive_Accuracy_Pctg",
    "Greens_Reg_Pctg",
    "Sand_Save_Pct",
    "Points",
    "Age",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the player table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row naming [`REQUIRED_COLUMNS`]; a leading unnamed
///   index column is ignored
/// * `.json`    – `[{ "Player": "...", "Country": "...", ... }, ...]`
/// * `.parquet` – one column per field
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }?;

    log::debug!("parsed {} player rows from {}", dataset.len(), path.display());
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Field parsing shared by all formats
// ---------------------------------------------------------------------------

/// Raw field access for one row, independent of the file format.
trait RowSource {
    fn text(&self, column: &str) -> Result<Option<String>, LoadError>;
    fn number(&self, column: &str) -> Result<Option<f64>, LoadError>;
}

fn build_record(row: usize, src: &impl RowSource) -> Result<PlayerRecord, LoadError> {
    let text = |column: &str| -> Result<String, LoadError> {
        src.text(column)?
            .filter(|s| !s.is_empty())
            .ok_or_else(|| LoadError::invalid(row, column, "missing value"))
    };
    let number = |column: &str| -> Result<f64, LoadError> {
        src.number(column)?
            .ok_or_else(|| LoadError::invalid(row, column, "missing value"))
    };
    let stat = |field: StatField| number(field.column());

    let age = match src.number("Age")? {
        Some(v) if v.fract() == 0.0 => v as i64,
        Some(v) => return Err(LoadError::invalid(row, "Age", format!("'{v}' is not a whole number"))),
        None => DEFAULT_AGE,
    };

    Ok(PlayerRecord {
        name: text("Player")?,
        country: text("Country")?,
        age,
        earnings: stat(StatField::Earnings)?,
        avg_drive_dis: stat(StatField::AvgDriveDis)?,
        avg_putts_hole: stat(StatField::AvgPuttsHole)?,
        drive_accuracy_pctg: stat(StatField::DriveAccuracyPctg)?,
        greens_reg_pctg: stat(StatField::GreensRegPctg)?,
        sand_save_pct: stat(StatField::SandSavePct)?,
        points: number("Points")?,
    })
}

/// Parse a numeric cell. Empty and `NaN` cells count as missing; thousands
/// separators and a leading `$` (as scraped) are tolerated.
fn parse_number(row: usize, column: &str, raw: &str) -> Result<Option<f64>, LoadError> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    if cleaned.is_empty() || cleaned.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    cleaned
        .parse::<f64>()
        .map(Some)
        .map_err(|_| LoadError::invalid(row, column, format!("'{raw}' is not a number")))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

struct CsvRow<'a> {
    row: usize,
    headers: &'a [String],
    record: &'a csv::StringRecord,
}

impl CsvRow<'_> {
    fn raw(&self, column: &str) -> Result<&str, LoadError> {
        let idx = self
            .headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| LoadError::MissingColumn(column.to_string()))?;
        Ok(self.record.get(idx).unwrap_or(""))
    }
}

impl RowSource for CsvRow<'_> {
    fn text(&self, column: &str) -> Result<Option<String>, LoadError> {
        Ok(Some(self.raw(column)?.trim().to_string()))
    }

    fn number(&self, column: &str) -> Result<Option<f64>, LoadError> {
        parse_number(self.row, column, self.raw(column)?)
    }
}

fn load_csv(path: &Path) -> Result<Dataset, LoadError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    check_columns(headers.iter().map(String::as_str))?;

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let src = CsvRow {
            row,
            headers: &headers,
            record: &record,
        };
        records.push(build_record(row, &src)?);
    }

    Ok(Dataset::from_records(records))
}

fn check_columns<'a>(present: impl Iterator<Item = &'a str> + Clone) -> Result<(), LoadError> {
    for required in REQUIRED_COLUMNS {
        if !present.clone().any(|h| h == required) {
            return Err(LoadError::MissingColumn(required.to_string()));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

struct JsonRow<'a> {
    row: usize,
    obj: &'a serde_json::Map<String, JsonValue>,
}

impl RowSource for JsonRow<'_> {
    fn text(&self, column: &str) -> Result<Option<String>, LoadError> {
        match self.obj.get(column) {
            None | Some(JsonValue::Null) => Ok(None),
            Some(JsonValue::String(s)) => Ok(Some(s.trim().to_string())),
            Some(other) => Ok(Some(other.to_string())),
        }
    }

    fn number(&self, column: &str) -> Result<Option<f64>, LoadError> {
        match self.obj.get(column) {
            None | Some(JsonValue::Null) => Ok(None),
            Some(JsonValue::Number(n)) => Ok(n.as_f64()),
            Some(JsonValue::String(s)) => parse_number(self.row, column, s),
            Some(other) => Err(LoadError::invalid(
                self.row,
                column,
                format!("{other} is not a number"),
            )),
        }
    }
}

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Player": "Dustin Johnson", "Country": "United States", "Age": 36, ... },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset, LoadError> {
    let text = std::fs::read_to_string(path)?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let rows = root
        .as_array()
        .ok_or_else(|| LoadError::invalid(0, "<root>", "expected top-level JSON array"))?;

    let mut records = Vec::with_capacity(rows.len());
    for (row, value) in rows.iter().enumerate() {
        let obj = value
            .as_object()
            .ok_or_else(|| LoadError::invalid(row, "<row>", "not a JSON object"))?;
        // Age may be absent on individual rows; every other field may not.
        for required in REQUIRED_COLUMNS.iter().filter(|c| **c != "Age") {
            if !obj.contains_key(*required) {
                return Err(LoadError::MissingColumn(required.to_string()));
            }
        }
        records.push(build_record(row, &JsonRow { row, obj })?);
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

struct ParquetRow<'a> {
    row: usize,
    batch: &'a arrow::record_batch::RecordBatch,
}

impl ParquetRow<'_> {
    fn column(&self, name: &str) -> Result<&Arc<dyn Array>, LoadError> {
        let idx = self
            .batch
            .schema()
            .index_of(name)
            .map_err(|_| LoadError::MissingColumn(name.to_string()))?;
        Ok(self.batch.column(idx))
    }
}

impl RowSource for ParquetRow<'_> {
    fn text(&self, column: &str) -> Result<Option<String>, LoadError> {
        let col = self.column(column)?;
        if col.is_null(self.row) {
            return Ok(None);
        }
        match col.data_type() {
            DataType::Utf8 => {
                let arr = col.as_any().downcast_ref::<StringArray>().ok_or_else(|| {
                    LoadError::invalid(self.row, column, "expected a string column")
                })?;
                Ok(Some(arr.value(self.row).to_string()))
            }
            DataType::LargeUtf8 => Ok(Some(col.as_string::<i64>().value(self.row).to_string())),
            other => Err(LoadError::invalid(
                self.row,
                column,
                format!("expected a string column, got {other:?}"),
            )),
        }
    }

    fn number(&self, column: &str) -> Result<Option<f64>, LoadError> {
        let col = self.column(column)?;
        if col.is_null(self.row) {
            return Ok(None);
        }
        let any = col.as_any();
        let value = if let Some(arr) = any.downcast_ref::<Float64Array>() {
            arr.value(self.row)
        } else if let Some(arr) = any.downcast_ref::<Float32Array>() {
            arr.value(self.row) as f64
        } else if let Some(arr) = any.downcast_ref::<Int64Array>() {
            arr.value(self.row) as f64
        } else if let Some(arr) = any.downcast_ref::<Int32Array>() {
            arr.value(self.row) as f64
        } else {
            return Err(LoadError::invalid(
                self.row,
                column,
                format!("expected a numeric column, got {:?}", col.data_type()),
            ));
        };
        Ok(if value.is_nan() { None } else { Some(value) })
    }
}

/// Load a Parquet file with one column per field, as written by
/// `df.to_parquet()`. Float columns holding NaN for a missing age are handled
/// like nulls.
fn load_parquet(path: &Path) -> Result<Dataset, LoadError> {
    let file = std::fs::File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    check_columns(schema.fields().iter().map(|f| f.name().as_str()))?;
    let reader = builder.build()?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        for row in 0..batch.num_rows() {
            let src = ParquetRow { row, batch: &batch };
            records.push(build_record(records.len(), &src)?);
        }
    }

    Ok(Dataset::from_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use arrow::array::ArrayRef;
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use crate::ui::options::COUNTRY_OPTIONS;

    const HEADER: &str = ",Player,Country,Earnings,Avg_Drive_Dis,Avg_Putts_Hole,Drive_Accuracy_Pctg,Greens_Reg_Pctg,Sand_Save_Pct,Points,Age";

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_with_index_column_loads() {
        let dir = tempfile::tempdir().unwrap();
        let body = format!(
            "{HEADER}\n\
             0,Dustin Johnson,United States,\"$7,900,000\",309.6,1.71,57.5,70.4,56.1,1850,36\n\
             1,Scott Vincent,Zimbabwe,125000,299.0,1.8,61.0,66.0,48.0,120.5,\n"
        );
        let path = write_file(&dir, "players.csv", &body);

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        let dj = &ds.records()[0];
        assert_eq!(dj.name, "Dustin Johnson");
        assert_eq!(dj.earnings, 7_900_000.0);
        assert_eq!(dj.age, 36);
        assert_eq!(ds.records()[1].age, DEFAULT_AGE);
        assert_eq!(ds.records()[1].points, 120.5);
    }

    #[test]
    fn bundled_player_table_loads() {
        let path = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/top_80_players.csv"));
        let ds = load_file(path).unwrap();
        assert_eq!(ds.len(), 80);

        let known: Vec<&str> = COUNTRY_OPTIONS.iter().map(|o| o.value).collect();
        for r in ds.records() {
            assert!(known.contains(&r.country.as_str()), "{}", r.country);
        }

        let imputed: Vec<&str> = ds
            .records()
            .iter()
            .filter(|r| r.age == DEFAULT_AGE)
            .map(|r| r.name.as_str())
            .collect();
        for name in ["Cameron Davis", "Matt Wallace", "Stephan Jaeger", "Rhys Enoch"] {
            assert!(imputed.contains(&name), "{name}");
        }
        assert_eq!(ds.records()[0].name, "Dustin Johnson");
        assert_eq!(ds.records()[0].age, 36);
    }

    #[test]
    fn csv_missing_column_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "players.csv", "Player,Country,Age\nA,Fiji,30\n");
        match load_file(&path) {
            Err(LoadError::MissingColumn(col)) => assert_eq!(col, "Earnings"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn csv_non_numeric_value_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let body = format!("{HEADER}\n0,A,Fiji,1,long,1.7,60,60,50,10,30\n");
        let path = write_file(&dir, "players.csv", &body);
        match load_file(&path) {
            Err(LoadError::InvalidValue { row, column, .. }) => {
                assert_eq!(row, 0);
                assert_eq!(column, "Avg_Drive_Dis");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_) | LoadError::Io(_)), "{err:?}");
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("players.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ext) if ext == "xlsx"));
    }

    #[test]
    fn json_records_load_with_default_age() {
        let dir = tempfile::tempdir().unwrap();
        let body = r#"[
            {"Player": "Adam Scott", "Country": "Australia", "Earnings": 2500000,
             "Avg_Drive_Dis": 303.2, "Avg_Putts_Hole": 1.72, "Drive_Accuracy_Pctg": 55.0,
             "Greens_Reg_Pctg": 67.9, "Sand_Save_Pct": 49.5, "Points": 900, "Age": null}
        ]"#;
        let path = write_file(&dir, "players.json", body);
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records()[0].country, "Australia");
        assert_eq!(ds.records()[0].age, DEFAULT_AGE);
    }

    #[test]
    fn parquet_columns_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("players.parquet");

        let mut fields = vec![
            Field::new("Player", DataType::Utf8, false),
            Field::new("Country", DataType::Utf8, false),
        ];
        let mut columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(vec!["Jon Rahm", "Cameron Smith"])),
            Arc::new(StringArray::from(vec!["Spain", "Australia"])),
        ];
        for name in &REQUIRED_COLUMNS[2..9] {
            fields.push(Field::new(*name, DataType::Float64, false));
            columns.push(Arc::new(Float64Array::from(vec![1.5, 2.5])));
        }
        fields.push(Field::new("Age", DataType::Float64, true));
        columns.push(Arc::new(Float64Array::from(vec![Some(26.0), None])));

        let schema = Arc::new(Schema::new(fields));
        let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].age, 26);
        assert_eq!(ds.records()[1].age, DEFAULT_AGE);
        assert_eq!(ds.records()[1].points, 2.5);
    }
}
