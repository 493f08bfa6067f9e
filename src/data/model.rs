use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidFieldError;

/// Age assigned to players whose age is missing from the source data
/// (the tour-wide average).
pub const DEFAULT_AGE: i64 = 35;

// ---------------------------------------------------------------------------
// PlayerRecord – one row of the table
// ---------------------------------------------------------------------------

/// A single player's season statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub country: String,
    pub age: i64,
    pub earnings: f64,
    /// Yards.
    pub avg_drive_dis: f64,
    pub avg_putts_hole: f64,
    pub drive_accuracy_pctg: f64,
    pub greens_reg_pctg: f64,
    pub sand_save_pct: f64,
    /// FedExCup points.
    pub points: f64,
}

// ---------------------------------------------------------------------------
// StatField – the statistics that can go on the x axis
// ---------------------------------------------------------------------------

/// Statistic plotted against FedExCup points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StatField {
    #[serde(rename = "Earnings")]
    Earnings,
    #[default]
    #[serde(rename = "Avg_Drive_Dis")]
    AvgDriveDis,
    #[serde(rename = "Avg_Putts_Hole")]
    AvgPuttsHole,
    #[serde(rename = "Drive_Accuracy_Pctg")]
    DriveAccuracyPctg,
    #[serde(rename = "Greens_Reg_Pctg")]
    GreensRegPctg,
    #[serde(rename = "Sand_Save_Pct")]
    SandSavePct,
}

impl StatField {
    pub const ALL: [StatField; 6] = [
        StatField::Earnings,
        StatField::AvgDriveDis,
        StatField::AvgPuttsHole,
        StatField::DriveAccuracyPctg,
        StatField::GreensRegPctg,
        StatField::SandSavePct,
    ];

    /// Column name in the data file; also the value sent by the selector.
    pub const fn column(self) -> &'static str {
        match self {
            StatField::Earnings => "Earnings",
            StatField::AvgDriveDis => "Avg_Drive_Dis",
            StatField::AvgPuttsHole => "Avg_Putts_Hole",
            StatField::DriveAccuracyPctg => "Drive_Accuracy_Pctg",
            StatField::GreensRegPctg => "Greens_Reg_Pctg",
            StatField::SandSavePct => "Sand_Save_Pct",
        }
    }

    /// Human readable label shown in the selector.
    pub const fn label(self) -> &'static str {
        match self {
            StatField::Earnings => "Earnings",
            StatField::AvgDriveDis => "Average Drive Distance",
            StatField::AvgPuttsHole => "Average Putts Per Hole",
            StatField::DriveAccuracyPctg => "Driving Accuracy Percentage",
            StatField::GreensRegPctg => "Greens in Regulation Percentage",
            StatField::SandSavePct => "Sand Save Percentage",
        }
    }

    pub fn value_of(self, record: &PlayerRecord) -> f64 {
        match self {
            StatField::Earnings => record.earnings,
            StatField::AvgDriveDis => record.avg_drive_dis,
            StatField::AvgPuttsHole => record.avg_putts_hole,
            StatField::DriveAccuracyPctg => record.drive_accuracy_pctg,
            StatField::GreensRegPctg => record.greens_reg_pctg,
            StatField::SandSavePct => record.sand_save_pct,
        }
    }
}

impl FromStr for StatField {
    type Err = InvalidFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatField::ALL
            .into_iter()
            .find(|f| f.column() == s)
            .ok_or_else(|| InvalidFieldError(s.to_string()))
    }
}

impl fmt::Display for StatField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

// ---------------------------------------------------------------------------
// Column – table schema in display order
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Player,
    Country,
    Age,
    Stat(StatField),
    Points,
}

impl Column {
    /// Display order: the age column sits right after the country.
    pub const DISPLAY_ORDER: [Column; 10] = [
        Column::Player,
        Column::Country,
        Column::Age,
        Column::Stat(StatField::Earnings),
        Column::Stat(StatField::AvgDriveDis),
        Column::Stat(StatField::AvgPuttsHole),
        Column::Stat(StatField::DriveAccuracyPctg),
        Column::Stat(StatField::GreensRegPctg),
        Column::Stat(StatField::SandSavePct),
        Column::Points,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::Player => "Player",
            Column::Country => "Country",
            Column::Age => "Age",
            Column::Stat(field) => field.column(),
            Column::Points => "Points",
        }
    }

    pub fn cell(self, record: &PlayerRecord) -> CellValue<'_> {
        match self {
            Column::Player => CellValue::Text(&record.name),
            Column::Country => CellValue::Text(&record.country),
            Column::Age => CellValue::Integer(record.age),
            Column::Stat(field) => CellValue::Number(field.value_of(record)),
            Column::Points => CellValue::Number(record.points),
        }
    }
}

/// A single table cell borrowed from a record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue<'a> {
    Text(&'a str),
    Integer(i64),
    Number(f64),
}

impl fmt::Display for CellValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Number(v) => write!(f, "{v}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded player table. Never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<PlayerRecord>,
}

impl Dataset {
    pub fn from_records(records: Vec<PlayerRecord>) -> Self {
        Dataset { records }
    }

    pub fn records(&self) -> &[PlayerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted set of distinct countries present in the table.
    pub fn countries(&self) -> BTreeSet<&str> {
        self.records.iter().map(|r| r.country.as_str()).collect()
    }
}
