//! Option lists for the dashboard's selectors.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use crate::data::model::StatField;

/// One entry of a selector: what the user reads and what gets sent back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption<V> {
    pub label: &'static str,
    pub value: V,
}

const fn stat(field: StatField) -> SelectOption<StatField> {
    SelectOption {
        label: field.label(),
        value: field,
    }
}

const fn country(name: &'static str) -> SelectOption<&'static str> {
    SelectOption {
        label: name,
        value: name,
    }
}

// ---------------------------------------------------------------------------
// Variable selector
// ---------------------------------------------------------------------------

pub const VARIABLE_OPTIONS: [SelectOption<StatField>; 6] = [
    stat(StatField::Earnings),
    stat(StatField::AvgDriveDis),
    stat(StatField::AvgPuttsHole),
    stat(StatField::DriveAccuracyPctg),
    stat(StatField::GreensRegPctg),
    stat(StatField::SandSavePct),
];

pub const DEFAULT_VARIABLE: StatField = StatField::AvgDriveDis;

// ---------------------------------------------------------------------------
// Country multi-select
// ---------------------------------------------------------------------------

pub const COUNTRY_OPTIONS: [SelectOption<&str>; 27] = [
    country("Argentina"),
    country("Australia"),
    country("Canada"),
    country("Chile"),
    country("Chinese Taipei"),
    country("Colombia"),
    country("England"),
    country("Fiji"),
    country("France"),
    country("Germany"),
    country("India"),
    country("Ireland"),
    country("Italy"),
    country("Japan"),
    country("Mexico"),
    country("New Zealand"),
    country("Northern Ireland"),
    country("Norway"),
    country("Scotland"),
    country("South Africa"),
    country("South Korea"),
    country("Spain"),
    country("Sweden"),
    country("United States"),
    country("Venezuela"),
    country("Wales"),
    country("Zimbabwe"),
];

/// Every listed country is selected initially.
pub fn default_countries() -> BTreeSet<String> {
    COUNTRY_OPTIONS
        .iter()
        .map(|o| o.value.to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Age selectors
// ---------------------------------------------------------------------------

pub const AGE_OPTIONS: RangeInclusive<i64> = 15..=60;
pub const DEFAULT_MIN_AGE: i64 = *AGE_OPTIONS.start();
pub const DEFAULT_MAX_AGE: i64 = *AGE_OPTIONS.end();
