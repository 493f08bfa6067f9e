use std::collections::BTreeSet;

use super::model::{Dataset, PlayerRecord};

// ---------------------------------------------------------------------------
// Filter criteria: selected countries and an inclusive age range
// ---------------------------------------------------------------------------

/// Selection built from the control values on every interaction.
///
/// `min_age <= max_age` is not enforced; an inverted range simply selects
/// nobody.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub countries: BTreeSet<String>,
    pub min_age: i64,
    pub max_age: i64,
}

impl FilterCriteria {
    pub fn matches(&self, record: &PlayerRecord) -> bool {
        self.countries.contains(&record.country)
            && record.age >= self.min_age
            && record.age <= self.max_age
    }
}

/// Post-filter ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    /// FedExCup points, highest first (table view).
    PointsDesc,
    /// Country name, A to Z (chart view).
    CountryAsc,
}

// ---------------------------------------------------------------------------
// FilteredView – indices into the dataset
// ---------------------------------------------------------------------------

/// Ordered selection of dataset rows. Borrows the dataset, never copies it.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
    sort: SortMode,
}

impl<'a> FilteredView<'a> {
    #[cfg(test)]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    #[cfg(test)]
    pub fn sort_mode(&self) -> SortMode {
        self.sort
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &'a PlayerRecord> + '_ {
        let dataset = self.dataset;
        self.indices.iter().map(move |&i| &dataset.records()[i])
    }
}

/// Select the rows passing `criteria` and order them per `sort`.
///
/// Sorting is stable, so ties keep their dataset order and repeated calls
/// return the same sequence.
pub fn filter_table<'a>(
    dataset: &'a Dataset,
    criteria: &FilterCriteria,
    sort: SortMode,
) -> FilteredView<'a> {
    let rows = dataset.records();
    let mut indices: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, r)| criteria.matches(r))
        .map(|(i, _)| i)
        .collect();

    match sort {
        SortMode::PointsDesc => {
            indices.sort_by(|&a, &b| rows[b].points.total_cmp(&rows[a].points))
        }
        SortMode::CountryAsc => indices.sort_by(|&a, &b| rows[a].country.cmp(&rows[b].country)),
    }

    FilteredView {
        dataset,
        indices,
        sort,
    }
}
