//! Reactive bindings between the page controls and its output regions.
//!
//! Each [`Binding`] names the controls it listens to and the pure function
//! that recomputes its region. A change event is dispatched synchronously:
//! every binding listening to a changed control is re-rendered, in table
//! order, before the response goes back.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::color;
use crate::data::filter::{filter_table, FilterCriteria, SortMode};
use crate::data::model::Dataset;
use crate::error::DashboardError;
use crate::ui::html::escape;
use crate::ui::options::{default_countries, DEFAULT_MAX_AGE, DEFAULT_MIN_AGE, DEFAULT_VARIABLE};
use crate::ui::{chart, plot, table};

// ---------------------------------------------------------------------------
// Control and region ids
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputId {
    VariableDropdown,
    CountryChecklist,
    MinAgeChecklist,
    MaxAgeChecklist,
}

impl InputId {
    pub const ALL: [InputId; 4] = [
        InputId::VariableDropdown,
        InputId::CountryChecklist,
        InputId::MinAgeChecklist,
        InputId::MaxAgeChecklist,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InputId::VariableDropdown => "variable_dropdown",
            InputId::CountryChecklist => "country_checklist",
            InputId::MinAgeChecklist => "min_age_checklist",
            InputId::MaxAgeChecklist => "max_age_checklist",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputId {
    TableDiv,
    PgaPlot,
}

impl OutputId {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputId::TableDiv => "table_div",
            OutputId::PgaPlot => "pga_plot",
        }
    }
}

// ---------------------------------------------------------------------------
// Current control values
// ---------------------------------------------------------------------------

/// Values of every control at the time of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inputs {
    /// Kept as sent; the chart binding rejects unknown names.
    #[serde(rename = "variable_dropdown")]
    pub variable: String,
    #[serde(rename = "country_checklist")]
    pub countries: BTreeSet<String>,
    #[serde(rename = "min_age_checklist")]
    pub min_age: i64,
    #[serde(rename = "max_age_checklist")]
    pub max_age: i64,
}

impl Default for Inputs {
    fn default() -> Self {
        Self {
            variable: DEFAULT_VARIABLE.column().to_string(),
            countries: default_countries(),
            min_age: DEFAULT_MIN_AGE,
            max_age: DEFAULT_MAX_AGE,
        }
    }
}

impl Inputs {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            countries: self.countries.clone(),
            min_age: self.min_age,
            max_age: self.max_age,
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatch table
// ---------------------------------------------------------------------------

pub struct Binding {
    pub output: OutputId,
    pub inputs: &'static [InputId],
    pub render: fn(&Dataset, &Inputs) -> String,
}

impl Binding {
    pub fn listens_to(&self, changed: &[InputId]) -> bool {
        changed.iter().any(|id| self.inputs.contains(id))
    }
}

pub const BINDINGS: [Binding; 2] = [
    Binding {
        output: OutputId::TableDiv,
        inputs: &[
            InputId::CountryChecklist,
            InputId::MinAgeChecklist,
            InputId::MaxAgeChecklist,
        ],
        render: render_table_region,
    },
    Binding {
        output: OutputId::PgaPlot,
        inputs: &[
            InputId::VariableDropdown,
            InputId::CountryChecklist,
            InputId::MinAgeChecklist,
            InputId::MaxAgeChecklist,
        ],
        render: render_chart_region,
    },
];

/// Recompute every region bound to a changed control. An empty `changed`
/// list (initial page load) recomputes all regions.
pub fn dispatch(dataset: &Dataset, changed: &[InputId], inputs: &Inputs) -> Vec<(OutputId, String)> {
    let outputs: Vec<(OutputId, String)> = BINDINGS
        .iter()
        .filter(|b| changed.is_empty() || b.listens_to(changed))
        .map(|b| (b.output, (b.render)(dataset, inputs)))
        .collect();

    log::debug!(
        "dispatch {:?} -> {:?}",
        changed,
        outputs.iter().map(|(id, _)| *id).collect::<Vec<_>>()
    );
    outputs
}

// ---------------------------------------------------------------------------
// Region renderers
// ---------------------------------------------------------------------------

pub fn render_table_region(dataset: &Dataset, inputs: &Inputs) -> String {
    let view = filter_table(dataset, &inputs.criteria(), SortMode::PointsDesc);
    table::render_html(&table::build_table(&view, table::MAX_ROWS))
}

/// Chart region; an unknown variable yields a visible error block instead.
pub fn render_chart_region(dataset: &Dataset, inputs: &Inputs) -> String {
    match chart_svg(dataset, inputs) {
        Ok(svg) => svg,
        Err(err) => {
            log::warn!("chart not rendered: {err}");
            format!(
                r#"<div class="chart-error" style="color: {}; background: {};">Cannot draw chart: {}</div>"#,
                color::hex(color::ERROR),
                color::rgba(color::ERROR, 0.08),
                escape(&err.to_string())
            )
        }
    }
}

fn chart_svg(dataset: &Dataset, inputs: &Inputs) -> Result<String, DashboardError> {
    let view = filter_table(dataset, &inputs.criteria(), SortMode::CountryAsc);
    let spec = chart::build_chart(&view, &inputs.variable)?;
    Ok(plot::render_svg(&spec)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::player;

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            player("us-30", "United States", 30, 100.0),
            player("fiji-40", "Fiji", 40, 50.0),
            player("us-20", "United States", 20, 10.0),
        ])
    }

    fn ids(outputs: &[(OutputId, String)]) -> Vec<OutputId> {
        outputs.iter().map(|(id, _)| *id).collect()
    }

    #[test]
    fn variable_change_only_redraws_chart() {
        let out = dispatch(&dataset(), &[InputId::VariableDropdown], &Inputs::default());
        assert_eq!(ids(&out), vec![OutputId::PgaPlot]);
    }

    #[test]
    fn filter_changes_redraw_both_regions() {
        for id in [
            InputId::CountryChecklist,
            InputId::MinAgeChecklist,
            InputId::MaxAgeChecklist,
        ] {
            let out = dispatch(&dataset(), &[id], &Inputs::default());
            assert_eq!(ids(&out), vec![OutputId::TableDiv, OutputId::PgaPlot]);
        }
    }

    #[test]
    fn initial_load_renders_everything() {
        let out = dispatch(&dataset(), &[], &Inputs::default());
        assert_eq!(ids(&out), vec![OutputId::TableDiv, OutputId::PgaPlot]);
    }

    #[test]
    fn regions_reflect_filter_values() {
        let inputs = Inputs {
            countries: ["United States".to_string()].into_iter().collect(),
            min_age: 25,
            max_age: 35,
            ..Inputs::default()
        };
        let table = render_table_region(&dataset(), &inputs);
        assert!(table.contains("<td>us-30</td>"));
        assert!(!table.contains("us-20"));
        assert!(!table.contains("fiji-40"));

        let chart = render_chart_region(&dataset(), &inputs);
        assert!(chart.contains(">1 Players in Selected Criteria"));
        assert_eq!(chart.matches("<circle").count(), 1);
    }

    #[test]
    fn table_region_caps_rows() {
        let many = Dataset::from_records(
            (0..95)
                .map(|i| player(&format!("p{i}"), "Spain", 30, i as f64))
                .collect(),
        );
        let html = render_table_region(&many, &Inputs::default());
        assert_eq!(html.matches("<tr>").count(), table::MAX_ROWS + 1);
        assert!(html.contains("<td>p94</td>"));
        assert!(!html.contains("<td>p14</td>"));
    }

    #[test]
    fn invalid_variable_shows_error_in_chart_region_only() {
        let inputs = Inputs {
            variable: "Age".to_string(),
            ..Inputs::default()
        };
        let out = dispatch(&dataset(), &[InputId::VariableDropdown, InputId::MinAgeChecklist], &inputs);
        let chart = &out.iter().find(|(id, _)| *id == OutputId::PgaPlot).unwrap().1;
        assert!(chart.contains("chart-error"));
        assert!(chart.contains("unknown statistic field &#39;Age&#39;"));
        let table = &out.iter().find(|(id, _)| *id == OutputId::TableDiv).unwrap().1;
        assert!(table.contains("<td>us-30</td>"));
    }

    #[test]
    fn inputs_deserialize_from_control_ids() {
        let inputs: Inputs = serde_json::from_str(
            r#"{"variable_dropdown": "Earnings",
                "country_checklist": ["Canada", "Fiji", "Canada"],
                "min_age_checklist": 20, "max_age_checklist": 50}"#,
        )
        .unwrap();
        assert_eq!(inputs.variable, "Earnings");
        assert_eq!(inputs.countries.len(), 2);
        assert_eq!((inputs.min_age, inputs.max_age), (20, 50));
    }
}
