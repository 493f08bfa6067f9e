use serde::Serialize;

use crate::color;
use crate::data::filter::FilteredView;
use crate::data::model::StatField;
use crate::error::InvalidFieldError;

/// Marker translucency.
pub const MARKER_OPACITY: f64 = 0.65;

// ---------------------------------------------------------------------------
// Chart specification
// ---------------------------------------------------------------------------

/// Everything needed to draw the scatter plot, independent of the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    /// Horizontal title anchor, 0 = left edge, 1 = right edge.
    pub title_x: f64,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<ScatterPoint>,
    pub opacity: f64,
    pub marker_color: String,
    pub trendline: Option<Trendline>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub player: String,
    pub country: String,
}

/// Least-squares line `y = slope * x + intercept`, drawn across `x_min..=x_max`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trendline {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub x_min: f64,
    pub x_max: f64,
    pub color: String,
}

impl Trendline {
    pub fn y_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

pub fn chart_title(count: usize) -> String {
    format!("{count} Players in Selected Criteria")
}

/// Scatter `field` against FedExCup points for every row of `view`.
///
/// `field` is the selector value (a data column name); anything other than
/// the six statistics is rejected.
pub fn build_chart(view: &FilteredView<'_>, field: &str) -> Result<ChartSpec, InvalidFieldError> {
    let field: StatField = field.parse()?;

    let points: Vec<ScatterPoint> = view
        .records()
        .map(|r| ScatterPoint {
            x: field.value_of(r),
            y: r.points,
            player: r.name.clone(),
            country: r.country.clone(),
        })
        .collect();

    let xy: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
    let trendline = ols(&xy).map(|fit| {
        let (x_min, x_max) = xy
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(x, _)| {
                (lo.min(x), hi.max(x))
            });
        Trendline {
            slope: fit.slope,
            intercept: fit.intercept,
            r_squared: fit.r_squared,
            x_min,
            x_max,
            color: color::hex(color::TRENDLINE),
        }
    });

    Ok(ChartSpec {
        title: chart_title(view.len()),
        title_x: 0.5,
        x_label: field.column(),
        y_label: "Points",
        points,
        opacity: MARKER_OPACITY,
        marker_color: color::hex(color::MARKER),
        trendline,
    })
}

// ---------------------------------------------------------------------------
// Ordinary least squares
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OlsFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

/// Fit `y = slope * x + intercept` minimising squared vertical residuals.
///
/// `None` with fewer than two points or when every x is the same.
pub fn ols(points: &[(f64, f64)]) -> Option<OlsFit> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut sxx, mut sxy, mut syy) = (0.0, 0.0, 0.0);
    for &(x, y) in points {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }
    let sum_x2: f64 = points.iter().map(|p| p.0 * p.0).sum();
    if sxx <= f64::EPSILON * sum_x2 {
        return None;
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    // All y equal: the horizontal line explains everything there is.
    let r_squared = if syy == 0.0 { 1.0 } else { (sxy * sxy) / (sxx * syy) };

    Some(OlsFit {
        slope,
        intercept,
        r_squared,
    })
}
