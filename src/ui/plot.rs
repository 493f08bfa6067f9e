use std::ops::Range;

use plotters::prelude::*;

use crate::color;
use crate::error::PlotError;
use crate::ui::chart::ChartSpec;

// ---------------------------------------------------------------------------
// Scatter plot (chart region)
// ---------------------------------------------------------------------------

const SIZE: (u32, u32) = (700, 550);
const MARKER_RADIUS: u32 = 5;

/// Draw `chart` as a self-contained inline `<svg>` element.
pub fn render_svg(chart: &ChartSpec) -> Result<String, PlotError> {
    let mut svg = String::new();
    draw(chart, &mut svg).map_err(|e| PlotError(e.to_string()))?;
    Ok(svg)
}

fn draw<'a>(spec: &ChartSpec, svg: &'a mut String) -> DrawResult<(), SVGBackend<'a>> {
    let x_range = span(spec.points.iter().map(|p| p.x));
    let mut ys: Vec<f64> = spec.points.iter().map(|p| p.y).collect();
    if let Some(line) = &spec.trendline {
        ys.push(line.y_at(line.x_min));
        ys.push(line.y_at(line.x_max));
    }
    let y_range = span(ys.into_iter());

    let root = SVGBackend::with_string(svg, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, ("sans-serif", 17))
        .margin(15i32)
        .x_label_area_size(50u32)
        .y_label_area_size(80u32)
        .build_cartesian_2d(x_range, y_range)?;

    let axis = color::rgb(color::AXIS);
    chart
        .configure_mesh()
        .x_desc(spec.x_label)
        .y_desc(spec.y_label)
        .axis_style(axis.stroke_width(1))
        .light_line_style(color::rgb(color::GRID).stroke_width(1))
        .label_style(("sans-serif", 12).into_font().color(&axis))
        .draw()?;

    let marker = color::rgb(color::MARKER).mix(spec.opacity).filled();
    chart.draw_series(
        spec.points
            .iter()
            .map(|p| Circle::new((p.x, p.y), MARKER_RADIUS, marker)),
    )?;

    if let Some(line) = &spec.trendline {
        chart.draw_series(LineSeries::new(
            [
                (line.x_min, line.y_at(line.x_min)),
                (line.x_max, line.y_at(line.x_max)),
            ],
            color::rgb(color::TRENDLINE).stroke_width(2),
        ))?;
    }

    root.present()?;
    Ok(())
}

/// Data bounds padded by 5%, widened around a single value, `0..1` when empty.
fn span(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return 0.0..1.0;
    }
    let pad = if hi > lo {
        (hi - lo) * 0.05
    } else if lo == 0.0 {
        1.0
    } else {
        lo.abs() * 0.1
    };
    (lo - pad)..(hi + pad)
}
