//! Chart rendering with `plotters`.

use crate::response::ResponseCurve;
use anyhow::{Context, Result, bail};
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::path::Path;

// 6.4 x 4.8 in at 200 dpi.
const FIG_WIDTH: u32 = 1280;
const FIG_HEIGHT: u32 = 960;

/// Render a scenario chart: the best-response curve, the equal-split
/// reference line and the zero line.
///
/// The image format follows the file-name extension. Non-finite response
/// values are skipped when drawing.
pub fn render_response(path: &Path, curve: &ResponseCurve, n_firms: f64) -> Result<()> {
    let finite: Vec<(f64, f64)> = curve
        .points
        .iter()
        .copied()
        .filter(|&(_, response)| response.is_finite())
        .collect();
    if finite.is_empty() {
        bail!("response curve has no finite points");
    }

    let x_max = curve.points.last().map_or(0.0, |&(qty, _)| qty);
    let equal_split: Vec<(f64, f64)> = curve
        .points
        .iter()
        .map(|&(qty, _)| (qty, qty / n_firms))
        .collect();

    let (y_lo, y_hi) = padded_range(
        finite
            .iter()
            .map(|&(_, response)| response)
            .chain(equal_split.iter().map(|&(_, split)| split))
            .chain([0.0]),
    );

    let root = BitMapBackend::new(path, (FIG_WIDTH, FIG_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..x_max, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Total Quantity (MWh)")
        .y_desc("Quantity per Firm (MWh)")
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            finite.iter().copied(),
            BLACK.stroke_width(2),
        ))?
        .label("Inclusive Best Response Function")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.stroke_width(2)));

    chart
        .draw_series(DashedLineSeries::new(
            equal_split.iter().copied(),
            10,
            6,
            BLACK.stroke_width(1),
        ))?
        .label("Q/n")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLACK));

    // Zero reference line, dotted.
    chart.draw_series(DashedLineSeries::new(
        [(0.0, 0.0), (x_max, 0.0)],
        2,
        6,
        BLACK.stroke_width(1),
    ))?;

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()?;

    root.present()
        .with_context(|| format!("failed to write {path:?}"))?;

    Ok(())
}

/// Render the standalone equal-split reference chart.
pub fn render_equal_split(path: &Path, x_max: f64, n_firms: f64) -> Result<()> {
    if !(x_max > 0.0) {
        bail!("equal-split chart needs a positive quantity range, but x_max is {x_max}");
    }

    let root = BitMapBackend::new(path, (FIG_WIDTH, FIG_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..x_max, 0.0..x_max / n_firms)?;

    chart
        .configure_mesh()
        .x_desc("Total Quantity (MWh)")
        .y_desc("Firm i Production (MWh)")
        .draw()?;

    chart
        .draw_series(DashedLineSeries::new(
            [(0.0, 0.0), (x_max, x_max / n_firms)],
            10,
            6,
            BLACK.stroke_width(1),
        ))?
        .label("Q/n")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLACK));

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()?;

    root.present()
        .with_context(|| format!("failed to write {path:?}"))?;

    Ok(())
}

fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for val in values {
        if val.is_finite() {
            lo = lo.min(val);
            hi = hi.max(val);
        }
    }
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }

    let span = hi - lo;
    let pad = if span > 1e-9 {
        0.05 * span
    } else {
        0.5 * hi.abs().max(1.0)
    };
    (lo - pad, hi + pad)
}
