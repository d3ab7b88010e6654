use std::path::Path;
use plotters::prelude::*;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Not enough data to display chart")]
    NotEnoughData,
    #[error("Failed to render chart: {0}")]
    Render(String),
}

fn render_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

/// X-axis labels for a series of `len` points: T1..Tn
pub fn trend_labels(len: usize) -> Vec<String> {
    (1..=len).map(|i| format!("T{}", i)).collect()
}

/// Y-axis range covering the series with 10% padding on each side
pub fn trend_bounds(trend: &[f64]) -> (f64, f64) {
    let min_value = trend.iter().copied().fold(f64::INFINITY, f64::min);
    let max_value = trend.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if !min_value.is_finite() || !max_value.is_finite() {
        return (0.0, 1.0);
    }

    let range = max_value - min_value;
    let padding = if range > 0.0 {
        range * 0.1
    } else {
        (max_value.abs() * 0.1).max(1.0)
    };

    // Amounts are never negative, so don't pad below zero unless the data does
    let y_min = if min_value >= 0.0 {
        (min_value - padding).max(0.0)
    } else {
        min_value - padding
    };
    (y_min, max_value + padding)
}

/// Draw the trend series as a PNG line chart at `path`
pub fn render_trend_chart(trend: &[f64], path: &Path, width: u32, height: u32) -> Result<(), ChartError> {
    if trend.len() < 2 {
        return Err(ChartError::NotEnoughData);
    }

    let (y_min, y_max) = trend_bounds(trend);
    let labels = trend_labels(trend.len());
    let last = trend.len() as i32;
    let points: Vec<(i32, f64)> = trend.iter().enumerate().map(|(i, &v)| (i as i32 + 1, v)).collect();

    {
        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Spending Trend", ("sans-serif", 32.0).into_font())
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(1..last, y_min..y_max)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .x_labels(trend.len())
            .x_label_formatter(&|x| {
                usize::try_from(*x - 1)
                    .ok()
                    .and_then(|i| labels.get(i).cloned())
                    .unwrap_or_default()
            })
            .y_desc("Amount")
            .x_desc("Transaction")
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(LineSeries::new(points.iter().copied(), &BLUE))
            .map_err(render_err)?;

        chart
            .draw_series(points.iter().map(|&(x, y)| Circle::new((x, y), 3, BLUE.filled())))
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
    }

    debug!("Rendered {}-point trend chart to {}", trend.len(), path.display());
    Ok(())
}
