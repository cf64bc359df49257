use crate::domain::model::{ComparisonSet, TimingSeries};
use crate::render::{padded_range, series_color, tick_decimals, Scale, FONT_FAMILY};
use crate::utils::error::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// 18.5 x 10.5 inches at 300 DPI.
pub const DEFAULT_SIZE: (u32, u32) = (5550, 3150);
pub const DEFAULT_ALL_PLOT_NAME: &str = "comparison_all.png";
pub const DEFAULT_FILTERED_PLOT_NAME: &str = "comparison_without_coarse.png";
const REFERENCE_HEIGHT: u32 = 1050;

/// One of the two stacked panels.
struct Panel {
    title: &'static str,
    y_desc: &'static str,
    values: fn(&TimingSeries) -> Vec<f64>,
}

const PANELS: [Panel; 2] = [
    Panel {
        title: "Clock Time Comparison",
        y_desc: "iteration time [s]",
        values: TimingSeries::iteration_times,
    },
    Panel {
        title: "Delay Error Comparison",
        y_desc: "delay error [s]",
        values: TimingSeries::delay_errors,
    },
];

fn draw_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    panel: &Panel,
    series: &[TimingSeries],
    scale: Scale,
) -> Result<()> {
    let data: Vec<Vec<(f64, f64)>> = series
        .iter()
        .map(|s| {
            (panel.values)(s)
                .into_iter()
                .enumerate()
                .map(|(i, v)| (i as f64, v))
                .collect()
        })
        .collect();

    let longest = series.iter().map(|s| s.samples.len()).max().unwrap_or(0);
    let x_range = 0.0..(longest.saturating_sub(1).max(1) as f64);
    let y_range = padded_range(data.iter().flatten().map(|(_, y)| *y));
    let decimals = tick_decimals(&y_range);
    let y_formatter = |v: &f64| format!("{:.*}", decimals, v);
    let x_formatter = |v: &f64| format!("{:.0}", v);

    let mut chart = ChartBuilder::on(area)
        .caption(panel.title, (FONT_FAMILY, scale.px(20.0)))
        .margin(scale.px_u32(14.0))
        .x_label_area_size(scale.px_u32(45.0))
        .y_label_area_size(scale.px_u32(95.0))
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("iterations")
        .y_desc(panel.y_desc)
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .label_style((FONT_FAMILY, scale.px(13.0)))
        .axis_desc_style((FONT_FAMILY, scale.px(15.0)))
        .draw()?;

    let stroke = scale.px_u32(1.5);
    let marker = scale.px_u32(2.5);

    for (index, (timing, points)) in series.iter().zip(data).enumerate() {
        let color = series_color(index);

        chart
            .draw_series(DashedLineSeries::new(
                points.clone(),
                scale.px_u32(6.0),
                scale.px_u32(4.0),
                color.stroke_width(stroke),
            ))?
            .label(timing.name.clone())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(stroke))
            });

        chart.draw_series(
            points
                .into_iter()
                .map(|(x, y)| Circle::new((x, y), marker, color.filled())),
        )?;
    }

    // 圖例放在左上角，加框線與陰影底色
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.9))
        .border_style(BLACK.stroke_width(scale.px_u32(1.0)))
        .label_font((FONT_FAMILY, scale.px(13.0)))
        .draw()?;

    Ok(())
}

/// Renders both comparison panels, stacked vertically, into one PNG.
pub fn render_comparison_chart(path: &Path, set: &ComparisonSet, size: (u32, u32)) -> Result<()> {
    let scale = Scale::new(size.1, REFERENCE_HEIGHT);

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let areas = root.split_evenly((PANELS.len(), 1));
    for (area, panel) in areas.iter().zip(PANELS.iter()) {
        draw_panel(area, panel, &set.series, scale)?;
    }

    root.present()?;
    Ok(())
}
