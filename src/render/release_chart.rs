use crate::core::deviation::{format_decimal, format_frequency, SECONDS_TO_MILLISECONDS};
use crate::domain::model::ReleaseAnalysis;
use crate::render::{padded_range, tick_decimals, Scale, FONT_FAMILY};
use crate::utils::error::Result;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

pub const DEFAULT_SIZE: (u32, u32) = (800, 600);
const REFERENCE_HEIGHT: u32 = 600;

pub fn file_name(analysis: &ReleaseAnalysis) -> String {
    format!("seqgen_{}hz.png", format_frequency(analysis.frequency_hz))
}

pub fn title(analysis: &ReleaseAnalysis) -> String {
    format!(
        "Difference between thread release time at {}Hz",
        format_frequency(analysis.frequency_hz)
    )
}

pub fn deviation_note(analysis: &ReleaseAnalysis) -> String {
    format!(
        "Max deviation from collection time = {}ms",
        format_decimal(analysis.max_deviation_s * SECONDS_TO_MILLISECONDS)
    )
}

pub fn reference_label(analysis: &ReleaseAnalysis) -> String {
    format!(
        "Reference T={}ms",
        format_decimal(analysis.period_s * SECONDS_TO_MILLISECONDS)
    )
}

/// Draws the inter-release deltas of one frequency against its period.
pub fn render_release_chart(
    path: &Path,
    analysis: &ReleaseAnalysis,
    (width, height): (u32, u32),
) -> Result<()> {
    let scale = Scale::new(height, REFERENCE_HEIGHT);

    let deltas_ms: Vec<(f64, f64)> = analysis
        .deltas_s
        .iter()
        .enumerate()
        .map(|(i, d)| (i as f64, d * SECONDS_TO_MILLISECONDS))
        .collect();
    let period_ms = analysis.period_s * SECONDS_TO_MILLISECONDS;
    // 參考線點數與 release 數相同
    let reference: Vec<(f64, f64)> = (0..analysis.release_count)
        .map(|i| (i as f64, period_ms))
        .collect();

    let last_index = analysis.release_count.saturating_sub(1).max(1) as f64;
    let x_range = -0.5..(last_index + 0.5);
    let y_range = padded_range(
        deltas_ms
            .iter()
            .map(|(_, y)| *y)
            .chain(std::iter::once(period_ms)),
    );
    let decimals = tick_decimals(&y_range);
    let y_formatter = |v: &f64| format!("{:.*}", decimals, v);
    let x_formatter = |v: &f64| format!("{:.0}", v);

    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE)?;

    let footer_height = scale.px_u32(36.0).min(height / 4);
    let (plot_area, footer) = root.split_vertically(height - footer_height);

    let mut chart = ChartBuilder::on(&plot_area)
        .caption(title(analysis), (FONT_FAMILY, scale.px(22.0)))
        .margin(scale.px_u32(12.0))
        .x_label_area_size(scale.px_u32(36.0))
        .y_label_area_size(scale.px_u32(70.0))
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .y_desc("Time [ms]")
        .y_label_formatter(&y_formatter)
        .x_label_formatter(&x_formatter)
        .label_style((FONT_FAMILY, scale.px(13.0)))
        .axis_desc_style((FONT_FAMILY, scale.px(15.0)))
        .draw()?;

    let stroke = scale.px_u32(2.0);
    let marker = scale.px_u32(4.0);

    chart
        .draw_series(DashedLineSeries::new(
            deltas_ms.clone(),
            scale.px_u32(8.0),
            scale.px_u32(5.0),
            BLUE.stroke_width(stroke),
        ))?
        .label("Release Time (ms)")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(stroke)));

    chart.draw_series(
        deltas_ms
            .iter()
            .map(|&(x, y)| Circle::new((x, y), marker, BLUE.filled())),
    )?;

    chart
        .draw_series(LineSeries::new(reference, RED.stroke_width(stroke)))?
        .label(reference_label(analysis))
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(stroke)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .label_font((FONT_FAMILY, scale.px(13.0)))
        .draw()?;

    let note_style = (FONT_FAMILY, scale.px(14.0))
        .into_text_style(&footer)
        .pos(Pos::new(HPos::Center, VPos::Center));
    footer.draw_text(
        &deviation_note(analysis),
        &note_style,
        ((width / 2) as i32, (footer_height / 2) as i32),
    )?;

    root.present()?;
    Ok(())
}
