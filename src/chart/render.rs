use super::{Bar, ChartSpec, Marks, Series};
use crate::error::{Result, VizError};
use crate::model::{ImageFormat, Interval};
use chrono::{DateTime, Utc};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontStyle;
use std::path::Path;
use tracing::info;

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

const FONT: &str = "sans-serif";
const BACKGROUND: RGBColor = RGBColor(0xdd, 0xdd, 0xef);
const BAR_COLOR: RGBColor = RGBColor(0x00, 0x00, 0x8b);
const HEADER_HEIGHT: u32 = 90;
const BAR_ROW_HEIGHT: u32 = 26;
const MAX_LABEL_AREA: u32 = 420;
/// Past this many bars, rows get thinner instead of the canvas taller.
const MAX_BAR_ROWS: usize = 300;
const SECONDS_PER_DAY: i64 = 86_400;

fn render_err<E: std::fmt::Display>(err: E) -> VizError {
    VizError::Render(err.to_string())
}

/// Rasterize `spec` and write it to `path` in the given image format.
pub fn render(spec: &ChartSpec, path: &Path, format: ImageFormat) -> Result<()> {
    let (width, height) = canvas_size(&spec.marks);
    info!(path = %path.display(), width, height, "rendering chart");

    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&BACKGROUND).map_err(render_err)?;

        let (header, body) = root.split_vertically(HEADER_HEIGHT);
        draw_header(&header, spec, width)?;

        match &spec.marks {
            Marks::RankedBar(bars) => {
                let mut ranked = bars.clone();
                ranked.sort_by(|a, b| b.value.cmp(&a.value));
                draw_bars(&body, spec, &ranked)?
            }
            Marks::LineOverTime { interval, series } => draw_lines(&body, spec, *interval, series)?,
        }

        root.present().map_err(render_err)?;
    }

    let image = image::RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| VizError::Render("bitmap buffer does not match canvas size".to_string()))?;
    image.save_with_format(path, format.into())?;
    Ok(())
}

fn canvas_size(marks: &Marks) -> (u32, u32) {
    match marks {
        Marks::RankedBar(bars) => {
            let rows = bars.len().clamp(1, MAX_BAR_ROWS) as u32;
            (1000, (HEADER_HEIGHT + 100 + rows * BAR_ROW_HEIGHT).max(480))
        }
        Marks::LineOverTime { .. } => (1200, 720),
    }
}

fn draw_header(area: &Area<'_>, spec: &ChartSpec, width: u32) -> Result<()> {
    let centre = (width / 2) as i32;

    let title = TextStyle::from((FONT, 28).into_font().style(FontStyle::Bold))
        .pos(Pos::new(HPos::Center, VPos::Top));
    area.draw(&Text::new(spec.title.clone(), (centre, 16), title))
        .map_err(render_err)?;

    let subtitle = TextStyle::from((FONT, 18).into_font()).pos(Pos::new(HPos::Center, VPos::Top));
    area.draw(&Text::new(spec.subtitle.clone(), (centre, 54), subtitle))
        .map_err(render_err)?;
    Ok(())
}

fn draw_empty(area: &Area<'_>) -> Result<()> {
    let (w, h) = area.dim_in_pixel();
    let style = TextStyle::from((FONT, 20).into_font()).pos(Pos::new(HPos::Center, VPos::Center));
    area.draw(&Text::new("No commits to display", (w as i32 / 2, h as i32 / 2), style))
        .map_err(render_err)?;
    Ok(())
}

fn draw_bars(area: &Area<'_>, spec: &ChartSpec, bars: &[Bar]) -> Result<()> {
    let n = bars.len();
    if n == 0 {
        return draw_empty(area);
    }

    let max_value = bars.iter().map(|b| b.value).max().unwrap_or(0) + 1;
    let longest = bars.iter().map(|b| b.label.chars().count()).max().unwrap_or(0) as u32;
    let label_area = (longest * 7 + 20).min(MAX_LABEL_AREA);

    let mut chart = ChartBuilder::on(area)
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(label_area)
        .build_cartesian_2d(0u64..max_value, (0usize..n).into_segmented())
        .map_err(render_err)?;

    // Segment 0 sits at the bottom of the axis; the first bar goes on top.
    let label_of = |v: &SegmentValue<usize>| match v {
        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) if *i < n => bars[n - 1 - *i].label.clone(),
        _ => String::new(),
    };

    let mut mesh = chart.configure_mesh();
    mesh.disable_y_mesh().y_labels(n).y_label_formatter(&label_of);
    if let Some(x) = &spec.x_label {
        mesh.x_desc(x.as_str());
    }
    if let Some(y) = &spec.y_label {
        mesh.y_desc(y.as_str());
    }
    mesh.draw().map_err(render_err)?;

    chart
        .draw_series(bars.iter().enumerate().map(|(i, bar)| {
            let slot = n - 1 - i;
            let mut rect = Rectangle::new(
                [(0, SegmentValue::Exact(slot)), (bar.value, SegmentValue::Exact(slot + 1))],
                BAR_COLOR.filled(),
            );
            rect.set_margin(3, 3, 0, 0);
            rect
        }))
        .map_err(render_err)?;
    Ok(())
}

fn draw_lines(area: &Area<'_>, spec: &ChartSpec, interval: Interval, series: &[Series]) -> Result<()> {
    let stamps: Vec<i64> = series
        .iter()
        .flat_map(|s| s.points.iter().map(|(t, _)| t.timestamp()))
        .collect();
    let (Some(&first), Some(&last)) = (stamps.iter().min(), stamps.iter().max()) else {
        return draw_empty(area);
    };
    let last = if last > first { last } else { first + SECONDS_PER_DAY };
    let y_max = series
        .iter()
        .flat_map(|s| s.points.iter().map(|(_, c)| *c))
        .max()
        .unwrap_or(0)
        + 1;

    let mut chart = ChartBuilder::on(area)
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(first..last, 0u64..y_max)
        .map_err(render_err)?;

    let pattern = interval.label_format();
    let x_label = |x: &i64| {
        DateTime::<Utc>::from_timestamp(*x, 0)
            .map(|d| d.format(pattern).to_string())
            .unwrap_or_default()
    };

    let mut mesh = chart.configure_mesh();
    mesh.x_labels(8).x_label_formatter(&x_label);
    if let Some(x) = &spec.x_label {
        mesh.x_desc(x.as_str());
    }
    if let Some(y) = &spec.y_label {
        mesh.y_desc(y.as_str());
    }
    mesh.draw().map_err(render_err)?;

    for (i, s) in series.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        chart
            .draw_series(
                LineSeries::new(
                    s.points.iter().map(|(t, c)| (t.timestamp(), *c)),
                    color.stroke_width(2),
                )
                .point_size(3),
            )
            .map_err(render_err)?
            .label(s.label.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(render_err)?;
    Ok(())
}
