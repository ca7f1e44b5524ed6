//! Bar chart output via `plotters`' bitmap backend.

pub mod font;

use crate::table::CountedLabel;
use anyhow::{bail, Context, Result};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use serde::{Deserialize, Serialize};
use std::{fs, ops::Range, path::Path};
use tracing::info;

/// Size and colours of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    /// Bar fill as `#rrggbb`.
    pub fill: String,
    pub opacity: f64,
    /// Bar outline as `#rrggbb`; no outline when absent.
    pub edge: Option<String>,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 700,
            fill: "#4c72b0".to_string(),
            opacity: 0.9,
            edge: None,
        }
    }
}

/// Everything needed to draw one chart.
#[derive(Debug, Clone)]
pub struct BarChart<'a> {
    pub title: &'a str,
    pub subtitle: Option<&'a str>,
    pub x_label: &'a str,
    pub y_label: &'a str,
    /// One bar per entry, left to right. Missing counts leave a gap.
    pub bars: &'a [CountedLabel],
    pub style: &'a ChartStyle,
}

/// Draw `chart` and write it as an image to `output`, creating the parent
/// directory if needed. The format follows the file extension.
pub fn render_bar_chart(
    chart: &BarChart<'_>,
    output: &Path,
    font_path: Option<&Path>,
) -> Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }

    let fill = parse_hex_color(&chart.style.fill)?;
    let edge = chart.style.edge.as_deref().map(parse_hex_color).transpose()?;
    let with_text = font::ensure_registered(font_path);

    let root = BitMapBackend::new(output, (chart.style.width, chart.style.height))
        .into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    // ─── title band ─────────────────────────────────────────────────
    let title_px: i32 = match (with_text, chart.subtitle) {
        (false, _) => 0,
        (true, None) => 50,
        (true, Some(_)) => 80,
    };
    let (title_area, plot_area) = root.split_vertically(title_px);
    if with_text {
        let center = chart.style.width as i32 / 2;
        let anchor = Pos::new(HPos::Center, VPos::Top);
        let title_style = TextStyle::from(sans(26.0)).pos(anchor);
        title_area
            .draw_text(chart.title, &title_style, (center, 12))
            .map_err(draw_err)?;
        if let Some(subtitle) = chart.subtitle {
            let subtitle_style = TextStyle::from(sans(18.0)).pos(anchor);
            title_area
                .draw_text(subtitle, &subtitle_style, (center, 48))
                .map_err(draw_err)?;
        }
    }

    // ─── axes ───────────────────────────────────────────────────────
    let y_max = chart
        .bars
        .iter()
        .filter_map(|b| b.count)
        .fold(0.0_f64, f64::max);
    let y_top = if y_max > 0.0 { y_max * 1.12 } else { 1.0 };

    let mut builder = ChartBuilder::on(&plot_area);
    builder.margin(20);
    if with_text {
        builder
            .x_label_area_size(x_label_area(chart.bars, chart.style.height))
            .y_label_area_size(90);
    }
    let mut ctx = builder
        .build_cartesian_2d(x_axis(chart.bars.len()), 0f64..y_top)
        .map_err(draw_err)?;

    if with_text {
        // category names are drawn after the bars, below the axis
        ctx.configure_mesh()
            .disable_x_mesh()
            .x_labels(0)
            .y_labels(y_tick_count(y_top))
            .y_label_formatter(&y_tick_label)
            .y_label_style(sans(12.0))
            .x_desc(chart.x_label)
            .y_desc(chart.y_label)
            .axis_desc_style(sans(15.0))
            .draw()
            .map_err(draw_err)?;
    }

    // ─── bars ───────────────────────────────────────────────────────
    let present = || {
        chart
            .bars
            .iter()
            .enumerate()
            .filter_map(|(i, b)| b.count.map(|v| (i, v)))
    };
    let fill_style = fill.mix(chart.style.opacity).filled();
    ctx.draw_series(present().map(|(i, v)| bar(i, v, fill_style)))
        .map_err(draw_err)?;
    if let Some(edge) = edge {
        let edge_style = edge.stroke_width(1);
        ctx.draw_series(present().map(|(i, v)| bar(i, v, edge_style)))
            .map_err(draw_err)?;
    }

    if with_text {
        // ─── value annotations ──────────────────────────────────────
        let value_style = TextStyle::from(sans(13.0))
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        let lift = y_top * 0.005;
        ctx.draw_series(present().map(|(i, v)| {
            Text::new(
                format!("{}", v as i64),
                (slot_center(i), v + lift),
                value_style.clone(),
            )
        }))
        .map_err(draw_err)?;

        // ─── category labels ────────────────────────────────────────
        let label_style = category_label_style();
        for (i, b) in chart.bars.iter().enumerate() {
            let (x, y) = ctx.backend_coord(&(slot_center(i), 0.0));
            root.draw_text(&b.label, &label_style, (x, y + LABEL_GAP))
                .map_err(draw_err)?;
        }
    }

    root.present().map_err(draw_err)?;
    info!(path = %output.display(), bars = chart.bars.len(), "chart written");
    Ok(())
}

/// Parse `#rrggbb` (the leading `#` is optional).
pub fn parse_hex_color(s: &str) -> Result<RGBColor> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        bail!("invalid colour `{}`, expected #rrggbb", s);
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).with_context(|| format!("invalid colour `{}`", s))
    };
    Ok(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

/// Pixels between the x axis and the top of each category label.
const LABEL_GAP: i32 = 6;

/// One unit-wide slot per bar; bar `i` spans `i..i + 1`.
fn x_axis(bars: usize) -> Range<f64> {
    0.0..bars.max(1) as f64
}

fn slot_center(i: usize) -> f64 {
    i as f64 + 0.5
}

fn bar(i: usize, v: f64, style: ShapeStyle) -> Rectangle<(f64, f64)> {
    let left = i as f64;
    let mut r = Rectangle::new([(left, 0.0), (left + 1.0, v)], style);
    r.set_margin(0, 0, 8, 8);
    r
}

/// At most one y tick per whole unit, so integer labels never repeat.
fn y_tick_count(y_top: f64) -> usize {
    (y_top.floor() as usize + 1).clamp(2, 10)
}

fn y_tick_label(v: &f64) -> String {
    format!("{:.0}", v)
}

/// Vertical text whose first character sits at the anchor, so a label
/// anchored just under the axis reads downward from it.
fn category_label_style() -> TextStyle<'static> {
    TextStyle::from(sans(12.0).transform(FontTransform::Rotate90))
        .pos(Pos::new(HPos::Left, VPos::Center))
}

fn sans(size: f64) -> FontDesc<'static> {
    FontDesc::new(FontFamily::Name(font::FAMILY), size, FontStyle::Normal)
}

/// Room below the plot for category labels drawn vertically.
fn x_label_area(bars: &[CountedLabel], height: u32) -> i32 {
    let longest = bars
        .iter()
        .map(|b| b.label.chars().count())
        .max()
        .unwrap_or(0) as i32;
    (longest * 8 + 40).min(height as i32 / 3)
}

fn draw_err<E: std::fmt::Display>(e: E) -> anyhow::Error {
    anyhow::anyhow!("chart drawing failed: {}", e)
}
