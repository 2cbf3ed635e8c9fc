//! Visualization: render a [`ChartSpec`] to **SVG** or **PNG**.
//!
//! - Distinct series colors (Microsoft Office palette)
//! - Marker dots joined by a dotted line
//! - Dotted horizontal gridlines drawn behind the data
//! - Locale-aware tick labels (`1,500.5` vs `1.500,5`)
//! - Optional y-axis starting at zero and x-axis running up to a fixed date

pub mod text;
pub mod types;
pub mod util;

pub use types::{ChartSeries, ChartSpec, DEFAULT_HEIGHT, DEFAULT_WIDTH};

use anyhow::{Result, anyhow};
use num_format::Locale;

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::coord::ranged1d::Ranged;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::FontFamily;

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::Path;
use std::sync::Once;

use text::truncate_to_width;
use util::{
    AxisBounds, dotted_points, format_tick, left_label_area_px, map_locale, office_color,
    segments, tick_precision, x_to_date,
};

const MARGIN: u32 = 16;
const Y_LABELS: usize = 10;
const X_LABELS: usize = 10;
const MARKER_PX: i32 = 3;
const LINE_DOT_SPACING_PX: f64 = 4.0;
const GRID_DOT_SPACING_PX: f64 = 3.0;
const GRID_COLOR: RGBColor = RGBColor(176, 176, 176);

/// One-time registration for a fallback "sans-serif" font when using the `ab_glyph` text path.
/// Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        );
    });
}

/// Render `chart` to `out_path`; the backend is picked from the extension
/// (`.svg`, anything else is a bitmap).
pub fn render_chart<P: AsRef<Path>>(
    chart: &ChartSpec,
    out_path: P,
    width: u32,
    height: u32,
    locale_tag: &str,
) -> Result<()> {
    let bounds = AxisBounds::of(chart)?;
    ensure_fonts_registered();
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    let (num_locale, dec_sep) = map_locale(locale_tag);

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_chart(root, chart, bounds, num_locale, dec_sep)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_chart(root, chart, bounds, num_locale, dec_sep)?;
    }
    Ok(())
}

fn draw_chart<DB>(
    root: DrawingArea<DB, Shift>,
    chart: &ChartSpec,
    bounds: AxisBounds,
    num_locale: &Locale,
    dec_sep: char,
) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    let (root_w, _) = root.dim_in_pixel();

    // The mesh puts its bold lines (and labels) on these same key points, so the
    // dotted gridlines line up with the tick labels.
    let y_ticks = RangedCoordf64::from(bounds.y_min..bounds.y_max).key_points(Y_LABELS);
    let precision = tick_precision(&y_ticks);
    let tick_labels: Vec<String> = y_ticks
        .iter()
        .map(|v| format_tick(*v, precision, num_locale, dec_sep))
        .collect();
    let left_label_width_px = left_label_area_px(&tick_labels, 12);

    let title = truncate_to_width(
        chart.title.trim(),
        20,
        root_w.saturating_sub(2 * MARGIN),
    );

    let mut cc = ChartBuilder::on(&root)
        .margin(MARGIN)
        .caption(title, (FontFamily::SansSerif, 20))
        .set_label_area_size(LabelAreaPosition::Left, left_label_width_px)
        .set_label_area_size(LabelAreaPosition::Bottom, 56)
        .build_cartesian_2d(bounds.x_min..bounds.x_max, bounds.y_min..bounds.y_max)
        .map_err(|e| anyhow!("{:?}", e))?;

    // Years only once the span gets long enough for month labels to crowd.
    let date_fmt = if bounds.x_max - bounds.x_min > 3.0 * 365.0 {
        "%Y"
    } else {
        "%Y-%m"
    };
    let x_label_fmt = |x: &f64| {
        x_to_date(*x)
            .map(|d| d.format(date_fmt).to_string())
            .unwrap_or_default()
    };
    let y_label_fmt = |v: &f64| format_tick(*v, precision, num_locale, dec_sep);

    cc.configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .x_labels(X_LABELS)
        .y_labels(Y_LABELS)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .label_style((FontFamily::SansSerif, 12))
        .axis_desc_style((FontFamily::SansSerif, 14))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    // Gridlines first so the data sits on top of them.
    for y in &y_ticks {
        let dots = dotted_points(
            &[(bounds.x_min, *y), (bounds.x_max, *y)],
            |p| cc.backend_coord(p),
            GRID_DOT_SPACING_PX,
        );
        cc.draw_series(dots.into_iter().map(|p| Circle::new(p, 1, GRID_COLOR.filled())))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    let mut has_legend = false;
    for (idx, series) in chart.series.iter().enumerate() {
        let color = office_color(idx);
        // Missing observations leave a gap instead of bridging their neighbours.
        let runs = segments(&series.points);
        for run in &runs {
            let dots = dotted_points(run, |p| cc.backend_coord(p), LINE_DOT_SPACING_PX);
            cc.draw_series(dots.into_iter().map(|p| Circle::new(p, 1, color.filled())))
                .map_err(|e| anyhow!("{:?}", e))?;
        }

        let markers = cc
            .draw_series(
                runs.iter()
                    .flatten()
                    .map(|p| Circle::new(*p, MARKER_PX, color.filled())),
            )
            .map_err(|e| anyhow!("{:?}", e))?;

        if let Some(legend) = &series.legend {
            has_legend = true;
            markers.label(legend.as_str()).legend(move |(x, y)| {
                EmptyElement::at((x, y))
                    + PathElement::new(vec![(0, 0), (20, 0)], color.stroke_width(1))
                    + Circle::new((10, 0), MARKER_PX, color.filled())
            });
        }
    }

    if has_legend {
        cc.configure_series_labels()
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.85))
            .label_font((FontFamily::SansSerif, 13))
            .draw()
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}
