//! Utility functions for visualization: colors, locale-aware ticks, axis bounds, dotted paths.

use super::text::estimate_text_width_px;
use super::types::ChartSpec;
use crate::error::PipelineError;
use chrono::{Datelike, NaiveDate};
use num_format::{Locale, ToFormattedString};
use plotters::prelude::*;

/// Microsoft Office (2013+) chart series palette.
/// Order: Blue, Orange, Gray, Gold, Light Blue, Green, Dark Blue, Dark Orange, Dark Gray, Brownish Gold.
const OFFICE10: [RGBColor; 10] = [
    RGBColor(68, 114, 196),  // blue      (#4472C4)
    RGBColor(237, 125, 49),  // orange    (#ED7D31)
    RGBColor(165, 165, 165), // gray      (#A5A5A5)
    RGBColor(255, 192, 0),   // gold      (#FFC000)
    RGBColor(91, 155, 213),  // light blue(#5B9BD5)
    RGBColor(112, 173, 71),  // green     (#70AD47)
    RGBColor(38, 68, 120),   // dark blue (#264478)
    RGBColor(158, 72, 14),   // dark org. (#9E480E)
    RGBColor(99, 99, 99),    // dark gray (#636363)
    RGBColor(153, 115, 0),   // brownish  (#997300)
];

/// Get a color from the Office palette.
#[inline]
pub fn office_color(idx: usize) -> RGBAColor {
    OFFICE10[idx % OFFICE10.len()].to_rgba()
}

/// Map a locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Only the two API languages are distinguished; anything else is English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        _ => (&Locale::en, '.'),
    }
}

/// Decimals needed to tell neighbouring ticks apart.
pub fn tick_precision(ticks: &[f64]) -> usize {
    let step = ticks
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .filter(|d| *d > 0.0)
        .fold(f64::INFINITY, f64::min);
    if !step.is_finite() || step >= 1.0 {
        0
    } else {
        (-step.log10().floor()) as usize
    }
}

/// Format a tick value with locale thousands and decimal separators.
pub fn format_tick(v: f64, precision: usize, locale: &Locale, dec_sep: char) -> String {
    let fixed = format!("{:.*}", precision, v.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let int_fmt = int_part
        .parse::<u64>()
        .map(|n| n.to_formatted_string(locale))
        .unwrap_or_else(|_| int_part.to_string());
    // "-0.00" is just zero
    let negative = v < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{sign}{int_fmt}")
    } else {
        format!("{sign}{int_fmt}{dec_sep}{frac_part}")
    }
}

/// Width of the left label area for the given (already formatted) tick labels.
///
/// Returns a width clamped to a sensible range to avoid extremes.
pub fn left_label_area_px(labels: &[String], font_px: u32) -> u32 {
    let max_px = labels
        .iter()
        .map(|s| estimate_text_width_px(s, font_px))
        .max()
        .unwrap_or(0);
    // Tick marks, plus room for the rotated axis caption.
    max_px.saturating_add(34).clamp(56, 160)
}

/// X positions are days since the common era so the plotting range stays `f64`.
pub fn date_to_x(d: NaiveDate) -> f64 {
    d.num_days_from_ce() as f64
}

pub fn x_to_date(x: f64) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

/// Data ranges of a chart, after the y-from-zero and x-until clamps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl AxisBounds {
    pub fn of(chart: &ChartSpec) -> Result<Self, PipelineError> {
        let points = || chart.series.iter().flat_map(|s| s.points.iter());
        let xs = points().map(|(d, _)| date_to_x(*d));
        let (mut x_min, mut x_max) = xs.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
            (lo.min(x), hi.max(x))
        });
        let (mut y_min, mut y_max) = points()
            .filter_map(|(_, v)| *v)
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
                (lo.min(y), hi.max(y))
            });
        if !x_min.is_finite() || !y_min.is_finite() {
            return Err(PipelineError::EmptyChart);
        }

        if let Some(until) = chart.x_until {
            let until = date_to_x(until);
            if until > x_min {
                x_max = until;
            }
        }
        if x_max - x_min < 1.0 {
            x_min -= 1.0;
            x_max += 1.0;
        }

        if (y_max - y_min).abs() < f64::EPSILON {
            y_min -= 1.0;
            y_max += 1.0;
        }
        // 5% headroom so markers don't sit on the frame
        let pad = (y_max - y_min) * 0.05;
        y_max += pad;
        if chart.y_from_zero {
            y_min = 0.0;
        } else {
            y_min -= pad;
        }
        if y_max <= y_min {
            y_max = y_min + 1.0;
        }

        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }
}

/// Split a series into runs of consecutive present values, in x coordinates.
/// A missing or non-finite value ends the current run.
pub fn segments(points: &[(NaiveDate, Option<f64>)]) -> Vec<Vec<(f64, f64)>> {
    let mut out = Vec::new();
    let mut run = Vec::new();
    for (d, v) in points {
        match v {
            Some(v) if v.is_finite() => run.push((date_to_x(*d), *v)),
            _ => {
                if !run.is_empty() {
                    out.push(std::mem::take(&mut run));
                }
            }
        }
    }
    if !run.is_empty() {
        out.push(run);
    }
    out
}

/// Points along `path` spaced roughly `spacing_px` apart on screen, in data
/// coordinates. `to_px` maps a data point to backend pixels.
///
/// Both ends of every segment are included, so a dotted line still shows
/// where it starts and stops.
pub fn dotted_points<F>(path: &[(f64, f64)], to_px: F, spacing_px: f64) -> Vec<(f64, f64)>
where
    F: Fn(&(f64, f64)) -> (i32, i32),
{
    let mut out = Vec::new();
    for w in path.windows(2) {
        let (a, b) = (w[0], w[1]);
        let (pa, pb) = (to_px(&a), to_px(&b));
        let len = ((pb.0 - pa.0) as f64).hypot((pb.1 - pa.1) as f64);
        let steps = ((len / spacing_px).floor() as usize).max(1);
        for k in 0..steps {
            let t = k as f64 / steps as f64;
            out.push((a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t));
        }
    }
    if let Some(last) = path.last() {
        out.push(*last);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viz::types::ChartSeries;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn ticks_use_locale_separators() {
        let (en_locale, en_sep) = map_locale("en");
        let (pt_locale, pt_sep) = map_locale("PT");
        assert_eq!(format_tick(1234567.0, 0, en_locale, en_sep), "1,234,567");
        assert_eq!(format_tick(0.25, 2, pt_locale, pt_sep), "0,25");
        assert_eq!(format_tick(-1500.5, 1, en_locale, en_sep), "-1,500.5");
        assert_eq!(format_tick(-0.0001, 2, en_locale, en_sep), "0.00");
    }

    #[test]
    fn precision_follows_tick_step() {
        assert_eq!(tick_precision(&[0.0, 100.0, 200.0]), 0);
        assert_eq!(tick_precision(&[0.0, 0.5, 1.0]), 1);
        assert_eq!(tick_precision(&[0.0, 0.002, 0.004]), 3);
        assert_eq!(tick_precision(&[5.0]), 0);
    }

    #[test]
    fn bounds_clamp_to_zero_and_today() {
        let chart = ChartSpec {
            title: "t".into(),
            x_label: "x".into(),
            y_label: "y".into(),
            series: vec![ChartSeries {
                legend: None,
                points: vec![(d(2020, 1, 1), Some(10.0)), (d(2021, 1, 1), Some(20.0))],
            }],
            y_from_zero: true,
            x_until: Some(d(2024, 6, 30)),
        };
        let b = AxisBounds::of(&chart).unwrap();
        assert_eq!(b.y_min, 0.0);
        assert!(b.y_max > 20.0);
        assert_eq!(b.x_min, date_to_x(d(2020, 1, 1)));
        assert_eq!(b.x_max, date_to_x(d(2024, 6, 30)));
    }

    #[test]
    fn bounds_of_empty_chart_fail() {
        let chart = ChartSpec {
            title: "t".into(),
            x_label: "x".into(),
            y_label: "y".into(),
            series: vec![],
            y_from_zero: false,
            x_until: None,
        };
        assert_eq!(AxisBounds::of(&chart), Err(PipelineError::EmptyChart));
    }

    #[test]
    fn missing_values_split_the_line() {
        let points = vec![
            (d(2020, 1, 1), Some(1.0)),
            (d(2021, 1, 1), Some(2.0)),
            (d(2022, 1, 1), None),
            (d(2023, 1, 1), Some(3.0)),
            (d(2024, 1, 1), Some(f64::NAN)),
        ];
        let runs = segments(&points);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0], vec![(date_to_x(d(2020, 1, 1)), 1.0), (date_to_x(d(2021, 1, 1)), 2.0)]);
        assert_eq!(runs[1], vec![(date_to_x(d(2023, 1, 1)), 3.0)]);
        assert!(segments(&[(d(2020, 1, 1), None)]).is_empty());
    }

    #[test]
    fn bounds_ignore_missing_values() {
        let chart = ChartSpec {
            title: "t".into(),
            x_label: "x".into(),
            y_label: "y".into(),
            series: vec![ChartSeries {
                legend: None,
                points: vec![(d(2020, 1, 1), None)],
            }],
            y_from_zero: false,
            x_until: None,
        };
        assert!(chart.is_empty());
        assert_eq!(AxisBounds::of(&chart), Err(PipelineError::EmptyChart));
    }

    #[test]
    fn dotted_points_cover_the_segment() {
        // identity mapping: 10 data units == 10 pixels
        let to_px = |p: &(f64, f64)| (p.0 as i32, p.1 as i32);
        let dots = dotted_points(&[(0.0, 0.0), (10.0, 0.0)], to_px, 2.0);
        assert_eq!(dots.len(), 6);
        assert_eq!(dots.first(), Some(&(0.0, 0.0)));
        assert_eq!(dots.last(), Some(&(10.0, 0.0)));
        assert!(dots.windows(2).all(|w| w[1].0 > w[0].0));
    }

    #[test]
    fn dates_round_trip_through_x() {
        let day = d(2023, 12, 31);
        assert_eq!(x_to_date(date_to_x(day)), Some(day));
    }
}
