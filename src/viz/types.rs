//! Public chart description consumed by the renderer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One line of the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Legend entry; series without one are left out of the legend.
    pub legend: Option<String>,
    /// Points in ascending date order; `None` is a missing observation and
    /// breaks the line.
    pub points: Vec<(NaiveDate, Option<f64>)>,
}

/// Everything needed to draw a chart: titles, axis captions, series and axis clamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<ChartSeries>,
    /// Start the y-axis at zero instead of at the smallest value.
    pub y_from_zero: bool,
    /// Upper bound of the x-axis (usually today), regardless of the data.
    pub x_until: Option<NaiveDate>,
}

impl ChartSpec {
    pub fn is_empty(&self) -> bool {
        self.series
            .iter()
            .all(|s| s.points.iter().all(|(_, v)| v.is_none()))
    }
}

/// Default canvas size, roughly a 10x5 inch figure.
pub const DEFAULT_WIDTH: u32 = 1000;
pub const DEFAULT_HEIGHT: u32 = 500;
