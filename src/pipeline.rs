//! The three charts: a lone series, a face-value breakdown of several series,
//! and their converted total.
//!
//! Each chart is built in two halves: [`fetch`] does the network part
//! (metadata, dataset resolution, observations) and the `*_chart` functions
//! turn a dataset into a [`ChartSpec`] without touching the network.

use crate::api::Client;
use crate::config::Config;
use crate::error::PipelineError;
use crate::labels::{ColumnLabels, LogicalDimension, resolve_labels};
use crate::models::{DatasetLocation, JsonStatDataset, SeriesMetadata};
use crate::resolver::resolve_dataset;
use crate::table::{Row, Table};
use crate::transform::{face_value, order_by_face_value, parse_date, sum_by_date, to_millions};
use crate::viz::{ChartSeries, ChartSpec};
use anyhow::Result;
use chrono::NaiveDate;
use log::info;

/// Portuguese GDP at market prices, in millions of euros.
pub const GDP_SERIES_ID: &str = "12518356";

/// Counterfeit euro banknotes withdrawn from circulation in Portugal, one
/// series per denomination.
pub const COUNTERFEIT_NOTES_SERIES_IDS: [&str; 7] = [
    "12468944", "12468945", "12468946", "12468947", "12468948", "12468949", "12468950",
];

/// Which chart to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// One series against time, x-axis running up to today.
    SingleSeries,
    /// One line per banknote face value, ordered by denomination.
    FaceValues,
    /// All face values converted to millions of euros and summed per date.
    FaceValueTotal,
}

impl ChartKind {
    pub fn default_series_ids(&self) -> Vec<String> {
        match self {
            ChartKind::SingleSeries => vec![GDP_SERIES_ID.to_string()],
            ChartKind::FaceValues | ChartKind::FaceValueTotal => COUNTERFEIT_NOTES_SERIES_IDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Everything the network half hands to the chart builders.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub series: Vec<SeriesMetadata>,
    pub location: DatasetLocation,
    pub dataset: JsonStatDataset,
}

/// Look up the series, check that they share a dataset and download it.
pub fn fetch(client: &Client, series_ids: &[String]) -> Result<Fetched> {
    info!("Fetching series metadata...");
    let series = client.fetch_series_metadata(series_ids)?;
    let location = resolve_dataset(&series)?;
    info!(
        "Fetching series observations (domain {}, dataset {})...",
        location.domain_id, location.dataset_id
    );
    let dataset = client.fetch_dataset(&location, series_ids)?;
    Ok(Fetched {
        series,
        location,
        dataset,
    })
}

/// Build the chart of `kind` from already fetched data.
///
/// Also returns the flattened table so callers can save it.
pub fn build(
    kind: ChartKind,
    fetched: &Fetched,
    config: &Config,
    today: NaiveDate,
) -> Result<(Table, ChartSpec)> {
    info!("Processing data...");
    let table = Table::from_dataset(&fetched.dataset)?;
    let labels = resolve_labels(&fetched.dataset, &config.dimensions)?;
    let chart = match kind {
        ChartKind::SingleSeries => {
            let series = fetched.series.first().ok_or(PipelineError::NoSeries)?;
            single_series_chart(&table, &labels, &series.label, today)?
        }
        ChartKind::FaceValues => face_value_chart(&table, &labels, config)?,
        ChartKind::FaceValueTotal => face_value_total_chart(&table, &labels, config)?,
    };
    Ok((table, chart))
}

/// Fetch and build in one go.
pub fn run(
    kind: ChartKind,
    client: &Client,
    config: &Config,
    series_ids: &[String],
    today: NaiveDate,
) -> Result<(Table, ChartSpec)> {
    let fetched = fetch(client, series_ids)?;
    build(kind, &fetched, config, today)
}

/// Category of `dim` in the first row; labels that are constant across a
/// series (unit, recurrence, territory) are read this way.
fn first_category<'t>(
    table: &'t Table,
    labels: &ColumnLabels,
    dim: LogicalDimension,
) -> Result<&'t str, PipelineError> {
    let col = table.column(labels.get(dim)?)?;
    table.first(col).ok_or(PipelineError::EmptyChart)
}

/// "Date (Monthly)": time label plus the recurrence category.
fn time_caption(table: &Table, labels: &ColumnLabels) -> Result<String, PipelineError> {
    let recurrence = first_category(table, labels, LogicalDimension::Recurrence)?;
    Ok(format!("{} ({})", labels.time(), recurrence))
}

/// Dated values of some rows, in date order. Missing observations stay in
/// as `None` so the line breaks there.
fn dated_points<'r, I>(
    rows: I,
    time_col: usize,
) -> Result<Vec<(NaiveDate, Option<f64>)>, PipelineError>
where
    I: IntoIterator<Item = &'r Row>,
{
    let mut points = Vec::new();
    for row in rows {
        points.push((parse_date(row.category(time_col))?, row.value));
    }
    points.sort_by_key(|(d, _)| *d);
    Ok(points)
}

/// A lone series, titled with the series label, legend showing the territory.
pub fn single_series_chart(
    table: &Table,
    labels: &ColumnLabels,
    series_label: &str,
    today: NaiveDate,
) -> Result<ChartSpec, PipelineError> {
    let time_col = table.column(labels.time())?;
    let unit = first_category(table, labels, LogicalDimension::Unit)?;
    let territory = first_category(table, labels, LogicalDimension::ReferenceTerritory)?;

    Ok(ChartSpec {
        title: series_label.to_string(),
        x_label: time_caption(table, labels)?,
        y_label: unit.to_string(),
        series: vec![ChartSeries {
            legend: Some(territory.to_string()),
            points: dated_points(&table.rows, time_col)?,
        }],
        y_from_zero: false,
        x_until: Some(today),
    })
}

/// One line per face value, smallest denomination first.
pub fn face_value_chart(
    table: &Table,
    labels: &ColumnLabels,
    config: &Config,
) -> Result<ChartSpec, PipelineError> {
    let time_col = table.column(labels.time())?;
    let face_col = table.column(labels.get(LogicalDimension::FaceValue)?)?;
    let unit = first_category(table, labels, LogicalDimension::Unit)?;

    let groups = table.group_by(face_col);
    let mut series = Vec::with_capacity(groups.len());
    for (face_label, _) in order_by_face_value(table.distinct(face_col))? {
        let rows = groups
            .iter()
            .find(|(label, _)| *label == face_label)
            .map(|(_, rows)| rows.iter().copied())
            .into_iter()
            .flatten();
        series.push(ChartSeries {
            legend: Some(face_label.to_string()),
            points: dated_points(rows, time_col)?,
        });
    }

    Ok(ChartSpec {
        title: config.language.notes_title().to_string(),
        x_label: time_caption(table, labels)?,
        y_label: unit.to_string(),
        series,
        y_from_zero: false,
        x_until: None,
    })
}

/// Banknote counts times face value, in millions of euros, summed per date.
pub fn face_value_total_chart(
    table: &Table,
    labels: &ColumnLabels,
    config: &Config,
) -> Result<ChartSpec, PipelineError> {
    let points = converted_total(table, labels)?;
    Ok(ChartSpec {
        title: config.language.notes_total_title().to_string(),
        x_label: time_caption(table, labels)?,
        y_label: config.language.millions_of_euros().to_string(),
        series: vec![ChartSeries {
            legend: None,
            points: points.into_iter().map(|(d, v)| (d, Some(v))).collect(),
        }],
        y_from_zero: true,
        x_until: None,
    })
}

/// Per-date sum of `count × face value / 1e6` over all rows.
///
/// Missing counts add nothing, but their date still appears in the output
/// (with `0.0` when every count of that date is missing).
pub fn converted_total(
    table: &Table,
    labels: &ColumnLabels,
) -> Result<Vec<(NaiveDate, f64)>, PipelineError> {
    let time_col = table.column(labels.time())?;
    let face_col = table.column(labels.get(LogicalDimension::FaceValue)?)?;

    let mut converted = Vec::with_capacity(table.len());
    for row in &table.rows {
        let date = parse_date(row.category(time_col))?;
        let face = face_value(row.category(face_col))?;
        converted.push((date, row.value.map_or(0.0, |count| to_millions(count, face))));
    }
    Ok(sum_by_date(converted))
}
