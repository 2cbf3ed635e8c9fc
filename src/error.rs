//! Typed failures of the series pipeline.
//!
//! Library entry points return `anyhow::Result`; these variants are what ends up
//! inside the `anyhow::Error` when the data itself (rather than the network) is at
//! fault, so callers can `downcast_ref::<PipelineError>()` to tell them apart.

use thiserror::Error;

use crate::labels::LogicalDimension;

#[derive(Debug, Error, PartialEq)]
pub enum PipelineError {
    #[error("no series metadata returned")]
    NoSeries,

    #[error(
        "series '{series_id}' is not in domain '{domain_id}' / dataset '{dataset_id}' shared by the first series"
    )]
    MixedDatasets {
        series_id: String,
        domain_id: String,
        dataset_id: String,
    },

    #[error("series '{0}' lists no statistics domain")]
    NoDomain(String),

    #[error("dataset declares no time dimension (role.time is empty)")]
    MissingTimeRole,

    #[error("dimension for {0} is not present in the dataset")]
    UnresolvedDimension(LogicalDimension),

    #[error("no column labelled '{0}'")]
    UnknownColumn(String),

    #[error("not a face value: '{0}'")]
    FaceValue(String),

    #[error("not a date: '{0}'")]
    Date(String),

    #[error("malformed JSON-stat dataset: {0}")]
    MalformedDataset(String),

    #[error("no data to plot")]
    EmptyChart,
}
