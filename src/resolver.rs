//! Pick the domain/dataset holding a set of series.

use crate::error::PipelineError;
use crate::models::{DatasetLocation, SeriesMetadata};

/// Take the first series' first domain and its dataset, then require every
/// other series to list that same domain and to live in that same dataset.
///
/// Any domain would do as long as all series are present in it, but only the
/// first series' first domain is tried: a common domain elsewhere in the lists
/// is not searched for.
pub fn resolve_dataset(series: &[SeriesMetadata]) -> Result<DatasetLocation, PipelineError> {
    let first = series.first().ok_or(PipelineError::NoSeries)?;
    let series_id = |s: &SeriesMetadata| s.id.clone().unwrap_or_else(|| s.label.clone());
    let domain_id = first
        .domain_ids
        .first()
        .ok_or_else(|| PipelineError::NoDomain(series_id(first)))?;

    let location = DatasetLocation {
        domain_id: domain_id.clone(),
        dataset_id: first.dataset_id.clone(),
    };

    if let Some(odd) = series.iter().find(|s| {
        !s.domain_ids.contains(&location.domain_id) || s.dataset_id != location.dataset_id
    }) {
        return Err(PipelineError::MixedDatasets {
            series_id: series_id(odd),
            domain_id: location.domain_id,
            dataset_id: location.dataset_id,
        });
    }

    Ok(location)
}
