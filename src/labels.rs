//! Column-label resolution.
//!
//! Dimension labels are language-dependent and may change over time, while
//! dimension ids are stable. The time dimension is found through the dataset's
//! `role.time`; the others by matching configured ids.

use crate::config::DimensionIds;
use crate::error::PipelineError;
use crate::models::JsonStatDataset;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalDimension {
    Time,
    Unit,
    Recurrence,
    FaceValue,
    ReferenceTerritory,
}

impl fmt::Display for LogicalDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogicalDimension::Time => "time",
            LogicalDimension::Unit => "unit",
            LogicalDimension::Recurrence => "recurrence",
            LogicalDimension::FaceValue => "face value",
            LogicalDimension::ReferenceTerritory => "reference territory",
        })
    }
}

/// Display labels of the dimensions a pipeline cares about.
///
/// Only time is mandatory at resolution time; the others stay `None` when the
/// dataset lacks them and fail on first use through [`ColumnLabels::get`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnLabels {
    time: String,
    unit: Option<String>,
    recurrence: Option<String>,
    face_value: Option<String>,
    reference_territory: Option<String>,
}

impl ColumnLabels {
    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn get(&self, dim: LogicalDimension) -> Result<&str, PipelineError> {
        let label = match dim {
            LogicalDimension::Time => return Ok(&self.time),
            LogicalDimension::Unit => &self.unit,
            LogicalDimension::Recurrence => &self.recurrence,
            LogicalDimension::FaceValue => &self.face_value,
            LogicalDimension::ReferenceTerritory => &self.reference_territory,
        };
        label
            .as_deref()
            .ok_or(PipelineError::UnresolvedDimension(dim))
    }
}

/// Resolve the display labels in a single pass over the dimension block.
pub fn resolve_labels(
    ds: &JsonStatDataset,
    ids: &DimensionIds,
) -> Result<ColumnLabels, PipelineError> {
    // JSON-stat allows several, BPstat always declares exactly one.
    let time_id = ds.role.time.first().ok_or(PipelineError::MissingTimeRole)?;

    let mut labels = ColumnLabels::default();
    let mut time = None;
    for (dim_id, dim) in &ds.dimension {
        let label = Some(dim.label_or(dim_id).to_string());
        if dim_id == time_id {
            time = label;
        } else if *dim_id == ids.unit {
            labels.unit = label;
        } else if *dim_id == ids.recurrence {
            labels.recurrence = label;
        } else if *dim_id == ids.face_value {
            labels.face_value = label;
        } else if *dim_id == ids.reference_territory {
            labels.reference_territory = label;
        }
    }
    labels.time = time.ok_or(PipelineError::UnresolvedDimension(LogicalDimension::Time))?;

    log::debug!("resolved column labels: {labels:?}");
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Dimension, Role, Values};
    use std::collections::BTreeMap;

    fn dim(label: &str) -> Dimension {
        Dimension {
            label: Some(label.into()),
            category: Category::default(),
        }
    }

    fn dataset(dims: &[(&str, &str)], time: &[&str]) -> JsonStatDataset {
        JsonStatDataset {
            label: None,
            id: vec![],
            size: vec![],
            role: Role {
                time: time.iter().map(|s| s.to_string()).collect(),
                ..Role::default()
            },
            dimension: dims
                .iter()
                .map(|(id, label)| (id.to_string(), dim(label)))
                .collect::<BTreeMap<_, _>>(),
            value: Values::Dense(vec![]),
        }
    }

    #[test]
    fn resolves_by_id_and_time_role() {
        let ds = dataset(
            &[("reference_date", "Date"), ("70", "Unit"), ("40", "Periodicity")],
            &["reference_date"],
        );
        let labels = resolve_labels(&ds, &DimensionIds::default()).unwrap();
        assert_eq!(labels.time(), "Date");
        assert_eq!(labels.get(LogicalDimension::Unit), Ok("Unit"));
        assert_eq!(labels.get(LogicalDimension::Recurrence), Ok("Periodicity"));
        assert_eq!(
            labels.get(LogicalDimension::FaceValue),
            Err(PipelineError::UnresolvedDimension(LogicalDimension::FaceValue))
        );
    }

    #[test]
    fn missing_time_role_fails() {
        let ds = dataset(&[("70", "Unit")], &[]);
        assert_eq!(
            resolve_labels(&ds, &DimensionIds::default()),
            Err(PipelineError::MissingTimeRole)
        );
    }

    #[test]
    fn time_role_pointing_nowhere_fails() {
        let ds = dataset(&[("70", "Unit")], &["reference_date"]);
        assert_eq!(
            resolve_labels(&ds, &DimensionIds::default()),
            Err(PipelineError::UnresolvedDimension(LogicalDimension::Time))
        );
    }
}
