#![allow(dead_code)]

use bpstat_rs::JsonStatDataset;
use bpstat_rs::models::SeriesMetadata;
use bpstat_rs::pipeline::Fetched;
use bpstat_rs::DatasetLocation;

/// Annual GDP, one territory; the 2022 observation is missing.
pub const GDP_DATASET: &str = r#"
{
  "version": "2.0",
  "class": "dataset",
  "label": "Gross domestic product",
  "id": ["63", "40", "70", "reference_date"],
  "size": [1, 1, 1, 4],
  "role": {"time": ["reference_date"]},
  "dimension": {
    "63": {"label": "Reference territory", "category": {"index": ["PT"], "label": {"PT": "Portugal"}}},
    "40": {"label": "Periodicity", "category": {"label": {"A": "Annual"}}},
    "70": {"label": "Unit", "category": {"index": {"M": 0}, "label": {"M": "Millions of euros"}}},
    "reference_date": {
      "label": "Date",
      "category": {"index": ["2020-12-31", "2021-12-31", "2022-12-31", "2023-12-31"]}
    }
  },
  "value": [200519.4, 216053.2, null, 267384.2]
}
"#;

/// Counterfeit notes per face value, two months, face value varying fastest.
pub const NOTES_DATASET: &str = r#"
{
  "version": "2.0",
  "class": "dataset",
  "id": ["reference_date", "40", "70", "71"],
  "size": [2, 1, 1, 3],
  "role": {"time": ["reference_date"]},
  "dimension": {
    "reference_date": {"label": "Date", "category": {"index": ["2020-01-31", "2020-02-29"]}},
    "40": {"label": "Periodicity", "category": {"index": ["M"], "label": {"M": "Monthly"}}},
    "70": {"label": "Unit", "category": {"index": ["N"], "label": {"N": "Number"}}},
    "71": {
      "label": "Face value",
      "category": {
        "index": ["20", "5", "50"],
        "label": {"20": "20 euros", "5": "5 Euros", "50": "50 euros"}
      }
    }
  },
  "value": [100, 10, 4, 200, null, 2]
}
"#;

pub const NOTES_METADATA: &str = r#"
[
  {"id": 12468944, "domain_ids": [48, 31], "dataset_id": "8d1b4e1e", "label": "5 euro notes"},
  {"id": 12468945, "domain_ids": [31, 48], "dataset_id": "8d1b4e1e", "label": "20 euro notes"}
]
"#;

pub fn dataset(json: &str) -> JsonStatDataset {
    serde_json::from_str(json).expect("fixture parses")
}

pub fn series(id: &str, domains: &[&str], dataset_id: &str) -> SeriesMetadata {
    SeriesMetadata {
        id: Some(id.into()),
        domain_ids: domains.iter().map(|d| d.to_string()).collect(),
        dataset_id: dataset_id.into(),
        label: format!("Series {id}"),
    }
}

pub fn fetched(json: &str, label: &str) -> Fetched {
    Fetched {
        series: vec![SeriesMetadata {
            id: Some("1".into()),
            domain_ids: vec!["48".into()],
            dataset_id: "x".into(),
            label: label.into(),
        }],
        location: DatasetLocation {
            domain_id: "48".into(),
            dataset_id: "x".into(),
        },
        dataset: dataset(json),
    }
}
