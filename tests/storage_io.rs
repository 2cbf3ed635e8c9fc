mod common;

use bpstat_rs::{Table, storage};
use common::{NOTES_DATASET, dataset};
use std::fs;

#[test]
fn csv_has_label_header_and_empty_missing_cells() {
    let table = Table::from_dataset(&dataset(NOTES_DATASET)).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.csv");
    storage::save_csv(&table, &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Date,Periodicity,Unit,Face value,value");
    assert_eq!(lines[1], "2020-01-31,Monthly,Number,20 euros,100");
    assert_eq!(lines[5], "2020-02-29,Monthly,Number,5 Euros,");
    assert_eq!(lines.len(), 7);
}

#[test]
fn json_round_trips_the_table() {
    let table = Table::from_dataset(&dataset(NOTES_DATASET)).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.json");
    storage::save_json(&table, &path).unwrap();

    let back: Table = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(back, table);
}
