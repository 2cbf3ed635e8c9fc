use bpstat_rs::transform::{face_value, order_by_face_value, sum_by_date, to_millions};
use bpstat_rs::PipelineError;
use chrono::NaiveDate;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn face_values_extract_exactly() {
    for n in [5u64, 10, 20, 50, 100, 200, 500] {
        assert_eq!(face_value(&format!("{n} euros")), Ok(n));
        assert_eq!(face_value(&format!("{n} EUROS")), Ok(n));
    }
}

#[test]
fn ordering_is_numeric_and_deduplicated() {
    let labels = ["500 euros", "5 euros", "50 euros", "5 euros", "20 euros"];
    let ordered = order_by_face_value(labels).unwrap();
    assert_eq!(
        ordered,
        vec![("5 euros", 5), ("20 euros", 20), ("50 euros", 50), ("500 euros", 500)]
    );
}

#[test]
fn ties_keep_first_encounter_order() {
    let labels = ["10 EUROS", "5 euros", "10 euros"];
    let ordered = order_by_face_value(labels).unwrap();
    assert_eq!(ordered, vec![("5 euros", 5), ("10 EUROS", 10), ("10 euros", 10)]);
}

#[test]
fn ordering_fails_on_a_non_conforming_label() {
    let labels = ["5 euros", "Total"];
    assert_eq!(
        order_by_face_value(labels),
        Err(PipelineError::FaceValue("Total".into()))
    );
}

#[test]
fn conversion_then_aggregation() {
    let t = d(2020, 1, 1);
    let converted = vec![(t, to_millions(100.0, 10)), (t, to_millions(50.0, 20))];
    assert_eq!(converted[0].1, 100.0 * 10.0 / 1_000_000.0);
    assert_eq!(converted[1].1, 50.0 * 20.0 / 1_000_000.0);
    assert!((converted[0].1 - 0.001).abs() < 1e-15);

    let summed = sum_by_date(converted);
    assert_eq!(summed.len(), 1);
    assert_eq!(summed[0].0, t);
    assert!((summed[0].1 - 0.002).abs() < 1e-15);
}

#[test]
fn aggregation_keeps_every_date_once_in_order() {
    let rows = vec![
        (d(2021, 3, 31), 1.0),
        (d(2020, 12, 31), 2.0),
        (d(2021, 3, 31), 3.5),
        (d(2020, 12, 31), -0.5),
        (d(2022, 1, 31), 0.0),
    ];
    let summed = sum_by_date(rows);
    assert_eq!(
        summed,
        vec![
            (d(2020, 12, 31), 1.5),
            (d(2021, 3, 31), 4.5),
            (d(2022, 1, 31), 0.0),
        ]
    );
}
