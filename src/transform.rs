//! Date normalization, face-value parsing, unit conversion and aggregation.

use crate::error::PipelineError;
use chrono::NaiveDate;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Divisor turning euros into millions of euros.
pub const MILLION: f64 = 1_000_000.0;

fn face_value_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^([0-9]+)\s+euros\n?$").expect("valid face value pattern"))
}

/// Extract the denomination from a face-value category, e.g. `"20 euros"` -> 20.
pub fn face_value(label: &str) -> Result<u64, PipelineError> {
    face_value_re()
        .captures(label)
        .and_then(|c| c[1].parse::<u64>().ok())
        .ok_or_else(|| PipelineError::FaceValue(label.to_string()))
}

/// Pair distinct face-value labels with their denomination, ordered by it.
///
/// Duplicates keep their first occurrence; the sort is stable, so equal
/// denominations stay in first-encounter order.
pub fn order_by_face_value<'a, I>(labels: I) -> Result<Vec<(&'a str, u64)>, PipelineError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out: Vec<(&str, u64)> = Vec::new();
    for label in labels {
        if out.iter().any(|(l, _)| *l == label) {
            continue;
        }
        out.push((label, face_value(label)?));
    }
    out.sort_by_key(|(_, v)| *v);
    Ok(out)
}

/// Parse a time category into a calendar date.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM` (first of month) and `YYYY` (January 1st).
pub fn parse_date(s: &str) -> Result<NaiveDate, PipelineError> {
    let s = s.trim();
    let err = || PipelineError::Date(s.to_string());
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    if let Some((y, m)) = s.split_once('-') {
        let year: i32 = y.parse().map_err(|_| err())?;
        let month: u32 = m.parse().map_err(|_| err())?;
        return NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(err);
    }
    let year: i32 = s.parse().map_err(|_| err())?;
    NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(err)
}

/// Value of `count` banknotes of denomination `face` in millions of euros.
pub fn to_millions(count: f64, face: u64) -> f64 {
    count * face as f64 / MILLION
}

/// Sum values per date. One output point per distinct date, ascending.
pub fn sum_by_date<I>(points: I) -> Vec<(NaiveDate, f64)>
where
    I: IntoIterator<Item = (NaiveDate, f64)>,
{
    let mut sums: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for (date, v) in points {
        *sums.entry(date).or_default() += v;
    }
    sums.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_value_ignores_case() {
        assert_eq!(face_value("500 EUROS"), Ok(500));
        assert_eq!(face_value("5 Euros"), Ok(5));
        assert_eq!(face_value("10\teuros"), Ok(10));
    }

    #[test]
    fn face_value_beyond_u32() {
        assert_eq!(face_value("5000000000 euros"), Ok(5_000_000_000));
        assert_eq!(face_value("4294967296 euros"), Ok(u32::MAX as u64 + 1));
        assert_eq!(to_millions(2.0, 5_000_000_000), 10_000.0);
    }

    #[test]
    fn face_value_allows_one_trailing_newline() {
        assert_eq!(face_value("200 euros\n"), Ok(200));
        let bad = "200 euros\n\n";
        assert_eq!(face_value(bad), Err(PipelineError::FaceValue(bad.into())));
    }

    #[test]
    fn face_value_rejects_other_shapes() {
        for bad in ["euros", "10 euro", " 10 euros", "10 euros total", "ten euros", ""] {
            assert_eq!(face_value(bad), Err(PipelineError::FaceValue(bad.into())), "{bad}");
        }
    }

    #[test]
    fn dates_of_every_granularity() {
        assert_eq!(parse_date("2023-12-31"), Ok(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()));
        assert_eq!(parse_date("2020-01"), Ok(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()));
        assert_eq!(parse_date("1999"), Ok(NaiveDate::from_ymd_opt(1999, 1, 1).unwrap()));
        assert!(parse_date("2020-13").is_err());
        assert!(parse_date("Q1 2020").is_err());
    }
}
