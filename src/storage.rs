use crate::table::Table;
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save the observation table as CSV: one column per dimension (headed by its
/// display label) followed by `value`. Missing values are empty cells.
pub fn save_csv<P: AsRef<Path>>(table: &Table, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    let mut header: Vec<&str> = table.columns.iter().map(|c| c.label.as_str()).collect();
    header.push("value");
    wtr.write_record(&header)?;
    for row in &table.rows {
        let value = row.value.map(|v| v.to_string()).unwrap_or_default();
        wtr.write_record(
            row.categories
                .iter()
                .map(String::as_str)
                .chain(std::iter::once(value.as_str())),
        )?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save the observation table (columns and rows) as pretty JSON.
pub fn save_json<P: AsRef<Path>>(table: &Table, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(table)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
