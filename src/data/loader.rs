use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::ListingTable;
use super::prepare::{prepare, DataFormatError, RawListing};

/// Header names the input file must carry. `brand` is derived, never read.
const REQUIRED_COLUMNS: [&str; 8] = [
    "model",
    "price",
    "odometer",
    "model_year",
    "cylinders",
    "is_4wd",
    "paint_color",
    "date_posted",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and prepare a listings table from a CSV snapshot.
///
/// The file is read exactly once per session; the returned table is the
/// process-wide read-only dataset. Any structural problem (missing
/// column, unparseable cell) aborts the load with a diagnostic naming the
/// offending column.
pub fn load_csv(path: &Path) -> Result<ListingTable> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let raw = read_raw(file).with_context(|| format!("reading {}", path.display()))?;
    let table = prepare(&raw).context("preparing listings table")?;
    Ok(table)
}

/// Parse the delimited input into raw text rows, verifying the schema.
/// Split from [`load_csv`] so the schema check is testable without a file.
pub fn read_raw<R: Read>(reader: R) -> Result<Vec<RawListing>> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut column_idx = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, name) in column_idx.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h == name)
            .ok_or(DataFormatError::MissingColumn(name))?;
    }
    let [model, price, odometer, model_year, cylinders, is_4wd, paint_color, date_posted] =
        column_idx;

    let mut raw = Vec::new();
    for (row_no, result) in csv_reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |idx: usize| record.get(idx).unwrap_or("").to_string();
        let optional = |idx: usize| {
            let value = cell(idx);
            if value.trim().is_empty() { None } else { Some(value) }
        };

        raw.push(RawListing {
            model: cell(model),
            price: cell(price),
            odometer: optional(odometer),
            model_year: optional(model_year),
            cylinders: optional(cylinders),
            is_4wd: optional(is_4wd),
            paint_color: optional(paint_color),
            date_posted: cell(date_posted),
        });
    }

    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "price,model_year,model,cylinders,odometer,paint_color,is_4wd,date_posted\n";

    #[test]
    fn reads_rows_with_empty_cells_as_missing() {
        let csv = format!(
            "{HEADER}9400,2011.0,bmw x5,6.0,145000.0,,1.0,2018-06-23\n\
             25500,,ford f-150,6.0,88705.0,white,,2018-10-19\n"
        );
        let raw = read_raw(csv.as_bytes()).unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0].model, "bmw x5");
        assert_eq!(raw[0].paint_color, None);
        assert_eq!(raw[1].model_year, None);
        assert_eq!(raw[1].is_4wd, None);
        assert_eq!(raw[1].odometer.as_deref(), Some("88705.0"));
    }

    #[test]
    fn missing_column_names_the_offender() {
        let csv = "price,model_year,model,cylinders,paint_color,is_4wd,date_posted\n";
        let err = read_raw(csv.as_bytes()).unwrap_err();
        let format_err = err.downcast_ref::<DataFormatError>().unwrap();
        assert!(matches!(
            format_err,
            DataFormatError::MissingColumn("odometer")
        ));
    }

    #[test]
    fn header_order_does_not_matter() {
        let csv = "date_posted,model,price,odometer,model_year,cylinders,is_4wd,paint_color\n\
                   2018-06-23,bmw x5,9400,145000,2011,6,1,black\n";
        let raw = read_raw(csv.as_bytes()).unwrap();
        assert_eq!(raw[0].price, "9400");
        assert_eq!(raw[0].date_posted, "2018-06-23");
    }
}
