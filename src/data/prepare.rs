use chrono::NaiveDate;
use thiserror::Error;

use super::model::{Listing, ListingTable};

// ---------------------------------------------------------------------------
// Raw rows and format errors
// ---------------------------------------------------------------------------

/// One unprocessed row as read from the source file. Text only; all
/// coercion happens in [`prepare`]. `None` means the cell was empty.
#[derive(Debug, Clone, Default)]
pub struct RawListing {
    pub model: String,
    pub price: String,
    pub odometer: Option<String>,
    pub model_year: Option<String>,
    pub cylinders: Option<String>,
    pub is_4wd: Option<String>,
    pub paint_color: Option<String>,
    pub date_posted: String,
}

/// Structural problems in the source table. All of these are fatal at
/// startup; no partial table is ever produced.
#[derive(Debug, Error)]
pub enum DataFormatError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}, column '{column}': '{value}' is not numeric")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("row {row}, column 'date_posted': '{value}' is not a YYYY-MM-DD date")]
    InvalidDate { row: usize, value: String },

    #[error("row {row}: column 'model' is empty")]
    EmptyModel { row: usize },

    #[error("column '{0}' has no non-missing values to impute from")]
    NoImputationBasis(&'static str),

    #[error("the dataset contains no rows")]
    EmptyTable,
}

// ---------------------------------------------------------------------------
// Dataset Preparer
// ---------------------------------------------------------------------------

/// Transform the raw rows into the invariant-respecting [`ListingTable`].
///
/// Cleaning steps, in order:
/// 1. empty `is_4wd` → 0
/// 2. empty `paint_color` → `"Unknown"`
/// 3. empty `cylinders` / `model_year` / `odometer` → column mean over the
///    non-missing values, truncated toward zero (one global mean per
///    column, applied uniformly to every missing cell)
/// 4. integer coercion of the four numeric columns
/// 5. `date_posted` parsed as `%Y-%m-%d`
/// 6. `brand` = first whitespace-delimited token of `model`
///
/// Pure: identical raw input always yields an identical table.
pub fn prepare(raw: &[RawListing]) -> Result<ListingTable, DataFormatError> {
    if raw.is_empty() {
        return Err(DataFormatError::EmptyTable);
    }

    // First pass: coerce every numeric cell so the column means are taken
    // over the full non-missing distribution before any imputation.
    let mut prices = Vec::with_capacity(raw.len());
    let mut odometers = Vec::with_capacity(raw.len());
    let mut model_years = Vec::with_capacity(raw.len());
    let mut cylinders = Vec::with_capacity(raw.len());
    let mut is_4wds = Vec::with_capacity(raw.len());

    for (row, rec) in raw.iter().enumerate() {
        prices.push(parse_number(row, "price", &rec.price)?);
        odometers.push(parse_optional(row, "odometer", rec.odometer.as_deref())?);
        model_years.push(parse_optional(row, "model_year", rec.model_year.as_deref())?);
        cylinders.push(parse_optional(row, "cylinders", rec.cylinders.as_deref())?);
        is_4wds.push(parse_optional(row, "is_4wd", rec.is_4wd.as_deref())?);
    }

    let odometer_fill = column_mean("odometer", &odometers)?;
    let model_year_fill = column_mean("model_year", &model_years)?;
    let cylinders_fill = column_mean("cylinders", &cylinders)?;

    let mut listings = Vec::with_capacity(raw.len());
    for (row, rec) in raw.iter().enumerate() {
        let date_posted = NaiveDate::parse_from_str(rec.date_posted.trim(), "%Y-%m-%d")
            .map_err(|_| DataFormatError::InvalidDate {
                row,
                value: rec.date_posted.clone(),
            })?;

        let model = rec.model.trim().to_string();
        let brand = model
            .split_whitespace()
            .next()
            .ok_or(DataFormatError::EmptyModel { row })?
            .to_string();

        let paint_color = match rec.paint_color.as_deref() {
            Some(c) if !c.trim().is_empty() => c.trim().to_string(),
            _ => "Unknown".to_string(),
        };

        listings.push(Listing {
            brand,
            model,
            price: prices[row] as i64,
            odometer: odometers[row].map_or(odometer_fill, |v| v as i64),
            model_year: model_years[row].map_or(model_year_fill, |v| v as i64),
            cylinders: cylinders[row].map_or(cylinders_fill, |v| v as i64),
            is_4wd: is_4wds[row].map_or(0, |v| v as i64),
            paint_color,
            date_posted,
        });
    }

    ListingTable::from_listings(listings).ok_or(DataFormatError::EmptyTable)
}

/// Coerce one required numeric cell. Accepts float text (`"79500.0"`)
/// because the source snapshot stores nullable integers as floats.
fn parse_number(row: usize, column: &'static str, value: &str) -> Result<f64, DataFormatError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DataFormatError::InvalidNumber {
            row,
            column,
            value: value.to_string(),
        })
}

fn parse_optional(
    row: usize,
    column: &'static str,
    value: Option<&str>,
) -> Result<Option<f64>, DataFormatError> {
    match value {
        Some(v) if !v.trim().is_empty() => parse_number(row, column, v).map(Some),
        _ => Ok(None),
    }
}

/// Global mean over the non-missing cells of a column, truncated toward
/// zero. Errors when the column is entirely missing.
fn column_mean(column: &'static str, values: &[Option<f64>]) -> Result<i64, DataFormatError> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return Err(DataFormatError::NoImputationBasis(column));
    }
    let mean = present.iter().sum::<f64>() / present.len() as f64;
    Ok(mean.trunc() as i64)
}
