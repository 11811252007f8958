use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Listing – one used-car advertisement record
// ---------------------------------------------------------------------------

/// A single cleaned listing (one row of the prepared table).
///
/// Every field is fully populated: the Dataset Preparer imputes or rejects
/// rows before a `Listing` is ever constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Full model string, `"<brand> <model-name>"`.
    pub model: String,
    /// First whitespace-delimited token of `model`.
    pub brand: String,
    /// Asking price in currency units.
    pub price: i64,
    /// Mileage; mean-imputed when the source cell was empty.
    pub odometer: i64,
    /// Model year; mean-imputed when the source cell was empty.
    pub model_year: i64,
    /// Cylinder count; mean-imputed when the source cell was empty.
    pub cylinders: i64,
    /// Four-wheel drive flag, 0 or 1; empty cells become 0.
    pub is_4wd: i64,
    /// Paint colour; empty cells become `"Unknown"`.
    pub paint_color: String,
    /// Calendar date the ad was posted.
    pub date_posted: NaiveDate,
}

// ---------------------------------------------------------------------------
// ListingTable – the complete prepared dataset
// ---------------------------------------------------------------------------

/// The prepared table plus the pre-computed lookups the UI needs for
/// slider bounds and the brand multi-select.
///
/// Built once per session and shared read-only afterwards (wrapped in an
/// `Arc` by the application state); no mutation happens post-construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingTable {
    /// All listings (rows), in source-file order.
    pub listings: Vec<Listing>,
    /// Distinct brands in first-appearance order.
    pub brands: Vec<String>,
    /// Inclusive `(min, max)` of `price` over the whole table.
    pub price_bounds: (i64, i64),
    /// Inclusive `(min, max)` of `date_posted` over the whole table.
    pub date_bounds: (NaiveDate, NaiveDate),
}

impl ListingTable {
    /// Build the table indices from prepared listings.
    /// Returns `None` for an empty row set, since no bounds exist.
    pub fn from_listings(listings: Vec<Listing>) -> Option<Self> {
        let first = listings.first()?;

        let mut brands: Vec<String> = Vec::new();
        let mut price_bounds = (first.price, first.price);
        let mut date_bounds = (first.date_posted, first.date_posted);

        for listing in &listings {
            if !brands.iter().any(|b| b == &listing.brand) {
                brands.push(listing.brand.clone());
            }
            price_bounds.0 = price_bounds.0.min(listing.price);
            price_bounds.1 = price_bounds.1.max(listing.price);
            date_bounds.0 = date_bounds.0.min(listing.date_posted);
            date_bounds.1 = date_bounds.1.max(listing.date_posted);
        }

        Some(ListingTable {
            listings,
            brands,
            price_bounds,
            date_bounds,
        })
    }

    /// Number of listings.
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Whether the table is empty (never true for a table built through
    /// [`from_listings`](Self::from_listings)).
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(brand: &str, price: i64, date: &str) -> Listing {
        Listing {
            model: format!("{brand} test"),
            brand: brand.to_string(),
            price,
            odometer: 100_000,
            model_year: 2015,
            cylinders: 4,
            is_4wd: 0,
            paint_color: "white".to_string(),
            date_posted: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        }
    }

    #[test]
    fn brands_keep_first_appearance_order() {
        let table = ListingTable::from_listings(vec![
            listing("ford", 5000, "2019-01-01"),
            listing("bmw", 9000, "2019-01-02"),
            listing("ford", 7000, "2019-01-03"),
            listing("toyota", 8000, "2019-01-04"),
        ])
        .unwrap();
        assert_eq!(table.brands, vec!["ford", "bmw", "toyota"]);
    }

    #[test]
    fn bounds_cover_full_table() {
        let table = ListingTable::from_listings(vec![
            listing("ford", 5000, "2019-03-01"),
            listing("bmw", 19_000, "2018-11-20"),
            listing("gmc", 1200, "2019-04-15"),
        ])
        .unwrap();
        assert_eq!(table.price_bounds, (1200, 19_000));
        assert_eq!(
            table.date_bounds,
            (
                NaiveDate::from_ymd_opt(2018, 11, 20).unwrap(),
                NaiveDate::from_ymd_opt(2019, 4, 15).unwrap()
            )
        );
    }

    #[test]
    fn empty_row_set_has_no_table() {
        assert!(ListingTable::from_listings(Vec::new()).is_none());
    }
}
