use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::model::ListingTable;

// ---------------------------------------------------------------------------
// Derived views
//
// Every operation here is a pure read over the shared prepared table:
// subsets are index views, aggregates are freshly built per call. Nothing
// is cached and nothing errors on user input; out-of-domain ranges clamp
// and unknown brands simply match no rows.
// ---------------------------------------------------------------------------

/// Row count and mean price of a price-filtered subset.
/// `mean` is `None` for an empty subset; callers render "no data" instead
/// of a fabricated zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSummary {
    pub count: usize,
    pub mean: Option<f64>,
}

/// One row of the listings-per-brand count table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandCount {
    pub brand: String,
    pub count: usize,
}

/// One row of the postings-per-day count table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// Totals over a date-filtered subset. `mean_per_day` averages over the
/// distinct dates that actually have listings, so zero-listing days never
/// drag the mean down; `None` when the subset is empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySummary {
    pub total: usize,
    pub mean_per_day: Option<f64>,
}

// ---------------------------------------------------------------------------
// Price range
// ---------------------------------------------------------------------------

/// Clamp a requested price range into the table's price domain.
pub fn clamp_price_range(table: &ListingTable, min: i64, max: i64) -> (i64, i64) {
    let (lo, hi) = table.price_bounds;
    (min.clamp(lo, hi), max.clamp(lo, hi))
}

/// Indices of listings with price in `[min, max]` inclusive, after
/// clamping to the table's domain. An inverted range selects nothing.
pub fn filter_by_price(table: &ListingTable, min: i64, max: i64) -> Vec<usize> {
    let (min, max) = clamp_price_range(table, min, max);
    table
        .listings
        .iter()
        .enumerate()
        .filter(|(_, l)| l.price >= min && l.price <= max)
        .map(|(i, _)| i)
        .collect()
}

/// Row count and mean price over a subset of the table.
pub fn price_summary(table: &ListingTable, indices: &[usize]) -> PriceSummary {
    if indices.is_empty() {
        return PriceSummary {
            count: 0,
            mean: None,
        };
    }
    let sum: i64 = indices.iter().map(|&i| table.listings[i].price).sum();
    PriceSummary {
        count: indices.len(),
        mean: Some(sum as f64 / indices.len() as f64),
    }
}

/// The price column of a subset, for histogram binning.
pub fn price_values(table: &ListingTable, indices: &[usize]) -> Vec<f64> {
    indices
        .iter()
        .map(|&i| table.listings[i].price as f64)
        .collect()
}

// ---------------------------------------------------------------------------
// Odometer
// ---------------------------------------------------------------------------

/// The full odometer column, for histogram binning.
pub fn odometer_values(table: &ListingTable) -> Vec<f64> {
    table.listings.iter().map(|l| l.odometer as f64).collect()
}

// ---------------------------------------------------------------------------
// Brand selection
// ---------------------------------------------------------------------------

/// Indices of listings whose brand is in the selected set. An empty set
/// or a set of unknown brands selects nothing.
pub fn filter_by_brands(table: &ListingTable, selected: &BTreeSet<String>) -> Vec<usize> {
    if selected.is_empty() {
        return Vec::new();
    }
    table
        .listings
        .iter()
        .enumerate()
        .filter(|(_, l)| selected.contains(&l.brand))
        .map(|(i, _)| i)
        .collect()
}

/// Group a subset by brand. One row per brand present in the subset,
/// sorted descending by count (ties broken by brand name).
pub fn brand_counts(table: &ListingTable, indices: &[usize]) -> Vec<BrandCount> {
    let mut counts: Vec<BrandCount> = Vec::new();
    for &i in indices {
        let brand = &table.listings[i].brand;
        match counts.iter_mut().find(|c| &c.brand == brand) {
            Some(entry) => entry.count += 1,
            None => counts.push(BrandCount {
                brand: brand.clone(),
                count: 1,
            }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.brand.cmp(&b.brand)));
    counts
}

// ---------------------------------------------------------------------------
// Date range
// ---------------------------------------------------------------------------

/// Clamp a requested date range into the table's posting-date domain.
pub fn clamp_date_range(
    table: &ListingTable,
    start: NaiveDate,
    end: NaiveDate,
) -> (NaiveDate, NaiveDate) {
    let (lo, hi) = table.date_bounds;
    (start.clamp(lo, hi), end.clamp(lo, hi))
}

/// Indices of listings posted in `[start, end]` inclusive, after clamping
/// to the table's domain.
pub fn filter_by_dates(table: &ListingTable, start: NaiveDate, end: NaiveDate) -> Vec<usize> {
    let (start, end) = clamp_date_range(table, start, end);
    table
        .listings
        .iter()
        .enumerate()
        .filter(|(_, l)| l.date_posted >= start && l.date_posted <= end)
        .map(|(i, _)| i)
        .collect()
}

/// Postings per day over a subset: one row per distinct date present,
/// sorted ascending. Days with no listings get no row.
pub fn daily_counts(table: &ListingTable, indices: &[usize]) -> Vec<DailyCount> {
    let mut counts: Vec<DailyCount> = Vec::new();
    for &i in indices {
        let date = table.listings[i].date_posted;
        match counts.iter_mut().find(|c| c.date == date) {
            Some(entry) => entry.count += 1,
            None => counts.push(DailyCount { date, count: 1 }),
        }
    }
    counts.sort_by_key(|c| c.date);
    counts
}

/// Subset total plus the mean listings-per-day over the distinct dates in
/// the daily table.
pub fn daily_summary(indices: &[usize], daily: &[DailyCount]) -> DailySummary {
    DailySummary {
        total: indices.len(),
        mean_per_day: (!daily.is_empty())
            .then(|| indices.len() as f64 / daily.len() as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Listing;

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

    fn table() -> ListingTable {
        ListingTable::from_listings(vec![
            listing("ford", 8000, "2019-01-04"),
            listing("bmw", 25_000, "2019-01-04"),
            listing("toyota", 15_000, "2019-02-11"),
            listing("ford", 52_000, "2019-02-11"),
            listing("gmc", 4000, "2019-03-02"),
            listing("ford", 31_000, "2019-01-04"),
        ])
        .unwrap()
    }

    fn brands(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn price_filter_is_inclusive() {
        let table = table();
        let subset = filter_by_price(&table, 10_000, 50_000);
        let prices: Vec<i64> = subset.iter().map(|&i| table.listings[i].price).collect();
        assert_eq!(prices, vec![25_000, 15_000, 31_000]);
    }

    #[test]
    fn price_filter_full_domain_is_identity() {
        let table = table();
        let (lo, hi) = table.price_bounds;
        assert_eq!(filter_by_price(&table, lo, hi).len(), table.len());
    }

    #[test]
    fn price_filter_clamps_out_of_domain_requests() {
        let table = table();
        // Far beyond the domain on both sides still selects everything.
        assert_eq!(filter_by_price(&table, -1, 1_000_000).len(), table.len());
    }

    #[test]
    fn inverted_price_range_selects_nothing_and_mean_is_absent() {
        let table = table();
        let subset = filter_by_price(&table, 50_000, 10_000);
        assert!(subset.is_empty());
        let summary = price_summary(&table, &subset);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.mean, None);
    }

    #[test]
    fn price_summary_reports_arithmetic_mean() {
        let table = table();
        let subset = filter_by_price(&table, 10_000, 50_000);
        let summary = price_summary(&table, &subset);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.mean, Some((25_000.0 + 15_000.0 + 31_000.0) / 3.0));
    }

    #[test]
    fn odometer_column_covers_every_row() {
        let table = table();
        assert_eq!(odometer_values(&table).len(), table.len());
    }

    #[test]
    fn empty_brand_selection_yields_empty_views() {
        let table = table();
        let subset = filter_by_brands(&table, &BTreeSet::new());
        assert!(subset.is_empty());
        assert!(brand_counts(&table, &subset).is_empty());
    }

    #[test]
    fn unknown_brand_yields_empty_subset() {
        let table = table();
        assert!(filter_by_brands(&table, &brands(&["delorean"])).is_empty());
    }

    #[test]
    fn brand_counts_sort_descending() {
        let table = table();
        let subset = filter_by_brands(&table, &brands(&["ford", "bmw", "gmc"]));
        let counts = brand_counts(&table, &subset);
        assert_eq!(
            counts,
            vec![
                BrandCount {
                    brand: "ford".to_string(),
                    count: 3
                },
                BrandCount {
                    brand: "bmw".to_string(),
                    count: 1
                },
                BrandCount {
                    brand: "gmc".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn single_day_range_has_single_daily_row() {
        let table = table();
        let day = NaiveDate::from_ymd_opt(2019, 1, 4).unwrap();
        let subset = filter_by_dates(&table, day, day);
        assert_eq!(subset.len(), 3);
        let daily = daily_counts(&table, &subset);
        assert_eq!(daily, vec![DailyCount { date: day, count: 3 }]);
    }

    #[test]
    fn date_filter_full_domain_is_identity() {
        let table = table();
        let (lo, hi) = table.date_bounds;
        assert_eq!(filter_by_dates(&table, lo, hi).len(), table.len());
    }

    #[test]
    fn daily_mean_ignores_zero_listing_days() {
        let table = table();
        let (lo, hi) = table.date_bounds;
        let subset = filter_by_dates(&table, lo, hi);
        let daily = daily_counts(&table, &subset);
        // Three distinct posting dates over a two-month span.
        assert_eq!(daily.len(), 3);
        let summary = daily_summary(&subset, &daily);
        assert_eq!(summary.total, 6);
        assert_eq!(summary.mean_per_day, Some(2.0));
    }

    #[test]
    fn daily_counts_sort_by_date() {
        let table = table();
        let (lo, hi) = table.date_bounds;
        let daily = daily_counts(&table, &filter_by_dates(&table, lo, hi));
        let dates: Vec<NaiveDate> = daily.iter().map(|d| d.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn empty_subset_has_no_daily_mean() {
        let summary = daily_summary(&[], &[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.mean_per_day, None);
    }
}
