use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::color::BrandColors;
use crate::data::model::ListingTable;
use crate::data::pipeline::{
    self, BrandCount, DailyCount, DailySummary, PriceSummary,
};

/// Initial price selection, clamped into the table's domain on load.
const DEFAULT_PRICE_RANGE: (i64, i64) = (10_000, 50_000);

/// How many brands start selected (first N in table-appearance order).
const DEFAULT_BRAND_COUNT: usize = 5;

/// Default bin count for the price histogram.
pub const DEFAULT_PRICE_BINS: usize = 200;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The current filter parameters, one field per interactive control.
#[derive(Debug, Clone)]
pub struct FilterParams {
    /// Requested `[min, max]` price window.
    pub price_range: (i64, i64),
    /// Brands currently ticked in the multi-select.
    pub brands: BTreeSet<String>,
    /// Requested `[start, end]` posting-date window.
    pub date_range: (NaiveDate, NaiveDate),
    /// Bin count for the price histogram.
    pub price_bins: usize,
}

impl Default for FilterParams {
    fn default() -> Self {
        let today = NaiveDate::default();
        Self {
            price_range: DEFAULT_PRICE_RANGE,
            brands: BTreeSet::new(),
            date_range: (today, today),
            price_bins: DEFAULT_PRICE_BINS,
        }
    }
}

/// Everything the charts consume, recomputed from scratch on each
/// interaction and discarded on the next. Views, not stored state.
#[derive(Debug, Clone, Default)]
pub struct DerivedViews {
    pub price_indices: Vec<usize>,
    pub price_summary: PriceSummary,
    pub brand_indices: Vec<usize>,
    pub brand_counts: Vec<BrandCount>,
    pub date_indices: Vec<usize>,
    pub daily: Vec<DailyCount>,
    pub daily_summary: DailySummary,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Prepared table (None until a file is loaded). Shared read-only for
    /// the rest of the session; filters never mutate it.
    pub table: Option<Arc<ListingTable>>,

    /// Current filter selections.
    pub params: FilterParams,

    /// Derived views for the current `params` (recomputed each frame).
    pub views: DerivedViews,

    /// Brand → colour assignment for the bar chart.
    pub brand_colors: BrandColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            params: FilterParams::default(),
            views: DerivedViews::default(),
            brand_colors: BrandColors::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a freshly prepared table and reset filters to their
    /// defaults: initial price window clamped into the table's domain,
    /// first five brands selected, full date span.
    pub fn set_table(&mut self, table: ListingTable) {
        self.params = FilterParams {
            price_range: pipeline::clamp_price_range(
                &table,
                DEFAULT_PRICE_RANGE.0,
                DEFAULT_PRICE_RANGE.1,
            ),
            brands: table
                .brands
                .iter()
                .take(DEFAULT_BRAND_COUNT)
                .cloned()
                .collect(),
            date_range: table.date_bounds,
            price_bins: DEFAULT_PRICE_BINS,
        };
        self.brand_colors = BrandColors::new(&table.brands);
        self.table = Some(Arc::new(table));
        self.status_message = None;
        self.refresh();
    }

    /// Recompute every derived view from the current filter parameters.
    /// Cheap linear scans; runs once per interaction.
    pub fn refresh(&mut self) {
        let Some(table) = &self.table else {
            self.views = DerivedViews::default();
            return;
        };

        let (min_price, max_price) = self.params.price_range;
        let price_indices = pipeline::filter_by_price(table, min_price, max_price);
        let price_summary = pipeline::price_summary(table, &price_indices);

        let brand_indices = pipeline::filter_by_brands(table, &self.params.brands);
        let brand_counts = pipeline::brand_counts(table, &brand_indices);

        let (start, end) = self.params.date_range;
        let date_indices = pipeline::filter_by_dates(table, start, end);
        let daily = pipeline::daily_counts(table, &date_indices);
        let daily_summary = pipeline::daily_summary(&date_indices, &daily);

        self.views = DerivedViews {
            price_indices,
            price_summary,
            brand_indices,
            brand_counts,
            date_indices,
            daily,
            daily_summary,
        };
    }

    /// Toggle one brand in the multi-select.
    pub fn toggle_brand(&mut self, brand: &str) {
        if !self.params.brands.remove(brand) {
            self.params.brands.insert(brand.to_string());
        }
    }

    /// Select every brand in the table.
    pub fn select_all_brands(&mut self) {
        if let Some(table) = &self.table {
            self.params.brands = table.brands.iter().cloned().collect();
        }
    }

    /// Clear the brand selection.
    pub fn select_no_brands(&mut self) {
        self.params.brands.clear();
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

    fn small_table() -> ListingTable {
        ListingTable::from_listings(vec![
            listing("ford", 8000, "2019-01-04"),
            listing("bmw", 25_000, "2019-01-05"),
            listing("gmc", 4000, "2019-03-02"),
        ])
        .unwrap()
    }

    #[test]
    fn loading_a_table_resets_filters_to_its_domain() {
        let mut state = AppState::default();
        state.set_table(small_table());

        // 10 000–50 000 clamped into [4 000, 25 000].
        assert_eq!(state.params.price_range, (10_000, 25_000));
        assert_eq!(state.params.brands.len(), 3);
        assert_eq!(
            state.params.date_range,
            (
                NaiveDate::from_ymd_opt(2019, 1, 4).unwrap(),
                NaiveDate::from_ymd_opt(2019, 3, 2).unwrap()
            )
        );
    }

    #[test]
    fn refresh_rebuilds_views_from_params() {
        let mut state = AppState::default();
        state.set_table(small_table());

        state.select_no_brands();
        state.refresh();
        assert!(state.views.brand_indices.is_empty());
        assert!(state.views.brand_counts.is_empty());

        state.toggle_brand("bmw");
        state.refresh();
        assert_eq!(state.views.brand_indices.len(), 1);
        assert_eq!(state.views.daily_summary.total, 3);
    }
}
