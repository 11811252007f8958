use chrono::{Duration, NaiveDate};
use eframe::egui::{Grid, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, Plot, PlotPoints, Points};

use crate::data::pipeline::{self, DailyCount};
use crate::state::AppState;

/// Bin count for the odometer histogram (full-column view, no filter).
const ODOMETER_BINS: usize = 60;

// ---------------------------------------------------------------------------
// Histogram binning
//
// The pipeline hands raw value sequences to the rendering layer; bin edges
// and counts are a display concern and live here.
// ---------------------------------------------------------------------------

/// Bin values into `bins` equal-width bars over `[min, max]`.
/// Values equal to the maximum land in the last bin.
pub fn histogram_bars(values: &[f64], bins: usize) -> Vec<Bar> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    if span <= f64::EPSILON {
        // Degenerate distribution: everything in one bar.
        return vec![Bar::new(min, values.len() as f64)];
    }

    let width = span / bins as f64;
    let mut counts = vec![0u64; bins];
    for &v in values {
        let bin = (((v - min) / width) as usize).min(bins - 1);
        counts[bin] += 1;
    }

    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            Bar::new(min + (i as f64 + 0.5) * width, count as f64).width(width)
        })
        .collect()
}

fn histogram_plot(ui: &mut Ui, id: &str, values: &[f64], bins: usize, x_label: &str) {
    let bars = histogram_bars(values, bins);
    Plot::new(id.to_string())
        .height(240.0)
        .x_axis_label(x_label)
        .y_axis_label("Listings")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Date axis helpers
// ---------------------------------------------------------------------------

fn days_since_epoch(date: NaiveDate) -> f64 {
    (date - NaiveDate::default()).num_days() as f64
}

fn date_from_days(days: f64) -> Option<NaiveDate> {
    Duration::try_days(days.round() as i64)
        .and_then(|d| NaiveDate::default().checked_add_signed(d))
}

// ---------------------------------------------------------------------------
// Chart area (central panel)
// ---------------------------------------------------------------------------

/// Render every chart section from the current derived views.
pub fn chart_area(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a listings CSV to explore it  (File → Open…)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Used car listings");
            ui.separator();

            // ---- Odometer distribution (full table) ----
            ui.strong("Odometer distribution");
            histogram_plot(
                ui,
                "odometer_hist",
                &pipeline::odometer_values(table),
                ODOMETER_BINS,
                "Odometer",
            );
            ui.separator();

            // ---- Price distribution (price-filtered subset) ----
            let (min_price, max_price) = state.params.price_range;
            ui.strong(format!("Price distribution ({min_price} – {max_price})"));
            histogram_plot(
                ui,
                "price_hist",
                &pipeline::price_values(table, &state.views.price_indices),
                state.params.price_bins,
                "Price",
            );
            let summary = &state.views.price_summary;
            ui.label(format!("Listings in range: {}", summary.count));
            match summary.mean {
                Some(mean) => ui.label(format!("Average price: {mean:.2}")),
                None => ui.label("Average price: no data"),
            };
            ui.separator();

            // ---- Listings per brand (brand-filtered subset) ----
            ui.strong(format!(
                "Listings per brand ({} selected)",
                state.params.brands.len()
            ));
            brand_chart(ui, state);
            ui.label(format!(
                "Listings for selected brands: {}",
                state.views.brand_indices.len()
            ));
            brand_table(ui, state);
            ui.separator();

            // ---- Postings per day (date-filtered subset) ----
            let (start, end) = state.params.date_range;
            ui.strong(format!("Postings per day ({start} – {end})"));
            daily_chart(ui, &state.views.daily);
            let daily = &state.views.daily_summary;
            ui.label(format!("Listings in range: {}", daily.total));
            match daily.mean_per_day {
                Some(mean) => ui.label(format!("Average postings per day: {mean:.1}")),
                None => ui.label("Average postings per day: no data"),
            };
        });
}

/// Bar chart of listing counts per selected brand, coloured per brand.
fn brand_chart(ui: &mut Ui, state: &AppState) {
    let bars: Vec<Bar> = state
        .views
        .brand_counts
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            Bar::new(i as f64, entry.count as f64)
                .width(0.7)
                .name(&entry.brand)
                .fill(state.brand_colors.color_for(&entry.brand))
        })
        .collect();

    let labels: Vec<String> = state
        .views
        .brand_counts
        .iter()
        .map(|entry| entry.brand.clone())
        .collect();

    Plot::new("brand_chart")
        .height(240.0)
        .y_axis_label("Listings")
        .allow_scroll(false)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

/// Count table under the brand chart, sorted as the pipeline returns it
/// (descending by count).
fn brand_table(ui: &mut Ui, state: &AppState) {
    if state.views.brand_counts.is_empty() {
        ui.label("No brands selected.");
        return;
    }
    Grid::new("brand_table")
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            ui.strong("Brand");
            ui.strong("Listings");
            ui.end_row();
            for entry in &state.views.brand_counts {
                ui.label(&entry.brand);
                ui.label(entry.count.to_string());
                ui.end_row();
            }
        });
}

/// Scatter of postings per calendar day.
fn daily_chart(ui: &mut Ui, daily: &[DailyCount]) {
    let points: PlotPoints = daily
        .iter()
        .map(|d| [days_since_epoch(d.date), d.count as f64])
        .collect();

    Plot::new("daily_chart")
        .height(240.0)
        .x_axis_label("Date posted")
        .y_axis_label("Listings")
        .allow_scroll(false)
        .x_axis_formatter(|mark, _range| {
            date_from_days(mark.value)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        })
        .label_formatter(|_name, point| {
            match date_from_days(point.x) {
                Some(date) => format!("{date}: {:.0} listings", point.y),
                None => format!("{:.0} listings", point.y),
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.points(Points::new(points).radius(3.5));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_preserves_total_count() {
        let values: Vec<f64> = (0..1000).map(|i| i as f64).collect();
        let bars = histogram_bars(&values, 200);
        assert_eq!(bars.len(), 200);
        let total: f64 = bars.iter().map(|b| b.value).sum();
        assert_eq!(total, 1000.0);
    }

    #[test]
    fn maximum_value_lands_in_last_bin() {
        let values = vec![0.0, 5.0, 10.0];
        let bars = histogram_bars(&values, 10);
        assert_eq!(bars.last().map(|b| b.value), Some(1.0));
    }

    #[test]
    fn degenerate_distribution_gets_one_bar() {
        let values = vec![7.0, 7.0, 7.0];
        let bars = histogram_bars(&values, 50);
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].value, 3.0);
    }

    #[test]
    fn empty_input_gets_no_bars() {
        assert!(histogram_bars(&[], 200).is_empty());
        assert!(histogram_bars(&[1.0], 0).is_empty());
    }

    #[test]
    fn date_axis_round_trips() {
        let date = NaiveDate::from_ymd_opt(2019, 4, 19).unwrap();
        assert_eq!(date_from_days(days_since_epoch(date)), Some(date));
    }
}
