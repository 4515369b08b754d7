//! The 12-month window of calendar months around an anchor.

use power_forecast_features_models::CalendarMonth;

/// Months predicted before the anchor.
pub const MONTHS_BEFORE: i32 = 5;

/// Months predicted after the anchor.
pub const MONTHS_AFTER: i32 = 6;

/// Total months in a prediction window, anchor included.
pub const WINDOW_LEN: usize = 12;

/// Returns the months from `anchor - 5` through `anchor + 6`, in
/// chronological order.
#[must_use]
pub fn window_months(anchor: CalendarMonth) -> Vec<CalendarMonth> {
    (-MONTHS_BEFORE..=MONTHS_AFTER)
        .map(|offset| anchor.offset(offset))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(year: i32, month: i64) -> CalendarMonth {
        CalendarMonth::new(year, month).unwrap()
    }

    #[test]
    fn window_has_fixed_length_and_anchor_at_index_five() {
        let anchor = month(2024, 6);
        let months = window_months(anchor);
        assert_eq!(months.len(), WINDOW_LEN);
        assert_eq!(months[5], anchor);
    }

    #[test]
    fn window_is_contiguous_for_every_month_of_the_year() {
        for m in 1..=12 {
            let months = window_months(month(2024, m));
            for pair in months.windows(2) {
                assert!(pair[0] < pair[1]);
                assert_eq!(pair[0].offset(1), pair[1]);
            }
        }
    }

    #[test]
    fn window_crosses_year_boundaries() {
        let months = window_months(month(2024, 2));
        assert_eq!(months.first(), Some(&month(2023, 9)));
        assert_eq!(months.last(), Some(&month(2024, 8)));

        let months = window_months(month(2024, 11));
        assert_eq!(months.first(), Some(&month(2024, 6)));
        assert_eq!(months.last(), Some(&month(2025, 5)));
    }
}
