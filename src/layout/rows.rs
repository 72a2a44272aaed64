//! # Row Packing Utilities
//!
//! Helpers for the item pass. The main row logic lives in the layout
//! engine's `layout_section_items`; this module provides the lower-level
//! packing and leftover-width calculations.

use crate::style::Distribution;

/// A run of consecutive items sharing one row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowSpan {
    /// Index of the first item in this row.
    pub start: usize,
    /// One past the last item (exclusive end).
    pub end: usize,
}

impl RowSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Horizontal spacing rules for one section's rows.
#[derive(Debug, Clone, Copy)]
pub struct RowMetrics {
    /// Width available to the row: section width minus section insets.
    pub available_width: f64,
    /// Extra leading space the first item needs (the item leading margin
    /// when the section has no leading inset, otherwise zero).
    pub leading_outer: f64,
    /// Extra trailing space the last item needs.
    pub trailing_outer: f64,
    /// Space between two adjacent items' content (trailing + leading margin).
    pub inter_item: f64,
}

impl RowMetrics {
    /// Widest content a single item may have.
    pub fn maximum_item_width(&self) -> f64 {
        (self.available_width - self.leading_outer - self.trailing_outer).max(0.0)
    }

    /// Space taken by margins in a row of `count` items.
    pub fn inset_space(&self, count: usize) -> f64 {
        if count == 0 {
            return 0.0;
        }
        (count - 1) as f64 * self.inter_item + self.leading_outer + self.trailing_outer
    }
}

/// Partition items into rows based on their minimum content widths.
/// Always places at least one item per row, so an oversized item gets a row
/// of its own instead of looping forever.
pub fn pack_rows(content_widths: &[f64], metrics: &RowMetrics) -> Vec<RowSpan> {
    if content_widths.is_empty() {
        return vec![];
    }

    let limit = metrics.available_width.ceil();
    let mut rows = Vec::new();
    let mut row_start = 0;
    let mut row_width = 0.0;

    for (i, &w) in content_widths.iter().enumerate() {
        let proposed = if i == row_start {
            w + metrics.leading_outer
        } else {
            row_width + metrics.inter_item + w
        };
        if i > row_start && proposed + metrics.trailing_outer > limit {
            rows.push(RowSpan {
                start: row_start,
                end: i,
            });
            row_start = i;
            row_width = w + metrics.leading_outer;
        } else {
            row_width = proposed;
        }
    }

    // Close the last row
    rows.push(RowSpan {
        start: row_start,
        end: content_widths.len(),
    });

    rows
}

/// Hand out `leftover` width to a row's items according to `distribution`.
///
/// `widths` are the items' content widths and are adjusted in place.
/// `FillEqually` works in whole device pixels: every item gets the floored
/// share, and the pixels that remain go one each to the first items.
pub fn distribute_leftover(
    widths: &mut [f64],
    leftover: f64,
    distribution: Distribution,
    inter_item: f64,
    scale: f64,
) {
    if widths.is_empty() || leftover <= 0.0 {
        return;
    }
    match distribution {
        Distribution::FillEqually => {
            let count = widths.len() as f64;
            let pixels = (leftover * scale + 1e-6).floor();
            let per_item = (pixels / count).floor();
            let remainder = (pixels - per_item * count) as usize;
            for (i, width) in widths.iter_mut().enumerate() {
                let extra = if i < remainder { per_item + 1.0 } else { per_item };
                *width += extra / scale;
            }
        }
        Distribution::FillLast => {
            if let Some(last) = widths.last_mut() {
                *last += leftover;
            }
        }
        Distribution::FillLastWithinColumnDistance => {
            if let Some(last) = widths.last_mut() {
                // If another column this size would fit, leave the gap.
                if *last + inter_item > leftover {
                    *last += leftover;
                }
            }
        }
        Distribution::None | Distribution::Automatic => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(available: f64) -> RowMetrics {
        RowMetrics {
            available_width: available,
            leading_outer: 10.0,
            trailing_outer: 10.0,
            inter_item: 20.0,
        }
    }

    #[test]
    fn test_pack_single_row_fits() {
        // 10 + 100 + 20 + 100 + 20 + 100 + 10 = 360
        let rows = pack_rows(&[100.0, 100.0, 100.0], &metrics(400.0));
        assert_eq!(rows, vec![RowSpan { start: 0, end: 3 }]);
    }

    #[test]
    fn test_pack_two_row_split() {
        let rows = pack_rows(&[100.0, 100.0, 100.0], &metrics(300.0));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], RowSpan { start: 0, end: 2 });
        assert_eq!(rows[1], RowSpan { start: 2, end: 3 });
    }

    #[test]
    fn test_pack_exact_fit() {
        // 10 + 100 + 20 + 100 + 10 = 240
        let rows = pack_rows(&[100.0, 100.0], &metrics(240.0));
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_pack_oversized_item_alone() {
        let rows = pack_rows(&[50.0, 500.0, 50.0], &metrics(200.0));
        assert_eq!(
            rows,
            vec![
                RowSpan { start: 0, end: 1 },
                RowSpan { start: 1, end: 2 },
                RowSpan { start: 2, end: 3 },
            ]
        );
    }

    #[test]
    fn test_pack_empty_input() {
        assert!(pack_rows(&[], &metrics(200.0)).is_empty());
    }

    #[test]
    fn test_fill_equally_spreads_remainder_pixels() {
        // 10pt at scale 2 is 20px; 20 / 3 = 6 each, 2 px left over.
        let mut widths = vec![50.0, 50.0, 50.0];
        distribute_leftover(&mut widths, 10.0, Distribution::FillEqually, 20.0, 2.0);
        assert_eq!(widths, vec![53.5, 53.5, 53.0]);
        let total: f64 = widths.iter().sum();
        assert!((total - 160.0).abs() < 1e-9);
    }

    #[test]
    fn test_fill_last_takes_everything() {
        let mut widths = vec![50.0, 50.0];
        distribute_leftover(&mut widths, 30.0, Distribution::FillLast, 20.0, 2.0);
        assert_eq!(widths, vec![50.0, 80.0]);
    }

    #[test]
    fn test_fill_last_within_column_distance() {
        // Another 50 + 20 column would fit in 100 leftover: leave the gap.
        let mut widths = vec![50.0, 50.0];
        distribute_leftover(
            &mut widths,
            100.0,
            Distribution::FillLastWithinColumnDistance,
            20.0,
            2.0,
        );
        assert_eq!(widths, vec![50.0, 50.0]);

        let mut widths = vec![50.0, 50.0];
        distribute_leftover(
            &mut widths,
            60.0,
            Distribution::FillLastWithinColumnDistance,
            20.0,
            2.0,
        );
        assert_eq!(widths, vec![50.0, 110.0]);
    }

    #[test]
    fn test_no_distribution_keeps_minimums() {
        let mut widths = vec![50.0, 50.0];
        distribute_leftover(&mut widths, 30.0, Distribution::None, 20.0, 2.0);
        assert_eq!(widths, vec![50.0, 50.0]);
    }
}
