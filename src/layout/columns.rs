//! Column conveniences for delegates.
//!
//! Forms often want a column grid: items sized so that a section holds a
//! whole number of equal columns. These helpers compute the content widths
//! to report from `minimum_content_width_for_item` so that rows pack into
//! exactly those columns.
//!
//! All results are sub-pixel accurate. The layout floors them to the pixel
//! grid when it uses them.

use crate::geometry::EdgeInsets;
use crate::style::LayoutConfig;

/// Column math for one section width and set of item margins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Columns {
    section_width: f64,
    item_margins: EdgeInsets,
}

impl Columns {
    pub fn new(section_width: f64, config: &LayoutConfig) -> Self {
        Self::with_margins(section_width, config.resolved_item_margins())
    }

    pub fn with_margins(section_width: f64, item_margins: EdgeInsets) -> Self {
        Self {
            section_width: section_width.max(0.0),
            item_margins,
        }
    }

    fn horizontal_margins(&self) -> f64 {
        self.item_margins.horizontal()
    }

    /// The section width as if its leading and trailing insets were the
    /// standard item margins. Each column then spans content plus margins.
    pub fn section_width_with_standard_margins(&self, section_insets: &EdgeInsets) -> f64 {
        let mut width = self.section_width;
        if section_insets.left != 0.0 {
            width -= section_insets.left - self.item_margins.left;
        }
        if section_insets.right != 0.0 {
            width -= section_insets.right - self.item_margins.right;
        }
        width
    }

    /// Content width of each column when the section holds `column_count`
    /// columns.
    pub fn column_content_width(&self, column_count: usize, section_insets: &EdgeInsets) -> f64 {
        let total = self.section_width_with_standard_margins(section_insets);
        total / column_count.max(1) as f64 - self.horizontal_margins()
    }

    /// How many columns of at least `minimum_content_width` fit. Never less
    /// than one.
    pub fn column_count_for_section(
        &self,
        minimum_content_width: f64,
        section_insets: &EdgeInsets,
    ) -> usize {
        let column_total = minimum_content_width.max(0.0) + self.horizontal_margins();
        if column_total <= 0.0 {
            return 1;
        }
        let total = self.section_width_with_standard_margins(section_insets);
        ((total / column_total).floor() as usize).max(1)
    }

    /// Column content width when columns are derived from a minimum item
    /// content width, capped at `maximum_columns`.
    pub fn column_content_width_for_minimum(
        &self,
        minimum_content_width: f64,
        maximum_columns: usize,
        section_insets: &EdgeInsets,
    ) -> f64 {
        let columns = self
            .column_count_for_section(minimum_content_width, section_insets)
            .min(maximum_columns.max(1));
        self.column_content_width(columns, section_insets)
    }

    /// Content width of an item spanning `filling_columns` of the section's
    /// `section_columns`. The margins between merged columns become content.
    pub fn item_content_width(
        &self,
        filling_columns: usize,
        section_columns: usize,
        section_insets: &EdgeInsets,
    ) -> f64 {
        let column_width = self.column_content_width(section_columns, section_insets);
        if filling_columns <= 1 {
            return column_width;
        }
        let extra = (column_width + self.horizontal_margins()) * (filling_columns - 1) as f64;
        column_width + extra
    }

    /// Content width of an item that spans as many whole columns as it needs
    /// to reach `minimum_content_width`, up to the full section.
    pub fn item_content_width_filling_columns(
        &self,
        minimum_content_width: f64,
        section_columns: usize,
        section_insets: &EdgeInsets,
    ) -> f64 {
        let column_width = self.column_content_width(section_columns, section_insets);
        if minimum_content_width <= 0.0 {
            return column_width;
        }
        let column_total = column_width + self.horizontal_margins();
        if column_total <= 0.0 {
            return column_width;
        }
        let needed = ((minimum_content_width + self.horizontal_margins()) / column_total).ceil();
        let spanned = needed.clamp(1.0, section_columns.max(1) as f64);
        spanned * column_total - self.horizontal_margins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Columns {
        Columns::with_margins(600.0, EdgeInsets::new(10.0, 10.0, 10.0, 10.0))
    }

    #[test]
    fn test_column_content_width() {
        let c = columns();
        assert_eq!(c.column_content_width(3, &EdgeInsets::ZERO), 180.0);
        assert_eq!(c.column_content_width(0, &EdgeInsets::ZERO), 580.0);
    }

    #[test]
    fn test_standard_margins_account_for_section_insets() {
        let c = columns();
        let insets = EdgeInsets::new(0.0, 30.0, 0.0, 20.0);
        // 600 - (30 - 10) - (20 - 10)
        assert_eq!(c.section_width_with_standard_margins(&insets), 570.0);
        assert_eq!(c.section_width_with_standard_margins(&EdgeInsets::ZERO), 600.0);
    }

    #[test]
    fn test_column_count() {
        let c = columns();
        assert_eq!(c.column_count_for_section(180.0, &EdgeInsets::ZERO), 3);
        assert_eq!(c.column_count_for_section(181.0, &EdgeInsets::ZERO), 2);
        assert_eq!(c.column_count_for_section(5000.0, &EdgeInsets::ZERO), 1);
    }

    #[test]
    fn test_column_width_for_minimum_respects_cap() {
        let c = columns();
        // Five 120pt columns fit 600 exactly.
        assert_eq!(
            c.column_content_width_for_minimum(100.0, usize::MAX, &EdgeInsets::ZERO),
            100.0
        );
        assert_eq!(
            c.column_content_width_for_minimum(101.0, usize::MAX, &EdgeInsets::ZERO),
            130.0
        );
        assert_eq!(
            c.column_content_width_for_minimum(100.0, 2, &EdgeInsets::ZERO),
            280.0
        );
    }

    #[test]
    fn test_item_spanning_columns() {
        let c = columns();
        assert_eq!(c.item_content_width(1, 3, &EdgeInsets::ZERO), 180.0);
        // Two columns: 180 + 200 from the merged column.
        assert_eq!(c.item_content_width(2, 3, &EdgeInsets::ZERO), 380.0);
        assert_eq!(c.item_content_width(3, 3, &EdgeInsets::ZERO), 580.0);
    }

    #[test]
    fn test_item_filling_columns_for_minimum() {
        let c = columns();
        assert_eq!(
            c.item_content_width_filling_columns(0.0, 3, &EdgeInsets::ZERO),
            180.0
        );
        assert_eq!(
            c.item_content_width_filling_columns(250.0, 3, &EdgeInsets::ZERO),
            380.0
        );
        assert_eq!(
            c.item_content_width_filling_columns(9000.0, 3, &EdgeInsets::ZERO),
            580.0
        );
    }
}
