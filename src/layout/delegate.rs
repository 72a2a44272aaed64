//! The sizing callbacks a [`FormLayout`](super::FormLayout) asks of its host.
//!
//! Every method must be a pure function of the host's current content: the
//! layout may call them in any order, any number of times, within one pass.

use crate::geometry::EdgeInsets;
use crate::style::{Distribution, SeparatorStyle};

use super::attributes::IndexPath;

/// Sizing source for a form layout.
///
/// Item sizes are *content* sizes: the layout adds the item layout margins
/// (or section insets) itself. Methods with default bodies are optional.
pub trait FormLayoutDelegate {
    fn number_of_sections(&self) -> usize;

    fn number_of_items(&self, section: usize) -> usize;

    /// Insets for the section's item area, given the width the section was
    /// allotted. A zero leading/trailing inset means "use the item margin".
    fn inset_for_section(&self, section: usize, section_width: f64) -> EdgeInsets;

    /// Height of the section header. Zero or less means no header.
    fn height_for_header(&self, section: usize, section_width: f64) -> f64;

    /// Height of the section footer. Zero or less means no footer.
    fn height_for_footer(&self, section: usize, section_width: f64) -> f64;

    fn minimum_content_width_for_item(
        &self,
        index_path: IndexPath,
        section_width: f64,
        section_insets: EdgeInsets,
    ) -> f64;

    fn minimum_content_height_for_item(&self, index_path: IndexPath, content_width: f64) -> f64;

    /// Minimum width the section needs, to allow placing sections side by
    /// side. `None` gives the section the full viewport width.
    fn minimum_width_for_section(&self, _section: usize) -> Option<f64> {
        None
    }

    fn distribution_for_section(&self, _section: usize) -> Distribution {
        Distribution::Automatic
    }

    fn separator_style_for_item(&self, _index_path: IndexPath) -> SeparatorStyle {
        SeparatorStyle::Automatic
    }

    /// Whether the section header should inset over the first row's top
    /// margin. `None` uses the layout-wide setting.
    fn wants_inset_header(&self, _section: usize) -> Option<bool> {
        None
    }

    /// Height of the global header. Zero or less means none.
    fn height_for_global_header(&self) -> f64 {
        0.0
    }

    /// Height of the global footer. Zero or less means none.
    fn height_for_global_footer(&self) -> f64 {
        0.0
    }
}
