//! Positioning records produced by a layout pass.
//!
//! Items, decorations (separators and section item backgrounds) and
//! supplementary views (section headers/footers, global header/footer) each
//! get their own record type. The rendering surface borrows them from the
//! [`FormLayout`](super::FormLayout) and must not keep them past the next
//! `prepare`.

use serde::Serialize;

use crate::geometry::{EdgeInsets, Rect};
use crate::style::Color;

pub const Z_INDEX_BACKGROUND: i32 = 0;
pub const Z_INDEX_ITEM: i32 = 1;
pub const Z_INDEX_SUPPLEMENTARY: i32 = 1;
pub const Z_INDEX_SEPARATOR: i32 = 2;

/// Position of an item: section, then item within the section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct IndexPath {
    pub section: usize,
    pub item: usize,
}

impl IndexPath {
    pub fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DecorationKind {
    ItemSeparator,
    SectionItemBackground,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SupplementaryKind {
    GlobalHeader,
    GlobalFooter,
    SectionFooter,
}

/// Placement of one item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemAttributes {
    pub index_path: IndexPath,
    pub frame: Rect,
    /// Margins the cell should lay its content out within.
    pub layout_margins: EdgeInsets,
    pub z_index: i32,
    /// Index of the item within its row.
    pub row_index: usize,
    pub row_item_count: usize,
    /// Whether the frame reaches the trailing edge of the viewport.
    pub is_at_trailing_edge: bool,
}

impl ItemAttributes {
    /// The content area: the frame minus the layout margins.
    pub fn content_frame(&self) -> Rect {
        self.frame.inset_by(&self.layout_margins)
    }
}

/// Placement of a decoration view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecorationAttributes {
    pub index_path: IndexPath,
    pub kind: DecorationKind,
    pub frame: Rect,
    pub is_hidden: bool,
    pub background_color: Option<Color>,
    pub z_index: i32,
}

/// Placement of a section header.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderAttributes {
    pub index_path: IndexPath,
    pub frame: Rect,
    pub z_index: i32,
    /// Leading margin header content should align with: the section's
    /// leading inset, or the item leading margin when the section has none.
    pub leading_margin: f64,
    pub separator_width: f64,
    /// For inset headers, the offset from the top of the header frame at
    /// which the first row's frame begins.
    pub item_position: Option<f64>,
}

/// Placement of a section footer or global header/footer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplementaryAttributes {
    pub kind: SupplementaryKind,
    pub index_path: IndexPath,
    pub frame: Rect,
    pub z_index: i32,
}

/// A borrowed view of any attribute record, as returned by rect queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutAttributes<'a> {
    Item(&'a ItemAttributes),
    Decoration(&'a DecorationAttributes),
    Header(&'a HeaderAttributes),
    Supplementary(&'a SupplementaryAttributes),
}

impl LayoutAttributes<'_> {
    pub fn frame(&self) -> Rect {
        match self {
            LayoutAttributes::Item(a) => a.frame,
            LayoutAttributes::Decoration(a) => a.frame,
            LayoutAttributes::Header(a) => a.frame,
            LayoutAttributes::Supplementary(a) => a.frame,
        }
    }

    pub fn index_path(&self) -> IndexPath {
        match self {
            LayoutAttributes::Item(a) => a.index_path,
            LayoutAttributes::Decoration(a) => a.index_path,
            LayoutAttributes::Header(a) => a.index_path,
            LayoutAttributes::Supplementary(a) => a.index_path,
        }
    }

    pub fn z_index(&self) -> i32 {
        match self {
            LayoutAttributes::Item(a) => a.z_index,
            LayoutAttributes::Decoration(a) => a.z_index,
            LayoutAttributes::Header(a) => a.z_index,
            LayoutAttributes::Supplementary(a) => a.z_index,
        }
    }
}
