//! # Form Layout Engine
//!
//! Lays out a form: a vertical run of sections, each a grid of items packed
//! into rows, with separators under items, section headers and footers, and
//! an optional global header and footer.
//!
//! ## How a pass works
//!
//! The engine never measures anything itself. It asks a
//! [`FormLayoutDelegate`] for minimum sizes and turns them into frames:
//!
//! 1. Global header band at the top.
//! 2. Sections reporting a minimum width are packed side by side into
//!    groups; every other section gets a band of its own.
//! 3. Per group, the tallest header sets the header band. Headers are
//!    bottom-aligned in it. Inset headers reach down over the first row's
//!    top margin.
//! 4. Per section, items are packed greedily into rows by minimum content
//!    width, then leftover width is handed out by the section's
//!    [`Distribution`](crate::style::Distribution). Row height is the tallest item plus margins.
//! 5. Each item gets a separator directly beneath it. A row adds separator
//!    spacing only if one of its separators is visible.
//! 6. Section item backgrounds span the group's item area; footers go below
//!    the tallest section in the group.
//! 7. Global footer band at the bottom.
//!
//! All of this runs in left-to-right coordinates. For right-to-left
//! layouts the finished attribute set is mirrored in one final step.
//!
//! Every allocated width lands on the device pixel grid, so adjacent cells
//! and separators share edges without anti-aliased seams.

pub mod attributes;
pub mod columns;
pub mod delegate;
pub mod grouping;
pub mod rows;

use serde::Serialize;

use crate::geometry::{ceiled_to_scale, floored_to_scale, rounded_to_scale, EdgeInsets, Rect, Size};
use crate::style::{Color, LayoutConfig, SeparatorStyle};

pub use attributes::*;
pub use delegate::FormLayoutDelegate;

use grouping::{group_sections, SectionSlot};
use rows::{distribute_leftover, pack_rows, RowMetrics};

/// Everything placed for one section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionAttributes {
    pub section: usize,
    /// Area from the top of the group's header band to the bottom of this
    /// section's footer. Used to skip sections in rect queries.
    pub rect: Rect,
    pub header: Option<HeaderAttributes>,
    pub footer: Option<SupplementaryAttributes>,
    pub item_background: DecorationAttributes,
    pub items: Vec<ItemAttributes>,
    pub separators: Vec<DecorationAttributes>,
}

/// The complete result of a layout pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSnapshot {
    pub viewport_width: f64,
    pub content_size: Size,
    pub global_header: Option<SupplementaryAttributes>,
    pub global_footer: Option<SupplementaryAttributes>,
    pub sections: Vec<SectionAttributes>,
}

impl LayoutSnapshot {
    /// Mirror every frame about the viewport's vertical centre line and
    /// swap leading/trailing margins.
    fn mirror(&mut self) {
        let width = self.viewport_width;
        if let Some(header) = self.global_header.as_mut() {
            header.frame = header.frame.rtl_flipped(width);
        }
        if let Some(footer) = self.global_footer.as_mut() {
            footer.frame = footer.frame.rtl_flipped(width);
        }
        for section in &mut self.sections {
            section.rect = section.rect.rtl_flipped(width);
            if let Some(header) = section.header.as_mut() {
                header.frame = header.frame.rtl_flipped(width);
            }
            if let Some(footer) = section.footer.as_mut() {
                footer.frame = footer.frame.rtl_flipped(width);
            }
            section.item_background.frame = section.item_background.frame.rtl_flipped(width);
            for item in &mut section.items {
                item.frame = item.frame.rtl_flipped(width);
                item.layout_margins = item.layout_margins.horizontally_flipped();
            }
            for separator in &mut section.separators {
                separator.frame = separator.frame.rtl_flipped(width);
            }
        }
    }
}

/// A form collection layout.
///
/// Call [`prepare`](Self::prepare) whenever content or the viewport width
/// changes, then read attributes back by index path or by rect. Queries
/// return `None` (or nothing) until the first `prepare`.
#[derive(Debug, Clone, Default)]
pub struct FormLayout {
    config: LayoutConfig,
    prepared: Option<LayoutSnapshot>,
}

impl FormLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            prepared: None,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Replace the configuration. A changed configuration drops the current
    /// attributes; the host must `prepare` again.
    pub fn set_config(&mut self, config: LayoutConfig) {
        if config != self.config {
            self.config = config;
            self.invalidate();
        }
    }

    /// Run a full layout pass, replacing any previous attributes.
    pub fn prepare(&mut self, viewport_width: f64, delegate: &dyn FormLayoutDelegate) {
        let viewport_width = if viewport_width.is_finite() {
            viewport_width.max(0.0)
        } else {
            0.0
        };

        let mut snapshot = LayoutPass::new(&self.config, viewport_width, delegate).run();
        if self.config.is_rtl() {
            snapshot.mirror();
        }

        log::debug!(
            "prepared form layout: {} sections, content {}x{}",
            snapshot.sections.len(),
            snapshot.content_size.width,
            snapshot.content_size.height
        );
        self.prepared = Some(snapshot);
    }

    /// Drop the prepared attributes.
    pub fn invalidate(&mut self) {
        self.prepared = None;
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared.is_some()
    }

    /// Whether moving to `new_width` needs a new pass: the width changed and
    /// the current layout has content.
    pub fn should_invalidate_for_width(&self, new_width: f64) -> bool {
        let Some(prepared) = &self.prepared else {
            return false;
        };
        let has_content = prepared
            .sections
            .last()
            .is_some_and(|section| section.rect.max_y() > 0.0);
        (prepared.viewport_width - new_width).abs() >= 1e-9 && has_content
    }

    pub fn content_size(&self) -> Size {
        self.prepared
            .as_ref()
            .map(|p| p.content_size)
            .unwrap_or(Size::ZERO)
    }

    /// The prepared attribute set, if any.
    pub fn snapshot(&self) -> Option<&LayoutSnapshot> {
        self.prepared.as_ref()
    }

    pub fn sections(&self) -> &[SectionAttributes] {
        self.prepared
            .as_ref()
            .map(|p| p.sections.as_slice())
            .unwrap_or(&[])
    }

    fn section(&self, section: usize) -> Option<&SectionAttributes> {
        self.sections().get(section)
    }

    pub fn item_attributes(&self, index_path: IndexPath) -> Option<&ItemAttributes> {
        self.section(index_path.section)?.items.get(index_path.item)
    }

    pub fn item_separator_attributes(&self, index_path: IndexPath) -> Option<&DecorationAttributes> {
        self.section(index_path.section)?
            .separators
            .get(index_path.item)
    }

    pub fn section_item_background(&self, section: usize) -> Option<&DecorationAttributes> {
        self.section(section).map(|s| &s.item_background)
    }

    pub fn header_attributes(&self, section: usize) -> Option<&HeaderAttributes> {
        self.section(section)?.header.as_ref()
    }

    pub fn footer_attributes(&self, section: usize) -> Option<&SupplementaryAttributes> {
        self.section(section)?.footer.as_ref()
    }

    pub fn global_header(&self) -> Option<&SupplementaryAttributes> {
        self.prepared.as_ref()?.global_header.as_ref()
    }

    pub fn global_footer(&self) -> Option<&SupplementaryAttributes> {
        self.prepared.as_ref()?.global_footer.as_ref()
    }

    /// Every attribute record whose frame intersects `rect`.
    ///
    /// Sections are visited top to bottom and the walk stops at the first
    /// section starting below `rect`.
    pub fn attributes_in_rect(&self, rect: Rect) -> Vec<LayoutAttributes<'_>> {
        let Some(prepared) = &self.prepared else {
            return vec![];
        };

        let mut found = Vec::new();
        if let Some(header) = prepared.global_header.as_ref() {
            if header.frame.intersects(&rect) {
                found.push(LayoutAttributes::Supplementary(header));
            }
        }

        for section in &prepared.sections {
            if section.rect.min_y() > rect.max_y() {
                break;
            }
            if !section.rect.intersects(&rect) {
                continue;
            }

            if let Some(header) = section.header.as_ref() {
                if header.frame.intersects(&rect) {
                    found.push(LayoutAttributes::Header(header));
                }
            }
            if section.item_background.frame.intersects(&rect) {
                found.push(LayoutAttributes::Decoration(&section.item_background));
            }
            for (item, separator) in section.items.iter().zip(&section.separators) {
                if item.frame.min_y() > rect.max_y() {
                    break;
                }
                if item.frame.intersects(&rect) {
                    found.push(LayoutAttributes::Item(item));
                }
                if !separator.is_hidden && separator.frame.intersects(&rect) {
                    found.push(LayoutAttributes::Decoration(separator));
                }
            }
            if let Some(footer) = section.footer.as_ref() {
                if footer.frame.intersects(&rect) {
                    found.push(LayoutAttributes::Supplementary(footer));
                }
            }
        }

        if let Some(footer) = prepared.global_footer.as_ref() {
            if footer.frame.intersects(&rect) {
                found.push(LayoutAttributes::Supplementary(footer));
            }
        }
        found
    }
}

// ── Layout pass ─────────────────────────────────────────────────

/// Clamp a delegate-provided length: non-finite or negative reads as zero.
fn sanitized(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

fn sanitized_insets(insets: EdgeInsets) -> EdgeInsets {
    EdgeInsets::new(
        sanitized(insets.top),
        sanitized(insets.left),
        sanitized(insets.bottom),
        sanitized(insets.right),
    )
}

/// Items and separators of one section, plus the height they take.
struct SectionItems {
    items: Vec<ItemAttributes>,
    separators: Vec<DecorationAttributes>,
    height: f64,
}

/// State for a single `prepare` call. All coordinates are left-to-right.
struct LayoutPass<'a> {
    config: &'a LayoutConfig,
    delegate: &'a dyn FormLayoutDelegate,
    viewport_width: f64,
    scale: f64,
    margins: EdgeInsets,
    separator_width: f64,
    separator_spacing: f64,
    default_separator_style: SeparatorStyle,
    current_y: f64,
}

impl<'a> LayoutPass<'a> {
    fn new(
        config: &'a LayoutConfig,
        viewport_width: f64,
        delegate: &'a dyn FormLayoutDelegate,
    ) -> Self {
        let scale = config.scale();
        let separator_width = config.resolved_separator_width();
        Self {
            config,
            delegate,
            viewport_width,
            scale,
            margins: config.resolved_item_margins(),
            separator_width,
            separator_spacing: ceiled_to_scale(separator_width, scale),
            default_separator_style: config.resolved_separator_style(),
            current_y: 0.0,
        }
    }

    fn run(mut self) -> LayoutSnapshot {
        let global_header = self.place_global_band(
            self.delegate.height_for_global_header(),
            SupplementaryKind::GlobalHeader,
        );

        let section_count = self.delegate.number_of_sections();
        let minimum_widths: Vec<Option<f64>> = (0..section_count)
            .map(|section| self.delegate.minimum_width_for_section(section))
            .collect();
        let groups = group_sections(&minimum_widths, self.viewport_width, self.scale);

        let mut sections = Vec::with_capacity(section_count);
        for group in &groups {
            sections.extend(self.layout_group(group));
        }

        let global_footer = self.place_global_band(
            self.delegate.height_for_global_footer(),
            SupplementaryKind::GlobalFooter,
        );

        LayoutSnapshot {
            viewport_width: self.viewport_width,
            content_size: Size::new(self.viewport_width, self.current_y),
            global_header,
            global_footer,
            sections,
        }
    }

    fn place_global_band(
        &mut self,
        height: f64,
        kind: SupplementaryKind,
    ) -> Option<SupplementaryAttributes> {
        let height = ceiled_to_scale(sanitized(height), self.scale);
        if height <= 0.0 {
            return None;
        }
        let frame = Rect::new(0.0, self.current_y, self.viewport_width, height);
        self.current_y += height;
        Some(SupplementaryAttributes {
            kind,
            index_path: IndexPath::new(0, 0),
            frame,
            z_index: Z_INDEX_SUPPLEMENTARY,
        })
    }

    fn header_height(&self, section: usize, width: f64) -> f64 {
        ceiled_to_scale(sanitized(self.delegate.height_for_header(section, width)), self.scale)
    }

    fn footer_height(&self, section: usize, width: f64) -> f64 {
        ceiled_to_scale(sanitized(self.delegate.height_for_footer(section, width)), self.scale)
    }

    fn layout_group(&mut self, group: &[SectionSlot]) -> Vec<SectionAttributes> {
        let start_of_headers = self.current_y;

        let insets: Vec<EdgeInsets> = group
            .iter()
            .map(|slot| sanitized_insets(self.delegate.inset_for_section(slot.section, slot.width)))
            .collect();
        let header_heights: Vec<f64> = group
            .iter()
            .map(|slot| self.header_height(slot.section, slot.width))
            .collect();

        // Headers
        let band_height = header_heights.iter().copied().fold(0.0, f64::max);
        self.current_y += band_height;
        let band_bottom = self.current_y;

        let mut indent_added = false;
        let mut headers = Vec::with_capacity(group.len());
        for ((slot, &height), section_insets) in group.iter().zip(&header_heights).zip(&insets) {
            if height <= 0.0 {
                headers.push(None);
                continue;
            }

            let mut frame = Rect::new(slot.x, band_bottom - height, slot.width, height);
            let mut item_position = None;
            let wants_inset = self
                .delegate
                .wants_inset_header(slot.section)
                .unwrap_or(self.config.wants_inset_headers);
            if wants_inset {
                if !indent_added {
                    self.current_y += self.separator_spacing;
                    indent_added = true;
                }
                frame.height += self.separator_spacing;
                item_position = Some(frame.height);
                frame.height += self.margins.top;
            }

            let leading_margin = if section_insets.left == 0.0 {
                self.margins.left
            } else {
                section_insets.left
            };
            headers.push(Some(HeaderAttributes {
                index_path: IndexPath::new(slot.section, 0),
                frame,
                z_index: Z_INDEX_SUPPLEMENTARY,
                leading_margin,
                separator_width: self.separator_width,
                item_position,
            }));
        }

        // Items
        let start_of_items = self.current_y;
        let mut section_items = Vec::with_capacity(group.len());
        let mut tallest = 0.0_f64;
        for (slot, section_insets) in group.iter().zip(&insets) {
            let laid_out = self.layout_section_items(slot, start_of_items, *section_insets);
            tallest = tallest.max(laid_out.height);
            section_items.push(laid_out);
        }
        if tallest == 0.0 && indent_added {
            tallest += ceiled_to_scale(self.margins.top, self.scale);
        }
        self.current_y += tallest;
        let end_of_items = self.current_y;

        // Backgrounds and footers
        let background_color = Some(self.config.section_color.unwrap_or(Color::CLEAR));
        let mut largest_footer = 0.0_f64;
        let mut sections = Vec::with_capacity(group.len());
        for ((slot, header), laid_out) in group.iter().zip(headers).zip(section_items) {
            let index_path = IndexPath::new(slot.section, 0);
            let item_background = DecorationAttributes {
                index_path,
                kind: DecorationKind::SectionItemBackground,
                frame: Rect::new(slot.x, start_of_items, slot.width, end_of_items - start_of_items),
                is_hidden: false,
                background_color,
                z_index: Z_INDEX_BACKGROUND,
            };

            let footer_height = self.footer_height(slot.section, slot.width);
            largest_footer = largest_footer.max(footer_height);
            let footer = (footer_height > 0.0).then(|| SupplementaryAttributes {
                kind: SupplementaryKind::SectionFooter,
                index_path,
                frame: Rect::new(slot.x, end_of_items, slot.width, footer_height),
                z_index: Z_INDEX_SUPPLEMENTARY,
            });

            sections.push(SectionAttributes {
                section: slot.section,
                rect: Rect::new(
                    slot.x,
                    start_of_headers,
                    slot.width,
                    end_of_items + footer_height - start_of_headers,
                ),
                header,
                footer,
                item_background,
                items: laid_out.items,
                separators: laid_out.separators,
            });
        }
        self.current_y += largest_footer;

        sections
    }

    /// Pack and place one section's items, starting at `origin_y`.
    fn layout_section_items(
        &self,
        slot: &SectionSlot,
        origin_y: f64,
        insets: EdgeInsets,
    ) -> SectionItems {
        let section = slot.section;
        let margins = self.margins;
        let distribution = self
            .config
            .resolve_distribution(self.delegate.distribution_for_section(section));

        let leading_inset = rounded_to_scale(insets.left, self.scale);
        let trailing_inset = rounded_to_scale(insets.right, self.scale);
        let metrics = RowMetrics {
            available_width: (slot.width - leading_inset - trailing_inset).max(0.0),
            leading_outer: if leading_inset == 0.0 { margins.left } else { 0.0 },
            trailing_outer: if trailing_inset == 0.0 { margins.right } else { 0.0 },
            inter_item: margins.left + margins.right,
        };
        let maximum_width = metrics.maximum_item_width();

        let item_count = self.delegate.number_of_items(section);
        let minimum_widths: Vec<f64> = (0..item_count)
            .map(|item| {
                let width = self.delegate.minimum_content_width_for_item(
                    IndexPath::new(section, item),
                    slot.width,
                    insets,
                );
                floored_to_scale(sanitized(width), self.scale).min(maximum_width)
            })
            .collect();

        let mut items = Vec::with_capacity(item_count);
        let mut separators = Vec::with_capacity(item_count);
        let mut y = origin_y;

        if item_count > 0 {
            y += rounded_to_scale(insets.top, self.scale);
        }

        let section_end = slot.x + slot.width;
        for row in pack_rows(&minimum_widths, &metrics) {
            let count = row.len();
            let mut widths = minimum_widths[row.start..row.end].to_vec();
            let minimum_total: f64 = widths.iter().sum();
            let leftover =
                (metrics.available_width - metrics.inset_space(count) - minimum_total).max(0.0);
            distribute_leftover(
                &mut widths,
                leftover,
                distribution,
                metrics.inter_item,
                self.scale,
            );

            let content_height = widths
                .iter()
                .enumerate()
                .map(|(offset, &width)| {
                    let index_path = IndexPath::new(section, row.start + offset);
                    let height = self
                        .delegate
                        .minimum_content_height_for_item(index_path, width);
                    ceiled_to_scale(sanitized(height), self.scale)
                })
                .fold(0.0, f64::max);
            let row_height = content_height + margins.top + margins.bottom;

            log::trace!(
                "section {} row {}..{}: leftover {} ({:?}), height {}",
                section,
                row.start,
                row.end,
                leftover,
                distribution,
                row_height
            );

            let mut x = slot.x;
            let mut row_has_visible_separator = false;
            for (row_index, &content_width) in widths.iter().enumerate() {
                let index_path = IndexPath::new(section, row.start + row_index);
                let is_first = row_index == 0;
                let is_last = row_index + 1 == count;

                let mut item_margins = margins;
                if is_first && leading_inset != 0.0 {
                    item_margins.left = leading_inset;
                }
                if is_last && trailing_inset != 0.0 {
                    item_margins.right = trailing_inset;
                }
                if is_last {
                    let overflow = x + item_margins.left + content_width + item_margins.right
                        - section_end;
                    if overflow > 0.0 {
                        item_margins.right = (item_margins.right - overflow).max(0.0);
                    }
                }

                let frame = Rect::new(
                    x,
                    y,
                    item_margins.left + content_width + item_margins.right,
                    row_height,
                );
                x = frame.max_x();

                let separator = self.separator_for(index_path, frame, &item_margins, is_first);
                if !separator.is_hidden {
                    row_has_visible_separator = true;
                }
                separators.push(separator);

                items.push(ItemAttributes {
                    index_path,
                    frame,
                    layout_margins: item_margins,
                    z_index: Z_INDEX_ITEM,
                    row_index,
                    row_item_count: count,
                    is_at_trailing_edge: (frame.max_x() - self.viewport_width).abs() < 0.5,
                });
            }

            y += row_height;
            if row_has_visible_separator {
                y += self.separator_spacing;
            }
        }

        y += rounded_to_scale(insets.bottom, self.scale);

        SectionItems {
            items,
            separators,
            height: y - origin_y,
        }
    }

    fn separator_for(
        &self,
        index_path: IndexPath,
        item_frame: Rect,
        item_margins: &EdgeInsets,
        leads_row: bool,
    ) -> DecorationAttributes {
        let always_indent = leads_row && self.config.row_leading_separators_always_indent;

        let mut style = self
            .config
            .resolve_separator_style(self.delegate.separator_style_for_item(index_path));
        if style == SeparatorStyle::FullWidth && always_indent {
            style = SeparatorStyle::Indented;
        }

        let indented = match style {
            SeparatorStyle::Indented => true,
            SeparatorStyle::Hidden => {
                self.default_separator_style == SeparatorStyle::Indented || always_indent
            }
            _ => false,
        };

        let mut frame = Rect::new(
            item_frame.x,
            item_frame.max_y(),
            item_frame.width,
            self.separator_width,
        );
        if indented {
            frame.x += item_margins.left;
            frame.width = (frame.width - item_margins.left).max(0.0);
        }

        DecorationAttributes {
            index_path,
            kind: DecorationKind::ItemSeparator,
            frame,
            is_hidden: style == SeparatorStyle::Hidden,
            background_color: self.config.item_separator_color,
            z_index: Z_INDEX_SEPARATOR,
        }
    }
}
