//! # Layout Style
//!
//! Layout-wide appearance settings and the policy enums delegates can
//! override per section or per item.
//!
//! The policies are closed sets. Each has an `Automatic` variant meaning
//! "whatever the layout is configured with", so a delegate only has to
//! speak up for the sections or items it cares about.

use serde::{Deserialize, Serialize};

use crate::geometry::EdgeInsets;

/// How leftover row width is handed to the items in that row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Distribution {
    /// Defer to the layout-wide default. As the layout-wide default itself,
    /// no extra width is given out.
    #[default]
    Automatic,
    /// Split leftover width evenly; whole pixels left after the split go one
    /// at a time to the first items in the row.
    FillEqually,
    /// Give all leftover width to the last item in the row.
    FillLast,
    /// Give leftover width to the last item only when another column of the
    /// same size could not fit in it.
    FillLastWithinColumnDistance,
    /// Items keep their minimum widths; leftover is trailing whitespace.
    None,
}

/// Treatment of the separator drawn beneath each item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeparatorStyle {
    /// Defer to the layout-wide default.
    #[default]
    Automatic,
    /// Leading edge inset by the item's leading layout margin.
    Indented,
    /// Edge to edge across the item.
    FullWidth,
    /// Not drawn. Geometry is still computed.
    Hidden,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64, // 0.0 - 1.0
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const CLEAR: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// The standard hairline separator grey.
    pub const SEPARATOR_GRAY: Color = Color {
        r: 0.784_313_725_5,
        g: 0.780_392_156_9,
        b: 0.8,
        a: 1.0,
    };
}

/// Layout-wide settings for a [`FormLayout`](crate::layout::FormLayout).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    /// Layout margins applied around each item's content. Delegates report
    /// item sizes within these margins; the layout adds them.
    pub item_layout_margins: EdgeInsets,

    /// Device pixels per point. Every allocation snaps to this grid.
    pub screen_scale: f64,

    /// Thickness of item separators. `None` means one device pixel.
    pub separator_width: Option<f64>,

    /// Distribution for sections whose delegate answer is `Automatic`.
    pub distribution: Distribution,

    /// Separator style for items whose delegate answer is `Automatic`.
    pub separator_style: SeparatorStyle,

    /// Force `FullWidth` separators under the first item of each row to
    /// `Indented`.
    pub row_leading_separators_always_indent: bool,

    /// Inset section headers over the first row's top margin, unless the
    /// delegate says otherwise for a section.
    pub wants_inset_headers: bool,

    pub direction: LayoutDirection,

    pub item_separator_color: Option<Color>,

    /// Fill for section item backgrounds. `None` is clear.
    pub section_color: Option<Color>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            item_layout_margins: EdgeInsets::new(16.0, 12.0, 15.0, 12.0),
            screen_scale: 2.0,
            separator_width: None,
            distribution: Distribution::FillEqually,
            separator_style: SeparatorStyle::Indented,
            row_leading_separators_always_indent: true,
            wants_inset_headers: true,
            direction: LayoutDirection::Ltr,
            item_separator_color: Some(Color::SEPARATOR_GRAY),
            section_color: None,
        }
    }
}

impl LayoutConfig {
    /// Screen scale, falling back to 1.0 when unset or nonsensical.
    pub fn scale(&self) -> f64 {
        if self.screen_scale.is_finite() && self.screen_scale > 0.0 {
            self.screen_scale
        } else {
            1.0
        }
    }

    /// Item layout margins snapped down to the pixel grid.
    pub fn resolved_item_margins(&self) -> EdgeInsets {
        self.item_layout_margins.floored_to_scale(self.scale())
    }

    pub fn resolved_separator_width(&self) -> f64 {
        match self.separator_width {
            Some(width) => width.max(0.0),
            None => 1.0 / self.scale(),
        }
    }

    /// The layout-wide separator style. `Automatic` is not a usable default
    /// and reads as `Indented`.
    pub fn resolved_separator_style(&self) -> SeparatorStyle {
        match self.separator_style {
            SeparatorStyle::Automatic => SeparatorStyle::Indented,
            style => style,
        }
    }

    /// Resolve a section's distribution against the layout-wide default.
    pub fn resolve_distribution(&self, requested: Distribution) -> Distribution {
        match (requested, self.distribution) {
            (Distribution::Automatic, Distribution::Automatic) => Distribution::None,
            (Distribution::Automatic, default) => default,
            (requested, _) => requested,
        }
    }

    /// Resolve an item's separator style against the layout-wide default.
    pub fn resolve_separator_style(&self, requested: SeparatorStyle) -> SeparatorStyle {
        match requested {
            SeparatorStyle::Automatic => self.resolved_separator_style(),
            style => style,
        }
    }

    pub fn is_rtl(&self) -> bool {
        self.direction == LayoutDirection::Rtl
    }
}
