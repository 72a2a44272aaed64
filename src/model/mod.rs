//! # Form Model
//!
//! A static, serializable description of a form. This is what the CLI and
//! `layout_json` take as input, and it is the simplest complete
//! [`FormLayoutDelegate`]: every size is given up front instead of being
//! measured from cell content.
//!
//! ```json
//! {
//!   "viewportWidth": 768,
//!   "config": { "distribution": "FillEqually" },
//!   "form": {
//!     "sections": [
//!       {
//!         "headerHeight": 32,
//!         "items": [
//!           { "minimumWidth": 200, "height": 44 },
//!           { "minimumWidth": 200, "height": 44, "separatorStyle": "FullWidth" }
//!         ]
//!       }
//!     ]
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::geometry::EdgeInsets;
use crate::layout::{FormLayoutDelegate, IndexPath};
use crate::style::{Distribution, LayoutConfig, SeparatorStyle};

/// A layout job: a form, the width to lay it out at, and the settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRequest {
    pub viewport_width: f64,

    #[serde(default)]
    pub config: LayoutConfig,

    pub form: FormDescription,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDescription {
    #[serde(default)]
    pub global_header_height: f64,

    #[serde(default)]
    pub global_footer_height: f64,

    #[serde(default)]
    pub sections: Vec<SectionDescription>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDescription {
    /// Section insets. Zero leading/trailing insets fall back to item margins.
    #[serde(default)]
    pub inset: EdgeInsets,

    #[serde(default)]
    pub header_height: f64,

    #[serde(default)]
    pub footer_height: f64,

    /// Minimum width, for placing sections side by side. Omit to take the
    /// full viewport width.
    #[serde(default)]
    pub minimum_width: Option<f64>,

    #[serde(default)]
    pub distribution: Distribution,

    #[serde(default)]
    pub wants_inset_header: Option<bool>,

    #[serde(default)]
    pub items: Vec<ItemDescription>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDescription {
    /// Minimum content width, excluding layout margins.
    #[serde(default)]
    pub minimum_width: f64,

    /// Content height, excluding layout margins.
    #[serde(default)]
    pub height: f64,

    #[serde(default)]
    pub separator_style: SeparatorStyle,
}

impl ItemDescription {
    pub fn new(minimum_width: f64, height: f64) -> Self {
        Self {
            minimum_width,
            height,
            separator_style: SeparatorStyle::Automatic,
        }
    }
}

impl FormDescription {
    fn item(&self, index_path: IndexPath) -> Option<&ItemDescription> {
        self.sections.get(index_path.section)?.items.get(index_path.item)
    }
}

impl FormLayoutDelegate for FormDescription {
    fn number_of_sections(&self) -> usize {
        self.sections.len()
    }

    fn number_of_items(&self, section: usize) -> usize {
        self.sections.get(section).map_or(0, |s| s.items.len())
    }

    fn inset_for_section(&self, section: usize, _section_width: f64) -> EdgeInsets {
        self.sections.get(section).map_or(EdgeInsets::ZERO, |s| s.inset)
    }

    fn height_for_header(&self, section: usize, _section_width: f64) -> f64 {
        self.sections.get(section).map_or(0.0, |s| s.header_height)
    }

    fn height_for_footer(&self, section: usize, _section_width: f64) -> f64 {
        self.sections.get(section).map_or(0.0, |s| s.footer_height)
    }

    fn minimum_content_width_for_item(
        &self,
        index_path: IndexPath,
        _section_width: f64,
        _section_insets: EdgeInsets,
    ) -> f64 {
        self.item(index_path).map_or(0.0, |i| i.minimum_width)
    }

    fn minimum_content_height_for_item(&self, index_path: IndexPath, _content_width: f64) -> f64 {
        self.item(index_path).map_or(0.0, |i| i.height)
    }

    fn minimum_width_for_section(&self, section: usize) -> Option<f64> {
        self.sections.get(section)?.minimum_width
    }

    fn distribution_for_section(&self, section: usize) -> Distribution {
        self.sections
            .get(section)
            .map(|s| s.distribution)
            .unwrap_or_default()
    }

    fn separator_style_for_item(&self, index_path: IndexPath) -> SeparatorStyle {
        self.item(index_path)
            .map(|i| i.separator_style)
            .unwrap_or_default()
    }

    fn wants_inset_header(&self, section: usize) -> Option<bool> {
        self.sections.get(section)?.wants_inset_header
    }

    fn height_for_global_header(&self) -> f64 {
        self.global_header_height
    }

    fn height_for_global_footer(&self) -> f64 {
        self.global_footer_height
    }
}
