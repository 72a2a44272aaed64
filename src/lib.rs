//! # formkit
//!
//! Form layout and search query parsing for records and search clients.
//!
//! Two independent pieces live here:
//!
//! - a **form layout engine** that turns minimum item sizes into a complete,
//!   pixel-aligned placement of items, separators, section headers and
//!   footers, with side-by-side sections and right-to-left support;
//! - a **query parser** that maps free-text search input onto named values
//!   using ordered, typed, validated token definitions.
//!
//! Neither draws anything. The layout engine asks a [`FormLayoutDelegate`]
//! for sizes and hands back frames; the parser hands back a key/value map.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON / delegate)
//!       ↓
//!   [model]      Static form description, a ready-made delegate
//!       ↓
//!   [style]      Layout configuration and policy enums
//!       ↓
//!   [layout]     Grouping, row packing, separators, headers, RTL
//!       ↓
//!   LayoutSnapshot (frames)
//!
//!   query text → [query] → QueryResult (key → value)
//! ```

pub mod error;
pub mod geometry;
pub mod layout;
pub mod model;
pub mod query;
pub mod style;

use std::str::FromStr;

pub use error::FormKitError;
pub use layout::{FormLayout, FormLayoutDelegate, LayoutSnapshot};

use model::LayoutRequest;
use query::{
    DefinitionSelector, IdentifierKind, IdentifierParserDefinition, PersonParserDefinition,
    QueryParser, QueryParserError, QueryResult,
};

/// Lay out a form described by a [`LayoutRequest`] value.
pub fn layout_form(request: &LayoutRequest) -> LayoutSnapshot {
    let mut layout = FormLayout::new(request.config.clone());
    layout.prepare(request.viewport_width, &request.form);
    layout.snapshot().cloned().unwrap_or_else(|| LayoutSnapshot {
        viewport_width: request.viewport_width,
        content_size: geometry::Size::ZERO,
        global_header: None,
        global_footer: None,
        sections: vec![],
    })
}

/// Lay out a form described as a JSON [`LayoutRequest`].
pub fn layout_json(json: &str) -> Result<LayoutSnapshot, FormKitError> {
    let request: LayoutRequest = serde_json::from_str(json)?;
    Ok(layout_form(&request))
}

/// The kinds of search query the built-in definitions understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Person,
    Identifier(IdentifierKind),
    /// A person search field: licence number or name, chosen by shape.
    PersonSearch,
}

impl FromStr for QueryKind {
    type Err = FormKitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "person" => Ok(QueryKind::Person),
            "search" => Ok(QueryKind::PersonSearch),
            "licence" => Ok(QueryKind::Identifier(IdentifierKind::Licence)),
            "registration" => Ok(QueryKind::Identifier(IdentifierKind::Registration)),
            "vin" => Ok(QueryKind::Identifier(IdentifierKind::Vin)),
            "engine" => Ok(QueryKind::Identifier(IdentifierKind::EngineNumber)),
            other => Err(FormKitError::Usage(format!(
                "Unknown query kind '{}'. Expected person, search, licence, registration, vin or engine.",
                other
            ))),
        }
    }
}

/// Parse a search query with one of the built-in definitions.
pub fn parse_query(kind: QueryKind, query: &str) -> Result<QueryResult, FormKitError> {
    let result = match kind {
        QueryKind::Person => QueryParser::new(PersonParserDefinition::new())?.parse(query)?,
        QueryKind::Identifier(identifier) => {
            QueryParser::new(IdentifierParserDefinition::for_query(identifier, query))?
                .parse(query)?
        }
        QueryKind::PersonSearch => {
            let selector = DefinitionSelector::person_search();
            let definition = selector
                .supported_definitions(query)
                .into_iter()
                .next()
                .ok_or_else(|| QueryParserError::TypeNotFound {
                    token: query.trim().to_string(),
                })?;
            QueryParser::new(definition)?.parse(query)?
        }
    };
    Ok(result)
}
