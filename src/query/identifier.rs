//! Single-value identifier searches: licence numbers, vehicle registrations,
//! VINs and engine numbers.
//!
//! The whole query is one alphanumeric token whose length must fall in a
//! range. Wildcard definitions also accept `*`, usually with a looser
//! lower bound so partial identifiers can be searched.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{ParserDefinition, TokenDefinition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentifierKind {
    Licence,
    Registration,
    Vin,
    EngineNumber,
}

impl IdentifierKind {
    pub fn key(self) -> &'static str {
        match self {
            IdentifierKind::Licence => "licenceNumber",
            IdentifierKind::Registration => "registration",
            IdentifierKind::Vin => "vin",
            IdentifierKind::EngineNumber => "engineNumber",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            IdentifierKind::Licence => "Licence number",
            IdentifierKind::Registration => "Registration",
            IdentifierKind::Vin => "VIN",
            IdentifierKind::EngineNumber => "Engine number",
        }
    }

    pub fn length_range(self) -> RangeInclusive<usize> {
        match self {
            IdentifierKind::Licence => 2..=10,
            IdentifierKind::Registration => 1..=9,
            IdentifierKind::Vin => 10..=17,
            IdentifierKind::EngineNumber => 10..=20,
        }
    }

    /// Range used when the query contains a wildcard.
    pub fn wildcard_length_range(self) -> RangeInclusive<usize> {
        1..=*self.length_range().end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierParserError {
    #[error("{name} '{value}' must be between {min} and {max} characters.")]
    LengthOutOfRange {
        name: &'static str,
        value: String,
        min: usize,
        max: usize,
    },

    #[error("Wildcards are not supported for '{0}'.")]
    WildcardNotAllowed(String),
}

/// Parser definition for one identifier kind.
#[derive(Debug)]
pub struct IdentifierParserDefinition {
    kind: IdentifierKind,
    allows_wildcards: bool,
    definitions: Vec<TokenDefinition>,
}

impl IdentifierParserDefinition {
    pub fn new(kind: IdentifierKind) -> Self {
        Self::with_range(kind, kind.length_range(), false)
    }

    pub fn wildcard(kind: IdentifierKind) -> Self {
        Self::with_range(kind, kind.wildcard_length_range(), true)
    }

    /// `range` counts characters including any wildcards.
    pub fn with_range(kind: IdentifierKind, range: RangeInclusive<usize>, allows_wildcards: bool) -> Self {
        let name = kind.display_name();
        let definition = TokenDefinition::required(kind.key(), |token| {
            !token.is_empty() && token.chars().all(|c| c.is_ascii_alphanumeric() || c == '*')
        })
        .with_validation(move |token, _, _| {
            if !allows_wildcards && token.contains('*') {
                return Err(IdentifierParserError::WildcardNotAllowed(token.to_string()).into());
            }
            if !range.contains(&token.chars().count()) {
                return Err(IdentifierParserError::LengthOutOfRange {
                    name,
                    value: token.to_string(),
                    min: *range.start(),
                    max: *range.end(),
                }
                .into());
            }
            Ok(())
        });

        Self {
            kind,
            allows_wildcards,
            definitions: vec![definition],
        }
    }

    /// The plain or wildcard definition, whichever suits `query`.
    pub fn for_query(kind: IdentifierKind, query: &str) -> Self {
        if query.contains('*') {
            Self::wildcard(kind)
        } else {
            Self::new(kind)
        }
    }

    pub fn kind(&self) -> IdentifierKind {
        self.kind
    }

    pub fn allows_wildcards(&self) -> bool {
        self.allows_wildcards
    }
}

impl ParserDefinition for IdentifierParserDefinition {
    fn tokens(&self, query: &str) -> Vec<String> {
        query.split_whitespace().map(str::to_uppercase).collect()
    }

    fn token_definitions(&self) -> &[TokenDefinition] {
        &self.definitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{QueryParser, QueryParserError};

    fn parse(definition: IdentifierParserDefinition, query: &str) -> Result<String, QueryParserError> {
        let key = definition.kind().key();
        let mut result = QueryParser::new(definition)?.parse(query)?;
        Ok(result.remove(key).unwrap_or_default())
    }

    fn identifier_error(error: &QueryParserError) -> Option<&IdentifierParserError> {
        error.validation_error()?.downcast_ref::<IdentifierParserError>()
    }

    #[test]
    fn test_registration_uppercased() {
        let value = parse(IdentifierParserDefinition::new(IdentifierKind::Registration), " abc123 ");
        assert_eq!(value.unwrap(), "ABC123");
    }

    #[test]
    fn test_vin_length_enforced() {
        let error = parse(IdentifierParserDefinition::new(IdentifierKind::Vin), "1HGCM8263").unwrap_err();
        assert_eq!(
            identifier_error(&error),
            Some(&IdentifierParserError::LengthOutOfRange {
                name: "VIN",
                value: "1HGCM8263".to_string(),
                min: 10,
                max: 17,
            })
        );
        assert_eq!(
            error.user_message(),
            "VIN '1HGCM8263' must be between 10 and 17 characters."
        );
    }

    #[test]
    fn test_wildcards() {
        let error = parse(IdentifierParserDefinition::new(IdentifierKind::EngineNumber), "AB*").unwrap_err();
        assert!(matches!(
            identifier_error(&error),
            Some(IdentifierParserError::WildcardNotAllowed(_))
        ));

        let definition = IdentifierParserDefinition::for_query(IdentifierKind::EngineNumber, "AB*");
        assert!(definition.allows_wildcards());
        assert_eq!(parse(definition, "AB*").unwrap(), "AB*");
    }

    #[test]
    fn test_single_token_only() {
        let error = parse(IdentifierParserDefinition::new(IdentifierKind::Registration), "ABC 123").unwrap_err();
        assert!(matches!(
            error,
            QueryParserError::AdditionalTokenFound { ref token } if token == "123"
        ));

        let error = parse(IdentifierParserDefinition::new(IdentifierKind::Registration), "AB-12").unwrap_err();
        assert!(matches!(error, QueryParserError::TypeNotFound { .. }));
    }
}
