//! # Query Parser
//!
//! Maps free-text search input onto named, typed values.
//!
//! A [`ParserDefinition`] splits a query into tokens and declares an ordered
//! list of [`TokenDefinition`]s. The parser walks the tokens left to right
//! and hands each one to the first remaining definition that accepts it,
//! so earlier definitions get first refusal. A definition whose validator
//! rejects a token does not stop the search: later definitions still get a
//! chance at the same token.
//!
//! ```text
//! "citizen, john r m 1980"
//!       ↓ tokens
//! ["citizen", "john", "r", "m", "1980"]
//!       ↓ greedy match in definition order
//! { surname: citizen, givenName: john, middleNames: r, gender: m, dateOfBirth: 1980 }
//! ```

pub mod identifier;
pub mod person;
pub mod selector;

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use thiserror::Error;

pub use identifier::{IdentifierKind, IdentifierParserDefinition, IdentifierParserError};
pub use person::{PersonParserDefinition, PersonParserError};
pub use selector::DefinitionSelector;

/// Parsed values keyed by token definition key.
pub type QueryResult = BTreeMap<String, String>;

/// Error type validators report. Concrete definitions use their own error
/// enums; callers can downcast through [`QueryParserError::InvalidToken`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

type TypeCheck = Box<dyn Fn(&str) -> bool + Send + Sync>;
type Validator = Box<dyn Fn(&str, usize, &QueryResult) -> Result<(), BoxError> + Send + Sync>;

#[derive(Debug, Error)]
pub enum QueryParserError {
    /// Two token definitions share a key. A definition-authoring bug, raised
    /// when the parser is built rather than during a parse.
    #[error("Key '{key}' has multiple token definitions.")]
    MultipleTokenDefinitions { key: String },

    #[error("Additional token '{token}' has been found, does not conform to query parser. Refer to search help.")]
    AdditionalTokenFound { token: String },

    /// The token type-checked for at least one definition but every such
    /// definition's validator rejected it. `key` and `source` come from the
    /// first definition that rejected it.
    #[error("Token '{token}' is invalid for value '{key}'.")]
    InvalidToken {
        token: String,
        key: String,
        #[source]
        source: BoxError,
    },

    #[error("Unidentified value '{token}' found. Refer to search help.")]
    TypeNotFound { token: String },

    #[error("Couldn't find value for required {key}. Refer to search help.")]
    RequiredValueNotFound { key: String },
}

impl QueryParserError {
    /// The validator's own error, when a token failed validation.
    pub fn validation_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            QueryParserError::InvalidToken { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }

    /// The message to show the person searching. Validation failures show
    /// the validator's explanation, which is more specific than ours.
    pub fn user_message(&self) -> String {
        match self.validation_error() {
            Some(source) => source.to_string(),
            None => self.to_string(),
        }
    }
}

/// A named matcher for one value in a query.
pub struct TokenDefinition {
    key: String,
    required: bool,
    type_check: TypeCheck,
    validate: Option<Validator>,
}

impl TokenDefinition {
    pub fn new(
        key: impl Into<String>,
        required: bool,
        type_check: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            required,
            type_check: Box::new(type_check),
            validate: None,
        }
    }

    pub fn required(
        key: impl Into<String>,
        type_check: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self::new(key, true, type_check)
    }

    pub fn optional(
        key: impl Into<String>,
        type_check: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self::new(key, false, type_check)
    }

    /// Attach a validator. It receives the token, the token's index in the
    /// query, and the values matched so far.
    pub fn with_validation(
        mut self,
        validate: impl Fn(&str, usize, &QueryResult) -> Result<(), BoxError> + Send + Sync + 'static,
    ) -> Self {
        self.validate = Some(Box::new(validate));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn accepts(&self, token: &str) -> bool {
        (self.type_check)(token)
    }

    pub fn validate(&self, token: &str, index: usize, results: &QueryResult) -> Result<(), BoxError> {
        match &self.validate {
            Some(validate) => validate(token, index, results),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for TokenDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenDefinition")
            .field("key", &self.key)
            .field("required", &self.required)
            .field("has_validation", &self.validate.is_some())
            .finish()
    }
}

/// How a kind of query is split up and what its values look like.
///
/// The order of `token_definitions` is both matching priority and the order
/// required keys are checked in.
pub trait ParserDefinition {
    fn tokens(&self, query: &str) -> Vec<String>;

    fn token_definitions(&self) -> &[TokenDefinition];
}

impl<T: ParserDefinition + ?Sized> ParserDefinition for &T {
    fn tokens(&self, query: &str) -> Vec<String> {
        (**self).tokens(query)
    }

    fn token_definitions(&self) -> &[TokenDefinition] {
        (**self).token_definitions()
    }
}

impl<T: ParserDefinition + ?Sized> ParserDefinition for Box<T> {
    fn tokens(&self, query: &str) -> Vec<String> {
        (**self).tokens(query)
    }

    fn token_definitions(&self) -> &[TokenDefinition] {
        (**self).token_definitions()
    }
}

/// A definition that splits on any of a set of delimiter characters.
#[derive(Debug)]
pub struct DelimitedDefinition {
    delimiters: Vec<char>,
    definitions: Vec<TokenDefinition>,
}

impl DelimitedDefinition {
    /// Split on whitespace.
    pub fn new(definitions: Vec<TokenDefinition>) -> Self {
        Self::with_delimiters(vec![' ', '\t', '\n'], definitions)
    }

    pub fn with_delimiters(delimiters: Vec<char>, definitions: Vec<TokenDefinition>) -> Self {
        Self {
            delimiters,
            definitions,
        }
    }

    /// Join values back into a query this definition splits the same way.
    pub fn join<S: AsRef<str>>(&self, values: &[S]) -> String {
        let separator = self.delimiters.first().copied().unwrap_or(' ');
        values
            .iter()
            .map(|v| v.as_ref())
            .collect::<Vec<_>>()
            .join(&separator.to_string())
    }
}

impl ParserDefinition for DelimitedDefinition {
    fn tokens(&self, query: &str) -> Vec<String> {
        query
            .split(|c: char| self.delimiters.contains(&c))
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn token_definitions(&self) -> &[TokenDefinition] {
        &self.definitions
    }
}

/// Parses queries against one [`ParserDefinition`].
#[derive(Debug)]
pub struct QueryParser<D> {
    definition: D,
}

impl<D: ParserDefinition> QueryParser<D> {
    /// Build a parser, rejecting definitions with duplicate keys.
    pub fn new(definition: D) -> Result<Self, QueryParserError> {
        let mut seen = HashSet::new();
        for token_definition in definition.token_definitions() {
            if !seen.insert(token_definition.key()) {
                return Err(QueryParserError::MultipleTokenDefinitions {
                    key: token_definition.key().to_string(),
                });
            }
        }
        Ok(Self { definition })
    }

    pub fn definition(&self) -> &D {
        &self.definition
    }

    pub fn parse(&self, query: &str) -> Result<QueryResult, QueryParserError> {
        let definitions = self.definition.token_definitions();
        let mut remaining: Vec<&TokenDefinition> = definitions.iter().collect();
        let mut results = QueryResult::new();

        for (index, token) in self.definition.tokens(query).into_iter().enumerate() {
            if remaining.is_empty() {
                return Err(QueryParserError::AdditionalTokenFound { token });
            }

            let mut first_rejection: Option<(String, BoxError)> = None;
            let mut matched = None;
            for (position, candidate) in remaining.iter().enumerate() {
                if !candidate.accepts(&token) {
                    continue;
                }
                match candidate.validate(&token, index, &results) {
                    Ok(()) => {
                        matched = Some(position);
                        break;
                    }
                    Err(error) => {
                        log::trace!("'{}' rejected by {}: {}", token, candidate.key(), error);
                        if first_rejection.is_none() {
                            first_rejection = Some((candidate.key().to_string(), error));
                        }
                    }
                }
            }

            let Some(position) = matched else {
                return Err(match first_rejection {
                    Some((key, source)) => QueryParserError::InvalidToken { token, key, source },
                    None => QueryParserError::TypeNotFound { token },
                });
            };

            let definition = remaining.remove(position);
            log::debug!("token {} '{}' -> {}", index, token, definition.key());
            results.insert(definition.key().to_string(), token);
        }

        if let Some(missing) = definitions
            .iter()
            .find(|d| d.is_required() && !results.contains_key(d.key()))
        {
            return Err(QueryParserError::RequiredValueNotFound {
                key: missing.key().to_string(),
            });
        }

        Ok(results)
    }
}
