//! Picks which parser definitions apply to a query before parsing it.
//!
//! A search field usually accepts more than one kind of query. A person
//! search takes either a licence number or a name; an organisation search
//! takes a registered business number or a name. Each definition is
//! registered with a cheap predicate on the raw query, and the caller parses
//! with the first supported definition.

use std::fmt;

use super::identifier::{IdentifierKind, IdentifierParserDefinition};
use super::person::PersonParserDefinition;
use super::ParserDefinition;

type QueryPredicate = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Registered definitions in priority order.
#[derive(Default)]
pub struct DefinitionSelector {
    entries: Vec<(Box<dyn ParserDefinition + Send + Sync>, QueryPredicate)>,
}

impl DefinitionSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        definition: impl ParserDefinition + Send + Sync + 'static,
        supports: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> &mut Self {
        self.entries.push((Box::new(definition), Box::new(supports)));
        self
    }

    /// Definitions whose predicate accepts `query`, in registration order.
    pub fn supported_definitions(&self, query: &str) -> Vec<&(dyn ParserDefinition + Send + Sync)> {
        self.entries
            .iter()
            .filter(|(_, supports)| supports(query))
            .map(|(definition, _)| definition.as_ref())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The person search field: all-digit queries are licence numbers,
    /// anything else is a name search.
    pub fn person_search() -> Self {
        let mut selector = Self::new();
        selector
            .register(IdentifierParserDefinition::new(IdentifierKind::Licence), |query| {
                is_number(query.trim())
            })
            .register(PersonParserDefinition::new(), |query| {
                let query = query.trim();
                !query.is_empty() && !is_number(query)
            });
        selector
    }
}

fn is_number(query: &str) -> bool {
    !query.is_empty() && query.chars().all(|c| c.is_ascii_digit())
}

impl fmt::Debug for DefinitionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefinitionSelector")
            .field("definitions", &self.entries.len())
            .finish()
    }
}
