//! Record identifiers.
//!
//! An identity is a `(collection, key)` pair. The collection names the data
//! provider the record lives in, the key is whatever that provider uses to
//! address the record. Both are opaque to clipstack.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const SEPARATOR: &str = "::";

/// Identifier of a record inside a named data provider.
///
/// The serialized form is `collection::key`. Parsing splits at the first
/// separator, so keys may contain `::` but collection names may not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Identity {
    collection: String,
    key: String,
}

impl Identity {
    /// Creates an identity for `key` inside `collection`.
    #[must_use]
    pub fn new(collection: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            key: key.into(),
        }
    }

    /// Returns the name of the data provider.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Returns the provider-specific record key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns true if the record lives in `collection`.
    #[must_use]
    pub fn is_from(&self, collection: &str) -> bool {
        self.collection == collection
    }

    /// Parses an identity from its `collection::key` form.
    pub fn parse(s: &str) -> Result<Self, Error> {
        s.parse()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.collection, self.key)
    }
}

impl FromStr for Identity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(SEPARATOR) {
            Some((collection, key)) if !collection.is_empty() => Ok(Self::new(collection, key)),
            _ => Err(Error::InvalidIdentity(s.to_string())),
        }
    }
}
