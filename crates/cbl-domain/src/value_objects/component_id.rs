//! Component identifiers

use crate::constants::VARIANT_SEPARATOR;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a UI block implementation, optionally variant-qualified.
///
/// The textual form is `<type>` or `<type>:<variant>`; that string is also the
/// cache key, so two identifiers are the same cache entry exactly when their
/// textual forms are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentId {
    kind: String,
    variant: Option<String>,
}

impl ComponentId {
    /// Identifier for the default implementation of `kind`
    pub fn new<S: Into<String>>(kind: S) -> Self {
        Self {
            kind: kind.into(),
            variant: None,
        }
    }

    /// Identifier for a specific variant of `kind`.
    ///
    /// An empty variant selects the default implementation.
    pub fn with_variant<K: Into<String>, V: Into<String>>(kind: K, variant: V) -> Self {
        let variant = variant.into();
        Self {
            kind: kind.into(),
            variant: (!variant.is_empty()).then_some(variant),
        }
    }

    /// Build from a type and an optional variant
    pub fn from_parts(kind: &str, variant: Option<&str>) -> Self {
        match variant {
            Some(variant) => Self::with_variant(kind, variant),
            None => Self::new(kind),
        }
    }

    /// Parse `<type>` or `<type>:<variant>`, splitting on the first separator
    pub fn parse(value: &str) -> Result<Self> {
        let (kind, variant) = match value.split_once(VARIANT_SEPARATOR) {
            Some((kind, variant)) => (kind, Some(variant)),
            None => (value, None),
        };
        let kind = kind.trim();
        if kind.is_empty() {
            return Err(Error::invalid_argument(format!(
                "component identifier `{value}` has an empty type"
            )));
        }
        Ok(Self::from_parts(kind, variant.map(str::trim)))
    }

    /// Component type
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Requested variant, if any
    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    /// Key under which this component is cached
    pub fn cache_key(&self) -> String {
        cache_key(&self.kind, self.variant.as_deref())
    }

    /// Whether the type names a component. Identifiers built with
    /// [`ComponentId::new`] are not checked; [`ComponentId::parse`] rejects
    /// them up front.
    pub fn has_kind(&self) -> bool {
        !self.kind.trim().is_empty()
    }
}

/// Whether `key` is the cache key of `kind` or of one of its variants
pub fn in_family(key: &str, kind: &str) -> bool {
    key.strip_prefix(kind)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(VARIANT_SEPARATOR))
}

/// Cache key for a type and optional variant
pub fn cache_key(kind: &str, variant: Option<&str>) -> String {
    match variant {
        Some(variant) if !variant.is_empty() => format!("{kind}{VARIANT_SEPARATOR}{variant}"),
        _ => kind.to_string(),
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cache_key())
    }
}

impl FromStr for ComponentId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
