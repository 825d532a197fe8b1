//! Namespaced identifiers for fire types and their components
//!
//! An identifier is a `namespace:path` pair. It may hold any strings; whether
//! it is well-formed is a separate question answered by [`validation`].
//! Both parts share their storage, so cloning on the per-tick path is cheap.

pub mod validation;

pub use validation::{is_valid_namespace, is_valid_path, is_valid_type, sanitize, sanitize_parts};

use crate::constants::IDENTIFIER_SEPARATOR;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

lazy_static::lazy_static! {
    static ref EMPTY: Arc<str> = Arc::from("");
}

/// Namespaced two-part key
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier {
    namespace: Arc<str>,
    path: Arc<str>,
}

impl Identifier {
    /// Create an identifier from raw parts without validation
    pub fn new(namespace: &str, path: &str) -> Self {
        Self {
            namespace: intern(namespace),
            path: intern(path),
        }
    }

    /// The empty/empty identifier naming the default fire type
    pub fn default_fire_type() -> Self {
        Self {
            namespace: Arc::clone(&EMPTY),
            path: Arc::clone(&EMPTY),
        }
    }

    /// Parse the `namespace:path` string form.
    ///
    /// Splits on the first separator. Returns `None` when there is no
    /// separator; the parts themselves are not validated.
    pub fn parse(value: &str) -> Option<Self> {
        value
            .split_once(IDENTIFIER_SEPARATOR)
            .map(|(namespace, path)| Self::new(namespace, path))
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether this is the default fire type
    pub fn is_default(&self) -> bool {
        self.namespace.is_empty() && self.path.is_empty()
    }

    /// Same namespace, new path. Used to derive component identifiers.
    pub fn with_path(&self, path: &str) -> Self {
        Self {
            namespace: Arc::clone(&self.namespace),
            path: intern(path),
        }
    }
}

fn intern(value: &str) -> Arc<str> {
    if value.is_empty() {
        Arc::clone(&EMPTY)
    } else {
        Arc::from(value)
    }
}

impl Default for Identifier {
    fn default() -> Self {
        Self::default_fire_type()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.namespace, IDENTIFIER_SEPARATOR, self.path)
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({})", self)
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Identifier::parse(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "expected 'namespace{}path', found '{}'",
                IDENTIFIER_SEPARATOR, raw
            ))
        })
    }
}
