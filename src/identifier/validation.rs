//! Identifier validation - pure syntax checks
//!
//! No registry access here. Whether an identifier is also registered is
//! decided by `FireRegistry::ensure`.

use super::Identifier;

/// Characters allowed in a namespace
#[inline]
fn is_namespace_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.')
}

/// Characters allowed in a path (namespace charset plus `/`)
#[inline]
fn is_path_char(c: char) -> bool {
    is_namespace_char(c) || c == '/'
}

/// Whether `namespace` is non-empty and uses only the namespace charset
pub fn is_valid_namespace(namespace: &str) -> bool {
    !namespace.is_empty() && namespace.chars().all(is_namespace_char)
}

/// Whether `path` is non-empty and uses only the path charset
pub fn is_valid_path(path: &str) -> bool {
    !path.is_empty() && path.chars().all(is_path_char)
}

/// Whether `id` is a syntactically valid fire type.
///
/// The default fire type is always valid even though its parts are empty.
pub fn is_valid_type(id: &Identifier) -> bool {
    id.is_default() || (is_valid_namespace(id.namespace()) && is_valid_path(id.path()))
}

/// Returns `id` unchanged if it is syntactically valid, the default fire type otherwise.
pub fn sanitize(id: &Identifier) -> Identifier {
    if is_valid_type(id) {
        id.clone()
    } else {
        Identifier::default_fire_type()
    }
}

/// Trims both parts and sanitizes the resulting identifier.
pub fn sanitize_parts(namespace: &str, path: &str) -> Identifier {
    sanitize(&Identifier::new(namespace.trim(), path.trim()))
}
