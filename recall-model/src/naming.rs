//! Naming conventions.
//!
//! Relationship names and foreign keys follow the usual Rails-style
//! conventions: a plural relationship name singularizes and camelizes
//! into a type name, a type name underscores into a foreign-key prefix.
//! Every caller accepts an explicit override, so these stay best-effort.

/// Converts a CamelCase type name to snake_case: `OpinionPoll` → `opinion_poll`.
#[must_use]
pub fn underscore(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Converts a snake_case name to CamelCase: `opinion_poll` → `OpinionPoll`.
#[must_use]
pub fn camelize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for part in name.split('_') {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Naive English singularization: `opinions` → `opinion`, `bodies` → `body`.
///
/// Only the `ies` and trailing-`s` rules are handled; irregular plurals
/// need an explicit type-name override at the declaration site.
#[must_use]
pub fn singularize(name: &str) -> String {
    if let Some(stem) = name.strip_suffix("ies") {
        let mut out = stem.to_owned();
        out.push('y');
        return out;
    }
    match name.strip_suffix('s') {
        Some(stem) if !stem.ends_with('s') => stem.to_owned(),
        _ => name.to_owned(),
    }
}

/// Derives a type name from a relationship name.
///
/// Plural names (`passengers`) singularize first; singular names
/// (`driver`) camelize directly.
#[must_use]
pub fn infer_type_name(relationship_name: &str, plural: bool) -> String {
    if plural {
        camelize(&singularize(relationship_name))
    } else {
        camelize(relationship_name)
    }
}

/// The conventional foreign-key attribute pointing at a type: `Car` → `car_id`.
#[must_use]
pub fn foreign_key_for(type_name: &str) -> String {
    format!("{}_id", underscore(type_name))
}
