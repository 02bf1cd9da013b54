//! Entry identity normalization.
//!
//! Torznab GUIDs are indexer URLs whose query strings carry volatile
//! parameters (API keys, offsets, timestamps), so two fetches of the same
//! release can disagree on the raw GUID. Only the `id` parameter identifies
//! the release; everything else is stripped before an identity is compared
//! or persisted.

/// Normalizes a raw GUID into a stable entry identity.
///
/// Keeps only the `id` query parameter: `base?id=X&apikey=Y` becomes
/// `base?id=X`. A query string without an `id` parameter is dropped
/// entirely, and a GUID without a query string is returned unchanged.
pub fn normalize(guid: &str) -> String {
    match guid.split_once('?') {
        Some((base, params)) => match params.split('&').find(|p| p.starts_with("id=")) {
            Some(id_param) => format!("{base}?{id_param}"),
            None => base.to_string(),
        },
        None => guid.to_string(),
    }
}
