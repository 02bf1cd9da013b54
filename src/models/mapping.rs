//! Declarative notification field mappings.
//!
//! A mapping describes how to derive each outbound notification field from
//! a feed entry. Mappings are loaded from the notification mapping file and
//! looked up per endpoint under the name `{endpoint_name}-notifiarr`.

use indexmap::IndexMap;
use serde::Deserialize;

/// A named mapping: output field name to extraction rule, in file order.
pub type NotificationMapping = IndexMap<String, FieldMapping>;

/// Selection mode for `torznab_attr` extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttrSelect {
    /// Take the first matching attribute value.
    #[default]
    First,
    /// Take every matching attribute value, in document order.
    All,
}

/// A single field of a notification mapping, tagged on `type`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldMapping {
    /// A fixed literal value.
    Static {
        /// The literal to emit.
        value: String,
    },
    /// The text of the first element at `path` within the entry.
    XmlTag {
        /// `/`-separated element path, relative to the `<item>`.
        path: String,
    },
    /// Values of namespaced `attr` elements with a matching `name`.
    TorznabAttr {
        /// The `name` attribute to match.
        name: String,
        /// First value or all values.
        #[serde(default)]
        select: AttrSelect,
    },
}
