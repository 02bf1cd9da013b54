//! Construction of the Notifiarr passthrough JSON body.

use serde_json::{json, Value};

use crate::models::NotificationPayload;

/// Default embed color when the mapping provides none.
const DEFAULT_COLOR: &str = "00FF00";

/// Payload fields the passthrough body consumes; anything else in a mapping
/// is ignored by this transport.
const KNOWN_FIELDS: &[&str] = &[
    "title",
    "name",
    "event",
    "content",
    "description",
    "color",
    "ping_user",
    "ping_role",
    "thumbnail",
    "image",
    "icon",
    "fields",
    "footer",
];

/// Builds the Notifiarr passthrough body for one notification.
///
/// The wire schema is owned by Notifiarr: a `notification` block naming the
/// event and a `discord` block carrying the embed and the target channel.
/// Missing text fields render as empty strings, matching what the service
/// accepts.
pub fn build_passthrough(payload: &NotificationPayload, channel_id: u64) -> Value {
    for (field, _) in payload.iter() {
        if !KNOWN_FIELDS.contains(&field) {
            tracing::warn!(field = %field, "Ignoring unknown notification field");
        }
    }

    let text = |name: &str| payload.get_str(name).unwrap_or_default();

    let mut ping = serde_json::Map::new();
    if let Some(user) = payload.get_u64("ping_user") {
        ping.insert("pingUser".to_string(), Value::from(user));
    }
    if let Some(role) = payload.get_u64("ping_role") {
        ping.insert("pingRole".to_string(), Value::from(role));
    }

    let fields = match payload.get("fields") {
        Some(value) if !value.is_null() => value.clone(),
        _ => Value::Array(Vec::new()),
    };

    json!({
        "notification": {
            "update": false,
            "name": text("name"),
            "event": text("event"),
        },
        "discord": {
            "color": payload.get_str("color").unwrap_or(DEFAULT_COLOR),
            "ping": Value::Object(ping),
            "images": {
                "thumbnail": text("thumbnail"),
                "image": text("image"),
            },
            "text": {
                "title": text("title"),
                "icon": text("icon"),
                "content": text("content"),
                "description": text("description"),
                "fields": fields,
                "footer": text("footer"),
            },
            "ids": {
                "channel": channel_id,
            },
        },
    })
}
