//! Connected records surfaced by the integrations backend.

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One connected record returned by the items endpoint.
///
/// Items are immutable once created; each successful fetch replaces the
/// whole list rather than patching individual records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier within the returned sequence.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Opaque provider properties; may contain an `email` field.
    #[serde(default)]
    pub raw_properties: Map<String, Value>,
    /// Creation timestamp as reported by the provider.
    #[serde(default)]
    pub creation_time: Option<String>,
}

impl Item {
    /// The email address from the raw properties, if present.
    pub fn email(&self) -> Option<&str> {
        self.raw_properties.get("email").and_then(Value::as_str)
    }

    /// The creation time formatted for display.
    ///
    /// RFC 3339 timestamps are shortened to `YYYY-MM-DD HH:MM`; anything
    /// else is shown verbatim.
    pub fn created_display(&self) -> String {
        match self.creation_time.as_deref() {
            Some(raw) => DateTime::parse_from_rfc3339(raw)
                .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|_| raw.to_string()),
            None => "unknown".to_string(),
        }
    }

    /// The composed secondary display line: email and creation time.
    pub fn secondary_line(&self) -> String {
        format!(
            "Email: {} | Created: {}",
            self.email().unwrap_or("N/A"),
            self.created_display()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item_with_props(props: Value) -> Item {
        Item {
            id: "101".to_string(),
            name: "Ada Lovelace".to_string(),
            raw_properties: props.as_object().cloned().unwrap_or_default(),
            creation_time: Some("2024-03-01T09:30:00Z".to_string()),
        }
    }

    #[test]
    fn test_email_present() {
        let item = item_with_props(json!({"email": "ada@example.com"}));
        assert_eq!(item.email(), Some("ada@example.com"));
    }

    #[test]
    fn test_email_absent() {
        let item = item_with_props(json!({"phone": "555-0100"}));
        assert_eq!(item.email(), None);
    }

    #[test]
    fn test_secondary_line_with_email() {
        let item = item_with_props(json!({"email": "ada@example.com"}));
        assert_eq!(
            item.secondary_line(),
            "Email: ada@example.com | Created: 2024-03-01 09:30"
        );
    }

    #[test]
    fn test_secondary_line_without_email() {
        let item = item_with_props(json!({}));
        assert!(item.secondary_line().starts_with("Email: N/A | Created: "));
    }

    #[test]
    fn test_created_display_non_rfc3339_passthrough() {
        let mut item = item_with_props(json!({}));
        item.creation_time = Some("last tuesday".to_string());
        assert_eq!(item.created_display(), "last tuesday");
    }

    #[test]
    fn test_created_display_missing() {
        let mut item = item_with_props(json!({}));
        item.creation_time = None;
        assert_eq!(item.created_display(), "unknown");
    }

    #[test]
    fn test_item_deserialization_minimal() {
        let json = r#"{"id": "7", "name": "Acme Corp"}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, "7");
        assert_eq!(item.name, "Acme Corp");
        assert!(item.raw_properties.is_empty());
        assert!(item.creation_time.is_none());
    }
}
