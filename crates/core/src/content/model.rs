use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored content post. Maps to the `content` PostgreSQL table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Content {
    pub id: i64,
    pub category: String,
    pub body: String,
    pub media: String,
    pub created_time: DateTime<Utc>,
    pub updated_time: DateTime<Utc>,
}

/// A content record that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContent {
    pub category: String,
    pub body: String,
    pub media: String,
    pub created_time: DateTime<Utc>,
}

/// Request payload for both create and update.
///
/// The body field was published as `feed` and `content` by earlier clients,
/// both are still accepted on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentInput {
    pub category: String,
    #[serde(alias = "feed", alias = "content")]
    pub body: String,
    pub media: String,
}

/// List projection of a content record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSummary {
    pub content_id: i64,
    pub category: String,
    pub body: String,
    pub media: String,
    pub created_time: DateTime<Utc>,
    pub updated_time: DateTime<Utc>,
}

/// Detail projection of a content record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDetail {
    pub content_id: i64,
    pub category: String,
    pub body: String,
    pub media: String,
    pub created_time: DateTime<Utc>,
    pub updated_time: DateTime<Utc>,
}

impl From<Content> for ContentSummary {
    fn from(content: Content) -> Self {
        Self {
            content_id: content.id,
            category: content.category,
            body: content.body,
            media: content.media,
            created_time: content.created_time,
            updated_time: content.updated_time,
        }
    }
}

impl From<Content> for ContentDetail {
    fn from(content: Content) -> Self {
        Self {
            content_id: content.id,
            category: content.category,
            body: content.body,
            media: content.media,
            created_time: content.created_time,
            updated_time: content.updated_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_accepts_legacy_body_names() {
        let feed: ContentInput =
            serde_json::from_str(r#"{"category":"Tech","feed":"hello","media":"/a.png"}"#).unwrap();
        let content: ContentInput =
            serde_json::from_str(r#"{"category":"Tech","content":"hello","media":"/a.png"}"#)
                .unwrap();
        let body: ContentInput =
            serde_json::from_str(r#"{"category":"Tech","body":"hello","media":"/a.png"}"#).unwrap();

        assert_eq!(feed, body);
        assert_eq!(content, body);
    }

    #[test]
    fn detail_serializes_camel_case() {
        let now = Utc::now();
        let detail = ContentDetail::from(Content {
            id: 7,
            category: "Software".into(),
            body: "John Doe's log".into(),
            media: "/image.jpg".into(),
            created_time: now,
            updated_time: now,
        });

        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["contentId"], 7);
        assert_eq!(value["category"], "Software");
        assert_eq!(value["body"], "John Doe's log");
        assert!(value.get("createdTime").is_some());
        assert!(value.get("updatedTime").is_some());
    }
}
