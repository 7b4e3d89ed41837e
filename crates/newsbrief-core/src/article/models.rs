use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A news article as received from the upstream feed
///
/// Every field is optional. Unknown fields (image URL, source, publish date)
/// are kept in `extra` and passed through to the summarization payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

impl ArticleRef {
    /// Article identified only by its URL
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Cache key: first non-empty of `url`, `_id`, `title`, else the empty string
    pub fn key(&self) -> &str {
        non_empty(&self.url)
            .or_else(|| non_empty(&self.id))
            .or_else(|| non_empty(&self.title))
            .unwrap_or("")
    }

    /// URL to look up on the backend, if there is one
    pub fn lookup_url(&self) -> Option<&str> {
        non_empty(&self.url)
    }

    /// Whether the fallback payload has at least one field
    pub fn has_content(&self) -> bool {
        [&self.url, &self.id, &self.title, &self.description, &self.content]
            .into_iter()
            .any(|f| non_empty(f).is_some())
            || self.extra.values().any(|v| !v.is_null())
    }

    /// Fallback summarization input: the non-empty fields as a JSON object
    pub fn payload(&self) -> Value {
        let mut map = Map::new();
        let known = [
            ("url", &self.url),
            ("_id", &self.id),
            ("title", &self.title),
            ("description", &self.description),
            ("content", &self.content),
        ];
        for (name, field) in known {
            if let Some(value) = non_empty(field) {
                map.insert(name.to_string(), Value::String(value.to_string()));
            }
        }
        for (name, value) in &self.extra {
            if !value.is_null() {
                map.insert(name.clone(), value.clone());
            }
        }
        Value::Object(map)
    }
}
