use serde::{Deserialize, Serialize};

/// Envelope returned by the search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchEnvelope {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub payload: Vec<ModelHit>,
}

/// One generated model in a search response. `id` keys list rendering,
/// `task_id` opens the model view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelHit {
    pub id: i64,
    pub task_id: String,
    pub thumbnail_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Unix seconds, when the service reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<i64>,
}

/// Envelope returned by the task endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskEnvelope {
    pub data: ModelDetail,
}

/// Resolved task metadata. `model` is the GLB asset URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDetail {
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<i64>,
}

impl ModelHit {
    /// File name portion of the thumbnail URL, used for captions.
    pub fn thumbnail_name(&self) -> &str {
        let tail = self
            .thumbnail_url
            .rsplit('/')
            .next()
            .unwrap_or(&self.thumbnail_url);
        let tail = tail.split(['?', '#']).next().unwrap_or(tail);
        if tail.is_empty() { &self.thumbnail_url } else { tail }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_envelope() {
        let json = r#"{
            "message": "success",
            "code": 0,
            "payload": [
                {"id": 1, "task_id": "c504afa1-9629-45ee-a80c-7c128b80ce92", "thumbnail_url": "https://x/a.png"}
            ]
        }"#;

        let envelope: SearchEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.message, "success");
        assert_eq!(envelope.code, 0);
        assert_eq!(envelope.payload.len(), 1);
        assert_eq!(
            envelope.payload[0].task_id,
            "c504afa1-9629-45ee-a80c-7c128b80ce92"
        );
        assert_eq!(envelope.payload[0].thumbnail_url, "https://x/a.png");
        assert_eq!(envelope.payload[0].prompt, None);
    }

    #[test]
    fn test_parse_search_envelope_with_extra_fields() {
        let json = r#"{
            "message": "success",
            "code": 0,
            "payload": [
                {
                    "id": 7,
                    "task_id": "aaaaaaaa-bbbb-cccc-dddd-eeeeeeeeeeee",
                    "thumbnail_url": "https://x/b.webp",
                    "prompt": "a chrome dragon",
                    "create_time": 1718000000,
                    "unknown_field": {"nested": true}
                }
            ]
        }"#;

        let envelope: SearchEnvelope = serde_json::from_str(json).unwrap();
        let hit = &envelope.payload[0];
        assert_eq!(hit.prompt.as_deref(), Some("a chrome dragon"));
        assert_eq!(hit.create_time, Some(1718000000));
    }

    #[test]
    fn test_parse_search_envelope_missing_payload() {
        let envelope: SearchEnvelope =
            serde_json::from_str(r#"{"message": "ok", "code": 0}"#).unwrap();
        assert!(envelope.payload.is_empty());
    }

    #[test]
    fn test_parse_task_envelope() {
        let json = r#"{
            "data": {
                "model": "https://cdn.example.com/assets/scene.glb",
                "status": "success",
                "create_time": 1718000123
            }
        }"#;

        let envelope: TaskEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data.model, "https://cdn.example.com/assets/scene.glb");
        assert_eq!(envelope.data.status.as_deref(), Some("success"));
    }

    #[test]
    fn test_thumbnail_name() {
        let hit = ModelHit {
            id: 1,
            task_id: "c504afa1-9629-45ee-a80c-7c128b80ce92".to_string(),
            thumbnail_url: "https://x/previews/a.png?sig=abc".to_string(),
            prompt: None,
            create_time: None,
        };
        assert_eq!(hit.thumbnail_name(), "a.png");

        let bare = ModelHit {
            thumbnail_url: "nopath".to_string(),
            ..hit.clone()
        };
        assert_eq!(bare.thumbnail_name(), "nopath");
    }
}
