//! Wire types for the recognition service
//!
//! Every response body also carries `errcode` and `msg`; those are checked by
//! the client before the typed payload below is decoded.

use serde::{Deserialize, Deserializer, Serialize};

use crate::recognition::PixelBox;

#[derive(Debug, Clone, Serialize)]
pub struct RecognizeRequest<'a> {
    pub image: &'a str,
}

/// Engine output for one image
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecognizeResponse {
    #[serde(default)]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub boxes: Vec<PixelBox>,
    pub width: f64,
    pub height: f64,
}

/// Text-only record persisted by the server
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoryRecord {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "UserID", default)]
    pub user_id: i64,
    #[serde(rename = "Text", default)]
    pub text: String,
    /// RFC 3339 timestamp
    #[serde(rename = "CreatedAt", default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct HistoryListResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Vec<HistoryRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

/// Engine configuration snapshot, readable by administrators only
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(rename = "hasToken", default)]
    pub has_token: bool,
    #[serde(rename = "hasURL", default)]
    pub has_url: bool,
    #[serde(rename = "currentURL", default)]
    pub current_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Ack {}

/// The server encodes empty lists as `null`
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognize_response_parses() {
        let json = r#"{
            "errcode": 0, "msg": "ok", "text": "hello world",
            "boxes": [{"text": "hello", "left": 10, "top": 20, "right": 60, "bottom": 40, "confidence": 0.98}],
            "width": 640, "height": 480
        }"#;
        let resp: RecognizeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.text, "hello world");
        assert_eq!(resp.boxes.len(), 1);
        assert_eq!(resp.boxes[0].left, 10.0);
        assert_eq!(resp.width, 640.0);
    }

    #[test]
    fn test_null_boxes_are_empty() {
        let json = r#"{"text": "", "boxes": null, "width": 1, "height": 1}"#;
        let resp: RecognizeResponse = serde_json::from_str(json).unwrap();
        assert!(resp.boxes.is_empty());
    }

    #[test]
    fn test_history_record_field_names() {
        let json = r#"{"errcode":0,"msg":"success","data":[
            {"ID": 7, "UserID": 3, "Text": "receipt", "CreatedAt": "2024-05-01T10:00:00+08:00"}
        ]}"#;
        let resp: HistoryListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.data[0].id, 7);
        assert_eq!(resp.data[0].text, "receipt");
        assert_eq!(resp.data[0].created_at, "2024-05-01T10:00:00+08:00");
    }

    #[test]
    fn test_engine_config_field_names() {
        let json = r#"{"hasToken": true, "hasURL": false, "currentURL": ""}"#;
        let cfg: EngineConfig = serde_json::from_str(json).unwrap();
        assert!(cfg.has_token);
        assert!(!cfg.has_url);
    }
}
