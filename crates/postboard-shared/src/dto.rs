//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of `POST /posts/` and `PUT /posts/{id}/`.
///
/// Members are kept as raw JSON so a wrong-typed value is reported against
/// its field. `None` means absent and `Some(Value::Null)` means sent as null.
/// Read-only members such as `id` or `liked` are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostRequest {
    #[serde(default, deserialize_with = "present")]
    pub nome: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub imagem: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub cor: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub comentario: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Full representation of a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub nome: String,
    pub imagem: Option<String>,
    pub cor: String,
    pub comentario: String,
    pub data_criacao: DateTime<Utc>,
    pub liked: bool,
}

/// Current like state of a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikeStatusResponse {
    pub id: i64,
    pub liked: bool,
}

/// Result of toggling the like flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikeToggleResponse {
    pub id: i64,
    pub liked: bool,
    pub message: String,
}

/// Query string of `GET /posts/feed/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_request_tells_absent_from_null() {
        let req: PostRequest =
            serde_json::from_str(r#"{"nome": "A", "imagem": null, "cor": [1], "liked": true}"#)
                .unwrap();

        assert_eq!(req.nome, Some(Value::from("A")));
        assert_eq!(req.imagem, Some(Value::Null));
        assert_eq!(req.cor, Some(serde_json::json!([1])));
        assert_eq!(req.comentario, None);
    }
}
