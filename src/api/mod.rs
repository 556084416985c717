use crate::models::{AddTopicRequest, NodeInfo, UploadedFile};
use crate::storage::load_token;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Unauthorized,
    Network,
    Http,
    Parse,
    /// Backend answered with `status != "ok"`; `message` is its `msg` verbatim.
    Rejected,
}

#[derive(Clone, Debug, thiserror::Error)]
#[error("{message}")]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    pub(crate) fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    fn unauthorized() -> Self {
        Self {
            kind: ApiErrorKind::Unauthorized,
            message: "Unauthorized".to_string(),
        }
    }

    fn http(status: reqwest::StatusCode, body: String, ctx: &str) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            message: format!("{ctx} ({status}): {body}"),
        }
    }

    pub(crate) fn rejected(msg: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Rejected,
            message: msg.into(),
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
    pub forum_name: String,
}

const DEFAULT_API_URL: &str = "http://localhost:7000";
const DEFAULT_FORUM_NAME: &str = "Casnode";

impl EnvConfig {
    /// Reads `window.ENV`, accepting both `API_URL` and the lowercase `api_url`
    /// (same for `FORUM_NAME`). Missing or non-string values keep the defaults.
    pub fn new() -> Self {
        let mut cfg = Self {
            api_url: DEFAULT_API_URL.to_string(),
            forum_name: DEFAULT_FORUM_NAME.to_string(),
        };

        let Some(env) = web_sys::window().and_then(|w| w.get("ENV")) else {
            return cfg;
        };
        if env.is_undefined() || !env.is_object() {
            return cfg;
        }

        let read = |keys: [&str; 2]| {
            keys.iter().find_map(|k| {
                js_sys::Reflect::get(&env, &(*k).into())
                    .ok()
                    .and_then(|v| v.as_string())
            })
        };

        if let Some(url) = read(["API_URL", "api_url"]) {
            cfg.api_url = url;
        }
        if let Some(name) = read(["FORUM_NAME", "forum_name"]) {
            cfg.forum_name = name;
        }

        cfg
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// casnode's response envelope: `{status, msg, data}`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub(crate) struct ApiEnvelope {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl ApiEnvelope {
    pub fn into_data(self) -> ApiResult<serde_json::Value> {
        if self.status == "ok" {
            Ok(self.data)
        } else if self.msg.trim().is_empty() {
            Err(ApiError::rejected(format!("Request failed: {}", self.status)))
        } else {
            Err(ApiError::rejected(self.msg))
        }
    }
}

/// Ids come back as numbers from some casnode versions and strings from others.
fn value_as_id(v: &serde_json::Value) -> Option<String> {
    match v {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[derive(Serialize, Clone, Debug)]
struct UploadFileForm<'a> {
    file: &'a str,
    name: &'a str,
    #[serde(rename = "type")]
    mime: &'a str,
}

#[derive(Clone)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) token: Option<String>,
}

impl ApiClient {
    #[allow(dead_code)]
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            token: None,
        }
    }

    pub fn load_from_storage() -> Self {
        Self {
            base_url: EnvConfig::new().api_url,
            token: load_token(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn with_auth_headers(
        mut req: reqwest::RequestBuilder,
        token: Option<&String>,
    ) -> reqwest::RequestBuilder {
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }
        req
    }

    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> ApiResult<T> {
        let req = Self::with_auth_headers(req, self.token.as_ref());
        let res = req.send().await.map_err(ApiError::network)?;

        if res.status().is_success() {
            res.json().await.map_err(ApiError::parse)
        } else if res.status().as_u16() == 401 {
            Err(ApiError::unauthorized())
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, "Request failed"))
        }
    }

    pub(crate) fn parse_node_response(node_id: &str, data: serde_json::Value) -> ApiResult<NodeInfo> {
        if data.is_null() {
            return Err(ApiError::rejected(format!("Node not found: {node_id}")));
        }
        let node: NodeInfo = serde_json::from_value(data).map_err(ApiError::parse)?;
        if node.id.trim().is_empty() {
            return Err(ApiError::rejected(format!("Node not found: {node_id}")));
        }
        Ok(node)
    }

    pub async fn get_node(&self, node_id: &str) -> ApiResult<NodeInfo> {
        let client = reqwest::Client::new();
        let url = self.url(&format!(
            "/api/get-node?id={}",
            urlencoding::encode(node_id)
        ));
        let data: serde_json::Value = self.send(client.get(url)).await?;
        Self::parse_node_response(node_id, data)
    }

    pub(crate) fn parse_add_topic_response(envelope: ApiEnvelope) -> ApiResult<String> {
        let data = envelope.into_data()?;
        value_as_id(&data).ok_or_else(|| {
            ApiError::parse(format!(
                "Add topic succeeded but response is missing topic id: {}",
                data
            ))
        })
    }

    /// Returns the id of the created topic.
    pub async fn add_topic(&self, req_body: &AddTopicRequest) -> ApiResult<String> {
        let client = reqwest::Client::new();
        let envelope: ApiEnvelope = self
            .send(client.post(self.url("/api/add-topic")).json(req_body))
            .await?;
        Self::parse_add_topic_response(envelope)
    }

    pub(crate) fn parse_upload_response(
        name: &str,
        mime: &str,
        envelope: ApiEnvelope,
    ) -> ApiResult<UploadedFile> {
        let data = envelope.into_data()?;
        let url = data
            .as_str()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ApiError::parse(format!("Upload response is missing file url: {data}")))?;

        Ok(UploadedFile {
            name: name.to_string(),
            url: url.to_string(),
            is_image: mime.starts_with("image/"),
        })
    }

    /// `data_url` is the whole `data:<mime>;base64,...` string; casnode strips the prefix.
    pub async fn upload_file(&self, name: &str, mime: &str, data_url: &str) -> ApiResult<UploadedFile> {
        let client = reqwest::Client::new();
        let form = UploadFileForm {
            file: data_url,
            name,
            mime,
        };
        let envelope: ApiEnvelope = self
            .send(client.post(self.url("/api/upload-file")).form(&form))
            .await?;
        Self::parse_upload_response(name, mime, envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(json: &str) -> ApiEnvelope {
        serde_json::from_str(json).expect("envelope should parse")
    }

    #[test]
    fn test_add_topic_ok_with_string_id() {
        let id = ApiClient::parse_add_topic_response(envelope(r#"{"status":"ok","msg":"","data":"42"}"#))
            .expect("ok status should yield an id");
        assert_eq!(id, "42");
    }

    #[test]
    fn test_add_topic_ok_with_numeric_id() {
        let id = ApiClient::parse_add_topic_response(envelope(r#"{"status":"ok","data":1024}"#))
            .expect("numeric ids are accepted");
        assert_eq!(id, "1024");
    }

    #[test]
    fn test_add_topic_error_status_carries_msg_verbatim() {
        let err = ApiClient::parse_add_topic_response(envelope(
            r#"{"status":"error","msg":"You have been banned"}"#,
        ))
        .expect_err("error status must fail");
        assert_eq!(err.kind, ApiErrorKind::Rejected);
        assert_eq!(err.to_string(), "You have been banned");
    }

    #[test]
    fn test_add_topic_ok_without_id_is_parse_error() {
        let err = ApiClient::parse_add_topic_response(envelope(r#"{"status":"ok"}"#))
            .expect_err("missing id must fail");
        assert_eq!(err.kind, ApiErrorKind::Parse);
    }

    #[test]
    fn test_envelope_error_without_msg_mentions_status() {
        let err = envelope(r#"{"status":"fail"}"#)
            .into_data()
            .expect_err("non-ok status must fail");
        assert_eq!(err.message, "Request failed: fail");
    }

    #[test]
    fn test_parse_node_response() {
        let node = ApiClient::parse_node_response(
            "qna",
            serde_json::json!({"id": "qna", "name": "Q&A", "sorter": 3}),
        )
        .expect("node should parse");
        assert_eq!(node.name, "Q&A");

        let missing = ApiClient::parse_node_response("nope", serde_json::Value::Null)
            .expect_err("null node is an error");
        assert_eq!(missing.kind, ApiErrorKind::Rejected);
    }

    #[test]
    fn test_parse_upload_response() {
        let file = ApiClient::parse_upload_response(
            "shot.png",
            "image/png",
            envelope(r#"{"status":"ok","data":"https://cdn.example.com/shot.png"}"#),
        )
        .expect("upload should parse");
        assert!(file.is_image);
        assert_eq!(file.url, "https://cdn.example.com/shot.png");

        let err = ApiClient::parse_upload_response(
            "a.zip",
            "application/zip",
            envelope(r#"{"status":"ok","data":""}"#),
        )
        .expect_err("empty url must fail");
        assert_eq!(err.kind, ApiErrorKind::Parse);
    }

    #[test]
    fn test_api_client_url_joins_without_double_slash() {
        let client = ApiClient::new("http://localhost:7000/".to_string());
        assert_eq!(client.url("/api/add-topic"), "http://localhost:7000/api/add-topic");
        assert!(client.token.is_none());
    }

    #[test]
    fn test_upload_form_field_names() {
        let form = UploadFileForm {
            file: "data:image/png;base64,AAAA",
            name: "a.png",
            mime: "image/png",
        };
        let v = serde_json::to_value(form).expect("should serialize");
        assert_eq!(v["type"], "image/png");
        assert_eq!(v["name"], "a.png");
    }
}
