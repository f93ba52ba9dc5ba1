//! CDP protocol types and message definitions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// CDP request message.
#[derive(Debug, Serialize)]
pub struct CdpRequest {
    pub id: u64,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

/// CDP response message.
#[derive(Debug, Deserialize)]
pub struct CdpResponse {
    pub id: Option<u64>,
    pub result: Option<Value>,
    pub error: Option<CdpErrorResponse>,
    pub method: Option<String>,
    pub params: Option<Value>,
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

/// CDP error in response.
#[derive(Debug, Deserialize)]
pub struct CdpErrorResponse {
    pub code: i64,
    pub message: String,
    pub data: Option<String>,
}

/// Target info from CDP.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetInfo {
    pub target_id: String,
    #[serde(rename = "type")]
    pub target_type: String,
    pub title: String,
    pub url: String,
    pub attached: Option<bool>,
    pub browser_context_id: Option<String>,
}

impl TargetInfo {
    /// Whether this target is an ordinary page (not devtools, not a
    /// service worker).
    pub fn is_page(&self) -> bool {
        self.target_type == "page" && !self.url.starts_with("devtools://")
    }
}

/// Browser version info.
///
/// Note: Chrome returns PascalCase field names for this endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserVersion {
    #[serde(rename = "Browser")]
    pub browser: String,
    #[serde(rename = "Protocol-Version")]
    pub protocol_version: String,
    #[serde(rename = "User-Agent")]
    pub user_agent: String,
    #[serde(rename = "webSocketDebuggerUrl")]
    pub web_socket_debugger_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_skips_absent_session() {
        let req = CdpRequest {
            id: 1,
            method: "Target.getTargets".into(),
            params: None,
            session_id: None,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("sessionId"));
        assert!(!json.contains("params"));
    }

    #[test]
    fn test_target_info_page_filter() {
        let page: TargetInfo = serde_json::from_value(serde_json::json!({
            "targetId": "t1",
            "type": "page",
            "title": "Chat",
            "url": "https://chatgpt.com/"
        }))
        .unwrap();
        assert!(page.is_page());

        let worker: TargetInfo = serde_json::from_value(serde_json::json!({
            "targetId": "t2",
            "type": "service_worker",
            "title": "",
            "url": "https://chatgpt.com/sw.js"
        }))
        .unwrap();
        assert!(!worker.is_page());
    }

    #[test]
    fn test_event_response_has_no_id() {
        let resp: CdpResponse = serde_json::from_str(
            r#"{"method":"Target.targetDestroyed","params":{"targetId":"t1"}}"#,
        )
        .unwrap();
        assert!(resp.id.is_none());
        assert_eq!(resp.method.as_deref(), Some("Target.targetDestroyed"));
    }
}
