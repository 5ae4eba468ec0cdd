use ribbon_core::{Result, RibbonError};
use serde::{Deserialize, Serialize};

/// Request sent by the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Request {
    OpenRecents,
}

/// Helper verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Reply {
    pub fn success() -> Self {
        Self { ok: true, reason: None }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        Self { ok: false, reason: Some(reason.into()) }
    }
}

/// Serialize one message as a single JSON line.
pub fn encode_line<T: Serialize>(msg: &T) -> Result<String> {
    let mut line = serde_json::to_string(msg)
        .map_err(|e| RibbonError::Ipc(format!("encode: {e}")))?;
    line.push('\n');
    Ok(line)
}

pub fn parse_request(line: &str) -> Result<Request> {
    serde_json::from_str(line.trim()).map_err(|e| RibbonError::Ipc(format!("parse request: {e}")))
}

pub fn parse_reply(line: &str) -> Result<Reply> {
    serde_json::from_str(line.trim()).map_err(|e| RibbonError::Ipc(format!("parse reply: {e}")))
}
