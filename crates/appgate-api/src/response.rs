//! Uniform write-operation envelope

use serde::Serialize;

/// Every write endpoint answers with this shape; failures reuse it with
/// `success: false` and no id.
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl CommandResponse {
    pub fn ok(message: &str, id: Option<i64>) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            id,
        }
    }

    pub fn failure(message: String) -> Self {
        Self {
            success: false,
            message,
            id: None,
        }
    }
}
