use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Device properties the ingestion channel attaches to outgoing logs.
/// The push component never fills this in itself.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub sdk_name: String,
    pub sdk_version: String,
    pub os_name: String,
    pub os_version: String,
    pub model: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename = "pushInstallation", rename_all = "camelCase")]
pub struct PushInstallationLog {
    pub priority: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<DeviceInfo>,
    pub push_token: String,
    // Correlation id, fresh for every log sent
    pub sid: Uuid,
    pub timestamp: DateTime<Utc>,
}

impl PushInstallationLog {
    pub fn new(push_token: &str) -> Self {
        Self {
            priority: 0,
            device: None,
            push_token: push_token.to_string(),
            sid: Uuid::new_v4(),
            timestamp: Utc::now(),
        }
    }
}
