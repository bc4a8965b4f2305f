use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A push recognized as sent through this service, normalized across the
/// platform delivery modes.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PushNotification {
    pub title: Option<String>,
    pub message: Option<String>,
    pub custom_data: HashMap<String, String>,
}

impl PushNotification {
    pub fn new(
        title: Option<&str>,
        message: Option<&str>,
        custom_data: HashMap<String, String>,
    ) -> Self {
        Self {
            title: title.map(|s| s.to_string()),
            message: message.map(|s| s.to_string()),
            custom_data,
        }
    }
}
