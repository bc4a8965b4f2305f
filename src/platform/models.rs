use std::collections::HashMap;

/// Connection states reported by the platform push service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Connected and holding a registration id
    Registered,
    /// Connected but the application is not registered with the push server
    Unregistered,
    Error,
    Unknown(i32),
}

/// Outcome of asking the platform push server to register this application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerResult {
    Success,
    Failure(String),
}

impl ServerResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ServerResult::Success)
    }
}

/// A notification as delivered by the platform, before any parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawNotification {
    /// Toast delivery mode, the whole notification is an XML document
    Toast { xml: String },
    /// Flat delivery mode with a query string message and an encoded
    /// app-data string
    Flat { message: String, app_data: String },
}

/// Handle returned by a notification source, used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Extra data the application framework passes along when the app is
/// launched, e.g. by tapping a system notification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchArgs {
    pub extra_data: HashMap<String, String>,
}

impl LaunchArgs {
    pub fn new(extra_data: HashMap<String, String>) -> Self {
        Self { extra_data }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.extra_data.get(key).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LaunchArgs {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            extra_data: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
