use std::env;
use std::time::Duration;

const DEFAULT_REGISTRATION_TIMEOUT_SECS: u64 = 60;

#[derive(Clone, Debug)]
pub struct PushConfig {
    /// Identifier the platform push service issued for this application.
    /// Connecting with an empty id is still attempted.
    pub app_push_id: String,
    /// Upper bound on waiting for the platform to hand out a registration id
    pub registration_timeout: Duration,
}

impl PushConfig {
    pub fn new(app_push_id: &str) -> Self {
        Self {
            app_push_id: app_push_id.to_string(),
            ..Self::default()
        }
    }

    pub fn from_env() -> Self {
        Self {
            app_push_id: env::var("PUSH_APP_ID").unwrap_or_default(),
            registration_timeout: parse_registration_timeout(
                env::var("PUSH_REGISTRATION_TIMEOUT_SECS").ok().as_deref(),
            ),
        }
    }

    pub fn with_registration_timeout(mut self, timeout: Duration) -> Self {
        self.registration_timeout = timeout;
        self
    }
}

/// Whole seconds, falling back to the default when unset or unreadable
fn parse_registration_timeout(value: Option<&str>) -> Duration {
    let secs = match value.map(|s| s.trim().parse::<u64>()) {
        Some(Ok(secs)) => secs,
        Some(Err(e)) => {
            tracing::warn!(
                "Invalid PUSH_REGISTRATION_TIMEOUT_SECS, using {}s: {}",
                DEFAULT_REGISTRATION_TIMEOUT_SECS,
                e
            );
            DEFAULT_REGISTRATION_TIMEOUT_SECS
        }
        None => DEFAULT_REGISTRATION_TIMEOUT_SECS,
    };
    Duration::from_secs(secs)
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            app_push_id: String::new(),
            registration_timeout: Duration::from_secs(DEFAULT_REGISTRATION_TIMEOUT_SECS),
        }
    }
}
