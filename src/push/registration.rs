use futures::StreamExt;

use crate::core::PushConfig;
use crate::platform::{ConnectionState, PushClient, ServerResult};

/// Connect to the platform push service and wait for this device's
/// registration id. Resolves once, with an empty string when registration
/// fails or times out.
pub async fn register_push_service(client: &dyn PushClient, config: &PushConfig) -> String {
    match tokio::time::timeout(
        config.registration_timeout,
        await_registration(client, &config.app_push_id),
    )
    .await
    {
        Ok(registration_id) => registration_id,
        Err(_) => {
            tracing::error!(
                timeout_secs = config.registration_timeout.as_secs_f64(),
                "Timed out waiting for a push registration id"
            );
            String::new()
        }
    }
}

async fn await_registration(client: &dyn PushClient, app_push_id: &str) -> String {
    // Subscribe before connecting, the first state can arrive immediately
    let mut states = client.connection_states();

    if let Err(e) = client.connect(app_push_id) {
        tracing::error!("Failed to connect to the push service: {}", e);
        return String::new();
    }

    while let Some(state) = states.next().await {
        match state {
            ConnectionState::Registered => {
                return client.registration_id().unwrap_or_default();
            }
            ConnectionState::Unregistered => match client.register_with_server().await {
                Ok(ServerResult::Success) => {
                    tracing::debug!("Registered with the push server, waiting for registration id");
                }
                Ok(ServerResult::Failure(reason)) => {
                    tracing::error!(%reason, "Push server rejected the registration");
                    return String::new();
                }
                Err(e) => {
                    tracing::error!("Failed to register with the push server: {}", e);
                    return String::new();
                }
            },
            ConnectionState::Error => {
                tracing::error!("Push service reported a connection error");
                return String::new();
            }
            ConnectionState::Unknown(code) => {
                tracing::warn!(code, "Unexpected push connection state");
                return String::new();
            }
        }
    }

    tracing::error!("Push connection state stream ended before registration");
    String::new()
}
