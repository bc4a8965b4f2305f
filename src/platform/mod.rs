//! Seams to the platform push SDK and the application framework.
pub mod lifecycle;
pub mod models;
pub use lifecycle::*;
pub use models::*;

use std::sync::Arc;

use anyhow::{Error, Result};
use async_trait::async_trait;
use futures::stream::BoxStream;

/// The platform push SDK's connection and registration surface.
#[async_trait]
pub trait PushClient: Send + Sync {
    /// Stream of connection state changes. Subscribe before calling
    /// `connect` so the first state is not missed.
    fn connection_states(&self) -> BoxStream<'static, ConnectionState>;

    fn connect(&self, app_push_id: &str) -> Result<(), Error>;

    fn disconnect(&self);

    /// Registration id currently held by the platform, if any
    fn registration_id(&self) -> Option<String>;

    /// Ask the push server to register this application. On success the
    /// platform reports `ConnectionState::Registered` on the state stream.
    async fn register_with_server(&self) -> Result<ServerResult, Error>;
}

/// Receives raw notifications from a `NotificationSource`.
pub trait RawNotificationHandler: Send + Sync {
    fn on_raw_notification(&self, notification: &RawNotification);
}

/// Process-wide platform event for received notifications.
///
/// Unsubscribing an id that is not (or no longer) subscribed must be a
/// no-op.
pub trait NotificationSource: Send + Sync {
    fn subscribe(&self, handler: Arc<dyn RawNotificationHandler>) -> SubscriptionId;

    fn unsubscribe(&self, id: SubscriptionId);
}

pub trait AppLifecycle: Send + Sync {
    fn is_suspended(&self) -> bool;
}
