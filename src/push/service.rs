use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use super::dispatcher::{NotificationDispatcher, PushCallback};
use super::models::PushNotification;
use super::registration::register_push_service;
use crate::core::PushConfig;
use crate::ingestion::{IngestionChannel, PushInstallationLog};
use crate::platform::{
    AppLifecycle, LaunchArgs, NotificationSource, PushClient, RawNotificationHandler,
    SubscriptionId,
};

#[derive(Default)]
struct PushState {
    enabled: bool,
    // Bumped on every enabled state change. Registration tasks compare the
    // value they started with before applying anything.
    generation: u64,
    subscription: Option<SubscriptionId>,
    registration: Option<JoinHandle<()>>,
}

impl PushState {
    fn is_current(&self, snapshot: u64) -> bool {
        self.enabled && self.generation == snapshot
    }
}

struct Inner {
    config: PushConfig,
    client: Arc<dyn PushClient>,
    source: Arc<dyn NotificationSource>,
    channel: Arc<dyn IngestionChannel>,
    dispatcher: Arc<NotificationDispatcher>,
    state: Mutex<PushState>,
}

/// Push notification service.
///
/// When enabled it registers the device with the platform push service,
/// sends the registration id to the backend and forwards pushes sent
/// through this service to the application callback.
#[derive(Clone)]
pub struct Push {
    inner: Arc<Inner>,
}

impl Push {
    pub fn new(
        config: PushConfig,
        client: Arc<dyn PushClient>,
        source: Arc<dyn NotificationSource>,
        channel: Arc<dyn IngestionChannel>,
        lifecycle: Arc<dyn AppLifecycle>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                client,
                source,
                channel,
                dispatcher: Arc::new(NotificationDispatcher::new(lifecycle)),
                state: Mutex::new(PushState::default()),
            }),
        }
    }

    pub async fn is_enabled(&self) -> bool {
        self.inner.state.lock().await.enabled
    }

    /// Enable or disable the service. Registration happens in the
    /// background; use `registration_settled` to wait for it.
    pub async fn set_enabled(&self, enabled: bool) {
        let mut state = self.inner.state.lock().await;
        if enabled && state.enabled {
            tracing::debug!("Push already enabled");
            return;
        }

        state.enabled = enabled;
        state.generation += 1;
        self.apply_enabled_state(&mut state, enabled);
    }

    // Caller holds the state lock
    fn apply_enabled_state(&self, state: &mut PushState, enabled: bool) {
        if enabled {
            let snapshot = state.generation;
            let inner = Arc::clone(&self.inner);
            state.registration = Some(tokio::spawn(async move {
                inner.complete_registration(snapshot).await;
            }));
        } else {
            if let Some(id) = state.subscription.take() {
                self.inner.source.unsubscribe(id);
            }
            self.inner.client.disconnect();
        }
    }

    /// Wait for the most recently started registration to finish applying
    /// (or discarding) its effects.
    pub async fn registration_settled(&self) {
        let handle = self.inner.state.lock().await.registration.take();
        if let Some(handle) = handle
            && let Err(e) = handle.await
        {
            tracing::error!("Push registration task failed: {}", e);
        }
    }

    pub fn set_push_notification_received<F>(&self, callback: F)
    where
        F: Fn(&PushNotification) + Send + Sync + 'static,
    {
        let callback: PushCallback = Arc::new(callback);
        self.inner.dispatcher.set_callback(callback);
    }

    pub fn clear_push_notification_received(&self) {
        self.inner.dispatcher.clear_callback();
    }

    /// Call with the application's launch arguments so a tap on a system
    /// notification reaches the push callback. Does nothing while disabled.
    pub async fn check_launched_from_notification(&self, args: &LaunchArgs) -> bool {
        if !self.is_enabled().await {
            tracing::debug!("Push disabled, ignoring launch arguments");
            return false;
        }
        self.inner.dispatcher.check_launched_from_notification(args)
    }
}

impl Inner {
    async fn complete_registration(&self, snapshot: u64) {
        // Runs without the lock, this waits on the network
        let push_token = register_push_service(self.client.as_ref(), &self.config).await;

        let mut state = self.state.lock().await;
        if !state.is_current(snapshot) {
            tracing::warn!(
                snapshot,
                generation = state.generation,
                "Push enabled state changed after registering, discarding registration"
            );
            // Release the connection this registration opened
            if !state.enabled {
                self.client.disconnect();
            }
            return;
        }

        if push_token.is_empty() {
            tracing::error!("Push service registering with the backend has failed");
            return;
        }

        if state.subscription.is_none() {
            let handler: Arc<dyn RawNotificationHandler> = self.dispatcher.clone();
            state.subscription = Some(self.source.subscribe(handler));
        }

        tracing::debug!(%push_token, "Push token");
        let log = PushInstallationLog::new(&push_token);
        if let Err(e) = self.channel.enqueue(log).await {
            tracing::error!("Failed to enqueue push installation log: {}", e);
        }
    }
}
