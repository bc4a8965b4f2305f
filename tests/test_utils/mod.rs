//! Test doubles for the platform and backend seams
#![allow(dead_code)]
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;
use futures::stream::{self, BoxStream};
use tokio::sync::{Semaphore, broadcast};

use push_bridge::core::PushConfig;
use push_bridge::ingestion::{IngestionChannel, PushInstallationLog};
use push_bridge::platform::{
    ConnectionState, LifecycleTracker, NotificationSource, PushClient, RawNotification,
    RawNotificationHandler, ServerResult, SubscriptionId,
};
use push_bridge::push::{Push, PushNotification};

const GATE_PERMITS: usize = 1024;

/// Scripted platform push SDK.
///
/// `connect` emits the configured states. A successful server
/// registration emits `Registered`, like the real platform does. While
/// the gate is closed, state streams hold back every state.
pub struct FakePushClient {
    states: broadcast::Sender<ConnectionState>,
    gate: Arc<Semaphore>,
    on_connect: Vec<ConnectionState>,
    server_result: ServerResult,
    registration_id: Option<String>,
    pub connected_with: Mutex<Vec<String>>,
    pub disconnects: AtomicUsize,
    pub server_registrations: AtomicUsize,
}

impl FakePushClient {
    pub fn new(on_connect: Vec<ConnectionState>, registration_id: Option<&str>) -> Self {
        let (states, _) = broadcast::channel(16);
        Self {
            states,
            gate: Arc::new(Semaphore::new(GATE_PERMITS)),
            on_connect,
            server_result: ServerResult::Success,
            registration_id: registration_id.map(|s| s.to_string()),
            connected_with: Mutex::new(Vec::new()),
            disconnects: AtomicUsize::new(0),
            server_registrations: AtomicUsize::new(0),
        }
    }

    /// Client that is already registered and hands out `token`
    pub fn registered(token: &str) -> Self {
        Self::new(vec![ConnectionState::Registered], Some(token))
    }

    pub fn with_server_result(mut self, result: ServerResult) -> Self {
        self.server_result = result;
        self
    }

    pub fn gated(mut self) -> Self {
        self.gate = Arc::new(Semaphore::new(0));
        self
    }

    pub fn release(&self) {
        self.gate.add_permits(GATE_PERMITS);
    }

    pub fn emit(&self, state: ConnectionState) {
        let _ = self.states.send(state);
    }

    pub fn disconnect_count(&self) -> usize {
        self.disconnects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PushClient for FakePushClient {
    fn connection_states(&self) -> BoxStream<'static, ConnectionState> {
        let receiver = self.states.subscribe();
        let gate = Arc::clone(&self.gate);
        Box::pin(stream::unfold(
            (receiver, gate),
            |(mut receiver, gate)| async move {
                drop(gate.acquire().await.ok()?);
                loop {
                    match receiver.recv().await {
                        Ok(state) => return Some((state, (receiver, gate))),
                        Err(broadcast::error::RecvError::Lagged(_)) => continue,
                        Err(broadcast::error::RecvError::Closed) => return None,
                    }
                }
            },
        ))
    }

    fn connect(&self, app_push_id: &str) -> Result<(), Error> {
        self.connected_with
            .lock()
            .unwrap()
            .push(app_push_id.to_string());
        for state in &self.on_connect {
            self.emit(*state);
        }
        Ok(())
    }

    fn disconnect(&self) {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
    }

    fn registration_id(&self) -> Option<String> {
        self.registration_id.clone()
    }

    async fn register_with_server(&self) -> Result<ServerResult, Error> {
        self.server_registrations.fetch_add(1, Ordering::SeqCst);
        if self.server_result.is_success() {
            self.emit(ConnectionState::Registered);
        }
        Ok(self.server_result.clone())
    }
}

/// In-process stand-in for the platform notification event
#[derive(Default)]
pub struct FakeNotificationSource {
    handlers: Mutex<HashMap<SubscriptionId, Arc<dyn RawNotificationHandler>>>,
    next_id: AtomicU64,
    pub unsubscribes: AtomicUsize,
}

impl FakeNotificationSource {
    pub fn deliver(&self, notification: &RawNotification) {
        let handlers: Vec<_> = self.handlers.lock().unwrap().values().cloned().collect();
        for handler in handlers {
            handler.on_raw_notification(notification);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.lock().unwrap().len()
    }
}

impl NotificationSource for FakeNotificationSource {
    fn subscribe(&self, handler: Arc<dyn RawNotificationHandler>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.handlers.lock().unwrap().insert(id, handler);
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.unsubscribes.fetch_add(1, Ordering::SeqCst);
        self.handlers.lock().unwrap().remove(&id);
    }
}

/// Ingestion channel that keeps every log it is given
#[derive(Default)]
pub struct RecordingChannel {
    logs: Mutex<Vec<PushInstallationLog>>,
    fail: bool,
}

impl RecordingChannel {
    pub fn failing() -> Self {
        Self {
            logs: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn logs(&self) -> Vec<PushInstallationLog> {
        self.logs.lock().unwrap().clone()
    }
}

#[async_trait]
impl IngestionChannel for RecordingChannel {
    async fn enqueue(&self, log: PushInstallationLog) -> Result<(), Error> {
        self.logs.lock().unwrap().push(log);
        if self.fail {
            return Err(anyhow!("channel is closed"));
        }
        Ok(())
    }
}

/// Collects every push handed to the application callback
#[derive(Clone, Default)]
pub struct Received(Arc<Mutex<Vec<PushNotification>>>);

impl Received {
    pub fn callback(&self) -> impl Fn(&PushNotification) + Send + Sync + 'static {
        let received = Arc::clone(&self.0);
        move |push: &PushNotification| received.lock().unwrap().push(push.clone())
    }

    pub fn all(&self) -> Vec<PushNotification> {
        self.0.lock().unwrap().clone()
    }
}

pub struct TestPush {
    pub push: Push,
    pub client: Arc<FakePushClient>,
    pub source: Arc<FakeNotificationSource>,
    pub channel: Arc<RecordingChannel>,
    pub lifecycle: Arc<LifecycleTracker>,
    pub received: Received,
}

pub fn test_push(client: FakePushClient) -> TestPush {
    test_push_with(client, RecordingChannel::default(), PushConfig::new("test-app-id"))
}

pub fn test_push_with(
    client: FakePushClient,
    channel: RecordingChannel,
    config: PushConfig,
) -> TestPush {
    let client = Arc::new(client);
    let source = Arc::new(FakeNotificationSource::default());
    let channel = Arc::new(channel);
    let lifecycle = Arc::new(LifecycleTracker::new());
    let received = Received::default();

    let push = Push::new(
        config.with_registration_timeout(Duration::from_secs(5)),
        client.clone(),
        source.clone(),
        channel.clone(),
        lifecycle.clone(),
    );
    push.set_push_notification_received(received.callback());

    TestPush {
        push,
        client,
        source,
        channel,
        lifecycle,
        received,
    }
}

pub fn flat(message: &str, app_data: &str) -> RawNotification {
    RawNotification::Flat {
        message: message.to_string(),
        app_data: app_data.to_string(),
    }
}
