use std::sync::{Arc, PoisonError, RwLock};

use super::models::PushNotification;
use super::parse::{parse_launch_args, parse_push_notification};
use crate::platform::{AppLifecycle, LaunchArgs, RawNotification, RawNotificationHandler};

/// Application callback invoked for every push sent through this service
pub type PushCallback = Arc<dyn Fn(&PushNotification) + Send + Sync>;

/// Turns raw platform notifications into `PushNotification`s for the
/// application callback.
pub struct NotificationDispatcher {
    lifecycle: Arc<dyn AppLifecycle>,
    callback: RwLock<Option<PushCallback>>,
}

impl NotificationDispatcher {
    pub fn new(lifecycle: Arc<dyn AppLifecycle>) -> Self {
        Self {
            lifecycle,
            callback: RwLock::new(None),
        }
    }

    /// Install the application callback, replacing any previous one
    pub fn set_callback(&self, callback: PushCallback) {
        *self
            .callback
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(callback);
    }

    pub fn clear_callback(&self) {
        *self
            .callback
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Fire the callback if the app was launched by tapping one of our
    /// notifications. Returns whether it fired.
    pub fn check_launched_from_notification(&self, args: &LaunchArgs) -> bool {
        match parse_launch_args(args) {
            Some(push) => {
                tracing::debug!("Application launched from a push notification");
                self.notify(&push)
            }
            None => false,
        }
    }

    fn notify(&self, push: &PushNotification) -> bool {
        // Clone out so the callback can replace itself
        let callback = self
            .callback
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match callback {
            Some(callback) => {
                callback(push);
                true
            }
            None => {
                tracing::debug!("No push callback installed");
                false
            }
        }
    }
}

impl RawNotificationHandler for NotificationDispatcher {
    fn on_raw_notification(&self, notification: &RawNotification) {
        tracing::debug!(?notification, "Received push notification payload");

        if self.lifecycle.is_suspended() {
            tracing::debug!(
                "Application in background. Push callback will be called when the user taps the notification."
            );
            return;
        }

        match parse_push_notification(notification) {
            Some(push) => {
                tracing::debug!("Application in foreground. Intercepting push notification.");
                self.notify(&push);
            }
            None => {
                tracing::debug!("Push ignored. It was not sent through this service.");
            }
        }
    }
}
