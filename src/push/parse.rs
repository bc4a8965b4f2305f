//! Recognize pushes sent through this service and normalize them.
//!
//! Every function here returns `None` for anything it can't read, whether
//! the payload belongs to someone else or is simply malformed.
use std::collections::HashMap;

use serde_json::Value;

use super::models::PushNotification;
use super::xml::{self, Element};
use crate::platform::{LaunchArgs, RawNotification};

/// Key whose presence in a push's custom JSON marks it as ours
pub const RESERVED_NAMESPACE_KEY: &str = "mobile_center";

/// Launch extra data key holding the reason the app was launched
pub const LAUNCH_TYPE_KEY: &str = "http://tizen.org/appcontrol/data/push_launch_type";
/// Launch extra data key holding the app-data string of the tapped push
pub const LAUNCH_DATA_KEY: &str = "http://tizen.org/appcontrol/data/push_launch_data";
pub const NOTIFICATION_LAUNCH_TYPE: &str = "notification";

const TITLE_QUERY_KEY: &str = "textTypeTitle";
const CONTENT_QUERY_KEY: &str = "textTypeContent";
const TITLE_TEXT_ID: &str = "1";
const MESSAGE_TEXT_ID: &str = "2";

pub fn parse_push_notification(raw: &RawNotification) -> Option<PushNotification> {
    match raw {
        RawNotification::Toast { xml } => parse_toast(xml),
        RawNotification::Flat { message, app_data } => parse_flat(message, app_data),
    }
}

/// Parse a toast XML document. Ours always carry a `launch` attribute on
/// the root holding a JSON object with the reserved key.
pub fn parse_toast(document: &str) -> Option<PushNotification> {
    let root = match xml::parse_document(document) {
        Ok(root) => root,
        Err(e) => {
            tracing::debug!("Ignoring push with unreadable toast: {}", e);
            return None;
        }
    };

    if root.name != "toast" {
        tracing::debug!(root = %root.name, "Ignoring push that is not a toast");
        return None;
    }

    let Some(launch) = root.attr("launch") else {
        tracing::debug!("Ignoring toast without a launch attribute");
        return None;
    };
    let custom_data = parse_launch_string(launch)?;

    Some(PushNotification {
        title: binding_text(&root, TITLE_TEXT_ID),
        message: binding_text(&root, MESSAGE_TEXT_ID),
        custom_data,
    })
}

/// Text of the first `/toast/visual/binding/text` element with the given id
fn binding_text(root: &Element, id: &str) -> Option<String> {
    root.children_named("visual")
        .flat_map(|visual| visual.children_named("binding"))
        .flat_map(|binding| binding.children_named("text"))
        .find(|text| text.attr("id") == Some(id))
        .map(Element::inner_text)
}

/// Extract custom data from a toast launch string.
///
/// String values are kept verbatim, any other JSON value is kept as its
/// JSON text.
pub fn parse_launch_string(launch: &str) -> Option<HashMap<String, String>> {
    let value: Value = match serde_json::from_str(launch) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!("Ignoring push with malformed launch JSON: {}", e);
            return None;
        }
    };

    let Some(data) = value.get(RESERVED_NAMESPACE_KEY).and_then(Value::as_object) else {
        tracing::debug!("Launch JSON has no {} object", RESERVED_NAMESPACE_KEY);
        return None;
    };

    let custom_data = data
        .iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), value)
        })
        .collect();
    Some(custom_data)
}

/// Parse the flat delivery mode: a query string message carrying title and
/// content, plus an encoded app-data string carrying custom data.
pub fn parse_flat(message: &str, app_data: &str) -> Option<PushNotification> {
    let custom_data = parse_app_data(app_data)?;
    let Some((title, message)) = parse_message(message) else {
        tracing::debug!("Ignoring push with malformed message query string");
        return None;
    };

    Some(PushNotification {
        title,
        message,
        custom_data,
    })
}

/// Decode an app-data string of the form `{key1:val1&key2:val2}`. Every
/// entry needs exactly one `:` and a non-empty key or the whole string is
/// rejected.
pub fn parse_app_data(app_data: &str) -> Option<HashMap<String, String>> {
    let Some(inner) = app_data
        .trim()
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
    else {
        tracing::debug!("Ignoring app data without enclosing braces");
        return None;
    };

    if inner.is_empty() {
        return Some(HashMap::new());
    }

    let custom_data = inner
        .split('&')
        .map(|entry| {
            let mut parts = entry.split(':');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(key), Some(value), None) if !key.is_empty() => {
                    Some((key.to_string(), value.to_string()))
                }
                _ => None,
            }
        })
        .collect::<Option<HashMap<_, _>>>();

    if custom_data.is_none() {
        tracing::debug!(app_data, "Ignoring malformed app data");
    }
    custom_data
}

fn parse_message(message: &str) -> Option<(Option<String>, Option<String>)> {
    let mut title = None;
    let mut content = None;

    for pair in message.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=')?;
        let value = urlencoding::decode(&value.replace('+', " "))
            .ok()?
            .into_owned();
        match key {
            TITLE_QUERY_KEY => title = Some(value),
            CONTENT_QUERY_KEY => content = Some(value),
            _ => {}
        }
    }

    Some((title, content))
}

/// Recover custom data from the arguments the app was launched with after
/// the user tapped one of our system notifications.
pub fn parse_launch_args(args: &LaunchArgs) -> Option<PushNotification> {
    let launch_type = args.get(LAUNCH_TYPE_KEY)?;
    if launch_type != NOTIFICATION_LAUNCH_TYPE {
        tracing::debug!(launch_type, "App was not launched from a notification");
        return None;
    }

    let Some(app_data) = args.get(LAUNCH_DATA_KEY) else {
        tracing::debug!("Launched from a notification without app data");
        return None;
    };

    Some(PushNotification {
        title: None,
        message: None,
        custom_data: parse_app_data(app_data)?,
    })
}
