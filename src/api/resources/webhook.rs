use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::from_flag;

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub enum EventAction {
    Added,
    Updated,
    Merged,
    Deleted,
    #[serde(rename = "*")]
    All,
    #[serde(other, skip_serializing)]
    Other,
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub enum EventObject {
    Activity,
    ActivityType,
    Deal,
    Note,
    Organization,
    Person,
    Pipeline,
    Product,
    Stage,
    User,
    #[serde(rename = "*")]
    All,
    #[serde(other, skip_serializing)]
    Other,
}

/// See [Webhooks API reference](https://developers.pipedrive.com/docs/api/v1/Webhooks)
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub struct Webhook {
    pub id: u64,
    pub company_id: Option<u64>,
    pub owner_id: Option<u64>,
    pub user_id: Option<u64>,
    pub event_action: EventAction,
    pub event_object: EventObject,
    pub subscription_url: String,
    #[serde(default, deserialize_with = "from_flag")]
    pub is_active: bool,
    pub add_time: Option<DateTime<Utc>>,
    pub remove_time: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub webhook_type: Option<String>,
    pub http_auth_user: Option<String>,
    pub http_auth_password: Option<String>,
    pub last_delivery_time: Option<DateTime<Utc>>,
    pub last_http_status: Option<u16>,
    pub admin_id: Option<u64>,
}

impl Default for Webhook {
    fn default() -> Self {
        Self {
            id: 0,
            company_id: None,
            owner_id: None,
            user_id: None,
            event_action: EventAction::All,
            event_object: EventObject::All,
            subscription_url: String::new(),
            is_active: false,
            add_time: None,
            remove_time: None,
            webhook_type: None,
            http_auth_user: None,
            http_auth_password: None,
            last_delivery_time: None,
            last_http_status: None,
            admin_id: None,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Serialize, Clone)]
pub struct WebhooksCreateOptions {
    pub subscription_url: String,
    pub event_action: EventAction,
    pub event_object: EventObject,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_auth_user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_auth_password: Option<String>,
}

impl WebhooksCreateOptions {
    pub fn new(subscription_url: &str, event_action: EventAction, event_object: EventObject) -> Self {
        Self {
            subscription_url: subscription_url.to_owned(),
            event_action,
            event_object,
            user_id: None,
            http_auth_user: None,
            http_auth_password: None,
        }
    }

    pub fn with_basic_auth(self, user: &str, password: &str) -> Self {
        Self {
            http_auth_user: Some(user.to_owned()),
            http_auth_password: Some(password.to_owned()),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{EventAction, EventObject, Webhook, WebhooksCreateOptions};

    #[test]
    fn test_webhook_from_json() {
        let raw = r#"{
            "id": 234,
            "company_id": 1,
            "owner_id": 2,
            "user_id": 3,
            "event_action": "*",
            "event_object": "activityType",
            "subscription_url": "https://example.com/hook",
            "version": "1.0",
            "is_active": 1,
            "add_time": "2019-10-15T12:34:56.000Z",
            "remove_time": null,
            "type": "general",
            "http_auth_user": null,
            "http_auth_password": null,
            "remove_reason": null,
            "last_delivery_time": null,
            "last_http_status": null,
            "admin_id": 4
        }"#;

        let actual: Webhook = serde_json::from_str(raw).unwrap();

        assert_eq!(234, actual.id);
        assert_eq!(EventAction::All, actual.event_action);
        assert_eq!(EventObject::ActivityType, actual.event_object);
        assert!(actual.is_active);
        assert_eq!(
            Some(Utc.with_ymd_and_hms(2019, 10, 15, 12, 34, 56).unwrap()),
            actual.add_time
        );
        assert_eq!(None, actual.remove_time);
        assert_eq!(Some("general"), actual.webhook_type.as_deref());
    }

    #[test]
    fn test_webhook_unknown_event_object() {
        let actual: Webhook = serde_json::from_str(
            r#"{"id": 1, "event_action": "added", "event_object": "lead", "subscription_url": "u", "is_active": false}"#,
        )
        .unwrap();

        assert_eq!(EventAction::Added, actual.event_action);
        assert_eq!(EventObject::Other, actual.event_object);
        assert!(!actual.is_active);
    }

    #[test]
    fn test_create_options_to_json() {
        let opts = WebhooksCreateOptions::new(
            "https://example.com/hook",
            EventAction::Updated,
            EventObject::Deal,
        );
        assert_eq!(
            serde_json::json!({
                "subscription_url": "https://example.com/hook",
                "event_action": "updated",
                "event_object": "deal"
            }),
            serde_json::to_value(&opts).unwrap()
        );

        let opts = opts.with_basic_auth("user", "password");
        assert_eq!(
            serde_json::json!({
                "subscription_url": "https://example.com/hook",
                "event_action": "updated",
                "event_object": "deal",
                "http_auth_user": "user",
                "http_auth_password": "password"
            }),
            serde_json::to_value(&opts).unwrap()
        );
    }
}
