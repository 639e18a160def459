use std::fmt::Display;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize, Serializer};

use super::common::{from_datetime_option, from_flag, from_string_option, null_as_default};

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Default, Clone)]
pub struct Participant {
    pub person_id: u64,
    #[serde(default)]
    pub primary_flag: bool,
}

/// See [Activities API reference](https://developers.pipedrive.com/docs/api/v1/Activities)
#[derive(Debug, PartialEq, Serialize, Deserialize, Default, Clone)]
pub struct Activity {
    pub id: u64,
    #[serde(rename = "type")]
    pub activity_type: Option<String>,
    pub subject: Option<String>,
    pub duration: Option<String>,
    pub company_id: Option<u64>,
    pub user_id: Option<u64>,
    #[serde(default, deserialize_with = "from_flag")]
    pub done: bool,
    #[serde(default, deserialize_with = "from_string_option")]
    pub due_date: Option<NaiveDate>,
    pub due_time: Option<String>,
    #[serde(default, deserialize_with = "from_datetime_option")]
    pub add_time: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "from_datetime_option")]
    pub marked_as_done_time: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "from_datetime_option")]
    pub update_time: Option<NaiveDateTime>,
    pub org_id: Option<u64>,
    pub person_id: Option<u64>,
    pub deal_id: Option<u64>,
    pub lead_id: Option<String>,
    pub project_id: Option<u64>,
    #[serde(default, deserialize_with = "from_flag")]
    pub active_flag: bool,
    #[serde(default, deserialize_with = "from_flag")]
    pub busy_flag: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub participants: Vec<Participant>,
    pub conference_meeting_client: Option<String>,
    pub conference_meeting_url: Option<String>,
    #[serde(default, deserialize_with = "from_string_option")]
    pub conference_meeting_id: Option<String>,
    pub public_description: Option<String>,
    pub note: Option<String>,
    pub location: Option<String>,
    pub location_subpremise: Option<String>,
    #[serde(default, deserialize_with = "from_string_option")]
    pub location_street_number: Option<String>,
    pub location_route: Option<String>,
    pub location_sublocality: Option<String>,
    pub location_locality: Option<String>,
    pub location_admin_area_level_1: Option<String>,
    pub location_admin_area_level_2: Option<String>,
    pub location_country: Option<String>,
    pub location_postal_code: Option<String>,
    pub location_formatted_address: Option<String>,
    pub update_user_id: Option<u64>,
    pub source_timezone: Option<String>,
}

impl Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "activity {} ({})",
            self.id,
            self.subject.as_deref().unwrap_or_default()
        )
    }
}

/// Body of the create and update endpoints. Unset fields are left out.
#[derive(Debug, PartialEq, Eq, Serialize, Default, Clone)]
pub struct ActivitiesCreateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "as_flag")]
    pub done: Option<bool>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<Participant>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "as_flag")]
    pub busy_flag: Option<bool>,
}

// the api expects 0/1
fn as_flag<S>(flag: &Option<bool>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match flag {
        Some(flag) => serializer.serialize_u8(u8::from(*flag)),
        None => serializer.serialize_none(),
    }
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Default, Clone)]
pub struct Summary {
    #[serde(default)]
    pub total_count: u64,
}
