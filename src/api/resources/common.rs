use serde::{Deserialize, Deserializer, Serialize};

/// `{success, data, additional_data}` wrapper of every api response.
///
/// `success` and `data` must be present, a `null` data decodes as `T::default()`.
#[derive(Debug, PartialEq, Serialize, Deserialize, Default, Clone)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub data: T,
    #[serde(default)]
    pub additional_data: Option<AdditionalData>,
}

impl<T> Envelope<T> {
    pub fn into_data(self) -> T {
        self.data
    }

    /// Cursor of the next page of a collection endpoint, if any.
    pub fn next_cursor(&self) -> Option<&str> {
        self.additional_data
            .as_ref()
            .and_then(|a| a.next_cursor.as_deref())
            .filter(|c| !c.is_empty())
    }
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Default, Clone)]
pub struct AdditionalData {
    pub next_cursor: Option<String>,
    pub pagination: Option<Pagination>,
}

/// Offset pagination reported by the v1 list endpoints.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Default, Clone)]
pub struct Pagination {
    #[serde(default)]
    pub start: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub more_items_in_collection: bool,
    pub next_start: Option<u64>,
}

/// Cursor pagination of the collection endpoints.
///
/// An empty cursor and a zero limit are left out of the query string.
#[derive(Debug, PartialEq, Eq, Serialize, Default, Clone)]
pub struct PaginationParameters {
    #[serde(skip_serializing_if = "is_empty_cursor")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "is_zero_limit")]
    pub limit: Option<u32>,
}

fn is_empty_cursor(cursor: &Option<String>) -> bool {
    cursor.as_deref().map_or(true, str::is_empty)
}

fn is_zero_limit(limit: &Option<u32>) -> bool {
    limit.map_or(true, |l| l == 0)
}

impl PaginationParameters {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Default::default()
        }
    }

    pub fn with_cursor(self, cursor: &str) -> Self {
        Self {
            cursor: Some(cursor.to_owned()),
            ..self
        }
    }

    /// Whether any pagination parameter ends up in the query string.
    pub fn is_requested(&self) -> bool {
        !is_empty_cursor(&self.cursor) || !is_zero_limit(&self.limit)
    }
}

/// Query of the bulk delete endpoints.
#[derive(Debug, PartialEq, Eq, Serialize, Clone)]
pub struct DeleteMultipleOptions {
    pub ids: String,
}

impl DeleteMultipleOptions {
    pub fn new(ids: &[u64]) -> Self {
        Self {
            ids: ids
                .iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

pub(super) fn null_as_default<'de, T, D>(deserializer: D) -> std::result::Result<T, D::Error>
where
    T: Deserialize<'de> + Default,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Accepts a json string or number and parses it as `T`. Null and empty strings are `None`.
pub(super) fn from_string_option<'de, T, D>(
    deserializer: D,
) -> std::result::Result<Option<T>, D::Error>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_json::Value;
    match Option::<Value>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => T::from_str(&s).map(Option::from).map_err(Error::custom),
        Some(Value::Number(num)) => T::from_str(&num.to_string())
            .map(Option::from)
            .map_err(Error::custom),
        Some(value) => Err(Error::custom(format!(
            "Wrong type, expected type {} but got value {:?}",
            std::any::type_name::<T>(),
            value,
        ))),
    }
}

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamps formatted as `YYYY-MM-DD HH:MM:SS` (UTC). Null and empty strings are `None`.
pub(super) fn from_datetime_option<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<chrono::NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => chrono::NaiveDateTime::parse_from_str(&s, DATETIME_FORMAT)
            .map(Some)
            .map_err(Error::custom),
    }
}

/// Flags come as `0`/`1` or as booleans depending on the endpoint.
pub(super) fn from_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_json::Value;
    match Option::<Value>::deserialize(deserializer)? {
        None => Ok(false),
        Some(Value::Bool(b)) => Ok(b),
        Some(Value::Number(num)) => Ok(num.as_u64().map_or(false, |n| n != 0)),
        Some(value) => Err(Error::custom(format!(
            "Wrong type, expected a flag but got value {:?}",
            value
        ))),
    }
}
