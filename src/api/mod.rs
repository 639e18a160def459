pub mod activities;
pub mod credentials;
pub mod webhooks;

mod client;
mod resources;

use std::sync::Arc;

pub use client::{ApiClient, Response, DEFAULT_BASE_URL, EMPTY};
pub use credentials::{AccessToken, ApiToken, Credentials};
pub use resources::{
    activity::{ActivitiesCreateOptions, Activity, Participant, Summary},
    common::{AdditionalData, DeleteMultipleOptions, Envelope, Pagination, PaginationParameters},
    webhook::{EventAction, EventObject, Webhook, WebhooksCreateOptions},
};

const USER_AGENT: &str = concat!("pipedrive-rs/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub(self) struct Client {
    pub(self) client: reqwest::Client,
}

impl Client {
    fn new() -> PipedriveResult<Self> {
        reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map(|client| Self { client })
            .map_err(Error::HttpRequestError)
    }
}

#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
enum DeserializedResponse<T> {
    Success(T),
    Error(serde_json::Value),
}

impl<T> DeserializedResponse<T> {
    pub fn into_result(self) -> Result<T, serde_json::Value> {
        match self {
            DeserializedResponse::Success(x) => Ok(x),
            DeserializedResponse::Error(e) => Err(e),
        }
    }
}

/// Entry point of the crate: one shared [`ApiClient`] handing out resource clients.
///
/// Cloning is cheap, every clone shares the same connection pool and credentials.
#[derive(Debug, Clone)]
pub struct Pipedrive {
    client: Arc<ApiClient>,
}

impl Pipedrive {
    /// Client against [`DEFAULT_BASE_URL`].
    pub fn new<C>(credentials: C) -> PipedriveResult<Self>
    where
        C: Credentials + 'static,
    {
        Self::with_base_url(DEFAULT_BASE_URL, credentials)
    }

    pub fn with_base_url<C>(base_url: &str, credentials: C) -> PipedriveResult<Self>
    where
        C: Credentials + 'static,
    {
        Ok(Self {
            client: Arc::new(ApiClient::new(base_url, credentials)?),
        })
    }

    pub fn activities(&self) -> activities::ActivityClient {
        activities::ActivityClient::new(self.client.clone())
    }

    pub fn webhooks(&self) -> webhooks::WebhookClient {
        webhooks::WebhookClient::new(self.client.clone())
    }

    /// Shared plumbing, for endpoints without a dedicated resource client.
    pub fn api_client(&self) -> &ApiClient {
        &self.client
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid url {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("cannot encode {expected_type} as json: {error}")]
    InvalidBody {
        expected_type: String,
        error: serde_json::Error,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("environment variable {key}: {error}")]
    EnvVarError {
        key: String,
        error: std::env::VarError,
    },

    #[error("{message} {}: {error}", .path.display())]
    IoError {
        message: String,
        path: std::path::PathBuf,
        error: std::io::Error,
    },

    #[error("cannot build request: {0}")]
    HttpRequestError(reqwest::Error),

    #[error("request failed: {0}")]
    HttpSendError(reqwest::Error),

    #[error("cannot read response body: {0}")]
    HttpBodyError(reqwest::Error),

    #[error("unexpected response {status} from {url}: {body}")]
    UnexpectedResponse {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("invalid json from {url}: {error}")]
    InvalidJson {
        url: String,
        error: serde_json::Error,
    },

    #[error("unexpected json from {url}, expected {expected_type}: {json}")]
    UnexpectedJson {
        url: String,
        expected_type: String,
        json: serde_json::Value,
    },
}

impl Error {
    fn invalid_body<T: ?Sized>(error: serde_json::Error) -> Self {
        Self::InvalidBody {
            expected_type: std::any::type_name::<T>().to_owned(),
            error,
        }
    }

    fn invalid_url<T, U>(url: T, message: U) -> Self
    where
        T: AsRef<str>,
        U: ToString,
    {
        Self::InvalidUrl {
            url: url.as_ref().to_owned(),
            message: message.to_string(),
        }
    }

    fn unexpected_json<T>(url: &str, json: serde_json::Value) -> Self {
        Self::UnexpectedJson {
            url: url.to_owned(),
            expected_type: std::any::type_name::<T>().to_owned(),
            json,
        }
    }

    /// HTTP status of a non-2xx response.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::UnexpectedResponse { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(reqwest::StatusCode::NOT_FOUND)
    }
}

pub type PipedriveResult<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::{DeserializedResponse, Error};

    #[test]
    fn test_error_display() {
        let e = Error::UnexpectedResponse {
            url: "url".to_owned(),
            status: reqwest::StatusCode::FORBIDDEN,
            body: "body".to_owned(),
        };

        assert_eq!("unexpected response 403 Forbidden from url: body", e.to_string());
        assert_eq!(Some(reqwest::StatusCode::FORBIDDEN), e.status());
        assert!(!e.is_not_found());
    }

    #[test]
    fn test_error_status_is_only_set_for_responses() {
        let e = Error::invalid_url("url", "relative URL without a base");
        assert_eq!(None, e.status());
    }

    #[test]
    fn test_deserialized_response_keeps_unmatched_json() {
        #[derive(Debug, serde::Deserialize)]
        struct Id {
            #[allow(dead_code)]
            id: u64,
        }

        let r: DeserializedResponse<Id> = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert!(r.into_result().is_ok());

        let r: DeserializedResponse<Id> = serde_json::from_str(r#"{"name": "x"}"#).unwrap();
        assert_eq!(
            serde_json::json!({"name": "x"}),
            r.into_result().unwrap_err()
        );
    }
}
