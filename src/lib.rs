//! Async client for the Pipedrive CRM REST API
//!
//! - typed: requests and responses are plain serde structs, every response is decoded into an [`Envelope`]
//! - transparent: each method is a single HTTP round trip, no retry, no cache, no hidden state
//! - auth supported: personal api token ([`ApiToken`]) and OAuth access token ([`AccessToken`])
//! - resources: activities and webhooks, other endpoints are reachable through [`ApiClient`]
//!
//! Errors are never retried: transport failures, non-2xx responses (with status and body) and
//! json decoding failures are all returned as an [`Error`].
//!
//! # Quick Start
//! ```rust,no_run
//! use futures::TryStreamExt;
//! use pipedrive::{ApiToken, PaginationParameters, Pipedrive, PipedriveResult};
//!
//! #[tokio::main]
//! async fn main() -> PipedriveResult<()> {
//!     let pipedrive = Pipedrive::new(ApiToken::from_env()?)?;
//!     let activities = pipedrive.activities();
//!
//!     let page = activities
//!         .list(&PaginationParameters::with_limit(50))
//!         .await?
//!         .into_body();
//!     for activity in page.data {
//!         println!("{}", activity);
//!     }
//!
//!     let all: Vec<_> = activities.list_all(Some(100)).try_collect().await?;
//!     println!("{} activities", all.len());
//!
//!     Ok(())
//! }
//! ```
mod api;

pub use api::{activities, credentials, webhooks};
pub use api::{
    AccessToken, ActivitiesCreateOptions, Activity, AdditionalData, ApiClient, ApiToken,
    Credentials, DeleteMultipleOptions, Envelope, Error, EventAction, EventObject, Pagination,
    PaginationParameters, Participant, Pipedrive, PipedriveResult, Response, Summary, Webhook,
    WebhooksCreateOptions, DEFAULT_BASE_URL, EMPTY,
};
