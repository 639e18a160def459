use std::sync::Arc;

use futures::{Stream, StreamExt, TryStreamExt};
use reqwest::Method;

use super::{
    client::{ApiClient, Response, EMPTY},
    resources::{
        activity::{ActivitiesCreateOptions, Activity, Summary},
        common::{DeleteMultipleOptions, Envelope, PaginationParameters},
    },
    Error, PipedriveResult,
};

const COLLECTION_PATH: &str = "/activities/collection";

fn activity_path(id: u64) -> String {
    format!("/activities/{}", id)
}

/// Operations of the [Activities API](https://developers.pipedrive.com/docs/api/v1/Activities).
#[derive(Debug, Clone)]
pub struct ActivityClient {
    client: Arc<ApiClient>,
}

impl ActivityClient {
    pub(super) fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn summary(&self) -> PipedriveResult<Response<Envelope<Summary>>> {
        let request = self
            .client
            .new_request(Method::GET, "/activities/summary", EMPTY, EMPTY)?;
        self.client.execute(request).await
    }

    /// One page of activities. Pagination parameters are only sent when set.
    pub async fn list(
        &self,
        opts: &PaginationParameters,
    ) -> PipedriveResult<Response<Envelope<Vec<Activity>>>> {
        let request = if opts.is_requested() {
            self.client
                .new_request(Method::GET, COLLECTION_PATH, Some(opts), EMPTY)?
        } else {
            self.client
                .new_request(Method::GET, COLLECTION_PATH, EMPTY, EMPTY)?
        };
        self.client.execute(request).await
    }

    /// Every activity, following `next_cursor` page after page.
    ///
    /// The stream ends on the first error.
    pub fn list_all(
        &self,
        limit: Option<u32>,
    ) -> impl Stream<Item = PipedriveResult<Activity>> + '_ {
        let first_page = PaginationParameters {
            cursor: None,
            limit,
        };
        futures::stream::try_unfold(Some(first_page), move |state| async move {
            match state {
                None => PipedriveResult::Ok(None),
                Some(state) => {
                    let page = self.list(&state).await?.into_body();
                    let next_state = page
                        .next_cursor()
                        .map(|cursor| state.clone().with_cursor(cursor));
                    let items = futures::stream::iter(page.data).map(Ok);
                    PipedriveResult::Ok(Some((items, next_state)))
                }
            }
        })
        .try_flatten()
    }

    pub async fn get_by_id(&self, id: u64) -> PipedriveResult<Response<Envelope<Activity>>> {
        let request = self
            .client
            .new_request(Method::GET, &activity_path(id), EMPTY, EMPTY)?;
        self.client.execute(request).await
    }

    pub async fn create(
        &self,
        opts: &ActivitiesCreateOptions,
    ) -> PipedriveResult<Response<Envelope<Activity>>> {
        let request = self
            .client
            .new_request(Method::POST, "/activities", EMPTY, Some(opts))?;
        self.client.execute(request).await
    }

    pub async fn update(
        &self,
        id: u64,
        opts: &ActivitiesCreateOptions,
    ) -> PipedriveResult<Response<Envelope<Activity>>> {
        let request = self
            .client
            .new_request(Method::PUT, &activity_path(id), EMPTY, Some(opts))?;
        self.client.execute(request).await
    }

    pub async fn delete(&self, id: u64) -> PipedriveResult<Response<()>> {
        let request = self
            .client
            .new_request(Method::DELETE, &activity_path(id), EMPTY, EMPTY)?;
        self.client.execute_empty(request).await
    }

    /// Bulk delete, sent as `ids=1,2,3`. An empty `ids` fails without sending anything.
    pub async fn delete_multiple(&self, ids: &[u64]) -> PipedriveResult<Response<()>> {
        if ids.is_empty() {
            return Err(Error::InvalidArgument(
                "delete_multiple needs at least one activity id".to_owned(),
            ));
        }
        let opts = DeleteMultipleOptions::new(ids);
        let request = self
            .client
            .new_request(Method::DELETE, "/activities", Some(&opts), EMPTY)?;
        self.client.execute_empty(request).await
    }
}
