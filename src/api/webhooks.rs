use std::sync::Arc;

use reqwest::Method;

use super::{
    client::{ApiClient, Response, EMPTY},
    resources::{
        common::Envelope,
        webhook::{Webhook, WebhooksCreateOptions},
    },
    PipedriveResult,
};

/// Operations of the [Webhooks API](https://developers.pipedrive.com/docs/api/v1/Webhooks).
#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: Arc<ApiClient>,
}

impl WebhookClient {
    pub(super) fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> PipedriveResult<Response<Envelope<Vec<Webhook>>>> {
        let request = self
            .client
            .new_request(Method::GET, "/webhooks", EMPTY, EMPTY)?;
        self.client.execute(request).await
    }

    pub async fn create(
        &self,
        opts: &WebhooksCreateOptions,
    ) -> PipedriveResult<Response<Envelope<Webhook>>> {
        let request = self
            .client
            .new_request(Method::POST, "/webhooks", EMPTY, Some(opts))?;
        self.client.execute(request).await
    }

    pub async fn delete(&self, id: u64) -> PipedriveResult<Response<()>> {
        let request = self.client.new_request(
            Method::DELETE,
            &format!("/webhooks/{}", id),
            EMPTY,
            EMPTY,
        )?;
        self.client.execute_empty(request).await
    }
}
