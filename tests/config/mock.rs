use httpmock::MockServer;
use pipedrive::{AccessToken, ApiToken, Pipedrive};

pub const API_TOKEN: &str = "test-api-token";
#[allow(dead_code)]
pub const ACCESS_TOKEN: &str = "test-access-token";

pub struct MockPipedrive {
    server: MockServer,
}

#[allow(dead_code)] //remove this when this issue will be fixed: https://github.com/rust-lang/rust/issues/46379
impl MockPipedrive {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start_async().await,
        }
    }

    pub fn server(&self) -> &MockServer {
        &self.server
    }

    /// Path as seen by the mock server, the client base url ends with `/v1`.
    pub fn path(&self, path: &str) -> String {
        format!("/v1{}", path)
    }

    pub fn client(&self) -> Pipedrive {
        let token = ApiToken::new(API_TOKEN).unwrap();
        Pipedrive::with_base_url(&self.server.url("/v1"), token).unwrap()
    }

    pub fn oauth_client(&self) -> Pipedrive {
        let token = AccessToken::new(ACCESS_TOKEN).unwrap();
        Pipedrive::with_base_url(&self.server.url("/v1"), token).unwrap()
    }
}
