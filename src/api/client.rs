use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE},
    Method, Request, StatusCode, Url,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use super::{credentials::Credentials, Client, DeserializedResponse, Error, PipedriveResult};

pub const DEFAULT_BASE_URL: &str = "https://api.pipedrive.com/v1";

/// Stands for an absent query string or body in [`ApiClient::new_request`].
pub const EMPTY: Option<&()> = None;

/// Decoded payload along with the raw response metadata.
#[derive(Debug)]
pub struct Response<T> {
    pub url: Url,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: T,
}

impl<T> Response<T> {
    pub fn into_body(self) -> T {
        self.body
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Request builder and response decoder shared by every resource client.
#[derive(Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    credentials: Box<dyn Credentials>,
}

fn parse_base_url(base_url: &str) -> PipedriveResult<Url> {
    let normalized = if base_url.ends_with('/') {
        base_url.to_owned()
    } else {
        format!("{}/", base_url)
    };
    let url = Url::parse(&normalized).map_err(|err| Error::invalid_url(base_url, err))?;
    if url.cannot_be_a_base() {
        return Err(Error::invalid_url(base_url, "cannot be used as a base url"));
    }
    Ok(url)
}

impl ApiClient {
    pub fn new<C>(base_url: &str, credentials: C) -> PipedriveResult<Self>
    where
        C: Credentials + 'static,
    {
        Ok(Self {
            client: Client::new()?,
            base_url: parse_base_url(base_url)?,
            credentials: Box::new(credentials),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds a request for `path` relative to the base url.
    ///
    /// `query` is url-encoded into the query string and `body` is sent as json.
    /// Pass [`EMPTY`] for either when the endpoint takes none.
    pub fn new_request<Q, B>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Q>,
        body: Option<&B>,
    ) -> PipedriveResult<Request>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| Error::invalid_url(path, err))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        self.credentials.authorize(&mut headers)?;

        let mut request = self.client.client.request(method, url).headers(headers);
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(body) = body {
            let json = serde_json::to_vec(body).map_err(Error::invalid_body::<B>)?;
            request = request
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(json);
        }
        request.build().map_err(Error::HttpRequestError)
    }

    async fn success_response(
        url: &str,
        response: reqwest::Response,
    ) -> PipedriveResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.map_err(Error::HttpBodyError)?;
        warn!(%url, %status, "unexpected response");
        Err(Error::UnexpectedResponse {
            url: url.to_owned(),
            status,
            body,
        })
    }

    async fn send(&self, request: Request) -> PipedriveResult<reqwest::Response> {
        let method = request.method().clone();
        let url = request.url().to_string();
        debug!(%method, %url, "sending request");

        let response = self.client.client.execute(request).await.map_err(|err| {
            warn!(%method, %url, error = %err, "request failed");
            Error::HttpSendError(err)
        })?;
        Self::success_response(&url, response).await
    }

    /// Sends `request` once and decodes the json body into `R`.
    pub async fn execute<R>(&self, request: Request) -> PipedriveResult<Response<R>>
    where
        R: DeserializeOwned,
    {
        let response = self.send(request).await?;
        let url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await.map_err(Error::HttpBodyError)?;
        let body = decode(url.as_str(), &bytes)?;

        Ok(Response {
            url,
            status,
            headers,
            body,
        })
    }

    /// Sends `request` once, ignoring the response body.
    pub async fn execute_empty(&self, request: Request) -> PipedriveResult<Response<()>> {
        let response = self.send(request).await?;

        Ok(Response {
            url: response.url().clone(),
            status: response.status(),
            headers: response.headers().clone(),
            body: (),
        })
    }
}

fn decode<R>(url: &str, bytes: &[u8]) -> PipedriveResult<R>
where
    R: DeserializeOwned,
{
    let r: DeserializedResponse<R> = serde_json::from_slice(bytes).map_err(|error| {
        warn!(%url, %error, "invalid json");
        Error::InvalidJson {
            url: url.to_owned(),
            error,
        }
    })?;
    r.into_result().map_err(|json| {
        warn!(%url, expected_type = std::any::type_name::<R>(), "unexpected json");
        Error::unexpected_json::<R>(url, json)
    })
}
