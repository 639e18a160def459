use std::{fmt::Debug, path::Path};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};

use super::{Error, PipedriveResult};

pub const API_TOKEN_ENV_KEY: &str = "PIPEDRIVE_API_TOKEN";

const API_TOKEN_HEADER: &str = "x-api-token";

/// Injects authentication headers into every outgoing request.
pub trait Credentials: Debug + Send + Sync {
    fn authorize(&self, headers: &mut HeaderMap) -> PipedriveResult<()>;
}

fn sensitive_header_value(value: &str) -> PipedriveResult<HeaderValue> {
    let mut value = HeaderValue::from_str(value)
        .map_err(|err| Error::InvalidCredentials(err.to_string()))?;
    value.set_sensitive(true);
    Ok(value)
}

fn non_empty(token: &str) -> PipedriveResult<String> {
    let token = token.trim();
    if token.is_empty() {
        Err(Error::InvalidCredentials("empty token".to_owned()))
    } else {
        Ok(token.to_owned())
    }
}

/// Personal api token sent in the `x-api-token` header.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken {
    token: String,
}

impl ApiToken {
    pub fn new(token: &str) -> PipedriveResult<Self> {
        non_empty(token).map(|token| Self { token })
    }

    /// Reads the token from the `PIPEDRIVE_API_TOKEN` environment variable.
    pub fn from_env() -> PipedriveResult<Self> {
        std::env::var(API_TOKEN_ENV_KEY)
            .map_err(|error| Error::EnvVarError {
                key: API_TOKEN_ENV_KEY.to_owned(),
                error,
            })
            .and_then(|token| Self::new(&token))
    }

    pub async fn from_file<T>(file_path: T) -> PipedriveResult<Self>
    where
        T: AsRef<Path>,
    {
        tokio::fs::read_to_string(file_path.as_ref())
            .await
            .map_err(|error| Error::IoError {
                message: "error while reading token file".to_owned(),
                path: file_path.as_ref().to_owned(),
                error,
            })
            .and_then(|token| Self::new(&token))
    }
}

impl Debug for ApiToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiToken").finish_non_exhaustive()
    }
}

impl Credentials for ApiToken {
    fn authorize(&self, headers: &mut HeaderMap) -> PipedriveResult<()> {
        headers.insert(
            HeaderName::from_static(API_TOKEN_HEADER),
            sensitive_header_value(&self.token)?,
        );
        Ok(())
    }
}

/// OAuth access token sent as a bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    token: String,
}

impl AccessToken {
    pub fn new(token: &str) -> PipedriveResult<Self> {
        non_empty(token).map(|token| Self { token })
    }
}

impl Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken").finish_non_exhaustive()
    }
}

impl Credentials for AccessToken {
    fn authorize(&self, headers: &mut HeaderMap) -> PipedriveResult<()> {
        headers.insert(
            AUTHORIZATION,
            sensitive_header_value(&format!("Bearer {}", self.token))?,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderMap;

    use super::{AccessToken, ApiToken, Credentials, API_TOKEN_ENV_KEY};
    use crate::api::Error;

    #[test]
    fn test_api_token_header() {
        let mut headers = HeaderMap::new();
        ApiToken::new("token").unwrap().authorize(&mut headers).unwrap();

        assert_eq!("token", headers["x-api-token"]);
        assert!(headers["x-api-token"].is_sensitive());
    }

    #[test]
    fn test_access_token_header() {
        let mut headers = HeaderMap::new();
        AccessToken::new("token").unwrap().authorize(&mut headers).unwrap();

        assert_eq!("Bearer token", headers["authorization"]);
        assert!(headers["authorization"].is_sensitive());
    }

    #[test]
    fn test_token_is_trimmed() {
        assert_eq!(ApiToken::new("token").unwrap(), ApiToken::new(" token\n").unwrap());
    }

    #[test]
    fn test_invalid_tokens() {
        assert!(matches!(
            ApiToken::new("  ").unwrap_err(),
            Error::InvalidCredentials(_)
        ));
        assert!(matches!(
            AccessToken::new("").unwrap_err(),
            Error::InvalidCredentials(_)
        ));

        let mut headers = HeaderMap::new();
        let err = ApiToken::new("to\nken")
            .unwrap()
            .authorize(&mut headers)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidCredentials(_)));
    }

    #[test]
    fn test_debug_hides_secret() {
        let debug = format!("{:?}", ApiToken::new("secret").unwrap());
        assert!(!debug.contains("secret"), "{} leaks the token", debug);
        let debug = format!("{:?}", AccessToken::new("secret").unwrap());
        assert!(!debug.contains("secret"), "{} leaks the token", debug);
    }

    #[tokio::test]
    async fn test_api_token_from_missing_file() {
        let err = ApiToken::from_file("/this/file/does/not/exist")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::IoError { .. }), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_api_token_from_file() {
        let path = std::env::temp_dir().join(format!("pipedrive-token-{}", std::process::id()));
        tokio::fs::write(&path, " token\n").await.unwrap();

        let token = ApiToken::from_file(&path).await;
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(ApiToken::new("token").unwrap(), token.unwrap());
    }

    // single test so no other test races on the process environment
    #[test]
    fn test_api_token_from_env() {
        std::env::remove_var(API_TOKEN_ENV_KEY);
        match ApiToken::from_env().unwrap_err() {
            Error::EnvVarError { key, error } => {
                assert_eq!(API_TOKEN_ENV_KEY, key);
                assert_eq!(std::env::VarError::NotPresent, error);
            }
            e => panic!("expected EnvVarError got {:?}", e),
        }

        std::env::set_var(API_TOKEN_ENV_KEY, " env-token ");
        let token = ApiToken::from_env();
        std::env::remove_var(API_TOKEN_ENV_KEY);

        let mut headers = HeaderMap::new();
        token.unwrap().authorize(&mut headers).unwrap();
        assert_eq!("env-token", headers["x-api-token"]);
    }
}
