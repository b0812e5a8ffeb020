//! OAuth 2.0 authorization-code flow against the Bling token endpoint.
//!
//! Credentials are checked when a flow step runs, not at construction, so the
//! service boots without them and only the OAuth-dependent routes fail.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use catalogsync_core::OAuthTokenClient;
use catalogsync_domain::{CatalogSyncError, Config, Result, TokenGrant};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Method, StatusCode};
use tracing::{debug, instrument};
use url::Url;

use crate::http::{ensure_success, read_json, single_attempt_client, HttpClient};

const AUTHORIZE_PATH: &str = "oauth/authorize";
const TOKEN_PATH: &str = "oauth/token";

pub struct BlingOAuthClient {
    base_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    http_client: HttpClient,
}

impl BlingOAuthClient {
    pub fn new(
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
        http_client: HttpClient,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            http_client,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let http_client = single_attempt_client(config.http_timeout()?)?;
        Ok(Self::new(
            config.erp.base_url.clone(),
            config.oauth.client_id.clone(),
            config.oauth.client_secret.clone(),
            config.oauth.redirect_uri.clone(),
            http_client,
        ))
    }

    fn require_credentials(&self) -> Result<()> {
        if self.client_id.trim().is_empty() || self.client_secret.trim().is_empty() {
            return Err(CatalogSyncError::Config(
                "BLING_CLIENT_ID and BLING_CLIENT_SECRET must be set".into(),
            ));
        }
        Ok(())
    }

    fn basic_auth_header(&self) -> String {
        let credentials = format!("{}:{}", self.client_id, self.client_secret);
        format!("Basic {}", STANDARD.encode(credentials))
    }

    async fn token_request(&self, form: &[(&str, &str)]) -> Result<TokenGrant> {
        self.require_credentials()?;

        let request = self
            .http_client
            .request(Method::POST, format!("{}/{}", self.base_url, TOKEN_PATH))
            .header(AUTHORIZATION, self.basic_auth_header())
            .header(ACCEPT, "application/json")
            .form(form);

        let response = self.http_client.send(request).await?;
        let response = ensure_success(response, &[StatusCode::OK]).await?;
        let grant: TokenGrant = read_json(response).await?;
        debug!(expires_in = grant.expires_in, "token endpoint issued grant");
        Ok(grant)
    }
}

#[async_trait]
impl OAuthTokenClient for BlingOAuthClient {
    fn authorization_url(&self, state: &str) -> Result<String> {
        self.require_credentials()?;

        let endpoint = format!("{}/{}", self.base_url, AUTHORIZE_PATH);
        let mut url = Url::parse(&endpoint).map_err(|err| {
            CatalogSyncError::Config(format!("invalid ERP base URL '{}': {err}", self.base_url))
        })?;
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.client_id)
            .append_pair("state", state)
            .append_pair("redirect_uri", &self.redirect_uri);

        Ok(url.into())
    }

    #[instrument(skip_all)]
    async fn exchange_code(&self, code: &str) -> Result<TokenGrant> {
        if code.trim().is_empty() {
            return Err(CatalogSyncError::InvalidInput("authorization code is empty".into()));
        }
        self.token_request(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", &self.redirect_uri),
        ])
        .await
    }

    #[instrument(skip_all)]
    async fn refresh(&self, refresh_token: &str) -> Result<TokenGrant> {
        self.token_request(&[("grant_type", "refresh_token"), ("refresh_token", refresh_token)])
            .await
    }
}
