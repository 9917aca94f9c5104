/*
[INPUT]:  Relay base URL, timeouts, acting wallet
[OUTPUT]: Configured reqwest client with JSON send helpers
[POS]:    HTTP layer - core relay client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::WalletSigner;
use crate::error::{Result, TaskServiceError};
use crate::http::signature::{
    ADDRESS_HEADER, REQUEST_ID_HEADER, RequestSigner, SIGNATURE_HEADER,
};
use crate::types::ErrorResponse;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Task service client for a relay gateway that submits contract
/// transactions on behalf of a signed wallet request
pub struct RelayTaskService {
    http_client: Client,
    base_url: Url,
    signer: RequestSigner,
}

impl RelayTaskService {
    pub fn new(base_url: &str, wallet: Arc<dyn WalletSigner>) -> Result<Self> {
        Self::with_config(base_url, wallet, RelayConfig::default())
    }

    pub fn with_config(
        base_url: &str,
        wallet: Arc<dyn WalletSigner>,
        config: RelayConfig,
    ) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: directory_url(base_url)?,
            signer: RequestSigner::new(wallet),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Endpoints are relative (`v1/...`) so a path prefix on the base survives
    fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base_url.join(endpoint.trim_start_matches('/'))?)
    }

    /// Unsigned GET returning JSON
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = self.endpoint_url(endpoint)?;
        self.send_json(self.http_client.get(url)).await
    }

    /// Signed POST with a JSON body
    pub(crate) async fn post_signed<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint_url(endpoint)?;
        let payload = serde_json::to_string(body)?;
        let headers = self.signer.sign_request("POST", url.path(), &payload).await?;
        debug!(
            path = url.path(),
            address = %headers.address,
            request_id = %headers.request_id,
            "submitting signed relay request"
        );

        let builder = self
            .http_client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(ADDRESS_HEADER, headers.address)
            .header(REQUEST_ID_HEADER, headers.request_id)
            .header(SIGNATURE_HEADER, headers.signature)
            .body(payload);
        self.send_json(builder).await
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let response = check_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn directory_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .map(|body| body.message)
        .unwrap_or_else(|_| {
            if text.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                text
            }
        });
    Err(TaskServiceError::rejected(status, message))
}
