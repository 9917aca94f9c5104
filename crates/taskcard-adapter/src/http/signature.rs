/*
[INPUT]:  Request method, path, body and the acting wallet
[OUTPUT]: Signed relay headers (address, request id, signature)
[POS]:    HTTP layer - request signing for mutating relay endpoints
[UPDATE]: When changing signing payload or header format
*/

use std::sync::Arc;

use uuid::Uuid;

use crate::auth::WalletSigner;
use crate::error::Result;

pub const ADDRESS_HEADER: &str = "x-taskcard-address";
pub const REQUEST_ID_HEADER: &str = "x-taskcard-request-id";
pub const SIGNATURE_HEADER: &str = "x-taskcard-signature";

/// Headers attached to a signed relay request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub address: String,
    pub request_id: String,
    pub signature: String,
}

/// Signs relay requests with the acting wallet
#[derive(Clone)]
pub struct RequestSigner {
    wallet: Arc<dyn WalletSigner>,
}

impl RequestSigner {
    pub fn new(wallet: Arc<dyn WalletSigner>) -> Self {
        Self { wallet }
    }

    pub fn address(&self) -> &str {
        self.wallet.address()
    }

    /// Generate a request id for signing headers
    pub fn request_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    /// Payload format: "{METHOD} {path}\n{request_id}\n{body}"
    pub fn payload(method: &str, path: &str, request_id: &str, body: &str) -> String {
        format!("{method} {path}\n{request_id}\n{body}")
    }

    pub async fn sign_request(&self, method: &str, path: &str, body: &str) -> Result<SignedHeaders> {
        let request_id = self.request_id();
        let payload = Self::payload(method, path, &request_id, body);
        let signature = self.wallet.sign_message(&payload).await?;
        Ok(SignedHeaders {
            address: self.wallet.address().to_string(),
            request_id,
            signature,
        })
    }
}
