/*
[INPUT]:  Message to sign and wallet key material
[OUTPUT]: Wallet address and signature strings
[POS]:    Auth layer - wallet integration abstraction
[UPDATE]: When adding new wallet types or changing signature format
*/

use async_trait::async_trait;

use crate::error::Result;

/// Source of the current wallet address.
///
/// Views only need to know who is acting; anything that signs is also an
/// identity through the blanket impl below.
pub trait Identity: Send + Sync {
    fn current_address(&self) -> String;
}

/// Trait for wallet signing operations
///
/// The trait is async to support hardware wallets and external signers.
#[async_trait]
pub trait WalletSigner: Send + Sync {
    /// Get the wallet address
    fn address(&self) -> &str;

    /// Sign a message and return the hex-encoded signature (0x...)
    async fn sign_message(&self, message: &str) -> Result<String>;
}

impl<T: WalletSigner> Identity for T {
    fn current_address(&self) -> String {
        self.address().to_string()
    }
}

/// Mock wallet signer for testing and demo mode
#[derive(Debug, Clone)]
pub struct MockWalletSigner {
    address: String,
    signature: String,
}

impl MockWalletSigner {
    /// Create a new mock signer with predetermined signature
    pub fn new(address: &str, signature: &str) -> Self {
        Self {
            address: address.to_string(),
            signature: signature.to_string(),
        }
    }

    /// Address-only signer; signatures are a fixed placeholder
    pub fn with_address(address: &str) -> Self {
        Self::new(address, "0xmock_signature")
    }
}

#[async_trait]
impl WalletSigner for MockWalletSigner {
    fn address(&self) -> &str {
        &self.address
    }

    async fn sign_message(&self, _message: &str) -> Result<String> {
        Ok(self.signature.clone())
    }
}
