/*
[INPUT]:  Wallet key material
[OUTPUT]: Wallet identities and message signers
[POS]:    Auth layer - who is acting and how requests are signed
[UPDATE]: When adding wallet types
*/

pub mod evm_wallet;
pub mod wallet;

pub use evm_wallet::EvmWalletSigner;
pub use wallet::{Identity, MockWalletSigner, WalletSigner};
