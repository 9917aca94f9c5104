/*
[INPUT]:  Validated CardConfig, notifier and clipboard handles
[OUTPUT]: Wired CardServices (wallet identity + task service)
[POS]:    Wiring layer - turns configuration into live collaborators
[UPDATE]: When adding wallet kinds or task service backends
*/

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use taskcard_adapter::{
    Clipboard, EvmWalletSigner, Identity, MemoryLedger, MemoryTaskService, Notifier, RelayConfig,
    RelayTaskService, TaskService, WalletSigner,
};
use tracing::{info, warn};

use crate::card::CardServices;
use crate::config::{CardConfig, ServiceKind, WalletConfig};

/// Identity known only by address. It can read but never sign.
#[derive(Debug, Clone)]
pub struct WatchOnlyIdentity {
    address: String,
}

impl WatchOnlyIdentity {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

impl Identity for WatchOnlyIdentity {
    fn current_address(&self) -> String {
        self.address.clone()
    }
}

/// Acting wallet resolved from configuration
#[derive(Clone)]
pub struct Wallet {
    pub identity: Arc<dyn Identity>,
    pub signer: Option<Arc<dyn WalletSigner>>,
}

impl Wallet {
    pub fn from_config(config: &WalletConfig) -> anyhow::Result<Self> {
        if let Some(key) = config.private_key.as_deref() {
            let signer = Arc::new(EvmWalletSigner::new(key).context("load wallet private key")?);
            if let Some(address) = config.address.as_deref() {
                if !address.eq_ignore_ascii_case(signer.address()) {
                    warn!(
                        configured = address,
                        derived = signer.address(),
                        "wallet.address does not match the private key; using the derived address"
                    );
                }
            }
            return Ok(Self {
                identity: signer.clone(),
                signer: Some(signer as Arc<dyn WalletSigner>),
            });
        }

        match config.address.as_deref() {
            Some(address) => Ok(Self {
                identity: Arc::new(WatchOnlyIdentity::new(address)),
                signer: None,
            }),
            None => bail!("wallet needs either private_key or address"),
        }
    }
}

/// Build the task service selected by `service.kind`
pub fn build_service(config: &CardConfig, wallet: &Wallet) -> anyhow::Result<Arc<dyn TaskService>> {
    match config.service.kind {
        ServiceKind::Memory => {
            let mut ledger = MemoryLedger::new().with_min_quorum(config.memory.min_quorum);
            for task in &config.memory.tasks {
                ledger = ledger.with_task(task.clone());
            }
            for leader in &config.memory.leaders {
                ledger = ledger.with_leader(leader.as_str());
            }
            for member in &config.memory.members {
                ledger = ledger.with_member(member.as_str());
            }
            info!(
                tasks = config.memory.tasks.len(),
                min_quorum = config.memory.min_quorum,
                "using in-memory task ledger"
            );
            Ok(Arc::new(MemoryTaskService::new(wallet.identity.clone(), ledger)))
        }
        ServiceKind::Relay => {
            let url = config
                .service
                .relay_url
                .as_deref()
                .context("service.relay_url is required for the relay service")?;
            let signer = wallet
                .signer
                .clone()
                .context("relay service needs a signing wallet")?;
            let relay_config = RelayConfig {
                timeout: Duration::from_secs(config.service.timeout_secs),
                ..RelayConfig::default()
            };
            let service = RelayTaskService::with_config(url, signer, relay_config)
                .with_context(|| format!("connect relay {url}"))?;
            info!(relay = %service.base_url(), "using relay task service");
            Ok(Arc::new(service))
        }
    }
}

/// Resolve wallet and service, then bundle them with the UI-side handles
pub fn build_services(
    config: &CardConfig,
    notifier: Arc<dyn Notifier>,
    clipboard: Arc<dyn Clipboard>,
) -> anyhow::Result<CardServices> {
    config.validate()?;
    let wallet = Wallet::from_config(&config.wallet)?;
    let service = build_service(config, &wallet)?;
    info!(address = %wallet.identity.current_address(), task_id = %config.task_id, "card services ready");

    Ok(CardServices {
        service,
        identity: wallet.identity,
        notifier,
        clipboard,
    })
}
