/*
[INPUT]:  YAML configuration file
[OUTPUT]: Parsed and validated card viewer configuration
[POS]:    Configuration layer - wallet, task service and demo ledger setup
[UPDATE]: When adding new configuration options
*/

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use taskcard_adapter::{Task, TaskId, TaskStatus};

/// Address used by the demo wallet when nothing is configured
pub const DEMO_ADDRESS: &str = "0x00000000000000000000000000000000000000a1";

/// Top-level configuration for the card viewer
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CardConfig {
    /// Task shown by the card
    #[serde(default = "default_task_id")]
    pub task_id: TaskId,
    /// Page URL prefix used by the share action
    #[serde(default = "default_share_base_url")]
    pub share_base_url: String,
    #[serde(default)]
    pub wallet: WalletConfig,
    #[serde(default)]
    pub service: ServiceConfig,
    /// Seed for the in-memory service
    #[serde(default)]
    pub memory: MemorySeedConfig,
}

/// Acting wallet: a private key, or a bare address (read-only identity)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WalletConfig {
    #[serde(default)]
    pub private_key: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    #[default]
    Memory,
    Relay,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub kind: ServiceKind,
    /// Relay gateway base URL (relay only)
    #[serde(default)]
    pub relay_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            kind: ServiceKind::default(),
            relay_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MemorySeedConfig {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub leaders: Vec<String>,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default = "default_min_quorum")]
    pub min_quorum: u64,
}

impl Default for MemorySeedConfig {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            leaders: Vec::new(),
            members: Vec::new(),
            min_quorum: default_min_quorum(),
        }
    }
}

fn default_task_id() -> TaskId {
    TaskId(1)
}

fn default_share_base_url() -> String {
    "https://app.example.org".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_min_quorum() -> u64 {
    1
}

impl CardConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_yaml_str(&content).with_context(|| format!("parse config {}", path.display()))
    }

    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// `<config dir>/taskcard/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("taskcard").join("config.yaml"))
    }

    /// Self-contained configuration: in-memory service, demo wallet as leader
    pub fn demo() -> Self {
        let task = Task {
            id: TaskId(1),
            status: TaskStatus::Created,
            reward: Decimal::new(250, 0),
            title: "Publish the governance handbook".to_string(),
            metadata: "ipfs://bafybeihandbook/cover.png".to_string(),
            creator_role: 1,
            authorized_roles: vec![1, 2],
            assignee: String::new(),
            end_date: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap_or_default(),
        };

        Self {
            task_id: task.id,
            share_base_url: default_share_base_url(),
            wallet: WalletConfig {
                private_key: None,
                address: Some(DEMO_ADDRESS.to_string()),
            },
            service: ServiceConfig::default(),
            memory: MemorySeedConfig {
                tasks: vec![task],
                leaders: vec![DEMO_ADDRESS.to_string()],
                members: vec![DEMO_ADDRESS.to_string()],
                min_quorum: 1,
            },
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.share_base_url.trim().is_empty() {
            bail!("share_base_url must not be empty");
        }
        if self.wallet.private_key.is_none() && self.wallet.address.is_none() {
            bail!("wallet needs either private_key or address");
        }

        match self.service.kind {
            ServiceKind::Memory => {
                if !self.memory.tasks.iter().any(|task| task.id == self.task_id) {
                    bail!("task {} is not seeded in memory.tasks", self.task_id);
                }
                if self.memory.min_quorum == 0 {
                    bail!("memory.min_quorum must be at least 1");
                }
            }
            ServiceKind::Relay => {
                let url = self
                    .service
                    .relay_url
                    .as_deref()
                    .context("service.relay_url is required for the relay service")?;
                url::Url::parse(url).with_context(|| format!("invalid relay_url {url}"))?;
                if self.wallet.private_key.is_none() {
                    bail!("relay service signs requests and needs wallet.private_key");
                }
            }
        }
        Ok(())
    }
}
