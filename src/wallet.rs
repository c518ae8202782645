use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};
use sha2::{
    Digest,
    Sha256,
};

use crate::config::Language;

/// Wallet failure categories. Collaborating wallets report these directly;
/// [`WalletErrorKind::classify`] exists only to adapt providers that surface
/// bare message strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalletErrorKind {
    UserRejected,
    InsufficientFunds,
    Network,
    ContractRevert,
    Unknown,
}

impl WalletErrorKind {
    /// Substring heuristic over raw provider text, kept for wallets that do
    /// not report structured codes.
    pub fn classify(message: &str) -> Self {
        if message.contains("User rejected")
            || message.contains("User denied")
            || message.contains("User cancelled")
        {
            Self::UserRejected
        } else if message.contains("insufficient funds") {
            Self::InsufficientFunds
        } else if message.contains("network") {
            Self::Network
        } else if message.contains("missing revert data")
            || message.contains("revert")
            || message.contains("contract")
        {
            Self::ContractRevert
        } else {
            Self::Unknown
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletError {
    pub kind: WalletErrorKind,
    pub message: String,
}

impl WalletError {
    pub fn new(kind: WalletErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Wraps raw provider text, deriving the kind from the message.
    pub fn from_provider_text(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: WalletErrorKind::classify(&message),
            message,
        }
    }

    pub fn user_message(&self, language: Language) -> String {
        match (self.kind, language) {
            (WalletErrorKind::UserRejected, Language::Zh) => "用户取消了操作".to_string(),
            (WalletErrorKind::UserRejected, Language::En) => {
                "The operation was cancelled".to_string()
            }
            (WalletErrorKind::InsufficientFunds, Language::Zh) => {
                "余额不足，无法支付交易费用".to_string()
            }
            (WalletErrorKind::InsufficientFunds, Language::En) => {
                "Insufficient balance to cover the transaction fee".to_string()
            }
            (WalletErrorKind::Network, Language::Zh) => {
                "网络连接异常，请检查网络后重试".to_string()
            }
            (WalletErrorKind::Network, Language::En) => {
                "Network error, please check your connection and retry".to_string()
            }
            (WalletErrorKind::ContractRevert, Language::Zh) => {
                "合约调用失败，请稍后重试".to_string()
            }
            (WalletErrorKind::ContractRevert, Language::En) => {
                "Contract call failed, please try again later".to_string()
            }
            (WalletErrorKind::Unknown, Language::Zh) => {
                format!("操作失败: {}", self.message)
            }
            (WalletErrorKind::Unknown, Language::En) => {
                format!("Operation failed: {}", self.message)
            }
        }
    }
}

impl fmt::Display for WalletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for WalletError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStatus {
    Confirmed,
    Pending,
    Failed,
}

/// A contract write the session asks the wallet to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    pub contract_address: String,
    pub function: String,
    pub args: Vec<String>,
    pub value: u128,
}

/// Seam to the user's wallet. Implementations talk to a browser extension, a
/// remote signer, or nothing at all ([`OfflineWallet`]).
pub trait WalletConnector {
    fn address(&self) -> &str;

    async fn sign_message(&mut self, message: &str) -> Result<String, WalletError>;

    /// Sends the contract write and returns the transaction hash.
    async fn write_contract(&mut self, call: &ContractCall) -> Result<String, WalletError>;

    async fn wait_for_receipt(&mut self, tx_hash: &str) -> Result<TxStatus, WalletError>;
}

/// Chainless wallet for local runs: signatures are sha256 digests over the
/// address and message, transaction hashes derive from the call payload, and
/// every transaction confirms immediately.
#[derive(Debug, Clone)]
pub struct OfflineWallet {
    address: String,
}

impl OfflineWallet {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }

    fn digest(&self, payload: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.address.as_bytes());
        hasher.update(payload.as_bytes());
        format!("0x{}", hex::encode(hasher.finalize()))
    }
}

impl WalletConnector for OfflineWallet {
    fn address(&self) -> &str {
        &self.address
    }

    async fn sign_message(&mut self, message: &str) -> Result<String, WalletError> {
        Ok(self.digest(message))
    }

    async fn write_contract(&mut self, call: &ContractCall) -> Result<String, WalletError> {
        let payload = format!(
            "{}:{}:{}:{}",
            call.contract_address,
            call.function,
            call.args.join(","),
            call.value
        );
        Ok(self.digest(&payload))
    }

    async fn wait_for_receipt(&mut self, _tx_hash: &str) -> Result<TxStatus, WalletError> {
        Ok(TxStatus::Confirmed)
    }
}
