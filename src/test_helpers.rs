//! Scripted collaborators for session tests.

use std::collections::VecDeque;
use std::time::Duration;

use chrono::{
    NaiveDate,
    NaiveDateTime,
};

use crate::config::{
    AppConfig,
    DrawPolicy,
};
use crate::wallet::{
    ContractCall,
    TxStatus,
    WalletConnector,
    WalletError,
};

pub const TEST_ADDRESS: &str = "0xABCDEF0123456789";
pub const TEST_CONTRACT: &str = "0x1111111111111111111111111111111111111111";

/// Config with a configured contract and no reveal delay, so draws complete
/// immediately under test.
pub fn test_config() -> AppConfig {
    AppConfig {
        contract_address: TEST_CONTRACT.to_string(),
        reveal_delay: Duration::ZERO,
        policy: DrawPolicy::Unlimited,
        ..AppConfig::default()
    }
}

/// The instant whose seed selects card 5 (The Hierophant) reversed for
/// [`TEST_ADDRESS`].
pub fn hierophant_instant() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 8, 25)
        .unwrap()
        .and_hms_opt(0, 0, 12)
        .unwrap()
}

/// Wallet double driven by scripted outcomes. Unscripted operations succeed
/// with deterministic counter-derived values. Signed messages and contract
/// calls are recorded for assertions.
pub struct ScriptedWallet {
    address: String,
    sign_results: VecDeque<Result<String, WalletError>>,
    write_results: VecDeque<Result<String, WalletError>>,
    receipt_results: VecDeque<Result<TxStatus, WalletError>>,
    pub signed_messages: Vec<String>,
    pub calls: Vec<ContractCall>,
    counter: u64,
}

impl ScriptedWallet {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            sign_results: VecDeque::new(),
            write_results: VecDeque::new(),
            receipt_results: VecDeque::new(),
            signed_messages: Vec::new(),
            calls: Vec::new(),
            counter: 0,
        }
    }

    pub fn script_sign(&mut self, result: Result<String, WalletError>) {
        self.sign_results.push_back(result);
    }

    pub fn script_write(&mut self, result: Result<String, WalletError>) {
        self.write_results.push_back(result);
    }

    pub fn script_receipt(&mut self, result: Result<TxStatus, WalletError>) {
        self.receipt_results.push_back(result);
    }

    fn next_counter(&mut self) -> u64 {
        self.counter += 1;
        self.counter
    }
}

impl WalletConnector for ScriptedWallet {
    fn address(&self) -> &str {
        &self.address
    }

    async fn sign_message(&mut self, message: &str) -> Result<String, WalletError> {
        self.signed_messages.push(message.to_string());
        match self.sign_results.pop_front() {
            Some(result) => result,
            None => Ok(format!("0xsignature{:04}", self.next_counter())),
        }
    }

    async fn write_contract(&mut self, call: &ContractCall) -> Result<String, WalletError> {
        self.calls.push(call.clone());
        match self.write_results.pop_front() {
            Some(result) => result,
            None => Ok(format!("0xtxhash{:04}", self.next_counter())),
        }
    }

    async fn wait_for_receipt(&mut self, _tx_hash: &str) -> Result<TxStatus, WalletError> {
        match self.receipt_results.pop_front() {
            Some(result) => result,
            None => Ok(TxStatus::Confirmed),
        }
    }
}
