use std::collections::BTreeSet;
use std::fmt;

use chrono::{
    NaiveDate,
    NaiveDateTime,
    SecondsFormat,
    Utc,
};
use rand::Rng;
use rand::distr::Alphanumeric;
use tracing::{
    info,
    warn,
};

use crate::config::{
    AppConfig,
    DrawPolicy,
    Language,
};
use crate::reading::{
    HistoryEntry,
    HistoryLog,
    Reading,
};
use crate::storage::{
    KeyValueStore,
    keys,
};
use crate::token_uri;
use crate::wallet::{
    ContractCall,
    TxStatus,
    WalletConnector,
    WalletError,
};

const MINT_FUNCTION: &str = "mintNFT";
const NONCE_LEN: usize = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NoReading,
    Drawing,
    Revealed,
}

#[derive(Debug)]
pub enum SessionError {
    Wallet(WalletError),
    EmptyAddress,
    DrawInProgress,
    DrawLimitReached { limit: u32 },
    ResetBudgetExhausted { limit: u32 },
    AlreadySubmitted { index: usize },
    IndexOutOfRange { index: usize, len: usize },
    ContractNotConfigured,
    TransactionFailed { tx_hash: String },
    TransactionUnconfirmed { tx_hash: String },
    Internal(anyhow::Error),
}

impl SessionError {
    pub fn user_message(&self, language: Language) -> String {
        match (self, language) {
            (Self::Wallet(error), _) => error.user_message(language),
            (Self::EmptyAddress, Language::Zh) => "请先连接钱包".to_string(),
            (Self::EmptyAddress, Language::En) => "Connect a wallet first".to_string(),
            (Self::DrawInProgress, Language::Zh) => "正在抽牌中，请稍候".to_string(),
            (Self::DrawInProgress, Language::En) => "A draw is already in progress".to_string(),
            (Self::DrawLimitReached { .. }, Language::Zh) => "今日抽牌次数已用完".to_string(),
            (Self::DrawLimitReached { .. }, Language::En) => "No draws left today".to_string(),
            (Self::ResetBudgetExhausted { .. }, Language::Zh) => {
                "今日重置次数已用完".to_string()
            }
            (Self::ResetBudgetExhausted { .. }, Language::En) => "No resets left today".to_string(),
            (Self::AlreadySubmitted { .. }, Language::Zh) => "该运势已经提交过了".to_string(),
            (Self::AlreadySubmitted { .. }, Language::En) => {
                "This reading has already been submitted".to_string()
            }
            (Self::IndexOutOfRange { .. }, Language::Zh) => "无效的卡牌序号".to_string(),
            (Self::IndexOutOfRange { .. }, Language::En) => "Invalid card index".to_string(),
            (Self::ContractNotConfigured, Language::Zh) => {
                "合约地址未配置，无法提交运势".to_string()
            }
            (Self::ContractNotConfigured, Language::En) => {
                "Contract address is not configured".to_string()
            }
            (Self::TransactionFailed { .. }, Language::Zh) => {
                "交易失败，请检查网络连接和合约状态".to_string()
            }
            (Self::TransactionFailed { .. }, Language::En) => {
                "Transaction failed, check the network and contract state".to_string()
            }
            (Self::TransactionUnconfirmed { .. }, Language::Zh) => {
                "交易尚未确认，请稍后查看".to_string()
            }
            (Self::TransactionUnconfirmed { .. }, Language::En) => {
                "Transaction not yet confirmed, check back later".to_string()
            }
            (Self::Internal(error), Language::Zh) => format!("操作失败: {error}"),
            (Self::Internal(error), Language::En) => format!("Operation failed: {error}"),
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wallet(error) => write!(f, "wallet error: {error}"),
            Self::EmptyAddress => write!(f, "wallet address is empty"),
            Self::DrawInProgress => write!(f, "a draw is already in progress"),
            Self::DrawLimitReached { limit } => {
                write!(f, "daily draw limit of {limit} reached")
            }
            Self::ResetBudgetExhausted { limit } => {
                write!(f, "daily reset budget of {limit} exhausted")
            }
            Self::AlreadySubmitted { index } => {
                write!(f, "reading {index} was already submitted")
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for {len} readings")
            }
            Self::ContractNotConfigured => write!(f, "contract address is not configured"),
            Self::TransactionFailed { tx_hash } => write!(f, "transaction {tx_hash} failed"),
            Self::TransactionUnconfirmed { tx_hash } => {
                write!(f, "transaction {tx_hash} is still pending")
            }
            Self::Internal(error) => write!(f, "internal error: {error}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Wallet(error) => Some(error),
            _ => None,
        }
    }
}

impl From<WalletError> for SessionError {
    fn from(error: WalletError) -> Self {
        Self::Wallet(error)
    }
}

/// Per-wallet divination state machine over an injected store and wallet.
///
/// `&mut self` receivers serialize operations, so at most one draw or
/// submission is in flight per session by construction.
pub struct ReadingSession<S, W> {
    config: AppConfig,
    store: S,
    wallet: W,
    address: String,
    session_date: NaiveDate,
    phase: Phase,
    readings: Vec<Reading>,
    current: Option<usize>,
    submitted: BTreeSet<usize>,
    history: HistoryLog,
    resets_used: u32,
    last_tx_hash: Option<String>,
}

impl<S, W> ReadingSession<S, W>
where
    S: KeyValueStore,
    W: WalletConnector,
{
    pub fn new(config: AppConfig, store: S, wallet: W) -> Result<Self, SessionError> {
        Self::new_at(config, store, wallet, Utc::now().date_naive())
    }

    /// Builds a session pinned to `date` for the date-scoped storage keys.
    /// Prior state is restored leniently: anything malformed is discarded
    /// with a warning, never an error.
    pub fn new_at(
        config: AppConfig,
        store: S,
        wallet: W,
        date: NaiveDate,
    ) -> Result<Self, SessionError> {
        let address = wallet.address().to_string();
        if address.is_empty() {
            return Err(SessionError::EmptyAddress);
        }

        let mut session = Self {
            config,
            store,
            wallet,
            address,
            session_date: date,
            phase: Phase::NoReading,
            readings: Vec::new(),
            current: None,
            submitted: BTreeSet::new(),
            history: HistoryLog::new(),
            resets_used: 0,
            last_tx_hash: None,
        };
        session.restore();
        Ok(session)
    }

    fn restore(&mut self) {
        match self.store.get(&self.daily_key()) {
            Ok(Some(raw)) => self.readings = Reading::list_from_raw(&raw),
            Ok(None) => {}
            Err(error) => warn!(%error, "failed to load stored readings"),
        }
        if !self.readings.is_empty() {
            self.phase = Phase::Revealed;
            self.current = Some(self.readings.len() - 1);
        }

        match self.store.get(&keys::history(&self.address)) {
            Ok(Some(raw)) => self.history = HistoryLog::from_raw_json(&raw),
            Ok(None) => {}
            Err(error) => warn!(%error, "failed to load history"),
        }

        match self.store.get(&self.submitted_key()) {
            Ok(Some(raw)) => {
                self.submitted = serde_json::from_str(&raw).unwrap_or_default();
            }
            Ok(None) => {}
            Err(error) => warn!(%error, "failed to load submitted set"),
        }
        self.submitted.retain(|&index| index < self.readings.len());

        match self.store.get(&keys::transaction_hash(&self.address)) {
            Ok(hash) => self.last_tx_hash = hash,
            Err(error) => warn!(%error, "failed to load last transaction hash"),
        }

        if let DrawPolicy::DailyLimit { .. } = self.config.policy {
            match self
                .store
                .get(&keys::reset_count(&self.address, self.session_date))
            {
                Ok(Some(raw)) => self.resets_used = raw.parse().unwrap_or(0),
                Ok(None) => {}
                Err(error) => warn!(%error, "failed to load reset count"),
            }
        }
    }

    /// Draws a card at the current instant. See [`Self::draw_at`].
    pub async fn draw(&mut self) -> Result<&Reading, SessionError> {
        let now = Utc::now();
        self.draw_at(now.naive_utc(), now.timestamp_millis()).await
    }

    /// Signs a dated nonce message, runs the deterministic selector for the
    /// given instant, persists the drawn list, and reveals the card after the
    /// configured delay. On a persistence failure the draw is rolled back.
    pub async fn draw_at(
        &mut self,
        at: NaiveDateTime,
        epoch_millis: i64,
    ) -> Result<&Reading, SessionError> {
        if self.phase == Phase::Drawing {
            return Err(SessionError::DrawInProgress);
        }
        if let DrawPolicy::DailyLimit { draws_per_day, .. } = self.config.policy {
            if self.readings.len() as u32 >= draws_per_day {
                return Err(SessionError::DrawLimitReached {
                    limit: draws_per_day,
                });
            }
        }

        let message = self.divination_message(at);
        self.wallet.sign_message(&message).await?;

        let previous_phase = self.phase;
        self.phase = Phase::Drawing;

        let reading = Reading::generate(&self.address, at, epoch_millis);
        info!(
            card = reading.card.name_en.as_str(),
            reversed = reading.orientation.is_reversed(),
            "card drawn"
        );
        self.readings.push(reading);
        if let Err(error) = self.persist_readings() {
            self.readings.pop();
            self.phase = previous_phase;
            return Err(SessionError::Internal(error));
        }

        if !self.config.reveal_delay.is_zero() {
            tokio::time::sleep(self.config.reveal_delay).await;
        }

        self.phase = Phase::Revealed;
        self.current = Some(self.readings.len() - 1);
        Ok(&self.readings[self.readings.len() - 1])
    }

    /// Mints the reading at `index` as an NFT and records it in history.
    /// Rejections (bad index, duplicate, missing contract) leave all state
    /// untouched.
    pub async fn submit(&mut self, index: usize) -> Result<String, SessionError> {
        if index >= self.readings.len() {
            return Err(SessionError::IndexOutOfRange {
                index,
                len: self.readings.len(),
            });
        }
        if self.submitted.contains(&index) {
            return Err(SessionError::AlreadySubmitted { index });
        }
        if !self.config.contract_configured() {
            return Err(SessionError::ContractNotConfigured);
        }

        let reading = self.readings[index].clone();
        let metadata = token_uri::metadata_for(&reading, &self.config);
        let uri = token_uri::token_uri(&metadata).map_err(SessionError::Internal)?;

        let call = ContractCall {
            contract_address: self.config.contract_address.clone(),
            function: MINT_FUNCTION.to_string(),
            args: vec![uri],
            value: self.config.mint_price_wei,
        };
        let tx_hash = self.wallet.write_contract(&call).await?;
        info!(tx_hash = tx_hash.as_str(), "mint transaction sent");

        match self.wallet.wait_for_receipt(&tx_hash).await? {
            TxStatus::Confirmed => {}
            TxStatus::Failed => return Err(SessionError::TransactionFailed { tx_hash }),
            TxStatus::Pending => return Err(SessionError::TransactionUnconfirmed { tx_hash }),
        }

        self.submitted.insert(index);
        let entry = HistoryEntry {
            id: self.next_history_id(),
            timestamp: Utc::now(),
            transaction_hash: Some(tx_hash.clone()),
            reading,
        };
        self.history.record(entry);
        self.last_tx_hash = Some(tx_hash.clone());

        if let Err(error) = self.persist_after_submit() {
            warn!(%error, "submission confirmed but persisting state failed");
            return Err(SessionError::Internal(error));
        }
        Ok(tx_hash)
    }

    /// Clears the current reading so another card can be drawn. Under the
    /// daily-limit policy this consumes one reset from the budget.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        if let DrawPolicy::DailyLimit { resets_per_day, .. } = self.config.policy {
            if self.resets_used >= resets_per_day {
                return Err(SessionError::ResetBudgetExhausted {
                    limit: resets_per_day,
                });
            }
            self.resets_used += 1;
            if let Err(error) = self.store.put(
                &keys::reset_count(&self.address, self.session_date),
                &self.resets_used.to_string(),
            ) {
                self.resets_used -= 1;
                return Err(SessionError::Internal(error));
            }
        }
        self.current = None;
        self.phase = Phase::NoReading;
        Ok(())
    }

    /// Points the session at another drawn card. Out-of-range indexes are an
    /// error and change nothing.
    pub fn switch_card(&mut self, index: usize) -> Result<&Reading, SessionError> {
        if index >= self.readings.len() {
            return Err(SessionError::IndexOutOfRange {
                index,
                len: self.readings.len(),
            });
        }
        self.current = Some(index);
        self.phase = Phase::Revealed;
        Ok(&self.readings[index])
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn current_reading(&self) -> Option<&Reading> {
        self.current.map(|index| &self.readings[index])
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn is_submitted(&self, index: usize) -> bool {
        self.submitted.contains(&index)
    }

    pub fn submitted(&self) -> &BTreeSet<usize> {
        &self.submitted
    }

    pub fn last_transaction_hash(&self) -> Option<&str> {
        self.last_tx_hash.as_deref()
    }

    pub fn last_transaction_url(&self) -> Option<String> {
        self.last_tx_hash.as_deref().map(|hash| self.config.tx_url(hash))
    }

    fn divination_message(&self, at: NaiveDateTime) -> String {
        let nonce: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(NONCE_LEN)
            .map(char::from)
            .collect();
        format!(
            "Tarot Divination Request\nWallet: {}\nDate: {}\nNonce: {}",
            self.address,
            at.and_utc().to_rfc3339_opts(SecondsFormat::Millis, true),
            nonce
        )
    }

    fn daily_key(&self) -> String {
        match self.config.policy {
            DrawPolicy::Unlimited => keys::daily_readings(&self.address),
            DrawPolicy::DailyLimit { .. } => {
                keys::daily_readings_for(&self.address, self.session_date)
            }
        }
    }

    fn submitted_key(&self) -> String {
        match self.config.policy {
            DrawPolicy::Unlimited => keys::submitted(&self.address),
            DrawPolicy::DailyLimit { .. } => keys::submitted_for(&self.address, self.session_date),
        }
    }

    fn next_history_id(&self) -> String {
        let base = Utc::now().timestamp_millis().to_string();
        let mut id = base.clone();
        let mut suffix = 0;
        while self.history.entries().iter().any(|entry| entry.id == id) {
            suffix += 1;
            id = format!("{base}_{suffix}");
        }
        id
    }

    fn persist_readings(&mut self) -> crate::Result<()> {
        let json = serde_json::to_string(&self.readings)?;
        self.store.put(&self.daily_key(), &json)
    }

    fn persist_after_submit(&mut self) -> crate::Result<()> {
        let history = self.history.to_json()?;
        self.store.put(&keys::history(&self.address), &history)?;
        let submitted = serde_json::to_string(&self.submitted)?;
        self.store.put(&self.submitted_key(), &submitted)?;
        if let Some(hash) = self.last_tx_hash.clone() {
            self.store.put(&keys::transaction_hash(&self.address), &hash)?;
        }
        Ok(())
    }
}
