#![allow(non_snake_case)]

use chrono::NaiveDate;
use tarot_oracle::cards::Orientation;
use tarot_oracle::config::DrawPolicy;
use tarot_oracle::session::{
    Phase,
    ReadingSession,
    SessionError,
};
use tarot_oracle::storage::InMemoryStore;
use tarot_oracle::test_helpers::{
    ScriptedWallet,
    TEST_ADDRESS,
    hierophant_instant,
    test_config,
};
use tarot_oracle::wallet::{
    TxStatus,
    WalletError,
    WalletErrorKind,
};
use tarot_oracle::{
    AppConfig,
    Language,
};

fn session_date() -> NaiveDate {
    hierophant_instant().date()
}

fn new_session(
    config: AppConfig,
    store: InMemoryStore,
    wallet: ScriptedWallet,
) -> ReadingSession<InMemoryStore, ScriptedWallet> {
    ReadingSession::new_at(config, store, wallet, session_date()).unwrap()
}

#[tokio::test]
async fn draw__reveals_deterministic_card_and_persists_it() {
    // given
    let store = InMemoryStore::new();
    let handle = store.clone();
    let mut session = new_session(test_config(), store, ScriptedWallet::new(TEST_ADDRESS));

    // when
    let reading = session.draw_at(hierophant_instant(), 0).await.unwrap();

    // then
    assert_eq!(reading.card.id, 5);
    assert_eq!(reading.card.name_en, "The Hierophant");
    assert_eq!(reading.orientation, Orientation::Reversed);
    assert_eq!(session.phase(), Phase::Revealed);
    assert_eq!(session.current_reading().unwrap().card.id, 5);

    let stored = handle
        .entries()
        .lock()
        .unwrap()
        .get(&format!("tarot_daily_{TEST_ADDRESS}"))
        .cloned();
    assert!(stored.unwrap().contains("The Hierophant"));
}

#[tokio::test]
async fn draw__signs_a_dated_nonce_message() {
    // given
    let mut session = new_session(
        test_config(),
        InMemoryStore::new(),
        ScriptedWallet::new(TEST_ADDRESS),
    );

    // when
    session.draw_at(hierophant_instant(), 0).await.unwrap();

    // then
    let signed = &session.wallet().signed_messages;
    assert_eq!(signed.len(), 1);
    assert!(signed[0].starts_with("Tarot Divination Request\n"));
    assert!(signed[0].contains(&format!("Wallet: {TEST_ADDRESS}")));
    assert!(signed[0].contains("Date: 2026-08-25T00:00:12.000Z"));
    assert!(signed[0].contains("Nonce: "));
}

#[tokio::test]
async fn draw__sign_rejection_leaves_no_reading() {
    // given
    let mut wallet = ScriptedWallet::new(TEST_ADDRESS);
    wallet.script_sign(Err(WalletError::from_provider_text(
        "User rejected the request.",
    )));
    let mut session = new_session(test_config(), InMemoryStore::new(), wallet);

    // when
    let error = session
        .draw_at(hierophant_instant(), 0)
        .await
        .err()
        .unwrap();

    // then
    match &error {
        SessionError::Wallet(wallet_error) => {
            assert_eq!(wallet_error.kind, WalletErrorKind::UserRejected);
        }
        other => panic!("expected wallet error, got {other}"),
    }
    assert_eq!(error.user_message(Language::Zh), "用户取消了操作");
    assert_eq!(session.phase(), Phase::NoReading);
    assert!(session.readings().is_empty());
}

#[tokio::test]
async fn submit__records_history_and_submitted_set() {
    // given
    let mut session = new_session(
        test_config(),
        InMemoryStore::new(),
        ScriptedWallet::new(TEST_ADDRESS),
    );
    session.draw_at(hierophant_instant(), 0).await.unwrap();

    // when
    let tx_hash = session.submit(0).await.unwrap();

    // then
    assert!(session.is_submitted(0));
    assert_eq!(session.submitted().len(), 1);
    assert_eq!(session.last_transaction_hash(), Some(tx_hash.as_str()));
    assert_eq!(
        session.last_transaction_url().unwrap(),
        format!("https://explorer.irys.xyz/tx/{tx_hash}")
    );

    let entry = &session.history().entries()[0];
    assert_eq!(entry.transaction_hash.as_deref(), Some(tx_hash.as_str()));
    assert_eq!(entry.reading.card.id, 5);
}

#[tokio::test]
async fn submit__sends_mint_call_with_token_uri_and_price() {
    // given
    let store = InMemoryStore::new();
    let handle = store.clone();
    let mut session = new_session(test_config(), store, ScriptedWallet::new(TEST_ADDRESS));
    session.draw_at(hierophant_instant(), 0).await.unwrap();

    // when
    session.submit(0).await.unwrap();

    // then
    let call = &session.wallet().calls[0];
    assert_eq!(call.function, "mintNFT");
    assert_eq!(call.contract_address, session.config().contract_address);
    assert_eq!(call.value, session.config().mint_price_wei);
    assert!(call.args[0].starts_with("data:application/json;base64,"));

    // and the persisted submitted set names index 0
    let submitted = handle
        .entries()
        .lock()
        .unwrap()
        .get(&format!("tarot_submitted_{TEST_ADDRESS}"))
        .cloned();
    assert_eq!(submitted.unwrap(), "[0]");
}

#[tokio::test]
async fn submit__duplicate_is_rejected_without_state_change() {
    // given
    let mut session = new_session(
        test_config(),
        InMemoryStore::new(),
        ScriptedWallet::new(TEST_ADDRESS),
    );
    session.draw_at(hierophant_instant(), 0).await.unwrap();
    session.submit(0).await.unwrap();
    let history_before = session.history().len();

    // when
    let error = session.submit(0).await.err().unwrap();

    // then
    assert!(matches!(error, SessionError::AlreadySubmitted { index: 0 }));
    assert_eq!(session.history().len(), history_before);
    assert_eq!(session.submitted().len(), 1);
}

#[tokio::test]
async fn submit__out_of_range_index_is_rejected() {
    // given
    let mut session = new_session(
        test_config(),
        InMemoryStore::new(),
        ScriptedWallet::new(TEST_ADDRESS),
    );

    // when
    let error = session.submit(3).await.err().unwrap();

    // then
    assert!(matches!(
        error,
        SessionError::IndexOutOfRange { index: 3, len: 0 }
    ));
}

#[tokio::test]
async fn submit__requires_configured_contract() {
    // given
    let config = AppConfig {
        contract_address: String::new(),
        ..test_config()
    };
    let mut session = new_session(config, InMemoryStore::new(), ScriptedWallet::new(TEST_ADDRESS));
    session.draw_at(hierophant_instant(), 0).await.unwrap();

    // when
    let error = session.submit(0).await.err().unwrap();

    // then
    assert!(matches!(error, SessionError::ContractNotConfigured));
    assert!(!session.is_submitted(0));
}

#[tokio::test]
async fn submit__failed_receipt_is_an_error_and_nothing_is_recorded() {
    // given
    let mut wallet = ScriptedWallet::new(TEST_ADDRESS);
    wallet.script_receipt(Ok(TxStatus::Failed));
    let mut session = new_session(test_config(), InMemoryStore::new(), wallet);
    session.draw_at(hierophant_instant(), 0).await.unwrap();

    // when
    let error = session.submit(0).await.err().unwrap();

    // then
    assert!(matches!(error, SessionError::TransactionFailed { .. }));
    assert!(!session.is_submitted(0));
    assert!(session.history().is_empty());
    assert_eq!(session.last_transaction_hash(), None);
}

#[tokio::test]
async fn session__round_trips_through_a_reloaded_store() {
    // given
    let store = InMemoryStore::new();
    let reloaded_store = store.clone();
    let mut session = new_session(test_config(), store, ScriptedWallet::new(TEST_ADDRESS));
    session.draw_at(hierophant_instant(), 0).await.unwrap();
    let tx_hash = session.submit(0).await.unwrap();
    let original = session.current_reading().unwrap().clone();
    drop(session);

    // when
    let restored = new_session(
        test_config(),
        reloaded_store,
        ScriptedWallet::new(TEST_ADDRESS),
    );

    // then
    assert_eq!(restored.phase(), Phase::Revealed);
    assert_eq!(restored.readings().len(), 1);
    assert_eq!(restored.current_reading().unwrap(), &original);
    assert!(restored.is_submitted(0));
    assert_eq!(restored.history().len(), 1);
    assert_eq!(restored.last_transaction_hash(), Some(tx_hash.as_str()));
}

#[tokio::test]
async fn history__caps_at_ten_newest_first() {
    // given
    let mut session = new_session(
        test_config(),
        InMemoryStore::new(),
        ScriptedWallet::new(TEST_ADDRESS),
    );

    // when: eleven draw+submit cycles at distinct seconds
    for i in 0..11u32 {
        let at = session_date().and_hms_opt(10, 0, i).unwrap();
        session.draw_at(at, i64::from(i)).await.unwrap();
        session.submit(i as usize).await.unwrap();
    }

    // then
    assert_eq!(session.history().len(), 10);
    let newest = &session.history().entries()[0];
    let expected = &session.readings()[10];
    assert_eq!(&newest.reading, expected);
}

#[tokio::test]
async fn switch_card__out_of_range_changes_nothing() {
    // given
    let mut session = new_session(
        test_config(),
        InMemoryStore::new(),
        ScriptedWallet::new(TEST_ADDRESS),
    );
    session.draw_at(hierophant_instant(), 0).await.unwrap();
    let before = session.current_reading().unwrap().clone();

    // when
    let error = session.switch_card(5).err().unwrap();

    // then
    assert!(matches!(
        error,
        SessionError::IndexOutOfRange { index: 5, len: 1 }
    ));
    assert_eq!(session.current_reading().unwrap(), &before);
    assert_eq!(session.phase(), Phase::Revealed);
}

#[tokio::test]
async fn switch_card__navigates_between_draws() {
    // given
    let mut session = new_session(
        test_config(),
        InMemoryStore::new(),
        ScriptedWallet::new(TEST_ADDRESS),
    );
    session.draw_at(hierophant_instant(), 0).await.unwrap();
    let second_at = session_date().and_hms_opt(10, 0, 0).unwrap();
    session.draw_at(second_at, 0).await.unwrap();

    // when
    let reading = session.switch_card(0).unwrap().clone();

    // then
    assert_eq!(reading.card.id, 5);
    assert_eq!(session.current_reading().unwrap(), &reading);
}

#[tokio::test]
async fn reset__clears_current_reading_but_keeps_drawn_list() {
    // given
    let mut session = new_session(
        test_config(),
        InMemoryStore::new(),
        ScriptedWallet::new(TEST_ADDRESS),
    );
    session.draw_at(hierophant_instant(), 0).await.unwrap();

    // when
    session.reset().unwrap();

    // then
    assert_eq!(session.phase(), Phase::NoReading);
    assert!(session.current_reading().is_none());
    assert_eq!(session.readings().len(), 1);
}

#[tokio::test]
async fn daily_limit__draws_and_resets_are_budgeted() {
    // given
    let config = AppConfig {
        policy: DrawPolicy::DailyLimit {
            draws_per_day: 2,
            resets_per_day: 2,
        },
        ..test_config()
    };
    let mut session = new_session(config, InMemoryStore::new(), ScriptedWallet::new(TEST_ADDRESS));

    // when: two draws succeed, the third is refused
    for i in 0..2u32 {
        let at = session_date().and_hms_opt(10, 0, i).unwrap();
        session.draw_at(at, 0).await.unwrap();
        session.reset().unwrap();
    }
    let third = session
        .draw_at(session_date().and_hms_opt(10, 0, 3).unwrap(), 0)
        .await;

    // then
    assert!(matches!(
        third.err().unwrap(),
        SessionError::DrawLimitReached { limit: 2 }
    ));
    let reset_error = session.reset().err().unwrap();
    assert!(matches!(
        reset_error,
        SessionError::ResetBudgetExhausted { limit: 2 }
    ));
    assert_eq!(
        reset_error.user_message(Language::En),
        "No resets left today"
    );
}

#[tokio::test]
async fn daily_limit__reset_budget_survives_reload() {
    // given
    let config = AppConfig {
        policy: DrawPolicy::DailyLimit {
            draws_per_day: 2,
            resets_per_day: 1,
        },
        ..test_config()
    };
    let store = InMemoryStore::new();
    let reloaded_store = store.clone();
    let mut session = new_session(config.clone(), store, ScriptedWallet::new(TEST_ADDRESS));
    session.draw_at(hierophant_instant(), 0).await.unwrap();
    session.reset().unwrap();
    drop(session);

    // when
    let mut restored = new_session(config, reloaded_store, ScriptedWallet::new(TEST_ADDRESS));

    // then
    assert!(matches!(
        restored.reset().err().unwrap(),
        SessionError::ResetBudgetExhausted { limit: 1 }
    ));
}

#[tokio::test]
async fn new__rejects_an_empty_wallet_address() {
    // when
    let result = ReadingSession::new_at(
        test_config(),
        InMemoryStore::new(),
        ScriptedWallet::new(""),
        session_date(),
    );

    // then
    assert!(matches!(result.err().unwrap(), SessionError::EmptyAddress));
}

#[tokio::test]
async fn new__malformed_stored_state_yields_empty_collections() {
    // given
    let mut store = InMemoryStore::new();
    use tarot_oracle::storage::KeyValueStore;
    store
        .put(&format!("tarot_daily_{TEST_ADDRESS}"), "not json at all")
        .unwrap();
    store
        .put(&format!("tarot_history_{TEST_ADDRESS}"), "{\"nope\": 1}")
        .unwrap();
    store
        .put(&format!("tarot_submitted_{TEST_ADDRESS}"), "???")
        .unwrap();

    // when
    let session = new_session(test_config(), store, ScriptedWallet::new(TEST_ADDRESS));

    // then
    assert!(session.readings().is_empty());
    assert!(session.history().is_empty());
    assert!(session.submitted().is_empty());
    assert_eq!(session.phase(), Phase::NoReading);
}
