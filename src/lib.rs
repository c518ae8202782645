pub mod cards;
pub mod config;
pub mod fortune;
pub mod reading;
pub mod selector;
pub mod session;
pub mod sled_store;
pub mod storage;
pub mod test_helpers;
pub mod token_uri;
pub mod wallet;

pub use cards::{
    MAJOR_ARCANA,
    Orientation,
    TarotCard,
};
pub use config::{
    AppConfig,
    DrawPolicy,
    Language,
};
pub use reading::{
    HistoryEntry,
    HistoryLog,
    Reading,
};
pub use session::{
    Phase,
    ReadingSession,
    SessionError,
};
pub use storage::{
    InMemoryStore,
    KeyValueStore,
};
pub use wallet::{
    WalletConnector,
    WalletError,
    WalletErrorKind,
};

pub type Result<T, E = anyhow::Error> = std::result::Result<T, E>;
