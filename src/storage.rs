use std::collections::HashMap;
use std::sync::{
    Arc,
    Mutex,
};

use crate::Result;

/// String key-value persistence seam. The session never touches a backend
/// directly; browsers used local storage here, the CLI uses sled, tests use
/// [`InMemoryStore`].
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn put(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Storage key builders. Every key is scoped by wallet address; the
/// date-scoped variants carry a `%Y-%m-%d` date for the daily-limit policy.
pub mod keys {
    use chrono::NaiveDate;

    fn date_part(date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    pub fn daily_readings(address: &str) -> String {
        format!("tarot_daily_{address}")
    }

    pub fn daily_readings_for(address: &str, date: NaiveDate) -> String {
        format!("tarot_daily_{address}_{}", date_part(date))
    }

    pub fn history(address: &str) -> String {
        format!("tarot_history_{address}")
    }

    pub fn submitted(address: &str) -> String {
        format!("tarot_submitted_{address}")
    }

    pub fn submitted_for(address: &str, date: NaiveDate) -> String {
        format!("tarot_submitted_{address}_{}", date_part(date))
    }

    pub fn reset_count(address: &str, date: NaiveDate) -> String {
        format!("tarot_reset_count_{address}_{}", date_part(date))
    }

    pub fn transaction_hash(address: &str) -> String {
        format!("tarot_transaction_hash_{address}")
    }
}

/// Map-backed store. Clones share the same map so a test can hold a handle
/// and inspect what the session wrote.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Arc<Mutex<HashMap<String, String>>> {
        self.entries.clone()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        entries.remove(key);
        Ok(())
    }
}
