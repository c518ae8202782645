use std::path::Path;

use anyhow::Context;
use sled::{
    Db,
    Tree,
};

use crate::Result;
use crate::storage::KeyValueStore;

const READINGS_TREE: &str = "readings";

/// sled-backed [`KeyValueStore`]. Writes flush before returning so a crash
/// after a successful `put` cannot lose the record.
pub struct SledStore {
    _db: Db,
    tree: Tree,
}

impl SledStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = sled::open(path.as_ref())
            .with_context(|| format!("opening sled db at {}", path.as_ref().display()))?;
        let tree = db
            .open_tree(READINGS_TREE)
            .context("opening readings tree")?;
        Ok(Self { _db: db, tree })
    }
}

impl KeyValueStore for SledStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .tree
            .get(key.as_bytes())
            .with_context(|| format!("reading key {key}"))?;
        value
            .map(|bytes| {
                String::from_utf8(bytes.to_vec())
                    .with_context(|| format!("key {key} holds non-utf8 data"))
            })
            .transpose()
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        self.tree
            .insert(key.as_bytes(), value.as_bytes())
            .with_context(|| format!("writing key {key}"))?;
        self.tree.flush().context("flushing after write")?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.tree
            .remove(key.as_bytes())
            .with_context(|| format!("removing key {key}"))?;
        self.tree.flush().context("flushing after remove")?;
        Ok(())
    }
}

#[allow(non_snake_case)]
#[cfg(test)]
mod tests {
    use tempdir::TempDir;

    use super::*;

    #[test]
    fn sut__put_then_get_returns_value() {
        // given
        let dir = TempDir::new("sled_store_test").unwrap();
        let mut sut = SledStore::open(dir.path()).unwrap();

        // when
        sut.put("tarot_daily_0xfeed", "[{}]").unwrap();

        // then
        assert_eq!(
            sut.get("tarot_daily_0xfeed").unwrap(),
            Some("[{}]".to_string())
        );
    }

    #[test]
    fn sut__get_missing_key_returns_none() {
        // given
        let dir = TempDir::new("sled_store_test").unwrap();
        let sut = SledStore::open(dir.path()).unwrap();

        // then
        assert_eq!(sut.get("absent").unwrap(), None);
    }

    #[test]
    fn sut__remove_deletes_value() {
        // given
        let dir = TempDir::new("sled_store_test").unwrap();
        let mut sut = SledStore::open(dir.path()).unwrap();
        sut.put("key", "value").unwrap();

        // when
        sut.remove("key").unwrap();

        // then
        assert_eq!(sut.get("key").unwrap(), None);
    }

    #[test]
    fn sut__values_survive_reopen() {
        // given
        let dir = TempDir::new("sled_store_test").unwrap();
        {
            let mut sut = SledStore::open(dir.path()).unwrap();
            sut.put("key", "value").unwrap();
        }

        // when
        let sut = SledStore::open(dir.path()).unwrap();

        // then
        assert_eq!(sut.get("key").unwrap(), Some("value".to_string()));
    }
}
