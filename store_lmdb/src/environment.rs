//! LMDB environment setup and shared row codecs.

use std::ops::Bound;
use std::path::Path;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};
use serde::de::DeserializeOwned;
use serde::Serialize;

use seed_types::{AccountName, SymbolCode};

use crate::LmdbError;

pub(crate) type RawDb = Database<Bytes, Bytes>;

/// Wraps the LMDB environment and the four table databases.
pub struct LmdbEnvironment {
    env: Env,
    pub(crate) stats_db: RawDb,
    pub(crate) balances_db: RawDb,
    pub(crate) stakes_db: RawDb,
    pub(crate) refunds_db: RawDb,
}

impl LmdbEnvironment {
    pub const MAX_DBS: u32 = 4;
    pub const DEFAULT_MAP_SIZE: usize = 1 << 30;

    /// Open or create an LMDB environment at the given directory.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path).map_err(|e| LmdbError::Io(e.to_string()))?;

        // SAFETY: the environment is opened once per process for this path and
        // the backing file is not modified by anything other than LMDB itself.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(Self::MAX_DBS)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let stats_db: RawDb = env.create_database(&mut wtxn, Some("stat"))?;
        let balances_db: RawDb = env.create_database(&mut wtxn, Some("accounts"))?;
        let stakes_db: RawDb = env.create_database(&mut wtxn, Some("stake"))?;
        let refunds_db: RawDb = env.create_database(&mut wtxn, Some("refund"))?;
        wtxn.commit()?;

        tracing::info!(path = %path.display(), map_size, "opened LMDB token store");

        Ok(Self {
            env,
            stats_db,
            balances_db,
            stakes_db,
            refunds_db,
        })
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    /// Read and decode a single row.
    pub(crate) fn get_row<R: DeserializeOwned>(
        &self,
        db: RawDb,
        key: &[u8],
    ) -> Result<Option<R>, LmdbError> {
        let rtxn = self.env.read_txn()?;
        let row = match db.get(&rtxn, key)? {
            Some(bytes) => Some(decode(bytes)?),
            None => None,
        };
        Ok(row)
    }

    /// Decode every row scoped to `owner`, in symbol code order.
    pub(crate) fn owner_rows<R: DeserializeOwned>(
        &self,
        db: RawDb,
        owner: &AccountName,
    ) -> Result<Vec<R>, LmdbError> {
        let rtxn = self.env.read_txn()?;
        let prefix = owner_prefix(owner);
        let mut upper = prefix.clone();
        increment_prefix(&mut upper);
        let bounds = (
            Bound::Included(prefix.as_slice()),
            Bound::Excluded(upper.as_slice()),
        );
        let mut rows = Vec::new();
        for entry in db.range(&rtxn, &bounds)? {
            let (_, value) = entry?;
            rows.push(decode(value)?);
        }
        Ok(rows)
    }

    /// Decode every `(owner, code)`-keyed row accepted by `keep`, ordered by owner.
    pub(crate) fn scan_rows<R: DeserializeOwned>(
        &self,
        db: RawDb,
        keep: impl Fn(&AccountName, &SymbolCode) -> bool,
    ) -> Result<Vec<(AccountName, R)>, LmdbError> {
        let rtxn = self.env.read_txn()?;
        let mut rows = Vec::new();
        for entry in db.iter(&rtxn)? {
            let (key, value) = entry?;
            let (owner, code) = split_row_key(key)?;
            if keep(&owner, &code) {
                rows.push((owner, decode(value)?));
            }
        }
        // `user11:` sorts before `user1:` in raw key order.
        rows.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(rows)
    }

    /// Decode every row of an unscoped table, in key order.
    pub(crate) fn scan_values<R: DeserializeOwned>(&self, db: RawDb) -> Result<Vec<R>, LmdbError> {
        let rtxn = self.env.read_txn()?;
        let mut rows = Vec::new();
        for entry in db.iter(&rtxn)? {
            let (_, value) = entry?;
            rows.push(decode(value)?);
        }
        Ok(rows)
    }
}

/// Scoped row key: `owner ':' code`. Neither part can contain `:`.
pub(crate) fn row_key(owner: &AccountName, code: &SymbolCode) -> Vec<u8> {
    let mut key = Vec::with_capacity(owner.as_bytes().len() + 1 + code.as_bytes().len());
    key.extend_from_slice(owner.as_bytes());
    key.push(b':');
    key.extend_from_slice(code.as_bytes());
    key
}

/// Key prefix shared by all rows of one owner: `owner ':'`.
pub(crate) fn owner_prefix(owner: &AccountName) -> Vec<u8> {
    let mut prefix = Vec::with_capacity(owner.as_bytes().len() + 1);
    prefix.extend_from_slice(owner.as_bytes());
    prefix.push(b':');
    prefix
}

/// Smallest key greater than every key starting with `prefix`.
pub(crate) fn increment_prefix(prefix: &mut Vec<u8>) {
    while let Some(last) = prefix.pop() {
        if last < u8::MAX {
            prefix.push(last + 1);
            return;
        }
    }
}

pub(crate) fn split_row_key(key: &[u8]) -> Result<(AccountName, SymbolCode), LmdbError> {
    let corrupt = || LmdbError::Corruption(String::from_utf8_lossy(key).into_owned());
    let text = std::str::from_utf8(key).map_err(|_| corrupt())?;
    let (owner, code) = text.split_once(':').ok_or_else(corrupt)?;
    let owner = AccountName::new(owner).map_err(|_| corrupt())?;
    let code = SymbolCode::new(code).map_err(|_| corrupt())?;
    Ok((owner, code))
}

pub(crate) fn encode<R: Serialize>(row: &R) -> Result<Vec<u8>, LmdbError> {
    bincode::serialize(row).map_err(|e| LmdbError::Serialization(e.to_string()))
}

pub(crate) fn decode<R: DeserializeOwned>(bytes: &[u8]) -> Result<R, LmdbError> {
    bincode::deserialize(bytes).map_err(|e| LmdbError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_key_round_trips() {
        let owner = AccountName::new("user1").unwrap();
        let code = SymbolCode::new("SEED").unwrap();
        let key = row_key(&owner, &code);
        assert_eq!(key, b"user1:SEED");
        assert_eq!(split_row_key(&key).unwrap(), (owner, code));
    }

    #[test]
    fn test_owner_prefix_bounds() {
        let mut upper = owner_prefix(&AccountName::new("user1").unwrap());
        assert_eq!(upper, b"user1:");
        increment_prefix(&mut upper);
        assert_eq!(upper, b"user1;");
        assert!(b"user1:TREE".as_slice() < upper.as_slice());
        assert!(b"user11:SEED".as_slice() < b"user1:".as_slice());

        let mut saturated = vec![b'a', u8::MAX];
        increment_prefix(&mut saturated);
        assert_eq!(saturated, b"b");
    }

    #[test]
    fn test_garbage_key_is_corruption() {
        assert!(matches!(split_row_key(b"no-separator"), Err(LmdbError::Corruption(_))));
        assert!(matches!(split_row_key(b"user1:seed"), Err(LmdbError::Corruption(_))));
    }
}
