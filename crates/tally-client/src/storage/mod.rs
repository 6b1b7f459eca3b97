//! Persistence of the transaction collection as one serialized blob in a
//! key-value store.

mod memory;
mod sqlite;

use std::collections::HashSet;

use serde_json::Value;

use crate::model::Transaction;
use crate::{ClientError, ClientResult};

pub use memory::MemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

/// Fixed key the whole ledger is stored under.
pub const TRANSACTIONS_KEY: &str = "transactions";

/// Durable string-to-string storage owned by a single ledger.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>>;

    /// Replaces the value stored under `key` in one write.
    fn put(&mut self, key: &str, value: &str) -> ClientResult<()>;

    /// Runs `operation` with exclusive write access to the store. Writes made
    /// by `operation` are kept only if it returns `Ok`.
    fn with_write_lock<T, F>(&mut self, operation: F) -> ClientResult<T>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> ClientResult<T>;
}

/// Reads the persisted collection. Missing or unreadable state is an empty
/// ledger; only failures of the store itself are errors.
pub fn load_transactions<S: KeyValueStore>(store: &S) -> ClientResult<Vec<Transaction>> {
    let Some(raw) = store.get(TRANSACTIONS_KEY)? else {
        tracing::debug!("no stored transactions; starting with an empty ledger");
        return Ok(Vec::new());
    };

    let transactions = decode_transactions(&raw);
    tracing::debug!(count = transactions.len(), "loaded transactions");
    Ok(transactions)
}

/// Serializes the full collection and overwrites the stored value.
pub fn save_transactions<S: KeyValueStore>(
    store: &mut S,
    transactions: &[Transaction],
) -> ClientResult<()> {
    let encoded = serde_json::to_string(transactions)
        .map_err(|error| ClientError::internal_serialization(&error.to_string()))?;
    store.put(TRANSACTIONS_KEY, &encoded)?;
    tracing::debug!(count = transactions.len(), "saved transactions");
    Ok(())
}

/// Decodes a stored blob, dropping anything that could not have been written
/// by a valid `add`: the order of the surviving entries is kept.
pub fn decode_transactions(raw: &str) -> Vec<Transaction> {
    let entries = match serde_json::from_str::<Vec<Value>>(raw) {
        Ok(entries) => entries,
        Err(error) => {
            tracing::warn!(%error, "stored transactions are not a JSON array; treating as empty");
            return Vec::new();
        }
    };

    let mut seen_ids = HashSet::new();
    let mut transactions = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let transaction = match serde_json::from_value::<Transaction>(entry) {
            Ok(transaction) => transaction,
            Err(error) => {
                tracing::warn!(index, %error, "skipping malformed stored transaction");
                continue;
            }
        };

        if let Some(reason) = rejection_reason(&transaction, &seen_ids) {
            tracing::warn!(index, id = transaction.id, reason, "skipping stored transaction");
            continue;
        }

        seen_ids.insert(transaction.id);
        transactions.push(transaction);
    }

    transactions
}

fn rejection_reason(transaction: &Transaction, seen_ids: &HashSet<i64>) -> Option<&'static str> {
    if !transaction.amount.is_positive() {
        return Some("amount is not positive");
    }
    if transaction.amount.exceeds_limit() {
        return Some("amount exceeds the limit");
    }
    if transaction.description.trim().is_empty() {
        return Some("description is empty");
    }
    if seen_ids.contains(&transaction.id) {
        return Some("duplicate id");
    }
    None
}
