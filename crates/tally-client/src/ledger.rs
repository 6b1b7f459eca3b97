//! The authoritative, insertion-ordered list of transactions and the only
//! writer of persisted state.

use chrono::Local;

use crate::ClientResult;
use crate::model::{NewTransaction, Transaction};
use crate::storage::{KeyValueStore, load_transactions, save_transactions};

/// Short date in the `M/D/YYYY` form shown next to each transaction.
pub const DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Source of "now" for ids and creation dates.
pub trait Clock {
    fn now_millis(&self) -> i64;
    fn today(&self) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Local::now().timestamp_millis()
    }

    fn today(&self) -> String {
        Local::now().format(DATE_FORMAT).to_string()
    }
}

#[derive(Debug)]
pub struct Ledger<S, C = SystemClock> {
    store: S,
    clock: C,
    transactions: Vec<Transaction>,
}

impl<S: KeyValueStore> Ledger<S, SystemClock> {
    pub fn open(store: S) -> ClientResult<Self> {
        Self::open_with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> Ledger<S, C> {
    pub fn open_with_clock(store: S, clock: C) -> ClientResult<Self> {
        let transactions = load_transactions(&store)?;
        Ok(Self {
            store,
            clock,
            transactions,
        })
    }

    /// Snapshot of every transaction in insertion order.
    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: i64) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|transaction| transaction.id == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Appends a new transaction with a fresh id and today's date, then
    /// persists the whole collection once.
    ///
    /// The collection is re-read under the write lock first, so writes made
    /// by another process since [`Ledger::open`] are kept.
    pub fn add(&mut self, new_transaction: NewTransaction) -> ClientResult<Transaction> {
        let clock = &self.clock;
        let (current, created) = self.store.with_write_lock(|store| {
            let mut current = load_transactions(store)?;
            let created = Transaction {
                id: next_id(clock.now_millis(), &current),
                description: new_transaction.description,
                amount: new_transaction.amount,
                kind: new_transaction.kind,
                category: new_transaction.category,
                date: clock.today(),
            };
            current.push(created.clone());
            save_transactions(store, &current)?;
            Ok((current, created))
        })?;

        self.transactions = current;
        tracing::info!(
            id = created.id,
            kind = %created.kind,
            category = %created.category,
            amount = %created.amount,
            "added transaction"
        );
        Ok(created)
    }

    /// Removes the transaction with `id`. An unknown id leaves the collection
    /// unchanged and returns `None`; the collection is persisted either way.
    pub fn remove(&mut self, id: i64) -> ClientResult<Option<Transaction>> {
        let (current, removed) = self.store.with_write_lock(|store| {
            let mut current = load_transactions(store)?;
            let removed = current
                .iter()
                .position(|transaction| transaction.id == id)
                .map(|index| current.remove(index));
            save_transactions(store, &current)?;
            Ok((current, removed))
        })?;

        self.transactions = current;
        match &removed {
            Some(transaction) => tracing::info!(id = transaction.id, "removed transaction"),
            None => tracing::debug!(id, "remove requested for unknown id"),
        }
        Ok(removed)
    }
}

fn next_id(now_millis: i64, existing: &[Transaction]) -> i64 {
    let floor = existing
        .iter()
        .map(|transaction| transaction.id)
        .max()
        .map_or(i64::MIN, |max_id| max_id.saturating_add(1));
    now_millis.max(floor)
}
