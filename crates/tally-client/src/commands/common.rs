use std::path::Path;

use crate::ClientResult;
use crate::contracts::types::{ChartData, SummaryData, TransactionListData};
use crate::derive::{self, CategoryFilter, TypeFilter};
use crate::ledger::Ledger;
use crate::model::Transaction;
use crate::setup::ensure_initialized_with_home_override;
use crate::storage::SqliteKeyValueStore;

pub(crate) fn open_ledger(
    home_override: Option<&Path>,
) -> ClientResult<Ledger<SqliteKeyValueStore>> {
    let setup = ensure_initialized_with_home_override(home_override)?;
    let store = SqliteKeyValueStore::open(&setup)?;
    Ledger::open(store)
}

pub(crate) fn list_data(
    transactions: &[Transaction],
    type_filter: TypeFilter,
    category_filter: CategoryFilter,
) -> TransactionListData {
    let rows = derive::filter(transactions, type_filter, category_filter);
    TransactionListData {
        type_filter,
        category_filter,
        total: rows.len(),
        rows,
    }
}

pub(crate) fn summary_data(transactions: &[Transaction]) -> SummaryData {
    SummaryData {
        transaction_count: transactions.len(),
        summary: derive::summarize(transactions),
    }
}

pub(crate) fn chart_data(transactions: &[Transaction]) -> ChartData {
    let totals = derive::aggregate_by_category(transactions);
    ChartData {
        max_total: totals.max(),
        has_expenses: !totals.is_empty(),
        totals,
    }
}
