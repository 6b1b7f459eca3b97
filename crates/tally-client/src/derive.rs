//! Pure derivations over a ledger snapshot: filtered views, totals, and
//! per-category expense aggregates.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::ClientError;
use crate::model::{Category, Money, Transaction, TransactionType};

const ALL_SENTINEL: &str = "all";

/// A filter that either passes everything or keeps a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter<T> {
    All,
    Only(T),
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Filter::All
    }
}

pub type TypeFilter = Filter<TransactionType>;
pub type CategoryFilter = Filter<Category>;

impl<T: PartialEq> Filter<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(expected) => expected == value,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str(ALL_SENTINEL),
            Filter::Only(value) => value.fmt(f),
        }
    }
}

impl<T> FromStr for Filter<T>
where
    T: FromStr<Err = ClientError>,
{
    type Err = ClientError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case(ALL_SENTINEL) {
            return Ok(Filter::All);
        }
        value.parse::<T>().map(Filter::Only)
    }
}

impl<T: fmt::Display> Serialize for Filter<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Transactions matching both filters, in ledger order.
pub fn filter(
    transactions: &[Transaction],
    type_filter: TypeFilter,
    category_filter: CategoryFilter,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| {
            type_filter.matches(&transaction.kind) && category_filter.matches(&transaction.category)
        })
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    pub total_income: Money,
    pub total_expenses: Money,
    pub balance: Money,
}

pub fn summarize(transactions: &[Transaction]) -> Summary {
    let total_income = total_for(transactions, TransactionType::Income);
    let total_expenses = total_for(transactions, TransactionType::Expense);
    Summary {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
    }
}

fn total_for(transactions: &[Transaction], kind: TransactionType) -> Money {
    transactions
        .iter()
        .filter(|transaction| transaction.kind == kind)
        .map(|transaction| transaction.amount)
        .sum()
}

/// Expense totals for every category, zeros included, in category order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryTotals(BTreeMap<Category, Money>);

impl CategoryTotals {
    pub fn get(&self, category: Category) -> Money {
        self.0.get(&category).copied().unwrap_or(Money::ZERO)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, Money)> + '_ {
        self.0.iter().map(|(category, total)| (*category, *total))
    }

    /// Largest total; the denominator for proportional bar widths.
    pub fn max(&self) -> Money {
        self.0.values().copied().max().unwrap_or(Money::ZERO)
    }

    /// True when no category has any spending.
    pub fn is_empty(&self) -> bool {
        self.0.values().all(|total| total.is_zero())
    }
}

pub fn aggregate_by_category(transactions: &[Transaction]) -> CategoryTotals {
    let mut totals = Category::ALL
        .into_iter()
        .map(|category| (category, Money::ZERO))
        .collect::<BTreeMap<_, _>>();

    for transaction in transactions.iter().filter(|transaction| transaction.is_expense()) {
        let slot = totals.entry(transaction.category).or_insert(Money::ZERO);
        *slot = *slot + transaction.amount;
    }

    CategoryTotals(totals)
}
