use serde::Serialize;

use crate::derive::{CategoryFilter, CategoryTotals, Summary, TypeFilter};
use crate::model::{Money, Transaction};

#[derive(Debug, Clone, Serialize)]
pub struct TransactionListData {
    pub type_filter: TypeFilter,
    pub category_filter: CategoryFilter,
    pub total: usize,
    pub rows: Vec<Transaction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub transaction_count: usize,
    #[serde(flatten)]
    pub summary: Summary,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub totals: CategoryTotals,
    pub max_total: Money,
    pub has_expenses: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddData {
    pub transaction: Transaction,
    pub summary: Summary,
}

#[derive(Debug, Clone, Serialize)]
pub struct RemoveData {
    pub id: i64,
    pub removed: bool,
    pub transaction: Option<Transaction>,
    pub summary: Summary,
}

/// Everything the single-page view shows at once.
#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    pub transactions: TransactionListData,
    pub summary: SummaryData,
    pub chart: ChartData,
}
