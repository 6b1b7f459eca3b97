use std::path::Path;

use crate::ClientResult;
use crate::commands::common::{chart_data, list_data, open_ledger, summary_data};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::ReportData;
use crate::derive::{CategoryFilter, TypeFilter};

#[derive(Debug, Default)]
pub struct ReportOptions<'a> {
    pub type_filter: TypeFilter,
    pub category_filter: CategoryFilter,
    pub home_override: Option<&'a Path>,
}

pub fn run(
    type_filter: TypeFilter,
    category_filter: CategoryFilter,
) -> ClientResult<SuccessEnvelope> {
    run_with_options(ReportOptions {
        type_filter,
        category_filter,
        home_override: None,
    })
}

/// Filters apply to the transaction list only; the summary and chart always
/// cover the whole ledger.
#[doc(hidden)]
pub fn run_with_options(options: ReportOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let ledger = open_ledger(options.home_override)?;
    let transactions = ledger.all();
    let data = ReportData {
        transactions: list_data(transactions, options.type_filter, options.category_filter),
        summary: summary_data(transactions),
        chart: chart_data(transactions),
    };

    success("report", data)
}
