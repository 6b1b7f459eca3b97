use std::path::Path;

use crate::ClientResult;
use crate::commands::common::{list_data, open_ledger};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::derive::{CategoryFilter, TypeFilter};

#[derive(Debug, Default)]
pub struct ListOptions<'a> {
    pub type_filter: TypeFilter,
    pub category_filter: CategoryFilter,
    pub home_override: Option<&'a Path>,
}

pub fn run(
    type_filter: TypeFilter,
    category_filter: CategoryFilter,
) -> ClientResult<SuccessEnvelope> {
    run_with_options(ListOptions {
        type_filter,
        category_filter,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: ListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let ledger = open_ledger(options.home_override)?;
    let data = list_data(ledger.all(), options.type_filter, options.category_filter);
    success("list", data)
}
