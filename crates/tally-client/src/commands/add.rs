use std::path::Path;

use crate::ClientResult;
use crate::commands::common::open_ledger;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::AddData;
use crate::derive::summarize;
use crate::validate::{TransactionInput, validate_new_transaction};

#[derive(Debug, Default)]
pub struct AddOptions<'a> {
    pub input: TransactionInput,
    pub home_override: Option<&'a Path>,
}

pub fn run(input: TransactionInput) -> ClientResult<SuccessEnvelope> {
    run_with_options(AddOptions {
        input,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: AddOptions<'_>) -> ClientResult<SuccessEnvelope> {
    // Reject bad input before the ledger file is touched.
    let new_transaction = validate_new_transaction(&options.input)?;

    let mut ledger = open_ledger(options.home_override)?;
    let transaction = ledger.add(new_transaction)?;
    let data = AddData {
        transaction,
        summary: summarize(ledger.all()),
    };

    success("add", data)
}
