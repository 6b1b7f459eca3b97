use std::path::Path;

use crate::ClientResult;
use crate::commands::common::open_ledger;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::RemoveData;
use crate::derive::summarize;

#[derive(Debug, Default)]
pub struct RemoveOptions<'a> {
    pub id: i64,
    pub home_override: Option<&'a Path>,
}

pub fn run(id: i64) -> ClientResult<SuccessEnvelope> {
    run_with_options(RemoveOptions {
        id,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: RemoveOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let mut ledger = open_ledger(options.home_override)?;
    let removed = ledger.remove(options.id)?;
    let data = RemoveData {
        id: options.id,
        removed: removed.is_some(),
        transaction: removed,
        summary: summarize(ledger.all()),
    };

    success("remove", data)
}
