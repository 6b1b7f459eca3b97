use std::path::Path;

use crate::ClientResult;
use crate::commands::common::{open_ledger, summary_data};
use crate::contracts::envelope::{SuccessEnvelope, success};

pub fn run() -> ClientResult<SuccessEnvelope> {
    run_with_home_override(None)
}

#[doc(hidden)]
pub fn run_with_home_override(home_override: Option<&Path>) -> ClientResult<SuccessEnvelope> {
    let ledger = open_ledger(home_override)?;
    success("summary", summary_data(ledger.all()))
}
