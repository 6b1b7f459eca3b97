pub mod commands;
pub mod contracts;
pub mod derive;
pub mod error;
pub mod ledger;
pub mod migrations;
pub mod model;
pub mod setup;
pub mod state;
pub mod storage;
pub mod validate;

pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{ClientError, ClientResult};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
