use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

use crate::model::{Category, TransactionType};

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `tally {cmd} --help` for usage."),
            None => "Run `tally --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn empty_description() -> Self {
        Self::invalid_argument_with_recovery(
            "Please enter a valid description and amount: description must not be empty.",
            vec![
                "Quote multi-word descriptions: `tally add \"Weekly groceries\" 42.15`."
                    .to_string(),
            ],
        )
        .with_data(json!({ "field": "description" }))
    }

    pub fn invalid_amount(received: &str, detail: &str) -> Self {
        Self::new(
            "invalid_amount",
            &format!("Please enter a valid description and amount: {detail}"),
            vec![
                "Use a positive number no larger than 1000000000000 (e.g. 42.15).".to_string(),
                "Record money going out with `--type expense`, not a negative amount."
                    .to_string(),
            ],
        )
        .with_data(json!({
            "field": "amount",
            "received": received,
        }))
    }

    pub fn invalid_transaction_type(received: &str) -> Self {
        let expected = TransactionType::ALL
            .iter()
            .map(|kind| kind.as_str())
            .collect::<Vec<_>>();
        Self::new(
            "invalid_transaction_type",
            &format!("Transaction type `{received}` is not recognized."),
            vec![format!("Use one of: {}.", expected.join(", "))],
        )
        .with_data(json!({
            "field": "type",
            "received": received,
            "expected": expected,
        }))
    }

    pub fn invalid_category(received: &str) -> Self {
        let expected = Category::ALL
            .iter()
            .map(|category| category.as_str())
            .collect::<Vec<_>>();
        Self::new(
            "invalid_category",
            &format!("Category `{received}` is not recognized."),
            vec![format!("Use one of: {}.", expected.join(", "))],
        )
        .with_data(json!({
            "field": "category",
            "received": received,
            "expected": expected,
        }))
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }

    pub fn ledger_init_permission_denied(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_init_permission_denied",
            &format!("Cannot initialize ledger at `{location}`: {detail}"),
            vec![format!(
                "Grant write access to `{location}` or set `TALLY_HOME` to a writable directory."
            )],
        )
    }

    pub fn ledger_locked(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_locked",
            &format!("Ledger database is locked at `{location}`."),
            vec![
                format!("Close other processes using `{location}` so the lock is released."),
                "Retry the command.".to_string(),
            ],
        )
    }

    pub fn ledger_corrupt(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_corrupt",
            &format!("Ledger database appears corrupt at `{location}`."),
            vec![format!(
                "Replace `{location}` with a valid Tally ledger file or restore from backup."
            )],
        )
    }

    pub fn migration_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "migration_failed",
            &format!("Ledger migration failed at `{location}`: {detail}"),
            vec!["Resolve conflicting schema objects referenced in the error details.".to_string()],
        )
    }

    pub fn ledger_init_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_init_failed",
            &format!("Ledger initialization failed at `{location}`: {detail}"),
            Vec::new(),
        )
    }

    /// Failures caused by the environment or the ledger file rather than by
    /// what the user typed.
    pub fn is_internal(&self) -> bool {
        self.code.starts_with("internal_")
            || matches!(
                self.code.as_str(),
                "ledger_init_permission_denied"
                    | "ledger_locked"
                    | "ledger_corrupt"
                    | "migration_failed"
                    | "ledger_init_failed"
            )
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::ClientError;

    #[test]
    fn invalid_category_lists_every_expected_value() {
        let error = ClientError::invalid_category("groceries");
        assert_eq!(error.code, "invalid_category");
        assert!(error.message.contains("groceries"));
        assert_eq!(
            error.recovery_steps,
            vec![
                "Use one of: food, transport, entertainment, utilities, shopping, other."
                    .to_string()
            ]
        );
    }

    #[test]
    fn ledger_errors_are_internal_and_input_errors_are_not() {
        assert!(ClientError::ledger_locked(Path::new("/tmp/ledger.db")).is_internal());
        assert!(ClientError::internal_serialization("boom").is_internal());
        assert!(!ClientError::empty_description().is_internal());
        assert!(!ClientError::invalid_amount("-1", "amount must be positive.").is_internal());
    }

    #[test]
    fn command_hint_is_attached_as_data() {
        let error = ClientError::invalid_argument_for_command("bad", Some("list"));
        assert_eq!(
            error.recovery_steps,
            vec!["Run `tally list --help` for usage.".to_string()]
        );
        assert!(error.data.is_some());
        if let Some(data) = error.data {
            assert_eq!(data["command_hint"], "list");
        }
    }
}
