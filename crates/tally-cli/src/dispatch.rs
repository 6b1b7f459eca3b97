use tally_client::commands;
use tally_client::validate::TransactionInput;
use tally_client::{ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Add {
            description,
            amount,
            kind,
            category,
            ..
        } => commands::add::run(TransactionInput {
            description: description.clone(),
            amount: amount.clone(),
            kind: kind.clone(),
            category: category.clone(),
        }),
        Commands::Remove { id, .. } => commands::remove::run(*id),
        Commands::List { kind, category, .. } => commands::list::run(*kind, *category),
        Commands::Summary { .. } => commands::summary::run(),
        Commands::Chart { .. } => commands::chart::run(),
        Commands::Report { kind, category, .. } => commands::report::run(*kind, *category),
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::parse_from;

    use super::dispatch;

    #[test]
    fn add_rejects_invalid_input_before_touching_the_ledger() {
        let cases: [(&[&str], &str); 4] = [
            (&["tally", "add", "   ", "5"], "invalid_argument"),
            (&["tally", "add", "Lunch", "-5"], "invalid_amount"),
            (&["tally", "add", "Lunch", "abc"], "invalid_amount"),
            (
                &["tally", "add", "Lunch", "5", "--type", "refund"],
                "invalid_transaction_type",
            ),
        ];

        for (args, expected_code) in cases {
            let parsed = parse_from(args);
            assert!(parsed.is_ok());
            if let Ok(cli) = parsed {
                let response = dispatch(&cli);
                assert!(response.is_err());
                if let Err(error) = response {
                    assert_eq!(error.code, expected_code, "args: {args:?}");
                }
            }
        }
    }

    #[test]
    fn add_rejects_unknown_category() {
        let parsed = parse_from(["tally", "add", "Lunch", "5", "--category", "rent"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            let response = dispatch(&cli);
            assert!(matches!(response, Err(ref error) if error.code == "invalid_category"));
        }
    }
}
