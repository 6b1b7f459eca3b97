use clap::{Parser, Subcommand};
use tally_client::ClientError;
use tally_client::derive::{CategoryFilter, TypeFilter};

pub fn parse_type_filter(value: &str) -> Result<TypeFilter, String> {
    value
        .parse::<TypeFilter>()
        .map_err(|error: ClientError| filter_error_text(&error))
}

pub fn parse_category_filter(value: &str) -> Result<CategoryFilter, String> {
    value
        .parse::<CategoryFilter>()
        .map_err(|error: ClientError| filter_error_text(&error))
}

fn filter_error_text(error: &ClientError) -> String {
    match error.recovery_steps.first() {
        Some(step) => format!("{} {step} `all` disables the filter.", error.message),
        None => error.message.clone(),
    }
}

/// Extended help shown after `tally add --help`.
pub const ADD_AFTER_HELP: &str = "\
Field rules:
  description (required):
    Free text. Surrounding whitespace is trimmed; it must not be empty.
    Quote descriptions with spaces: `tally add \"Weekly groceries\" 42.15`

  amount (required):
    A positive number up to 1000000000000. Amounts are kept as entered and
    shown rounded to the cent.
    Record money going out with `--type expense`, never with a negative amount.

  --type:
    income or expense (default: expense)

  --category:
    food, transport, entertainment, utilities, shopping, other (default: other)
    Categories only affect the spending chart for expenses.

Examples:
  tally add \"Paycheck\" 2500 --type income
  tally add \"Bus pass\" 30 --category transport
";

#[derive(Debug, Parser)]
#[command(
    name = "tally",
    version,
    about = "personal income and expense tracker",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record a new income or expense transaction
    #[command(after_long_help = ADD_AFTER_HELP)]
    Add {
        /// What the money was for
        description: String,
        /// Positive amount, kept as entered and shown rounded to the cent
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Transaction type: income or expense
        #[arg(long = "type", default_value = "expense")]
        kind: String,
        /// Expense category: food, transport, entertainment, utilities, shopping, other
        #[arg(long, default_value = "other")]
        category: String,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Delete a transaction by id
    Remove {
        /// The transaction id shown by `tally list`
        id: i64,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// List transactions, optionally filtered by type and category
    List {
        /// Type filter: all, income, or expense
        #[arg(long = "type", default_value = "all", value_parser = parse_type_filter)]
        kind: TypeFilter,
        /// Category filter: all or one category name
        #[arg(long, default_value = "all", value_parser = parse_category_filter)]
        category: CategoryFilter,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Show total income, total expenses, and balance
    Summary {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Show spending per category as a bar chart
    Chart {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Show the transaction list, summary, and chart together
    Report {
        /// Type filter for the transaction list: all, income, or expense
        #[arg(long = "type", default_value = "all", value_parser = parse_type_filter)]
        kind: TypeFilter,
        /// Category filter for the transaction list: all or one category name
        #[arg(long, default_value = "all", value_parser = parse_category_filter)]
        category: CategoryFilter,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Add { .. } => "add",
            Commands::Remove { .. } => "remove",
            Commands::List { .. } => "list",
            Commands::Summary { .. } => "summary",
            Commands::Chart { .. } => "chart",
            Commands::Report { .. } => "report",
        }
    }

    pub fn wants_json(&self) -> bool {
        match self {
            Commands::Add { json, .. }
            | Commands::Remove { json, .. }
            | Commands::List { json, .. }
            | Commands::Summary { json }
            | Commands::Chart { json }
            | Commands::Report { json, .. } => *json,
        }
    }
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
