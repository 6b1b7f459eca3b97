use std::io;

use serde_json::Value;
use tally_client::model::Money;

use super::format::{key_value_rows, money_field};

pub fn render_summary(data: &Value) -> io::Result<String> {
    let mut lines = vec!["Summary".to_string(), String::new()];
    lines.extend(summary_rows(data));
    Ok(lines.join("\n"))
}

/// Income, expense, and balance rows; shared with the add/remove confirmations.
pub fn summary_rows(data: &Value) -> Vec<String> {
    let mut entries = Vec::new();
    if let Some(count) = data.get("transaction_count").and_then(Value::as_u64) {
        entries.push(("Transactions:", count.to_string()));
    }
    entries.push((
        "Total income:",
        money_field(data, "total_income").format_currency(),
    ));
    entries.push((
        "Total expenses:",
        money_field(data, "total_expenses").format_currency(),
    ));
    entries.push(("Balance:", render_balance(money_field(data, "balance"))));

    key_value_rows(&entries, 2)
}

fn render_balance(balance: Money) -> String {
    if balance.is_negative() {
        format!("{} (deficit)", balance.format_currency())
    } else {
        balance.format_currency()
    }
}
