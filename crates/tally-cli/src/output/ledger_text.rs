use std::io;

use serde_json::Value;

use super::format::{
    Align, Column, key_value_rows, money_field, render_table, signed_amount, str_field,
    terminal_width,
};
use super::summary_text::summary_rows;

const EMPTY_LIST: &str = "No transactions found";

const LIST_COLUMNS: [Column<'static>; 5] = [
    Column {
        name: "ID",
        align: Align::Left,
        shrinks: false,
    },
    Column {
        name: "Date",
        align: Align::Left,
        shrinks: false,
    },
    Column {
        name: "Description",
        align: Align::Left,
        shrinks: true,
    },
    Column {
        name: "Category",
        align: Align::Left,
        shrinks: false,
    },
    Column {
        name: "Amount",
        align: Align::Right,
        shrinks: false,
    },
];

pub fn render_list(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    if rows.is_empty() {
        return Ok(EMPTY_LIST.to_string());
    }

    let mut lines = vec![
        format!(
            "Transactions ({} shown, type: {}, category: {})",
            rows.len(),
            str_field(data, "type_filter"),
            str_field(data, "category_filter"),
        ),
        String::new(),
    ];

    let table_rows = rows.iter().map(list_row).collect::<Vec<_>>();
    lines.extend(render_table(&LIST_COLUMNS, &table_rows, terminal_width()));

    Ok(lines.join("\n"))
}

pub fn render_add(data: &Value) -> io::Result<String> {
    let transaction = data.get("transaction").unwrap_or(&Value::Null);
    let mut lines = vec![format!(
        "Added {}: {}",
        str_field(transaction, "type"),
        str_field(transaction, "description")
    )];
    lines.push(String::new());
    lines.extend(transaction_rows(transaction));
    lines.push(String::new());
    lines.extend(summary_rows(data.get("summary").unwrap_or(&Value::Null)));

    Ok(lines.join("\n"))
}

pub fn render_remove(data: &Value) -> io::Result<String> {
    let id = data.get("id").and_then(Value::as_i64).unwrap_or_default();
    let removed = data
        .get("removed")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let mut lines = Vec::new();
    match data.get("transaction").filter(|value| removed && value.is_object()) {
        Some(transaction) => {
            lines.push(format!(
                "Removed transaction {id}: {}",
                str_field(transaction, "description")
            ));
            lines.push(String::new());
            lines.extend(transaction_rows(transaction));
        }
        None => {
            lines.push(format!("No transaction with id {id}. Nothing was removed."));
        }
    }
    lines.push(String::new());
    lines.extend(summary_rows(data.get("summary").unwrap_or(&Value::Null)));

    Ok(lines.join("\n"))
}

fn list_row(row: &Value) -> Vec<String> {
    vec![
        id_text(row),
        str_field(row, "date").to_string(),
        str_field(row, "description").to_string(),
        str_field(row, "category").to_string(),
        amount_text(row),
    ]
}

fn transaction_rows(transaction: &Value) -> Vec<String> {
    key_value_rows(
        &[
            ("ID:", id_text(transaction)),
            ("Amount:", amount_text(transaction)),
            ("Category:", str_field(transaction, "category").to_string()),
            ("Date:", str_field(transaction, "date").to_string()),
        ],
        2,
    )
}

fn id_text(row: &Value) -> String {
    row.get("id")
        .and_then(Value::as_i64)
        .map(|id| id.to_string())
        .unwrap_or_default()
}

fn amount_text(row: &Value) -> String {
    signed_amount(money_field(row, "amount"), str_field(row, "type") == "income")
}
